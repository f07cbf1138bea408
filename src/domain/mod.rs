//! Core domain: the account entity, its value objects, and the ports the
//! application layer talks through.

pub mod account;
pub mod notification;
pub mod operation;
pub mod ports;
