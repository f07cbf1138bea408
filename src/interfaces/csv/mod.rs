//! CSV adapters used by the command line front end.

pub mod account_reader;
pub mod account_writer;
pub mod notification_writer;
pub mod operation_reader;
