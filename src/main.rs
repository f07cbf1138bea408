use clap::Parser;
use miette::{IntoDiagnostic, Result};
use moneybox::application::processor::OperationProcessor;
use moneybox::application::transfer::TransferMoney;
use moneybox::application::withdraw::WithdrawMoney;
use moneybox::config::{DEFAULT_NOTIFICATION_TIMEOUT, FailurePolicy, OperationSettings};
use moneybox::domain::ports::{AccountStoreBox, AccountStoreFactory};
use moneybox::error::MoneyboxError;
use moneybox::infrastructure::in_memory::{InMemoryAccountStore, InMemoryNotificationOutbox};
use moneybox::interfaces::csv::account_reader::AccountReader;
use moneybox::interfaces::csv::account_writer::AccountWriter;
use moneybox::interfaces::csv::notification_writer::NotificationWriter;
use moneybox::interfaces::csv::operation_reader::OperationReader;
use std::fs::File;
use std::io::{self, IsTerminal};
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Operations CSV file (type, from, to, amount)
    operations: PathBuf,

    /// Accounts to open before processing (id, email, balance).
    /// Accounts that already exist in the store are left as they are.
    #[arg(long)]
    accounts: Option<PathBuf>,

    /// Path to persistent database (optional). If provided, uses RocksDB.
    #[arg(long)]
    db_path: Option<PathBuf>,

    /// What to do when persisting fails after an operation's checks passed
    #[arg(long, value_enum, default_value_t = FailurePolicy::Propagate)]
    on_persistence_failure: FailurePolicy,

    /// Only warn a transfer's sender about low funds once the recipient's
    /// pay in limit check has passed
    #[arg(long)]
    defer_funds_low_notification: bool,

    /// Give up on a notification still pending after this many milliseconds
    #[arg(long, default_value_t = DEFAULT_NOTIFICATION_TIMEOUT.as_millis() as u64)]
    notification_timeout_ms: u64,

    /// Write the notifications that were sent to this CSV file
    #[arg(long)]
    notifications: Option<PathBuf>,
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "moneybox=info".into()))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(io::stderr)
                .with_ansi(io::stderr().is_terminal()),
        )
        .init();
}

#[cfg(feature = "storage-rocksdb")]
fn store_factory(db_path: Option<PathBuf>) -> Result<AccountStoreFactory> {
    if let Some(db_path) = db_path {
        let store = moneybox::infrastructure::rocksdb::RocksDBStore::open(db_path).into_diagnostic()?;
        return Ok(Box::new(move || Box::new(store.clone()) as AccountStoreBox));
    }
    Ok(in_memory_factory())
}

#[cfg(not(feature = "storage-rocksdb"))]
fn store_factory(db_path: Option<PathBuf>) -> Result<AccountStoreFactory> {
    if db_path.is_some() {
        tracing::warn!(
            "Persistent storage requested via --db-path, but 'storage-rocksdb' feature is not enabled. Falling back to In-Memory storage."
        );
    }
    Ok(in_memory_factory())
}

fn in_memory_factory() -> AccountStoreFactory {
    let store = InMemoryAccountStore::new();
    Box::new(move || Box::new(store.clone()) as AccountStoreBox)
}

async fn open_accounts(store: &AccountStoreBox, path: PathBuf) -> Result<()> {
    let file = File::open(path).into_diagnostic()?;
    for account in AccountReader::new(file).accounts() {
        let account = match account {
            Ok(account) => account,
            Err(e) => {
                tracing::warn!(error = %e, "Error reading account");
                continue;
            }
        };

        match store.get_by_id(account.id()).await {
            Ok(_) => {
                tracing::debug!(account_id = %account.id(), "account already exists, keeping stored state")
            }
            Err(MoneyboxError::AccountNotFound(_)) => store.update(&account).await.into_diagnostic()?,
            Err(e) => return Err(e).into_diagnostic(),
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let settings = OperationSettings {
        on_persistence_failure: cli.on_persistence_failure,
        defer_funds_low_notification: cli.defer_funds_low_notification,
        notification_timeout: Duration::from_millis(cli.notification_timeout_ms),
    };
    let factory = store_factory(cli.db_path)?;
    let store = factory();
    let outbox = InMemoryNotificationOutbox::new();

    if let Some(accounts) = cli.accounts {
        open_accounts(&store, accounts).await?;
    }

    let processor = OperationProcessor::new(
        WithdrawMoney::with_settings(factory(), Box::new(outbox.clone()), settings),
        TransferMoney::with_settings(factory(), Box::new(outbox.clone()), settings),
    );

    let file = File::open(cli.operations).into_diagnostic()?;
    for operation in OperationReader::new(file).operations() {
        match operation {
            Ok(operation) => {
                if let Err(e) = processor.process(operation).await {
                    tracing::warn!(error = %e, "Operation rejected");
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "Error reading operation");
            }
        }
    }

    let sent = outbox.sent().await;
    tracing::info!(count = sent.len(), "notifications sent");
    match cli.notifications {
        Some(path) => {
            let file = File::create(path).into_diagnostic()?;
            NotificationWriter::new(file)
                .write_notifications(&sent)
                .into_diagnostic()?;
        }
        None => {
            for notification in &sent {
                tracing::info!(kind = ?notification.kind, recipient = %notification.recipient, "notification sent");
            }
        }
    }

    let accounts = store.get_all().await.into_diagnostic()?;
    let stdout = io::stdout();
    let mut writer = AccountWriter::new(stdout.lock());
    writer.write_accounts(accounts).into_diagnostic()?;

    Ok(())
}
