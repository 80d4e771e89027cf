use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "caravan",
    about = "Caravan — offline-first record synchronization and anchoring",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Start the anchoring gateway
    Serve(ServeArgs),
    /// Create a record in the local queue (works fully offline)
    Record(RecordArgs),
    /// Upload all pending records to the gateway
    Sync(SyncArgs),
    /// Show the local queue
    Status(StatusArgs),
    /// Promote synced records the ledger confirms
    Confirm(SyncArgs),
    /// Check whether a record hash is anchored
    Verify(VerifyArgs),
}

#[derive(Args)]
pub struct ServeArgs {
    #[arg(long, default_value = "127.0.0.1:9410")]
    pub bind: String,
    #[arg(long, default_value = "256")]
    pub max_batch: usize,
}

#[derive(Args)]
pub struct RecordArgs {
    /// Opaque subject identifier (never raw identity data)
    #[arg(long)]
    pub subject: String,
    /// Logical record content
    #[arg(long)]
    pub content: String,
    #[command(flatten)]
    pub device: DeviceArgs,
}

#[derive(Args)]
pub struct SyncArgs {
    #[arg(long, default_value = "http://127.0.0.1:9410")]
    pub gateway: String,
    #[command(flatten)]
    pub device: DeviceArgs,
}

#[derive(Args)]
pub struct StatusArgs {
    #[command(flatten)]
    pub device: DeviceArgs,
}

#[derive(Args)]
pub struct VerifyArgs {
    /// Hex-encoded integrity hash
    pub hash: String,
    #[arg(long, default_value = "http://127.0.0.1:9410")]
    pub gateway: String,
}

/// Local device identity and storage.
#[derive(Args)]
pub struct DeviceArgs {
    #[arg(long, default_value = ".caravan/records.db")]
    pub store: String,
    #[arg(long, default_value = "field-device")]
    pub author: String,
    #[arg(long, default_value = "field-site")]
    pub origin: String,
}
