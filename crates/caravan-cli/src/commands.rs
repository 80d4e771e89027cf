use anyhow::Context;
use colored::Colorize;

use caravan_crypto::SigningKey;
use caravan_gateway::{Gateway, GatewayConfig, GatewayState};
use caravan_queue::{
    FileRecordStore, PassthroughEncryptor, QueueConfig, QueueManager, SyncOutcome,
};
use caravan_sync::{HttpSyncTransport, SyncTransport};
use caravan_types::{ActorId, IntegrityHash, OriginId, SubjectId};

use crate::cli::*;

pub async fn run_command(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Serve(args) => cmd_serve(args).await,
        Command::Record(args) => cmd_record(args).await,
        Command::Sync(args) => cmd_sync(args).await,
        Command::Status(args) => cmd_status(args).await,
        Command::Confirm(args) => cmd_confirm(args).await,
        Command::Verify(args) => cmd_verify(args).await,
    }
}

fn open_queue(
    device: &DeviceArgs,
    gateway: &str,
) -> anyhow::Result<QueueManager<FileRecordStore, HttpSyncTransport>> {
    let store = FileRecordStore::open(&device.store)
        .with_context(|| format!("opening record store at {}", device.store))?;
    let transport = HttpSyncTransport::new(gateway).context("building gateway transport")?;
    Ok(QueueManager::new(
        store,
        transport,
        Box::new(PassthroughEncryptor),
        SigningKey::generate(),
        QueueConfig {
            author_id: ActorId::new(device.author.clone()),
            origin_id: OriginId::new(device.origin.clone()),
        },
    ))
}

async fn cmd_serve(args: ServeArgs) -> anyhow::Result<()> {
    let config = GatewayConfig {
        bind_addr: args.bind.parse().context("parsing bind address")?,
        max_batch_size: args.max_batch,
    };
    println!(
        "{} caravan gateway on {}",
        "▶".green().bold(),
        args.bind.bold()
    );
    let gateway = Gateway::new(GatewayState::in_memory(config));
    gateway.serve().await?;
    Ok(())
}

async fn cmd_record(args: RecordArgs) -> anyhow::Result<()> {
    // Creation is fully offline; the gateway URL is only needed later.
    let queue = open_queue(&args.device, "http://127.0.0.1:9410")?;
    let record = queue
        .create_record(SubjectId::new(args.subject), args.content.as_bytes())
        .await?;
    println!(
        "{} Record saved locally. Will sync when online.",
        "✓".green().bold()
    );
    println!("  Id:   {}", record.id.to_string().yellow());
    println!("  Hash: {}", record.integrity_hash.to_hex().cyan());
    Ok(())
}

async fn cmd_sync(args: SyncArgs) -> anyhow::Result<()> {
    let queue = open_queue(&args.device, &args.gateway)?;
    match queue.sync_now().await? {
        SyncOutcome::NothingPending => {
            println!("{} Nothing pending.", "✓".green());
        }
        SyncOutcome::Completed { accepted, rejected } => {
            println!(
                "{} Sync complete: {} anchored, {} rejected.",
                "✓".green().bold(),
                accepted.to_string().bold(),
                rejected.len()
            );
            for r in rejected {
                println!("  {} {} ({:?})", "rejected:".red(), r.id, r.reason);
            }
        }
        SyncOutcome::TransportFailed { reason } => {
            println!(
                "{} Sync failed: {}. Data remains safe locally.",
                "✗".red().bold(),
                reason
            );
        }
    }
    Ok(())
}

async fn cmd_status(args: StatusArgs) -> anyhow::Result<()> {
    let queue = open_queue(&args.device, "http://127.0.0.1:9410")?;
    let records = queue.records().await?;
    let pending = queue.pending_count().await?;
    println!(
        "{} records, {} pending sync",
        records.len().to_string().bold(),
        pending.to_string().yellow()
    );
    for r in records {
        let status = match r.status {
            caravan_types::SyncStatus::Pending => "PENDING".yellow(),
            caravan_types::SyncStatus::Synced => "SYNCED".green(),
            caravan_types::SyncStatus::Verified => "VERIFIED".green().bold(),
        };
        println!("  {} {} {}", r.id.short_id().dimmed(), status, r.integrity_hash.short_hex());
    }
    Ok(())
}

async fn cmd_confirm(args: SyncArgs) -> anyhow::Result<()> {
    let queue = open_queue(&args.device, &args.gateway)?;
    let promoted = queue.confirm_anchored().await?;
    println!(
        "{} {} record(s) verified against the ledger.",
        "✓".green().bold(),
        promoted.to_string().bold()
    );
    Ok(())
}

async fn cmd_verify(args: VerifyArgs) -> anyhow::Result<()> {
    let hash = IntegrityHash::from_hex(&args.hash).context("parsing record hash")?;
    let transport = HttpSyncTransport::new(&args.gateway)?;
    let check = transport.check_anchor(&hash).await?;
    if check.valid {
        println!(
            "{} Anchored at {}",
            "✓ valid".green().bold(),
            check.anchored_at.unwrap_or_default()
        );
    } else {
        println!("{} No anchor found for this hash.", "✗ invalid".red().bold());
    }
    Ok(())
}
