use clap::Parser;
use miette::{IntoDiagnostic, Result};
use payline::application::webhook::{WebhookOutcome, WebhookProcessor};
use payline::domain::ports::{CompanyStoreBox, DocumentStoreBox, TransferStoreBox};
use payline::domain::transfer::Transfer;
use payline::infrastructure::in_memory::{
    InMemoryCompanyStore, InMemoryDocumentStore, InMemoryTransferStore,
};
use payline::interfaces::json::event_reader::EventReader;
use payline::interfaces::json::transfer_writer::TransferWriter;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Replays a file of processor webhook events against seeded transfer
/// records and prints the resulting transfer states.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Webhook events file (one JSON envelope per line)
    events: PathBuf,

    /// Transfer seed file (one JSON record per line)
    #[arg(long)]
    transfers: Option<PathBuf>,
}

#[derive(Deserialize)]
struct TransferSeed {
    external_id: String,
    amount: Decimal,
    #[serde(default)]
    tenant_id: Option<Uuid>,
    #[serde(default)]
    user_id: Option<Uuid>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let transfer_store = InMemoryTransferStore::new();
    if let Some(path) = &cli.transfers {
        seed_transfers(&transfer_store, path).await?;
    }

    let transfers: TransferStoreBox = Box::new(transfer_store.clone());
    let companies: CompanyStoreBox = Box::new(InMemoryCompanyStore::new());
    let documents: DocumentStoreBox = Box::new(InMemoryDocumentStore::new());
    let processor = WebhookProcessor::new(transfers, companies, documents);

    let file = File::open(&cli.events).into_diagnostic()?;
    let reader = EventReader::new(file);

    let mut processed = 0usize;
    let mut discarded = 0usize;
    for event_result in reader.events() {
        match event_result {
            Ok(event) => match processor.process(&event).await {
                WebhookOutcome::Processed => processed += 1,
                _ => discarded += 1,
            },
            Err(e) => {
                eprintln!("Error reading event: {e}");
                discarded += 1;
            }
        }
    }
    eprintln!("{processed} events processed, {discarded} discarded");

    let stdout = io::stdout();
    let mut writer = TransferWriter::new(stdout.lock());
    writer
        .write_transfers(transfer_store.all().await)
        .into_diagnostic()?;

    Ok(())
}

async fn seed_transfers(store: &InMemoryTransferStore, path: &Path) -> Result<()> {
    use payline::domain::ports::TransferStore;
    use std::io::BufRead;

    let file = File::open(path).into_diagnostic()?;
    for line in io::BufReader::new(file).lines() {
        let line = line.into_diagnostic()?;
        if line.trim().is_empty() {
            continue;
        }
        let seed: TransferSeed = serde_json::from_str(&line).into_diagnostic()?;
        let transfer = Transfer::new(
            seed.tenant_id.unwrap_or_else(Uuid::new_v4),
            seed.user_id.unwrap_or_else(Uuid::new_v4),
            seed.external_id,
            seed.amount,
        );
        store.store(transfer).await.into_diagnostic()?;
    }
    Ok(())
}
