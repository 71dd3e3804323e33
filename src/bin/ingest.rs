use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{bail, Context};
use clap::Parser;
use glossary_search::ingestion::bulk::{bulk_body, write_bulk_file, COMPLETION_FIELDS};
use glossary_search::ingestion::flatten::{flatten_document, FlatOutcome};
use glossary_search::ingestion::glossary::{FlattenConfig, GlossaryDocument};
use glossary_search::store::client::StoreClient;
use glossary_search::store::index::{glossary_index_settings, ICU_PLUGIN};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(
    name = "glossary-ingest",
    about = "Flatten glossary files and upload them to the search engine"
)]
struct Cli {
    /// Search engine base URL
    #[arg(long, default_value = "http://localhost:9200")]
    host: String,

    /// Index to recreate and fill
    #[arg(long, default_value = "glossary")]
    index: String,

    /// Expand wildcards in filenames
    #[arg(short, long)]
    glob: bool,

    /// Wait up to this many seconds for the engine to be ready before uploading
    #[arg(long, value_name = "SECONDS")]
    wait: Option<u64>,

    /// Only flatten: write a bulk file next to each input instead of uploading
    #[arg(long)]
    offline: bool,

    /// Glossary files to upload
    #[arg(value_name = "FILE", required = true)]
    filenames: Vec<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let files = expand_files(&cli)?;
    if files.is_empty() {
        bail!("no glossary files matched");
    }

    // Flatten everything up front, so malformed data aborts the run before
    // any engine state is touched.
    let mut flattened = Vec::new();
    for file in &files {
        let outcome = flatten_file(file)?;
        report_skipped(file, &outcome);
        flattened.push(outcome.entries);
    }

    if cli.offline {
        for (file, entries) in files.iter().zip(&flattened) {
            let output = entries_path(file);
            write_bulk_file(&output, entries)
                .with_context(|| format!("writing {}", output.display()))?;
            tracing::info!("Wrote {} entries to {}", entries.len(), output.display());
        }
        return Ok(());
    }

    let store = StoreClient::new(&cli.host, &cli.index);
    if let Some(seconds) = cli.wait {
        store.wait_for_health(Duration::from_secs(seconds)).await?;
    }
    // The collated cf.sort mapping needs the ICU plugin; creating the index
    // without it fails with an opaque mapper error.
    if !store.has_plugin(ICU_PLUGIN).await? {
        bail!("the {ICU_PLUGIN} plugin is required but not installed");
    }

    tracing::info!("Recreating index '{}'", cli.index);
    store.delete_index().await?;
    store.create_index(&glossary_index_settings()).await?;

    for (file, entries) in files.iter().zip(&flattened) {
        tracing::info!("Uploading {file} ({} entries)", entries.len());
        let body = bulk_body(entries, COMPLETION_FIELDS)?;
        let indexed = store.bulk(body).await?;
        tracing::info!("Indexed {indexed} documents from {file}");
    }

    Ok(())
}

fn expand_files(cli: &Cli) -> anyhow::Result<Vec<String>> {
    if !cli.glob {
        return Ok(cli.filenames.clone());
    }
    let mut files = Vec::new();
    for pattern in &cli.filenames {
        let paths =
            glob::glob(pattern).with_context(|| format!("bad file pattern '{pattern}'"))?;
        for path in paths {
            files.push(path?.display().to_string());
        }
    }
    Ok(files)
}

fn flatten_file(file: &str) -> anyhow::Result<FlatOutcome> {
    let raw = std::fs::read_to_string(file).with_context(|| format!("reading {file}"))?;
    let document: GlossaryDocument =
        serde_json::from_str(&raw).with_context(|| format!("parsing {file}"))?;
    let outcome = flatten_document(&document, &FlattenConfig::default())
        .with_context(|| format!("flattening {file}"))?;
    Ok(outcome)
}

fn report_skipped(file: &str, outcome: &FlatOutcome) {
    for skipped in &outcome.skipped {
        tracing::warn!(
            "Could not find the instance {} for entry {} in {file}",
            skipped.xis,
            skipped.headword
        );
    }
}

fn entries_path(file: &str) -> PathBuf {
    let path = Path::new(file);
    let stem = path
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or("glossary");
    path.with_file_name(format!("{stem}-entries.json"))
}
