use anyhow::Context;
use clap::Parser;
use neardup::encode::image_data_uri;
use neardup::prelude::*;
use std::path::PathBuf;
use std::time::Instant;
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;
use walkdir::WalkDir;

const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png"];

/// Find clusters of near-duplicate images in a folder
#[derive(Parser, Debug)]
#[command(name = "neardup")]
#[command(about = "Find clusters of near-duplicate images", long_about = None)]
struct Args {
    /// Folder to scan for images
    folder: PathBuf,

    /// Distance below which two images count as duplicates
    #[arg(long, default_value_t = 0.05)]
    threshold: f64,

    /// Maximum number of remote calls in flight
    #[arg(long, default_value_t = 20, value_parser = clap::value_parser!(u32).range(1..))]
    max_concurrency: u32,

    /// Only consider the first N images found
    #[arg(long)]
    max_files: Option<usize>,

    /// Base URL of the similarity-search API
    #[arg(long, default_value = "https://www.nyckel.com")]
    base_url: String,

    /// API client id
    #[arg(long, env = "NEARDUP_CLIENT_ID")]
    client_id: String,

    /// API client secret
    #[arg(long, env = "NEARDUP_CLIENT_SECRET", hide_env_values = true)]
    client_secret: String,

    /// Print clusters as JSON instead of text
    #[arg(long)]
    json: bool,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let log_level = match args.log_level.as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting neardup v{}", env!("CARGO_PKG_VERSION"));

    let mut files = collect_image_files(&args.folder);
    if let Some(max) = args.max_files {
        files.truncate(max);
    }
    anyhow::ensure!(
        !files.is_empty(),
        "No images with extensions {IMAGE_EXTENSIONS:?} found in {:?}",
        args.folder
    );
    info!("Encoding {} images from {:?}", files.len(), args.folder);

    let items = files
        .iter()
        .map(|path| {
            let payload = image_data_uri(path)?;
            Ok(Item::new(path.display().to_string(), payload))
        })
        .collect::<std::result::Result<Vec<_>, ClientError>>()
        .context("failed to encode images")?;

    let client = HttpIndexClient::connect(HttpConfig::new(
        &args.base_url,
        &args.client_id,
        &args.client_secret,
    ))
    .await
    .context("failed to authenticate with the similarity-search API")?;

    let config = DedupeConfig {
        duplication_threshold: args.threshold,
        max_concurrency: args.max_concurrency as usize,
    };
    let deduper = Deduper::new(client, config);

    let started = Instant::now();
    let outcome = deduper.deduplicate(&items).await?;
    info!(
        "Deduped {} images in {:.2}s",
        items.len(),
        started.elapsed().as_secs_f64()
    );
    if let Some(error) = &outcome.cleanup_error {
        warn!("Continuing despite cleanup failure: {error}");
    }

    print_clusters(&outcome.clusters, args.json)?;
    Ok(())
}

fn collect_image_files(folder: &PathBuf) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(folder)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| {
            path.extension()
                .and_then(|ext| ext.to_str())
                .map(|ext| IMAGE_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
                .unwrap_or(false)
        })
        .collect();
    files.sort();
    files
}

fn print_clusters(clusters: &[Cluster], as_json: bool) -> anyhow::Result<()> {
    // Sorted members make the output stable run to run.
    let mut sorted: Vec<Vec<&str>> = clusters
        .iter()
        .map(|cluster| {
            let mut members: Vec<&str> = cluster.iter().map(String::as_str).collect();
            members.sort_unstable();
            members
        })
        .collect();
    sorted.sort();

    if as_json {
        println!("{}", serde_json::to_string_pretty(&sorted)?);
        return Ok(());
    }

    println!("Found {} clusters of duplicates", sorted.len());
    for (i, members) in sorted.iter().enumerate() {
        println!("Cluster {}: {}", i + 1, members.join(", "));
    }
    Ok(())
}
