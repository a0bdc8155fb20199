use anyhow::{Context, Result};
use clap::Parser;
use std::io::{BufRead, Write};
use std::path::PathBuf;

use rsshtml::config::Config;
use rsshtml::feed::{build_client, load_document, FeedLocation};
use rsshtml::render::render_to_string;
use rsshtml::util::write_atomic;

#[derive(Parser, Debug)]
#[command(name = "rsshtml", about = "Render an RSS 2.0 feed as an HTML news table")]
struct Args {
    /// Feed URL or file path (prompted for when omitted)
    location: Option<String>,

    /// HTML output file [default: index.html]
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Config file [default: ~/.config/rsshtml/config.toml]
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Refuse documents that are not <rss version="2.0">
    #[arg(long)]
    require_rss2: bool,

    /// Allow feeds on localhost and private networks
    #[arg(long)]
    allow_private_hosts: bool,
}

/// Prints the prompt and reads one line from stdin.
fn prompt_location() -> Result<String> {
    println!("input valid URL");
    std::io::stdout().flush().context("Failed to flush stdout")?;

    let mut line = String::new();
    let read = std::io::stdin()
        .lock()
        .read_line(&mut line)
        .context("Failed to read feed location from stdin")?;
    if read == 0 {
        anyhow::bail!("No feed location given");
    }
    Ok(line)
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing for debug logging
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    let mut config = match args.config.clone().or_else(Config::default_path) {
        Some(path) => Config::load(&path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => Config::default(),
    };
    if let Some(output) = args.output {
        config.output = output;
    }
    config.require_rss2 |= args.require_rss2;
    config.allow_private_hosts |= args.allow_private_hosts;
    tracing::debug!(?config, "Effective configuration");

    let input = match args.location {
        Some(location) => location,
        None => prompt_location()?,
    };
    let location = FeedLocation::parse(&input).context("Invalid feed location")?;

    let fetch_config = config.fetch_config();
    let client = build_client(&fetch_config).context("Failed to build HTTP client")?;
    let root = load_document(&location, &client, &fetch_config)
        .await
        .with_context(|| format!("Failed to load feed from {}", location))?;

    let html = render_to_string(&root, &config.render_options())
        .with_context(|| format!("Failed to render feed from {}", location))?;

    write_atomic(&config.output, html.as_bytes())?;
    tracing::info!(output = %config.output.display(), bytes = html.len(), "Wrote HTML page");
    println!("Wrote {}", config.output.display());

    Ok(())
}
