//! `site-hash`: hash the visible content of one or more URLs.

mod logging;

use anyhow::Context;
use clap::Parser;
use hasher_logging::hash_debug;
use log::LevelFilter;
use serde::Serialize;
use url::Url;

use hasher_engine::{available_algorithms, HasherOptions, UrlHasher, UrlResult};

#[derive(Parser)]
#[command(
    name = "site-hash",
    version,
    about = "Fetch URLs and hash their visible content"
)]
struct Cli {
    /// Use the provided hash algorithm.
    #[arg(short = 'a', long, default_value = "sha256")]
    hash_algorithm: String,

    /// List available hash algorithms.
    #[arg(short = 'l', long)]
    list_algorithms: bool,

    /// Output the results as JSON.
    #[arg(short = 'j', long, conflicts_with_all = ["show_content", "show_redirect"])]
    json: bool,

    /// Output the content after processing.
    #[arg(short = 'c', long)]
    show_content: bool,

    /// Output if the requested URL was redirected.
    #[arg(short = 'r', long)]
    show_redirect: bool,

    /// Log at debug level.
    #[arg(short = 'v', long)]
    verbose: bool,

    /// URLs to hash.
    #[arg(required_unless_present = "list_algorithms")]
    urls: Vec<String>,
}

/// JSON shape for one URL. The normalized contents are excluded; they are
/// not guaranteed to be valid text.
#[derive(Serialize)]
struct UrlReport {
    content_type: String,
    contents_hash: String,
    is_redirected: bool,
    requested_url: String,
    retrieved_url: String,
    status_code: u16,
}

impl UrlReport {
    fn new(requested_url: &str, result: &UrlResult) -> Self {
        Self {
            content_type: result.content_type.clone(),
            contents_hash: result.hash.clone(),
            is_redirected: result.is_redirect,
            requested_url: requested_url.to_string(),
            retrieved_url: result.visited_url.clone(),
            status_code: result.status,
        }
    }
}

fn main() {
    let cli = Cli::parse();
    logging::initialize(if cli.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    });

    if cli.list_algorithms {
        println!("Algorithms supported for this platform:");
        for algorithm in available_algorithms() {
            println!("- {algorithm}");
        }
        return;
    }

    let algorithm = cli.hash_algorithm.to_lowercase();
    if !available_algorithms().contains(&algorithm.as_str()) {
        eprintln!(
            "Invalid algorithm provided. Must be one of: {}",
            available_algorithms().join(", ")
        );
        std::process::exit(1);
    }

    let runtime = tokio::runtime::Runtime::new().expect("failed to create async runtime");
    if let Err(err) = runtime.block_on(run(&cli, &algorithm)) {
        eprintln!("Error: {err:#}");
        std::process::exit(1);
    }
}

async fn run(cli: &Cli, algorithm: &str) -> anyhow::Result<()> {
    let mut hasher = UrlHasher::new(algorithm, HasherOptions::default());
    let mut reports = Vec::new();

    for requested in &cli.urls {
        let url = ensure_scheme(requested);
        let result = hasher
            .hash_url(&url)
            .await
            .with_context(|| format!("failed to hash {url}"))?;

        if cli.json {
            reports.push(UrlReport::new(requested, &result));
        } else {
            print_human(cli, requested, algorithm, &result);
        }
    }

    if let Err(err) = hasher.shutdown().await {
        hash_debug!("browser shutdown failed: {err}");
    }

    if cli.json {
        println!("{}", serde_json::to_string(&reports)?);
    }
    Ok(())
}

fn print_human(cli: &Cli, requested: &str, algorithm: &str, result: &UrlResult) {
    println!("Results for {requested}:");
    println!("  Retrieved URL - '{}'", result.visited_url);
    println!("  Status code - '{}'", result.status);
    println!("  Content type - '{}'", result.content_type);
    if cli.show_redirect {
        println!("  Redirect - {}", result.is_redirect);
    }
    println!("  Hash ({algorithm}) of contents - {}", result.hash);
    if cli.show_content {
        println!();
        println!("Contents:");
        println!("{}", String::from_utf8_lossy(&result.contents));
    }
    println!();
}

/// Prefer an HTTPS URL when no scheme was given.
fn ensure_scheme(raw: &str) -> String {
    match Url::parse(raw) {
        Ok(parsed) if parsed.host_str().is_some() => parsed.into(),
        _ => format!("https://{raw}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn scheme_defaults_to_https() {
        assert_eq!(ensure_scheme("example.com"), "https://example.com");
        assert_eq!(ensure_scheme("example.com/path"), "https://example.com/path");
    }

    #[test]
    fn explicit_scheme_is_preserved() {
        assert_eq!(ensure_scheme("http://example.com/x"), "http://example.com/x");
        assert_eq!(ensure_scheme("https://example.com/x"), "https://example.com/x");
    }

    #[test]
    fn report_serializes_with_sorted_keys_and_no_contents() {
        let report = UrlReport {
            content_type: "text/html".to_string(),
            contents_hash: "abc".to_string(),
            is_redirected: false,
            requested_url: "example.com".to_string(),
            retrieved_url: "https://example.com/".to_string(),
            status_code: 200,
        };
        let json = serde_json::to_string(&report).unwrap();
        assert_eq!(
            json,
            "{\"content_type\":\"text/html\",\"contents_hash\":\"abc\",\
             \"is_redirected\":false,\"requested_url\":\"example.com\",\
             \"retrieved_url\":\"https://example.com/\",\"status_code\":200}"
        );
    }
}
