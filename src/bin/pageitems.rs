//! CLI binary for edgequake-pageitems.
//!
//! A thin shim over the library crate that maps CLI flags
//! to `TransformConfig` and prints the resulting items.

use anyhow::{Context, Result};
use clap::Parser;
use edgequake_pageitems::{
    read_items, to_items_json, transform_items, write_items, ItemSource, MissingImages,
    TransformConfig, DEFAULT_BINARY_PROPERTY,
};
use std::io::{self, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

const AFTER_HELP: &str = r#"EXAMPLES:
  # Items from a file, output to stdout
  pageitems lambda-items.json

  # Raw function response piped in, output to a file
  aws lambda invoke --function-name pdf-to-jpeg --payload file://req.json /dev/stdout \
    | jq '{result: .}' | pageitems - -o pages.json

  # Store attachments under "page" instead of "data"
  pageitems --binary-property page lambda-items.json

  # Treat a response without images as zero pages
  pageitems --allow-missing-images lambda-items.json

INPUT SHAPE:
  [ { "json": { "result": { "statusCode": 200, "body": "<json string or object>" } } } ]
  The "json" wrapper is optional; a single object is read as a one-item list.

OUTPUT SHAPE:
  [ { "json":   { "fileName": "page_1.jpg", "totalPages": 3 },
      "binary": { "data": { "data": "<base64>", "mimeType": "image/jpeg",
                            "fileName": "page_1.jpg" } } }, … ]
"#;

/// Fan a PDF-to-images function response out into one workflow item per page.
#[derive(Parser, Debug)]
#[command(
    name = "pageitems",
    version,
    about = "Fan a PDF-to-images function response out into one workflow item per page",
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Items JSON file, or `-` for stdin.
    #[arg(default_value = "-")]
    input: String,

    /// Write items to this file instead of stdout.
    #[arg(short, long, env = "PAGEITEMS_OUTPUT")]
    output: Option<PathBuf>,

    /// Key of the attachment inside each item's binary part.
    #[arg(long, env = "PAGEITEMS_BINARY_PROPERTY", default_value = DEFAULT_BINARY_PROPERTY)]
    binary_property: String,

    /// Treat a body without `images` as zero pages instead of an error.
    #[arg(long, env = "PAGEITEMS_ALLOW_MISSING_IMAGES")]
    allow_missing_images: bool,

    /// Do not fail on statusCode >= 400 or an {"error": …} body.
    #[arg(long, env = "PAGEITEMS_NO_STATUS_CHECK")]
    no_status_check: bool,

    /// Decode every page as base64 and check its image signature.
    #[arg(long, env = "PAGEITEMS_VERIFY_CONTENT")]
    verify_content: bool,

    /// Emit compact JSON instead of pretty-printed.
    #[arg(long, env = "PAGEITEMS_COMPACT")]
    compact: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, env = "PAGEITEMS_VERBOSE")]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long, env = "PAGEITEMS_QUIET")]
    quiet: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "error"
    } else {
        "info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    // ── Build config ─────────────────────────────────────────────────────
    let config = build_config(&cli)?;

    // ── Run transformation ───────────────────────────────────────────────
    let items = read_items(&ItemSource::parse(&cli.input)).context("Failed to read input items")?;
    let records = transform_items(&items, &config).context("Transformation failed")?;
    let pretty = !cli.compact;

    if let Some(ref output_path) = cli.output {
        write_items(output_path, &records, pretty).context("Failed to write output")?;
        if !cli.quiet {
            eprintln!("{} items  →  {}", records.len(), output_path.display());
        }
    } else {
        let json = to_items_json(&records, pretty).context("Failed to serialise items")?;
        let stdout = io::stdout();
        let mut handle = stdout.lock();
        writeln!(handle, "{json}").context("Failed to write to stdout")?;
    }

    Ok(())
}

/// Map CLI args to `TransformConfig`.
fn build_config(cli: &Cli) -> Result<TransformConfig> {
    let missing_images = if cli.allow_missing_images {
        MissingImages::Empty
    } else {
        MissingImages::Error
    };

    TransformConfig::builder()
        .binary_property(cli.binary_property.clone())
        .missing_images(missing_images)
        .check_upstream_status(!cli.no_status_check)
        .verify_content(cli.verify_content)
        .build()
        .context("Invalid configuration")
}
