// wordgrab - pull text and coarse metadata out of Word documents
use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use wordgrab::config::ExtractionConfig;
use wordgrab::word_extraction::extract_file;

#[derive(Parser)]
#[command(name = "wordgrab", about = "Word document text extraction tool", version)]
struct Cli {
    /// Document to process (.docx or .doc)
    file: PathBuf,

    /// Emit the result as JSON instead of plain text
    #[arg(long)]
    json: bool,

    /// TOML config overriding the strategy chain, threshold and timeout
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => ExtractionConfig::load(path)?,
        None => ExtractionConfig::default(),
    };

    let document = extract_file(&cli.file, &config)?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&document)?);
    } else {
        println!("{}", document.text);
        let meta = &document.metadata;
        eprintln!();
        eprintln!("pages: {}  bytes: {}", meta.page_count, meta.file_size);
        if let Some(count) = meta.paragraph_count {
            eprintln!("paragraphs: {count}");
        }
        if let Some(has_tables) = meta.has_tables {
            eprintln!("tables: {}", if has_tables { "yes" } else { "no" });
        }
    }

    Ok(())
}
