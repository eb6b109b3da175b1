mod config;
mod discover;
mod error;
mod loader;
mod parser;
mod sink;
mod storage;

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use std::time::Instant;

use anyhow::Result;
use clap::{Parser, Subcommand};
use regex::Regex;
use tracing::warn;

use crate::config::Settings;
use crate::error::IndexError;
use crate::loader::Loader;
use crate::parser::PageRecord;
use crate::sink::RecordWriter;
use crate::storage::FsStorage;

#[derive(Parser)]
#[command(name = "fjson_indexer", about = "Search-record extractor for Sphinx fjson build output")]
struct Cli {
    /// Storage root holding fjson build output (overrides FJSON_STORAGE_ROOT)
    #[arg(long, global = true)]
    storage: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse all pages and emit search records as JSON Lines
    Index {
        /// Store-relative page paths; discovers every page when omitted
        paths: Vec<String>,
        /// Write records to this file instead of stdout
        #[arg(short, long)]
        out: Option<String>,
        /// Only index discovered pages whose path matches this regex
        #[arg(short, long)]
        filter: Option<String>,
        /// Max pages to index (default: all)
        #[arg(short = 'n', long)]
        limit: Option<usize>,
    },
    /// Parse a single page and pretty-print its record
    Parse {
        /// Store-relative page path, e.g. guides/install.fjson
        path: String,
    },
    /// List discovered page documents
    List {
        /// Only list pages whose path matches this regex
        #[arg(short, long)]
        filter: Option<String>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_writer(io::stderr)
        .init();

    let t0 = Instant::now();
    let Cli { storage, command } = Cli::parse();
    let settings = Settings::load(storage)?;

    let result = match command {
        Commands::Index {
            paths,
            out,
            filter,
            limit,
        } => {
            let root = Path::new(&settings.storage_root);
            let mut pages = if paths.is_empty() {
                let pattern = filter.map(|f| Regex::new(&f)).transpose()?;
                discover::find_pages(root, pattern.as_ref())?
            } else {
                paths
            };
            if let Some(n) = limit {
                pages.truncate(n);
            }
            if pages.is_empty() {
                eprintln!("No page documents found under {}", root.display());
                return Ok(());
            }
            eprintln!("Indexing {} pages...", pages.len());

            let loader = Loader::new(FsStorage::new(root));
            // stdout carries only the record stream; every diagnostic goes to stderr.
            let out_stream: Box<dyn Write> = match &out {
                Some(path) => Box::new(BufWriter::new(File::create(path)?)),
                None => Box::new(io::stdout().lock()),
            };
            let mut writer = RecordWriter::new(out_stream);
            let summary = index_pages(&loader, &pages, &mut writer)?;
            let written = writer.finish()?;
            summary.print();
            if let Some(path) = &out {
                eprintln!("{} records written to {}", written, path);
            }
            Ok(())
        }
        Commands::Parse { path } => {
            let loader = Loader::new(FsStorage::new(&settings.storage_root));
            let record = process_page(&loader, &path)?;
            println!("{}", serde_json::to_string_pretty(&record)?);
            Ok(())
        }
        Commands::List { filter } => {
            let root = Path::new(&settings.storage_root);
            let pattern = filter.map(|f| Regex::new(&f)).transpose()?;
            let pages = discover::find_pages(root, pattern.as_ref())?;
            if pages.is_empty() {
                println!("No page documents found under {}", root.display());
                return Ok(());
            }
            for page in &pages {
                println!("{}", page);
            }
            println!("\n{} pages", pages.len());
            Ok(())
        }
    };

    let elapsed = t0.elapsed();
    if elapsed.as_secs() >= 1 {
        eprintln!("\nDone in {}", format_duration(elapsed));
    }

    result
}

struct IndexSummary {
    indexed: usize,
    skipped: usize,
}

impl IndexSummary {
    fn print(&self) {
        eprintln!("Indexed {} pages, skipped {}.", self.indexed, self.skipped);
    }
}

/// Parse pages in parallel chunks, writing records sequentially as each chunk
/// completes. Unreadable or malformed pages are skipped with a warning;
/// anything else aborts the batch.
fn index_pages<W: Write>(
    loader: &Loader<FsStorage>,
    pages: &[String],
    writer: &mut RecordWriter<W>,
) -> Result<IndexSummary> {
    use indicatif::{ProgressBar, ProgressStyle};
    use rayon::prelude::*;

    let pb = ProgressBar::new(pages.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({per_sec})")?
            .progress_chars("#>-"),
    );

    let mut summary = IndexSummary {
        indexed: 0,
        skipped: 0,
    };

    for chunk in pages.chunks(500) {
        let results: Vec<_> = chunk
            .par_iter()
            .map(|path| (path, process_page(loader, path)))
            .collect();

        for (path, result) in results {
            match result {
                Ok(record) => {
                    writer.write(&record)?;
                    summary.indexed += 1;
                }
                Err(e) if e.is_skippable() => {
                    warn!("skipping {}: {}", path, e);
                    summary.skipped += 1;
                }
                Err(e) => return Err(e.into()),
            }
        }
        pb.inc(chunk.len() as u64);
    }

    pb.finish_and_clear();
    Ok(summary)
}

fn process_page(loader: &Loader<FsStorage>, path: &str) -> Result<PageRecord, IndexError> {
    let doc = loader.load(path)?;
    Ok(parser::build_record(&doc))
}

fn format_duration(d: std::time::Duration) -> String {
    let secs = d.as_secs();
    if secs < 60 {
        format!("{:.1}s", d.as_secs_f64())
    } else if secs < 3600 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else {
        format!("{}h {}m {}s", secs / 3600, (secs % 3600) / 60, secs % 60)
    }
}
