//! folio - read structured review articles in the terminal

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use folio_core::export::{self, JsonFormat};
use folio_core::{Article, Config};
use folio_tui::App;
use std::path::PathBuf;

/// Terminal reader for review articles with an outline sidebar
#[derive(Parser, Debug)]
#[command(name = "folio")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the article; the built-in sample is shown when omitted
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,

    /// Print the parsed article and exit instead of starting the reader
    #[arg(long, value_enum, value_name = "FORMAT")]
    dump: Option<DumpFormat>,

    /// Use this config file instead of the platform default
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum DumpFormat {
    /// One line per classified block
    Blocks,
    /// Blocks and headings as JSON
    Json,
    /// Indented heading outline
    Outline,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => Config::load_from(path)
            .with_context(|| format!("Failed to load configuration: {}", path.display()))?,
        None => Config::load().context("Failed to load configuration")?,
    };
    let options = config.parser.options();

    let article = match &args.file {
        Some(path) => Article::load(path, &options)
            .with_context(|| format!("Failed to load article: {}", path.display()))?,
        None => {
            log::info!("no file given, using the sample article");
            Article::sample(&options)
        }
    };

    if let Some(format) = args.dump {
        let content = article.content();
        let out = match format {
            DumpFormat::Blocks => export::to_block_summary(content),
            DumpFormat::Json => export::to_json(content, JsonFormat::Pretty)?,
            DumpFormat::Outline => export::to_outline_text(content),
        };
        print!("{out}");
        if format == DumpFormat::Json {
            println!();
        }
        return Ok(());
    }

    let app = App::new(config, article);
    folio_tui::run(app).context("TUI application error")?;

    Ok(())
}
