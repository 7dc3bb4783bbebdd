//! Brandeis - Convert scraped Supreme Court opinions to wikitext.
//!
//! This binary runs the brandeis pipeline over a batch of scraped pages,
//! writing one `.wiki` file per page.

mod cli;

use clap::Parser as ClapParser;
use cli::Cli;
use log::{debug, error, info, LevelFilter};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use brandeis_config::Config;
use brandeis_core::{BrandeisError, Result};
use brandeis_parser::write_token_log;
use brandeis_pipeline::Pipeline;

fn main() {
    let cli = <Cli as ClapParser>::parse();

    // Handle --paths flag
    if cli.show_paths {
        cli::show_paths();
        return;
    }

    if cli.init_config {
        if let Err(e) = cli::init_config() {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
        return;
    }

    // Set up logging
    setup_logging(&cli.log_level);
    info!("Brandeis v{}", env!("CARGO_PKG_VERSION"));

    match run(&cli) {
        Ok(0) => {}
        Ok(failed) => {
            error!("{} of {} documents failed", failed, cli.files.len());
            std::process::exit(1);
        }
        Err(e) => {
            error!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

/// Set up logging based on the log level argument.
fn setup_logging(level: &str) {
    let filter = match level.to_lowercase().as_str() {
        "trace" => LevelFilter::Trace,
        "debug" => LevelFilter::Debug,
        "info" => LevelFilter::Info,
        "warn" => LevelFilter::Warn,
        "error" => LevelFilter::Error,
        _ => LevelFilter::Warn,
    };

    env_logger::Builder::new()
        .filter_level(filter)
        .format(|buf, record| {
            writeln!(
                buf,
                "[{}] {}: {}",
                record.level(),
                record.target(),
                record.args()
            )
        })
        .init();
}

/// Convert every input file, returning how many failed.
fn run(cli: &Cli) -> Result<usize> {
    let config = load_config(cli)?;
    debug!("Loaded config: {:?}", config);

    if let Some(dir) = &cli.output {
        std::fs::create_dir_all(dir)?;
    }

    let pipeline = Pipeline::new(config);
    let mut failed = 0;
    for path in &cli.files {
        if let Err(e) = convert_file(cli, &pipeline, path) {
            error!("{}: {}; needs manual review", path.display(), e);
            failed += 1;
        }
    }
    Ok(failed)
}

/// Load configuration with optional overrides and CLI stage switches.
fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = Config::load_with_override(cli.config.as_deref())?;

    if cli.no_footnotes {
        config.stages.footnotes = false;
    }
    if cli.no_sectionize {
        config.stages.sectionize = false;
    }
    if cli.tokens {
        config.stages.token_log = true;
    }

    Ok(config)
}

/// Convert one file and write its outputs.
fn convert_file(cli: &Cli, pipeline: &Pipeline, path: &Path) -> Result<()> {
    let doc = pipeline.convert_file(path)?;

    let wiki_path = cli.output_path(path, "wiki");
    std::fs::write(&wiki_path, format!("{}\n", doc.wikitext))?;
    info!("Wrote {}", wiki_path.display());

    if pipeline.config().stages.token_log {
        let tokens_path = cli.output_path(path, "tokens");
        let mut out = BufWriter::new(File::create(&tokens_path)?);
        write_token_log(&doc.lexemes, &mut out)?;
        out.flush()?;
        debug!("Wrote {}", tokens_path.display());
    }

    if cli.metadata {
        let metadata_path = cli.output_path(path, "toml");
        let toml = toml::to_string_pretty(&doc.metadata)
            .map_err(|e| BrandeisError::Config(format!("Serialization error: {}", e)))?;
        std::fs::write(&metadata_path, toml)?;
        debug!("Wrote {}", metadata_path.display());
    }

    Ok(())
}
