//! Command-line interface for brandeis.

use clap::Parser;
use std::path::{Path, PathBuf};

/// Brandeis - Convert scraped Supreme Court opinions to wikitext.
///
/// Each input page is converted to `<stem>.wiki`, written next to the input
/// or into the output directory.
#[derive(Parser, Debug)]
#[command(
    name = "brandeis",
    author = "Brandeis Contributors",
    version,
    about = "Convert scraped Supreme Court opinions to wikitext",
    after_help = "Examples:\n  \
                  brandeis bush-v-gore.html\n  \
                  brandeis -o wiki/ cases/*.html\n  \
                  brandeis --tokens --metadata -l debug case.html\n  \
                  brandeis -c '[stages]\nSectionize = false' case.html"
)]
pub struct Cli {
    /// Scraped opinion pages to convert
    #[arg(value_name = "FILE", required_unless_present_any = ["show_paths", "init_config"])]
    pub files: Vec<PathBuf>,

    /// Write output files into this directory instead of next to the input
    #[arg(short = 'o', long = "output", value_name = "DIR")]
    pub output: Option<PathBuf>,

    /// Set the logging level (trace, debug, info, warn, error)
    #[arg(short = 'l', long = "loglevel", default_value = "warn")]
    pub log_level: String,

    /// Use a custom config file or inline TOML
    #[arg(short = 'c', long = "config")]
    pub config: Option<String>,

    /// Also write the token stream to `<stem>.tokens`
    #[arg(long = "tokens")]
    pub tokens: bool,

    /// Also write the collected metadata to `<stem>.toml`
    #[arg(long = "metadata")]
    pub metadata: bool,

    /// Leave footnotes where the page lists them
    #[arg(long = "no-footnotes")]
    pub no_footnotes: bool,

    /// Don't insert section markers
    #[arg(long = "no-sectionize")]
    pub no_sectionize: bool,

    /// Show configuration paths and exit
    #[arg(long = "paths")]
    pub show_paths: bool,

    /// Write the default config file if there is none, then exit
    #[arg(long = "init-config")]
    pub init_config: bool,
}

impl Cli {
    /// Where the `extension` output for `input` goes.
    pub fn output_path(&self, input: &Path, extension: &str) -> PathBuf {
        let stem = input
            .file_stem()
            .unwrap_or(input.as_os_str())
            .to_string_lossy();
        let dir = match &self.output {
            Some(dir) => dir.as_path(),
            None => input.parent().unwrap_or(Path::new("")),
        };
        dir.join(format!("{}.{}", stem, extension))
    }
}

/// Create the default config file and report where it is.
pub fn init_config() -> brandeis_core::Result<()> {
    let path = brandeis_config::Config::ensure_config_file()?;
    println!("{}", path.display());
    Ok(())
}

/// Show paths information.
pub fn show_paths() {
    use brandeis_config::Config;

    let config_path = Config::config_path()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "(not found)".to_string());

    println!("paths:");
    println!("  config                {}", config_path);
}
