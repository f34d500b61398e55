//! Compat table renderer CLI
//!
//! Renders the compat tables for a dotted feature path from a dataset file.

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use compat_core::Dataset;
use compat_out::{render_compat, RenderConfig};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "compat-render")]
#[command(about = "Render browser compatibility tables as HTML")]
struct Cli {
    /// Compatibility dataset (JSON)
    #[arg(short, long, global = true, default_value = "data.json")]
    data: PathBuf,

    /// Render configuration (YAML)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the tables for a feature path
    Render {
        /// Dotted feature path, e.g. css.properties.color
        query: String,
        /// Locale for labels and messages
        #[arg(short, long)]
        locale: Option<String>,
        /// Strings file (YAML)
        #[arg(short, long)]
        strings: Option<PathBuf>,
        /// Output file (HTML); stdout when omitted
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Print a JSON summary instead of the HTML
        #[arg(long)]
        summary: bool,
    },

    /// List the children of a dataset node
    List {
        /// Dotted path; the dataset root when omitted
        #[arg(default_value = "")]
        path: String,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let dataset = Dataset::load(&cli.data)
        .with_context(|| format!("failed to load dataset {}", cli.data.display()))?;

    match cli.command {
        Commands::Render { query, locale, strings, output, summary } => {
            let mut config = match &cli.config {
                Some(path) => RenderConfig::load(path)
                    .with_context(|| format!("failed to load config {}", path.display()))?,
                None => RenderConfig::default(),
            }
            .apply_env();
            if let Some(locale) = locale {
                config.locale = locale;
            }
            if strings.is_some() {
                config.strings_path = strings;
            }

            let table = config.string_table().context("failed to load strings")?;
            let result = render_compat(&dataset, &query, &table, &config);
            tracing::info!(%query, kind = ?result.kind, notes = result.note_count, "rendered");

            let text = if summary {
                serde_json::to_string_pretty(&result)?
            } else {
                result.html
            };

            match output {
                Some(path) => {
                    std::fs::write(&path, text)?;
                    eprintln!("Wrote {}", path.display());
                }
                None => println!("{}", text),
            }
            Ok(())
        }

        Commands::List { path } => {
            for name in dataset.children(&path)? {
                println!("{}", name);
            }
            Ok(())
        }
    }
}
