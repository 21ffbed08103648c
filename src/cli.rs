//! CLI module - Command-line interface definitions and handlers

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use crate::core::notice::ConsoleNotifier;
use crate::core::render::{OutputFormat, RenderConfig};
use crate::settings::{SettingKey, Settings};
use crate::vault::FsVault;

/// glossary - turn [[¤term]] links into AI-written glossary notes.
#[derive(Parser, Debug)]
#[command(name = "glossary")]
#[command(
    author,
    version,
    about,
    long_about = r#"glossary finds [[¤TERM]] links in a Markdown document, asks a local Ollama
model for a short definition of each term, writes one note per term into the
glossary folder, and rewrites the links to plain [[TERM]] wiki links.

Every command prints a ResultSet in the selected format (default: jsonl).
Progress notices go to stderr.

Output formats:
- jsonl: one JSON object per line (best for piping into tools)
- json: a single JSON array
- md: human-friendly Markdown

Examples:
    glossary process "Lectures/Week 1.md"
    glossary scan
    glossary cache list
    glossary settings set model llama3.1
    glossary doctor
"#
)]
pub struct Cli {
    /// Vault root directory.
    #[arg(
        long,
        global = true,
        default_value = ".",
        value_name = "DIR",
        long_help = "Vault root directory (defaults to the current directory).\n\n\
Document paths, the glossary folder, the cache file and the settings file are all\n\
resolved relative to this root."
    )]
    pub vault: PathBuf,

    /// Output format (jsonl/json/md).
    #[arg(
        long,
        global = true,
        default_value = "jsonl",
        value_name = "FORMAT",
        long_help = "Select the output format for ResultSet.\n\n\
Supported values:\n\
- jsonl (default)\n\
- json\n\
- md (markdown)"
    )]
    pub format: String,

    /// Disable colored output (when applicable).
    #[arg(
        long,
        global = true,
        long_help = "Disable colored notices. This is useful when piping stderr to files or when\n\
your terminal does not support ANSI colors."
    )]
    pub no_color: bool,

    /// Quiet mode (no notices).
    #[arg(
        short,
        long,
        global = true,
        long_help = "Suppress progress notices. Results are still printed to stdout."
    )]
    pub quiet: bool,

    /// Verbose mode (more diagnostics).
    #[arg(
        short,
        long,
        global = true,
        long_help = "Enable debug logging on stderr. RUST_LOG takes precedence when set."
    )]
    pub verbose: bool,

    /// Pretty-print JSON/JSONL output with indentation.
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Ollama model for this run.
    #[arg(
        long,
        global = true,
        env = "GLOSSARY_MODEL",
        value_name = "NAME",
        long_help = "Ollama model used for this run, overriding the persisted setting.\n\n\
Example: --model llama3.1:8b"
    )]
    pub model: Option<String>,

    /// Ollama server URL for this run.
    #[arg(
        long,
        global = true,
        env = "OLLAMA_HOST",
        value_name = "URL",
        long_help = "Base URL of the Ollama server, overriding the persisted setting.\n\n\
A bare host:port is accepted. Default: http://localhost:11434"
    )]
    pub ollama_url: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Process glossary links in a document.
    #[command(
        long_about = "Find every [[¤TERM]] link in DOCUMENT and, for each term:\n\
  - keep the existing note if <glossary folder>/<TERM>.md already exists\n\
  - otherwise take the definition from the cache or generate it with Ollama\n\
  - create the note with front-matter tags, a heading and the definition\n\n\
Links of handled terms are rewritten to [[TERM]]; failed terms keep their marker\n\
so the document can simply be processed again.\n\n\
Examples:\n\
  glossary process notes/lecture.md\n\
  glossary --model llama3.1 process notes/lecture.md\n"
    )]
    Process {
        /// Document to process (relative to the vault unless absolute).
        #[arg(value_name = "DOCUMENT")]
        document: Option<PathBuf>,
    },

    /// List unresolved glossary links across the vault.
    #[command(
        long_about = "Walk Markdown documents under the vault (or --scope), honoring ignore files\n\
and skipping hidden folders, and emit one marker item per [[¤TERM]] link.\n\n\
Nothing is modified. Example:\n\
  glossary scan --scope Lectures\n"
    )]
    Scan {
        /// Limit scanning to a subdirectory of the vault.
        #[arg(long, value_name = "PATH")]
        scope: Option<PathBuf>,
    },

    /// Inspect or clear the definition cache.
    Cache {
        #[command(subcommand)]
        action: CacheCommands,
    },

    /// Show or change persisted settings.
    Settings {
        #[command(subcommand)]
        action: SettingsCommands,
    },

    /// Check that Ollama is reachable and the model is installed.
    #[command(
        long_about = "Query the Ollama server (GET /api/tags) and report whether it is reachable\n\
and whether the configured model is installed.\n\n\
Example:\n\
  glossary doctor\n"
    )]
    Doctor,
}

#[derive(Subcommand, Debug)]
pub enum CacheCommands {
    /// List every cached definition.
    List,

    /// Print the cached definition of one term.
    Get {
        #[arg(value_name = "TERM")]
        term: String,
    },

    /// Remove every cached definition.
    Clear,
}

#[derive(Subcommand, Debug)]
pub enum SettingsCommands {
    /// Print the effective settings (overrides included).
    Show,

    /// Update one setting and persist it.
    #[command(
        long_about = "Update one setting and persist it to .ai-glossary/settings.json.\n\n\
Examples:\n\
  glossary settings set glossary-folder Terms\n\
  glossary settings set enable-cache false\n\
  glossary settings set default-tags glossary,cs101\n"
    )]
    Set {
        #[arg(value_enum, value_name = "KEY")]
        key: SettingKey,

        #[arg(value_name = "VALUE")]
        value: String,
    },

    /// Restore default settings.
    Reset,
}

/// Persisted settings with flag/env overrides applied
async fn load_settings(
    root: &Path,
    model: &Option<String>,
    ollama_url: &Option<String>,
) -> Result<Settings> {
    let vault = FsVault::new(root);
    let settings = Settings::load(&vault).await?;
    settings
        .with_overrides(model.clone(), ollama_url.clone())
        .context("Invalid command-line or environment override")
}

/// Run the CLI with parsed arguments
pub async fn run(cli: Cli) -> Result<()> {
    let format: OutputFormat = cli.format.parse().unwrap_or_default();
    let render_config = RenderConfig::with_pretty(format, cli.pretty);

    let root = cli
        .vault
        .canonicalize()
        .with_context(|| format!("Vault not found: {}", cli.vault.display()))?;

    let notifier = ConsoleNotifier::new(cli.quiet, !cli.no_color);

    match cli.command {
        Commands::Process { document } => {
            let settings = load_settings(&root, &cli.model, &cli.ollama_url).await?;
            crate::glossary::api::run_process(
                &root,
                document.as_deref(),
                &settings,
                &notifier,
                render_config,
            )
            .await
        }

        Commands::Scan { scope } => {
            crate::glossary::api::run_scan(&root, scope.as_deref(), render_config)
        }

        Commands::Cache { action } => match action {
            CacheCommands::List => crate::cache::commands::run_list(&root, render_config).await,
            CacheCommands::Get { term } => {
                crate::cache::commands::run_get(&root, &term, render_config).await
            }
            CacheCommands::Clear => {
                crate::cache::commands::run_clear(&root, &notifier, render_config).await
            }
        },

        Commands::Settings { action } => match action {
            SettingsCommands::Show => {
                let settings = load_settings(&root, &cli.model, &cli.ollama_url).await?;
                crate::settings::run_show(&settings, render_config)
            }
            SettingsCommands::Set { key, value } => {
                crate::settings::run_set(&root, key, &value, render_config).await
            }
            SettingsCommands::Reset => crate::settings::run_reset(&root, render_config).await,
        },

        Commands::Doctor => {
            let settings = load_settings(&root, &cli.model, &cli.ollama_url).await?;
            crate::doctor::run_doctor(&root, &settings, render_config).await
        }
    }
}
