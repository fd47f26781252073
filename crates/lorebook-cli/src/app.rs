//! Lorebook CLI application.
//!
//! Wires the parsed arguments to client operations: builds the
//! [`LorebookClient`] from configuration, initialises logging, and
//! dispatches commands.

use std::time::Duration;

use lorebook_client::LorebookClient;
use lorebook_core::{Result, RouteContext};
use tracing_subscriber::EnvFilter;

use crate::cli::{CliArgs, Command, ConfigAction, ConfigCommand, SearchAction, SearchCommand};
use crate::config::LorebookConfig;

// ============================================================================
// App
// ============================================================================

/// The CLI application: configuration plus a constructed client.
pub struct App {
    config: LorebookConfig,
    version: String,
}

impl App {
    /// Create from CLI args, loading config from file/env.
    pub fn from_args(args: &CliArgs) -> Result<Self> {
        let config = LorebookConfig::load(args.config.as_deref())?;
        Ok(Self::new(config))
    }

    /// Create a new application with the given configuration.
    pub fn new(config: LorebookConfig) -> Self {
        Self {
            config,
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    /// Get a reference to the loaded configuration.
    pub fn config(&self) -> &LorebookConfig {
        &self.config
    }

    /// Initialise tracing-based logging.
    ///
    /// Uses `RUST_LOG` env var if set, otherwise defaults based on
    /// verbosity flags.
    pub fn init_logging(&self, verbose: bool, quiet: bool) {
        let filter = if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else if quiet {
            EnvFilter::new("warn")
        } else if verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("info")
        };

        // Ignore error if a subscriber is already set (e.g. in tests).
        let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
    }

    /// Build a client from the loaded backend configuration.
    pub fn client(&self) -> Result<LorebookClient> {
        let base_url = self.config.backend.base_url.clone();
        match self.config.backend.timeout_secs {
            Some(secs) => LorebookClient::with_timeout(base_url, Duration::from_secs(secs)),
            None => Ok(LorebookClient::new(base_url)),
        }
    }

    /// Run the CLI with the given arguments.
    pub async fn run(&self, args: CliArgs) -> Result<()> {
        self.init_logging(args.verbose, args.quiet);

        match args.command {
            Some(Command::Page {
                franchise,
                path,
                json,
            }) => self.handle_page(&franchise, &path, json).await,
            Some(Command::LastChanged { path }) => {
                let ts = self.client()?.fetch_last_changed(&path).await?;
                println!("{ts}");
                Ok(())
            }
            Some(Command::Search(SearchCommand { command })) => self.handle_search(command).await,
            Some(Command::Version) => {
                println!("lorebook {}", self.version);
                Ok(())
            }
            Some(Command::Config(ConfigCommand { command })) => self.handle_config(command),
            None => {
                println!("lorebook {} — use --help for usage", self.version);
                Ok(())
            }
        }
    }

    /// Fetch, render, and print a content page.
    async fn handle_page(&self, franchise: &str, path: &str, json: bool) -> Result<()> {
        let route = RouteContext::for_franchise(franchise);
        let page = self.client()?.fetch_markdown_parse(path, &route).await?;

        if json {
            print_json(&serde_json::json!({
                "document": page.document,
                "franchise_data": page.franchise_data,
                "used_path": page.used_path,
            }))?;
        } else {
            println!("{}", page.document.html);
        }
        Ok(())
    }

    /// Dispatch search subcommands.
    async fn handle_search(&self, command: SearchAction) -> Result<()> {
        let client = self.client()?;
        match command {
            SearchAction::Wikis { query } => {
                let wikis = client.fetch_search_wikis(&query).await?;
                print_json(&wikis)
            }
            SearchAction::Category { franchise, query } => {
                let results = client.fetch_category_search(&franchise, &query).await?;
                print_json(&results)
            }
            SearchAction::Contents {
                franchise,
                category,
                query,
            } => {
                let results = client
                    .fetch_category_content_search(&franchise, &category, &query)
                    .await?;
                print_json(&results)
            }
        }
    }

    /// Dispatch config subcommands.
    fn handle_config(&self, command: ConfigAction) -> Result<()> {
        match command {
            ConfigAction::Path => {
                match LorebookConfig::default_config_path() {
                    Some(path) => println!("{}", path.display()),
                    None => println!("no config directory available"),
                }
                Ok(())
            }
            ConfigAction::Init { file, force } => {
                let path = file
                    .map(std::path::PathBuf::from)
                    .or_else(LorebookConfig::default_config_path)
                    .ok_or_else(|| {
                        lorebook_core::Error::config("no config path available")
                    })?;

                if path.exists() && !force {
                    return Err(lorebook_core::Error::config(format!(
                        "{} already exists (use --force to overwrite)",
                        path.display()
                    )));
                }

                if let Some(parent) = path.parent() {
                    std::fs::create_dir_all(parent).map_err(|e| {
                        lorebook_core::Error::config(format!("create {}: {e}", parent.display()))
                    })?;
                }

                let contents = LorebookConfig::default().to_toml_string()?;
                std::fs::write(&path, contents).map_err(|e| {
                    lorebook_core::Error::config(format!("write {}: {e}", path.display()))
                })?;

                println!("wrote {}", path.display());
                Ok(())
            }
        }
    }
}

/// Pretty-print a value as JSON on stdout.
fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    let rendered = serde_json::to_string_pretty(value)
        .map_err(|e| lorebook_core::Error::server_error(format!("render output: {e}")))?;
    println!("{rendered}");
    Ok(())
}

// ============================================================================
// Tests
// ============================================================================
