//! # Command Dispatch
//!
//! Wires one invocation together: logging, configuration, the file store,
//! the page context and a [`PopupController`]. Each subcommand is a single
//! popup action; its status message and the refreshed list are printed, and
//! a failed action is returned as an error so `main` exits with status 1.

use super::render::{render_config, render_json, render_status, render_view};
use super::setup::{Cli, Commands};
use anyhow::{anyhow, bail, Context, Result};
use clap::Parser;
use pagenotesapp::config::{default_config_file, NotesConfig};
use pagenotesapp::controller::{Outcome, PageContext, PopupController, TabInfo};
use pagenotesapp::store::fs::FileStore;
use std::io::{self, BufRead, Write};
use std::sync::Arc;
use tracing::debug;
use tracing_subscriber::EnvFilter;

type Controller = PopupController<FileStore>;

#[tokio::main]
pub async fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut config = NotesConfig::load().context("Failed to load configuration")?;
    if let Some(dir) = cli.data {
        config.data_dir = Some(dir);
    }
    let data_dir = config.data_dir()?;
    debug!(data_dir = %data_dir.display(), "using data directory");

    let store = Arc::new(FileStore::open(&data_dir));

    match cli.command {
        Commands::Add {
            content,
            url,
            title,
        } => {
            let controller = controller(&store, url, title, &config)?;
            controller.set_draft(content);
            let outcome = controller.save_draft().await;
            finish(&controller, outcome)?;
            print_view(&controller, false)?;
        }
        Commands::List { url, json } => {
            let controller = controller(&store, url, None, &config)?;
            let outcome = controller.load_notes().await;
            finish(&controller, outcome)?;
            print_view(&controller, json)?;
        }
        Commands::Edit { id, content, url } => {
            let controller = controller(&store, url, None, &config)?;
            let outcome = controller.load_notes().await;
            finish(&controller, outcome)?;
            if !controller.begin_edit(&id) {
                bail!("No note with id {} on this page", id);
            }
            controller.set_edit_text(content);
            let outcome = controller.save_edit().await;
            finish(&controller, outcome)?;
            print_view(&controller, false)?;
        }
        Commands::Delete { id, url, yes } => {
            let controller = controller(&store, url, None, &config)?;
            let outcome = controller
                .delete_note(&id, |prompt| yes || confirm(prompt))
                .await;
            if outcome == Outcome::Cancelled {
                println!("Delete cancelled.");
                return Ok(());
            }
            finish(&controller, outcome)?;
            print_view(&controller, false)?;
        }
        Commands::Search { query, url, json } => {
            let controller = controller(&store, url, None, &config)?;
            let outcome = controller.search(&query).await;
            finish(&controller, outcome)?;
            print_view(&controller, json)?;
        }
        Commands::Config => {
            print!(
                "{}",
                render_config(&config, &data_dir, default_config_file().as_deref())
            );
        }
    }

    debug!(
        dropped = store.diagnostics().dropped_records,
        "invalid records dropped this session"
    );
    Ok(())
}

/// Logs go to stderr so stdout stays clean for `--json`.
fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

fn controller(
    store: &Arc<FileStore>,
    url: Option<String>,
    title: Option<String>,
    config: &NotesConfig,
) -> Result<Controller> {
    let page = PageContext::resolve(Some(TabInfo { url, title }))?;
    Ok(PopupController::new(Arc::clone(store), page, config))
}

/// Prints the status message of a successful action, or turns a failed one into an error.
fn finish(controller: &Controller, outcome: Outcome) -> Result<()> {
    let status = controller.status();
    if !outcome.is_success() {
        return Err(match status {
            Some(message) => anyhow!(message.content),
            None => anyhow!("Action failed"),
        });
    }
    if let Some(message) = status {
        println!("{}", render_status(&message));
    }
    Ok(())
}

fn print_view(controller: &Controller, json: bool) -> Result<()> {
    let view = controller.view();
    if json {
        println!("{}", render_json(controller.page(), &view)?);
    } else {
        print!("{}", render_view(controller.page(), &view));
    }
    Ok(())
}

fn confirm(prompt: &str) -> bool {
    eprint!("{} [y/N] ", prompt);
    let _ = io::stderr().flush();
    let mut answer = String::new();
    if io::stdin().lock().read_line(&mut answer).is_err() {
        return false;
    }
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}
