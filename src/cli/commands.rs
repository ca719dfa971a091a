//! Command execution.

use super::{Command, RemoteCommand};
use crate::api::ApiClient;
use crate::config::Config;
use crate::export::Report;
use crate::state::{Action, HistoryItem, SessionPhase};
use crate::App;
use anyhow::{Context, Result, bail};
use chrono::DateTime;
use std::path::{Path, PathBuf};

/// Execute one command.
pub async fn run(command: Command, config: Config, config_path: Option<PathBuf>) -> Result<()> {
    match command {
        Command::Search {
            sector,
            copy,
            save,
            out,
        } => {
            let mut app = App::new(config)?;
            search(&mut app, &sector.join(" "), copy, save, out.as_deref()).await
        }
        Command::History {
            page,
            per_page,
            select,
        } => {
            let mut app = App::new(config)?;
            history(&mut app, page, per_page, select.as_deref())
        }
        Command::Show { id } => {
            let app = App::new(config)?;
            let report = history_report(&app, &id)?;
            print!("{}", report.markdown);
            Ok(())
        }
        Command::Export { id, copy, out } => {
            let app = App::new(config)?;
            let report = history_report(&app, &id)?;
            export(&app, &report, copy, out.as_deref());
            Ok(())
        }
        Command::Remove { id } => {
            let mut app = App::new(config)?;
            if !app.history().contains(&id) {
                bail!("No search with id {id}");
            }
            app.dispatch(Action::RemoveHistory(id.clone()));
            println!("Removed {id}");
            Ok(())
        }
        Command::Clear => {
            let mut app = App::new(config)?;
            let count = app.history().len();
            app.dispatch(Action::ClearHistory);
            println!("Cleared {count} searches");
            Ok(())
        }
        Command::Remote { command } => remote(command, &config).await,
        Command::InitConfig { force } => init_config(config_path, force),
    }
}

async fn search(
    app: &mut App,
    sector: &str,
    copy: bool,
    save: bool,
    out: Option<&Path>,
) -> Result<()> {
    if !app.submit_search(sector).await {
        bail!("Enter a sector keyword to search for");
    }

    let session = app.session();
    if session.phase() == SessionPhase::Failure {
        bail!("{}", session.error.as_deref().unwrap_or_default());
    }

    let report = app
        .current_report()
        .context("search finished without a result")?;
    print!("{}", report.markdown);

    if copy || save {
        println!();
    }
    if copy && app.copy_report(&report) {
        println!("Copied report to clipboard");
    }
    if save && let Some(path) = app.save_report(&report, out) {
        println!("Saved report to {}", path.display());
    }
    Ok(())
}

fn history(
    app: &mut App,
    page: usize,
    per_page: Option<usize>,
    select: Option<&str>,
) -> Result<()> {
    if let Some(size) = per_page {
        app.dispatch(Action::SetHistoryPageSize(size));
    }
    app.dispatch(Action::SetHistoryPage(page));
    if let Some(id) = select {
        if !app.history().contains(id) {
            bail!("No search with id {id}");
        }
        app.dispatch(Action::SelectHistory(id.to_string()));
    }

    let store = app.store();
    if store.history.is_empty() {
        println!("No search history yet");
        return Ok(());
    }

    println!(
        "Page {} of {} ({} searches)",
        store.browser.current_page(),
        store.browser.total_pages(&store.history),
        store.history.len()
    );
    let selected = store.browser.selected_id();
    for item in store.browser.visible(&store.history) {
        let marker = if selected == Some(item.id.as_str()) { '>' } else { ' ' };
        println!("{marker} {}  {}  {}", format_timestamp(item), item.id, item.sector);
    }

    if let Some(item) = store.selected_history() {
        println!("\n{}\n\n{}", item.sector, item.data.summary);
    }
    Ok(())
}

fn history_report(app: &App, id: &str) -> Result<Report> {
    app.history_report(id)
        .with_context(|| format!("No search with id {id}"))
}

fn export(app: &App, report: &Report, copy: bool, out: Option<&Path>) {
    if copy {
        if app.copy_report(report) {
            println!("Copied report to clipboard");
        }
    } else if let Some(path) = app.save_report(report, out) {
        println!("Saved report to {}", path.display());
    }
}

async fn remote(command: RemoteCommand, config: &Config) -> Result<()> {
    let client = ApiClient::new(config.api.clone())?;
    match command {
        RemoteCommand::List { page, per_page } => {
            let entries = client
                .list_history(page.max(1), per_page.max(1))
                .await
                .context("Failed to fetch history")?;
            if entries.is_empty() {
                println!("No search history yet");
            }
            for entry in entries {
                println!("{}  {}", entry.id, entry.sector);
            }
        }
        RemoteCommand::Show { id } => {
            let detail = client
                .fetch_history(&id)
                .await
                .context("Failed to fetch history detail")?;
            print!("{}", Report::new(&detail.sector, &detail.data).markdown);
        }
        RemoteCommand::Remove { id } => {
            client
                .delete_history(&id)
                .await
                .context("Failed to delete history item")?;
            println!("Removed {id}");
        }
        RemoteCommand::Clear => {
            client
                .clear_history()
                .await
                .context("Failed to clear history")?;
            println!("Cleared remote history");
        }
    }
    Ok(())
}

fn init_config(path: Option<PathBuf>, force: bool) -> Result<()> {
    let path = path.unwrap_or_else(Config::default_path);
    if path.exists() && !force {
        bail!("{} already exists (use --force to overwrite)", path.display());
    }
    let written = Config::default().save(Some(path))?;
    println!("Wrote {}", written.display());
    Ok(())
}

fn format_timestamp(item: &HistoryItem) -> String {
    DateTime::from_timestamp_millis(item.timestamp)
        .map(|at| at.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "-".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::MarketData;

    #[test]
    fn test_format_timestamp() {
        let item = HistoryItem {
            id: "1".to_string(),
            sector: "Fintech".to_string(),
            data: MarketData::new("S"),
            timestamp: 1_700_000_000_000,
        };
        assert_eq!(format_timestamp(&item), "2023-11-14 22:13");
    }
}
