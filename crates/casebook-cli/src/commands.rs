//! Subcommand implementations.
//!
//! Each command returns the text to print. [`run`] loads configuration,
//! builds the record source the command needs, and dispatches.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use serde::Serialize;

use casebook_client::{CaseStudySource, MemorySource, StoreClient};
use casebook_content::{
    CaseStudyFilter, CaseStudySummary, available_categories, extract, filter_summaries,
};
use casebook_core::CaseStudyRecord;
use casebook_viewer::{CaseStudyModal, ModalState, TextRenderer, load_detail};

use crate::cli::{Cli, Command};
use crate::config::CasebookConfig;
use crate::config_handlers::handle_config_command;
use crate::error::{Error, Result};

/// Run the parsed command line and return its output.
pub async fn run(cli: Cli) -> Result<String> {
    let Cli {
        config: config_path,
        source_file,
        store_url,
        api_key,
        command,
        ..
    } = cli;

    // Config subcommands must work even when the file does not parse
    let config = match &command {
        Command::Config { .. } => CasebookConfig::default(),
        _ => CasebookConfig::load(config_path.as_deref())?.with_overrides(store_url, api_key),
    };
    let company = config.site.company_name.as_str();
    let renderer = TextRenderer::new(company);

    match command {
        Command::Show { id, timeout } => {
            let source = build_source(&config, source_file.as_deref()).await?;
            cmd_show(source, &renderer, &id, Duration::from_secs(timeout)).await
        }
        Command::Detail { key, json } => {
            let source = build_source(&config, source_file.as_deref()).await?;
            cmd_detail(&*source, &renderer, company, &key, json).await
        }
        Command::List {
            category,
            search,
            tags,
            days,
            json,
        } => {
            let source = build_source(&config, source_file.as_deref()).await?;
            let filter = CaseStudyFilter {
                category,
                search,
                tags,
                within_days: days,
            };
            cmd_list(&*source, &renderer, company, &filter, json).await
        }
        Command::Extract { file, json } => cmd_extract(&renderer, &file, json).await,
        Command::Config { action } => Ok(handle_config_command(config_path.as_deref(), action)?),
    }
}

/// Records come from `--source-file` when given, else the remote store.
pub async fn build_source(
    config: &CasebookConfig,
    source_file: Option<&str>,
) -> Result<Arc<dyn CaseStudySource>> {
    match source_file {
        Some(path) => Ok(Arc::new(MemorySource::load(path).await?)),
        None => {
            let store = StoreClient::new(&config.store_config()?)?;
            log::debug!("Using store at {}", store.endpoint());
            Ok(Arc::new(store))
        }
    }
}

/// Open `id` in the dialog, wait for it to settle, and render it.
///
/// The dialog is closed again before returning. Its error state becomes
/// [`Error::Unavailable`] carrying the message the dialog showed.
pub async fn cmd_show(
    source: Arc<dyn CaseStudySource>,
    renderer: &TextRenderer,
    id: &str,
    timeout: Duration,
) -> Result<String> {
    let modal = CaseStudyModal::new(source);
    modal.on_close(|| log::debug!("Case study dialog closed"));
    modal.open(id);

    let output = match modal.wait_settled(timeout).await {
        Ok(ModalState::Error { message, .. }) => Err(Error::Unavailable { message }),
        Ok(state) => Ok(renderer.render_state(&state)),
        Err(e) => Err(Error::Dialog(e)),
    };

    modal.close();
    output
}

/// Detail page for a slug or id.
pub async fn cmd_detail(
    source: &dyn CaseStudySource,
    renderer: &TextRenderer,
    company: &str,
    key: &str,
    json: bool,
) -> Result<String> {
    let detail = load_detail(source, key, company).await?;
    if json {
        return to_json(&detail);
    }
    Ok(renderer.render_detail(&detail))
}

/// Filtered listing, newest first.
pub async fn cmd_list(
    source: &dyn CaseStudySource,
    renderer: &TextRenderer,
    company: &str,
    filter: &CaseStudyFilter,
    json: bool,
) -> Result<String> {
    let summaries: Vec<CaseStudySummary> = source
        .list_all()
        .await?
        .iter()
        .map(|record| CaseStudySummary::from_record(record, company))
        .collect();
    let shown = filter_summaries(&summaries, filter, Utc::now());
    log::debug!("Listing {} of {} case studies", shown.len(), summaries.len());

    if json {
        return to_json(&shown);
    }

    let mut out = format!(
        "Categories: All, {}\n\n",
        available_categories(&summaries).join(", ")
    );
    if shown.is_empty() {
        out.push_str("No case studies match.\n");
        return Ok(out);
    }
    for summary in &shown {
        out.push_str(&renderer.render_summary(summary));
        out.push('\n');
    }
    Ok(out)
}

/// Extract the dialog view model from a record stored as JSON.
pub async fn cmd_extract(renderer: &TextRenderer, file: &str, json: bool) -> Result<String> {
    let content = tokio::fs::read_to_string(file)
        .await
        .map_err(|e| casebook_core::Error::io_with_path(e, file))?;
    let record: CaseStudyRecord =
        serde_json::from_str(&content).map_err(casebook_core::Error::from)?;

    let view = extract(&record);
    if json {
        return to_json(&view);
    }
    Ok(renderer.render_view(&view))
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value).map_err(casebook_core::Error::from)?)
}
