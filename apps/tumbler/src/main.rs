use std::{sync::Arc, time::Duration};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use client_core::{Catalog, ChemBackend, HttpBackend, SourceCard, SpeechRecognizer, UnsupportedSpeech};
use shared::domain::{CatalogEntry, ItemKind, SelectableItem};
use tracing_subscriber::EnvFilter;
use tumbler::{
    config::{load_settings, Settings},
    controller::{events::UiEvent, Controller},
    ui::{
        assistant::Speaker,
        reaction::ReactionOutput,
        search::SearchResultCard,
        AppState,
    },
};

#[derive(Parser, Debug)]
#[command(name = "tumbler", about = "Drive the chemistry tumbler from the terminal")]
struct Args {
    /// Base URL of the chemistry service.
    #[arg(long, global = true)]
    backend_url: Option<String>,
    /// TOML catalog replacing the built-in elements and compounds.
    #[arg(long, global = true)]
    catalog: Option<std::path::PathBuf>,
    #[arg(long, global = true)]
    swap_delay_ms: Option<u64>,
    /// Seconds to wait for each backend round trip.
    #[arg(long, global = true, default_value_t = 30)]
    timeout_secs: u64,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Drop the given formulas into the tumbler and react them.
    React {
        #[arg(required = true)]
        formulas: Vec<String>,
    },
    /// Autocomplete a prefix and resolve a candidate.
    Search {
        text: String,
        /// Candidate index to commit; commits the raw text when omitted.
        #[arg(long)]
        pick: Option<usize>,
    },
    /// Ask the assistant a question.
    Ask { question: String },
    /// Find a reaction chain between two compounds.
    Chain { start: String, end: String },
    /// Print the element and compound catalog.
    Catalog,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let mut settings = load_settings();
    apply_args(&mut settings, &args);

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&settings.log_filter))
        .context("invalid log filter")?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let catalog = settings.catalog()?;
    if let Command::Catalog = args.command {
        print_catalog(&catalog);
        return Ok(());
    }

    let backend: Arc<dyn ChemBackend> = Arc::new(
        HttpBackend::new(&settings.backend_url)
            .with_context(|| format!("failed to configure backend '{}'", settings.backend_url))?,
    );
    let speech: Arc<dyn SpeechRecognizer> = Arc::new(UnsupportedSpeech);
    let state =
        AppState::new(catalog, speech.is_supported()).with_swap_delay(settings.swap_delay());
    let mut controller = Controller::launch(state, backend, speech);
    let timeout = Duration::from_secs(args.timeout_secs);
    tracing::info!(backend = %settings.backend_url, command = ?args.command, "tumbler starting");

    match args.command {
        Command::React { formulas } => run_react(&mut controller, &formulas, timeout),
        Command::Search { text, pick } => run_search(&mut controller, &text, pick, timeout),
        Command::Ask { question } => run_ask(&mut controller, &question, timeout),
        Command::Chain { start, end } => run_chain(&mut controller, start, end, timeout),
        Command::Catalog => Ok(()),
    }
}

fn apply_args(settings: &mut Settings, args: &Args) {
    if let Some(url) = &args.backend_url {
        settings.backend_url = url.clone();
    }
    if let Some(path) = &args.catalog {
        settings.catalog_path = Some(path.clone());
    }
    if let Some(ms) = args.swap_delay_ms {
        settings.swap_delay_ms = ms;
    }
}

fn print_catalog(catalog: &Catalog) {
    println!("Compounds:");
    for entry in catalog.compounds() {
        println!("  {:<10} {}", entry.identity(), entry.name());
    }
    println!("Elements:");
    for entry in catalog.elements() {
        match entry {
            CatalogEntry::Element {
                symbol,
                name,
                color: Some(color),
            } => println!("  {symbol:<10} {name} {color}"),
            _ => println!("  {:<10} {}", entry.identity(), entry.name()),
        }
    }
}

/// Feeds one formula through the same drag gesture a pointer would make.
fn drop_formula(controller: &mut Controller, formula: &str) -> Result<()> {
    let card = match controller.state().catalog.lookup(formula) {
        Some(entry) => SourceCard::from_entry(entry),
        None => SourceCard {
            kind: ItemKind::Compound,
            formula: formula.to_string(),
            name: formula.to_string(),
            background: None,
        },
    };
    controller.dispatch(UiEvent::DragStarted {
        list: card.kind,
        card: Some(card.clone()),
    });
    let payload = match controller.state().drag.payload() {
        Some(payload) => payload.to_string(),
        None => serde_json::to_string(&SelectableItem::new(
            card.formula.clone(),
            card.name.clone(),
            card.kind,
        ))
        .context("failed to encode drop payload")?,
    };
    controller.dispatch(UiEvent::DragOver);
    controller.dispatch(UiEvent::ItemDropped { payload });
    controller.dispatch(UiEvent::DragEnded);
    Ok(())
}

fn run_react(controller: &mut Controller, formulas: &[String], timeout: Duration) -> Result<()> {
    for formula in formulas {
        drop_formula(controller, formula)?;
    }
    controller.dispatch(UiEvent::ReactionRequested);

    let settled = controller.run_until(timeout, |state| {
        state.reaction.output != ReactionOutput::Pending && state.reaction.pending_swap().is_none()
    });
    if !settled {
        bail!("timed out waiting for the reaction to settle");
    }

    let state = controller.state();
    println!("{}", state.reaction.output.render());
    if let Some(plan) = &state.reaction.animation {
        println!(
            "Animation: {} ({}, {} effects)",
            plan.tag.as_str(),
            plan.liquid.css(),
            plan.effect_count()
        );
    }
    println!("Tumbler [{}%] {}", state.tumbler.fill_percent, state.tumbler.label.text());
    for row in &state.tumbler.rows {
        println!("  {:>4}px {}", row.top_px, row.formula);
    }
    if let ReactionOutput::Error(_) = state.reaction.output {
        bail!("reaction failed");
    }
    Ok(())
}

fn run_search(
    controller: &mut Controller,
    text: &str,
    pick: Option<usize>,
    timeout: Duration,
) -> Result<()> {
    controller.dispatch(UiEvent::SearchInputChanged {
        text: text.to_string(),
    });
    if !controller.run_until(timeout, |state| !state.search.autocomplete_pending()) {
        bail!("timed out waiting for suggestions");
    }
    for (idx, candidate) in controller.state().search.candidates().iter().enumerate() {
        println!("[{idx}] {candidate}");
    }

    match pick {
        Some(index) => {
            if controller.state().search.candidate(index).is_none() {
                bail!("no candidate at index {index}");
            }
            controller.dispatch(UiEvent::CandidateClicked { index });
        }
        None => match commit_target(text) {
            Some(candidate) => controller.dispatch(UiEvent::SearchCommitted { candidate }),
            None => return Ok(()),
        },
    }

    let resolved = controller.run_until(timeout, |state| {
        !matches!(state.search.result, SearchResultCard::Searching { .. })
    });
    if !resolved {
        bail!("timed out waiting for the web search");
    }
    println!("{}", controller.state().search.result.render());
    Ok(())
}

/// Raw text committed when no candidate is picked; blank input commits nothing.
fn commit_target(text: &str) -> Option<String> {
    let trimmed = text.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn run_ask(controller: &mut Controller, question: &str, timeout: Duration) -> Result<()> {
    controller.dispatch(UiEvent::AssistantOpened);
    controller.dispatch(UiEvent::AssistantInputChanged {
        text: question.to_string(),
    });
    controller.dispatch(UiEvent::AssistantSubmitted);
    if !controller.run_until(timeout, |state| state.assistant.controls_enabled()) {
        bail!("timed out waiting for the assistant");
    }
    for entry in controller.state().assistant.transcript() {
        let speaker = match entry.speaker {
            Speaker::User => "you",
            Speaker::Assistant => "assistant",
        };
        println!("[{}] {speaker}: {}", entry.at.format("%H:%M:%S"), entry.text);
    }
    Ok(())
}

fn run_chain(controller: &mut Controller, start: String, end: String, timeout: Duration) -> Result<()> {
    controller.dispatch(UiEvent::ReactionChainRequested { start, end });
    if !controller.run_until(timeout, |state| state.chain.is_some()) {
        bail!("timed out waiting for the reaction chain");
    }
    match &controller.state().chain {
        Some(Ok(chain)) => println!("{}", chain.join(" → ")),
        Some(Err(err)) => bail!("{err}"),
        None => {}
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::commit_target;

    #[test]
    fn blank_search_text_commits_nothing() {
        assert_eq!(commit_target(""), None);
        assert_eq!(commit_target("   \t"), None);
    }

    #[test]
    fn search_text_is_trimmed_before_commit() {
        assert_eq!(commit_target("  NaCl "), Some("NaCl".to_string()));
    }
}
