//! Command-line interface for syllabus.
//!
//! Provides the unit grid, the unit detail view, resource location and
//! opening, and bulk availability checks, all driven through a [`Session`].

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tokio::task::JoinSet;

use crate::adapters::{AssetProbe, HttpProbe, SystemOpener, TracingSink};
use crate::config::{self, ResolvedConfig};
use crate::core::{LoadOutcome, LoadState, Session};
use crate::domain::{Curriculum, ResourceKind};

/// syllabus - Curriculum resource browser
#[derive(Parser, Debug)]
#[command(name = "syllabus")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Config file (skips .syllabus/config.yaml discovery)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Override the resource store base URL
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Override the curriculum data file
    #[arg(long, global = true)]
    pub data: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List all units (grid view)
    Units,

    /// Show the topics of a unit (detail view)
    Unit {
        /// Unit number
        unit: u32,
    },

    /// Print the URL of a topic resource
    Locate {
        /// Unit number
        unit: u32,

        /// Topic number (1-based) or exact topic title
        topic: String,

        /// Resource kind (video, tutorial/tute, questions/quiz)
        #[arg(short, long, default_value = "video")]
        kind: ResourceKind,
    },

    /// Load a topic resource and open it
    Open {
        /// Unit number
        unit: u32,

        /// Topic number (1-based) or exact topic title
        topic: String,

        /// Resource kind (video, tutorial/tute, questions/quiz)
        #[arg(short, long, default_value = "video")]
        kind: ResourceKind,

        /// Open the question set directly in the browser
        #[arg(long)]
        external: bool,

        /// Open the resource in the browser once it has loaded
        #[arg(long)]
        launch: bool,
    },

    /// Check that every resource of a unit is available
    Check {
        /// Unit number
        unit: u32,

        /// Only check one resource kind
        #[arg(short, long)]
        kind: Option<ResourceKind>,
    },

    /// Validate the curriculum data file
    Validate,

    /// Show resolved configuration (debug)
    Config,
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(self) -> Result<()> {
        let config = self.resolve_config()?;

        match self.command {
            Commands::Units => list_units(&config).await,
            Commands::Unit { unit } => show_unit(&config, unit).await,
            Commands::Locate { unit, topic, kind } => {
                locate_resource(&config, unit, &topic, kind).await
            }
            Commands::Open {
                unit,
                topic,
                kind,
                external,
                launch,
            } => open_resource(&config, unit, &topic, kind, external, launch).await,
            Commands::Check { unit, kind } => check_unit(&config, unit, kind).await,
            Commands::Validate => validate_data(&config).await,
            Commands::Config => show_config(&config),
        }
    }

    /// Resolve configuration and apply command-line overrides
    fn resolve_config(&self) -> Result<ResolvedConfig> {
        let mut config = config::load_config(self.config.as_deref())?;

        if let Some(ref base_url) = self.base_url {
            config.base_url = base_url.clone();
        }
        if let Some(ref data) = self.data {
            config.data_file = data.clone();
        }

        Ok(config)
    }
}

/// Load the curriculum (fatal on failure)
async fn load_curriculum(config: &ResolvedConfig) -> Result<Curriculum> {
    Curriculum::load(&config.data_file)
        .await
        .with_context(|| {
            format!(
                "Curriculum unavailable (data file: {})",
                config.data_file.display()
            )
        })
}

/// Build a browsing session wired to the system collaborators
async fn open_session(config: &ResolvedConfig) -> Result<Session> {
    let curriculum = load_curriculum(config).await?;

    Ok(Session::new(
        curriculum,
        config.locator(),
        Box::new(TracingSink),
        Box::new(SystemOpener),
    )
    .with_policy(config.load_policy()))
}

/// Open a unit and resolve a topic argument to its index and title
fn select_topic(session: &mut Session, unit: u32, topic: &str) -> Result<(usize, String)> {
    let unit = session.select(unit)?;
    let (index, title) = unit
        .find_topic(topic)
        .with_context(|| format!("Topic '{}' not found in unit {}", topic, unit.unit_number))?;
    Ok((index, title.to_string()))
}

/// Grid view
async fn list_units(config: &ResolvedConfig) -> Result<()> {
    let curriculum = load_curriculum(config).await?;

    println!("{} · {}", curriculum.subject, curriculum.grade);
    println!();
    println!("{:<4} {:<6} {:<50} {:>7} {:>8}", "", "UNIT", "TITLE", "TOPICS", "PERIODS");
    println!("{}", "-".repeat(79));

    for unit in curriculum.units_in_order() {
        println!(
            "{:<4} {:<6} {:<50} {:>7} {:>8}",
            unit.icon(),
            unit.unit_number,
            truncate(&unit.unit_title, 50),
            unit.topics.len(),
            unit.periods
        );
    }

    Ok(())
}

/// Detail view
async fn show_unit(config: &ResolvedConfig, unit_number: u32) -> Result<()> {
    let mut session = open_session(config).await?;
    let unit = session.select(unit_number)?.clone();

    println!("{} Unit {}: {}", unit.icon(), unit.unit_number, unit.unit_title);
    println!("{} periods · {} topics", unit.periods, unit.topics.len());
    println!();

    for index in 0..unit.topics.len() {
        session.render_card(index)?;
        if let Some(label) = unit.topic_label(index) {
            println!("{}", label);
        }
        for kind in ResourceKind::ALL {
            println!("     {:<20} {}", kind.title(), kind.description());
        }
    }

    Ok(())
}

/// Print a resource URL
async fn locate_resource(
    config: &ResolvedConfig,
    unit: u32,
    topic: &str,
    kind: ResourceKind,
) -> Result<()> {
    let mut session = open_session(config).await?;
    let (_, title) = select_topic(&mut session, unit, topic)?;

    let unit_title = session
        .selected_unit()
        .map(|u| u.unit_title.clone())
        .unwrap_or_default();
    println!("{}", session.locator().locate(&unit_title, &title, kind));

    Ok(())
}

/// Activate a resource, wait for its load and report or open it
async fn open_resource(
    config: &ResolvedConfig,
    unit: u32,
    topic: &str,
    kind: ResourceKind,
    external: bool,
    launch: bool,
) -> Result<()> {
    let mut session = open_session(config).await?;
    let (index, _) = select_topic(&mut session, unit, topic)?;

    if external {
        if kind != ResourceKind::Questions {
            anyhow::bail!("--external is only available for question sets");
        }
        let url = session.open_questions_externally(index)?;
        println!("Opened {}", url);
        return Ok(());
    }

    let ticket = session.activate(index, kind)?;
    let probe = HttpProbe::new();
    eprintln!("Loading {}...", kind.viewer_title().to_lowercase());

    let outcome: LoadOutcome = probe
        .probe(&ticket.url, session.policy().timeout)
        .await
        .into();
    session.complete(&ticket, outcome);

    let card = session
        .card(index)
        .context("Topic card disappeared during load")?;

    match card.load_state() {
        LoadState::Ready => {
            if let Some(title) = card.viewer_title() {
                println!("{}", title);
            }
            println!("{}", ticket.url);
            if launch {
                session.launch(index)?;
            }
            Ok(())
        }
        LoadState::Error(error) => {
            if let Some(message) = card.diagnostic() {
                eprintln!("{}", message);
            }
            if kind.is_document() {
                eprintln!("Trying to open in a new tab...");
                session.reopen_in_new_tab(index)?;
                return Ok(());
            }
            Err(error.clone().into())
        }
        state => anyhow::bail!("Resource still {} after load", state.label()),
    }
}

/// Probe every topic resource of a unit
async fn check_unit(config: &ResolvedConfig, unit: u32, kind: Option<ResourceKind>) -> Result<()> {
    let mut session = open_session(config).await?;
    let topic_count = session.select(unit)?.topics.len();

    let kinds: Vec<ResourceKind> = match kind {
        Some(kind) => vec![kind],
        None => ResourceKind::ALL.to_vec(),
    };

    let probe: Arc<dyn AssetProbe> = Arc::new(HttpProbe::new());
    let timeout = session.policy().timeout;
    let mut failures = 0;

    println!("{:<4} {:<40} {:<10} {:<8}", "#", "TOPIC", "KIND", "STATE");
    println!("{}", "-".repeat(64));

    for kind in kinds {
        let mut tasks = JoinSet::new();

        for index in 0..topic_count {
            let ticket = session.activate(index, kind)?;
            let probe = Arc::clone(&probe);
            tasks.spawn(async move {
                let result = probe.probe(&ticket.url, timeout).await;
                (ticket, result)
            });
        }

        // Completions arrive in any order; tickets route them to their card
        while let Some(joined) = tasks.join_next().await {
            let (ticket, result) = joined.context("Probe task failed")?;
            session.complete(&ticket, result.into());
        }
        session.expire_stale_loads(Instant::now());

        for card in session.cards() {
            let state = card.load_state();
            if matches!(state, LoadState::Error(_)) {
                failures += 1;
            }
            println!(
                "{:<4} {:<40} {:<10} {:<8}",
                card.topic_index() + 1,
                truncate(card.topic(), 40),
                kind.to_string(),
                state.label()
            );
            if let LoadState::Error(error) = state {
                println!("     {}", error);
            }
        }
    }

    if failures > 0 {
        anyhow::bail!("{} resource(s) unavailable via {}", failures, probe.name());
    }

    Ok(())
}

/// Validate the curriculum data file
async fn validate_data(config: &ResolvedConfig) -> Result<()> {
    let curriculum = load_curriculum(config).await?;

    println!(
        "✓ {} ({}): {} units, {} topics",
        curriculum.subject,
        curriculum.grade,
        curriculum.units.len(),
        curriculum.topic_count()
    );

    Ok(())
}

/// Show resolved configuration
fn show_config(config: &ResolvedConfig) -> Result<()> {
    println!("Base URL:     {}", config.base_url);
    println!("Data file:    {}", config.data_file.display());
    println!("Load timeout: {}s", config.load_timeout.as_secs());
    match &config.config_file {
        Some(path) => println!("Config file:  {}", path.display()),
        None => println!("Config file:  (none, using defaults)"),
    }

    Ok(())
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let kept: String = text.chars().take(width.saturating_sub(1)).collect();
    format!("{}…", kept)
}
