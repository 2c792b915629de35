//! CLI route: single route table and run context.

use crate::cli::parse::Commands;
use crate::cli::presentation::{format_config_json, format_snapshot_table, format_watch_summary};
use crate::config::{ConfigLoader, DocviewConfig};
use crate::deletion::{CollectionInfo, ViewScope};
use crate::error::DocviewError;
use crate::query::QueryModel;
use crate::service::ReplayExecutor;
use crate::snapshot::ResultSnapshot;
use crate::view::DocumentManager;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;
use tracing::{info, warn};

/// Options for replaying a fixture through a mounted view.
#[derive(Debug, Clone)]
pub struct WatchOptions {
    pub fixture: PathBuf,
    pub query: Option<String>,
    pub writeable: bool,
    pub interval_ms: Option<u64>,
    pub max_wait: Duration,
    pub color: bool,
}

/// Runtime context for CLI execution: effective configuration only.
pub struct RunContext {
    config: DocviewConfig,
}

impl RunContext {
    /// Load configuration, from `config_path` if given.
    pub fn new(config_path: Option<PathBuf>) -> Result<Self, DocviewError> {
        let config = match config_path {
            Some(ref path) => ConfigLoader::load_from_file(path)?,
            None => ConfigLoader::load()?,
        };
        Ok(Self { config })
    }

    pub fn with_config(config: DocviewConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &DocviewConfig {
        &self.config
    }

    /// Execute a CLI command via the single route table.
    pub async fn execute(&self, command: &Commands, color: bool) -> Result<String, DocviewError> {
        match command {
            Commands::Watch {
                fixture,
                query,
                writeable,
                interval_ms,
                max_wait_ms,
            } => {
                let options = WatchOptions {
                    fixture: fixture.clone(),
                    query: query.clone(),
                    writeable: *writeable,
                    interval_ms: *interval_ms,
                    max_wait: Duration::from_millis(*max_wait_ms),
                    color,
                };
                self.watch(&options, |table| println!("{}\n", table)).await
            }
            Commands::Config => format_config_json(&self.config),
        }
    }

    /// Mount a view over the fixture and report each new snapshot to `emit`
    /// until nothing is pending or `max_wait` elapses.
    pub async fn watch<F>(&self, options: &WatchOptions, mut emit: F) -> Result<String, DocviewError>
    where
        F: FnMut(String),
    {
        let executor = Arc::new(load_fixture(&options.fixture)?);

        let mut config = self.config.clone();
        if let Some(interval_ms) = options.interval_ms {
            config.refresh.interval_ms = interval_ms;
        }
        config
            .validate()
            .map_err(|errors| DocviewError::ConfigError(errors.join("\n")))?;

        let mut query = QueryModel::new().with_limit(config.listing.default_limit);
        if let Some(ref term) = options.query {
            query = query.with_term(term.as_str());
        }
        let collection = CollectionInfo::new("fixture", options.writeable);

        let mut view = DocumentManager::new(
            executor.clone(),
            Some(collection),
            ViewScope::Collection,
            &query,
            &config,
        );
        view.mount();
        info!(fixture = %options.fixture.display(), "Watching fixture");

        let poll = Duration::from_millis((config.refresh.interval_ms / 4).max(10));
        let started = Instant::now();
        let mut last_shown: Option<ResultSnapshot> = None;
        let mut shown = 0;
        let settled = loop {
            tokio::time::sleep(poll).await;
            let snapshot = view.snapshot();

            if !snapshot.is_loading() && last_shown.as_ref() != Some(&snapshot) {
                emit(format_snapshot_table(&snapshot, options.color));
                shown += 1;
                last_shown = Some(snapshot.clone());
            }

            if !snapshot.is_loading() && !snapshot.has_pending() {
                break snapshot.total().is_some();
            }
            if started.elapsed() >= options.max_wait {
                warn!("Gave up waiting for pending documents");
                break false;
            }
        };
        view.unmount();

        Ok(format_watch_summary(executor.call_count(), shown, settled))
    }
}

fn load_fixture(path: &Path) -> Result<ReplayExecutor, DocviewError> {
    ReplayExecutor::from_file(path)
}
