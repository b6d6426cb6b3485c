// 🧭 Recommender - one explicit pipeline per user action
// Nothing is cached between actions: pool and history are re-read every time.

use crate::code::Code;
use crate::error::Result;
use crate::filter::FilterCriteria;
use crate::history::{History, HistoryStore};
use crate::pipeline::{filter_pool, FilterReport};
use crate::pool::load_pool;
use crate::sampler::sample;
use rand::Rng;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::info;

/// Count offered by the UI before the user changes it
pub const DEFAULT_GENERATE_COUNT: usize = 5;

/// Bound a requested count to `1..=available` (1 when nothing is available)
pub fn clamp_count(requested: usize, available: usize) -> usize {
    requested.clamp(1, available.max(1))
}

/// Pool and history as read at the start of one action
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub pool: Vec<Code>,
    pub history: History,
}

impl Snapshot {
    pub fn evaluate(&self, criteria: &FilterCriteria) -> FilterReport {
        filter_pool(&self.pool, &self.history, criteria)
    }
}

/// Result of one generate action
#[derive(Debug, Clone, Serialize)]
pub struct Generation {
    /// Pipeline state the selection was drawn from
    pub report: FilterReport,

    /// Newly drawn codes, already persisted to history
    pub selection: Vec<Code>,

    /// History length after the append
    pub history_len: usize,
}

#[derive(Debug, Clone)]
pub struct Recommender {
    pool_path: PathBuf,
    history: HistoryStore,
}

impl Recommender {
    pub fn new(pool_path: impl Into<PathBuf>, history_path: impl Into<PathBuf>) -> Self {
        Recommender {
            pool_path: pool_path.into(),
            history: HistoryStore::new(history_path),
        }
    }

    pub fn pool_path(&self) -> &Path {
        &self.pool_path
    }

    pub fn history_store(&self) -> &HistoryStore {
        &self.history
    }

    /// Fresh read of both files. A missing pool halts here.
    pub fn snapshot(&self) -> Result<Snapshot> {
        let pool = load_pool(&self.pool_path)?;
        let history = self.history.load()?;
        Ok(Snapshot { pool, history })
    }

    pub fn evaluate(&self, criteria: &FilterCriteria) -> Result<FilterReport> {
        Ok(self.snapshot()?.evaluate(criteria))
    }

    /// Evaluate, draw, and append the draw to history. No confirm step.
    pub fn generate<R: Rng + ?Sized>(
        &self,
        criteria: &FilterCriteria,
        count: usize,
        rng: &mut R,
    ) -> Result<Generation> {
        let snapshot = self.snapshot()?;
        let report = snapshot.evaluate(criteria);

        let selection = sample(report.ensure_candidates()?, count, rng)?;
        let updated = self.history.append(&snapshot.history, &selection)?;

        info!(
            "Generated {} codes from {} candidates",
            selection.len(),
            report.candidates.len()
        );

        Ok(Generation {
            report,
            selection,
            history_len: updated.len(),
        })
    }

    pub fn clear_history(&self) -> Result<()> {
        self.history.clear()
    }

    pub fn load_history(&self) -> Result<History> {
        self.history.load()
    }
}
