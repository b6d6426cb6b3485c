//! Command-line and environment configuration shared by the binaries

use crate::error::Result;
use crate::filter::{parse_digit_list, parse_name_list, FilterCriteria};
use crate::labels::Language;
use crate::session::Recommender;
use clap::Args;
use serde::Deserialize;
use std::path::PathBuf;

/// Default pool file name, relative to the working directory
pub const DEFAULT_POOL_FILE: &str = "favorite_patterns_pool.csv";

/// Default history file name, relative to the working directory
pub const DEFAULT_HISTORY_FILE: &str = "history_selected.csv";

/// Where the two flat files live
#[derive(Debug, Clone, Args)]
pub struct StorageArgs {
    /// Candidate pool: one code per line, no header
    #[arg(long, env = "NUMPICK_POOL", default_value = DEFAULT_POOL_FILE)]
    pub pool: PathBuf,

    /// Selection history: CSV with a `number` column
    #[arg(long, env = "NUMPICK_HISTORY", default_value = DEFAULT_HISTORY_FILE)]
    pub history: PathBuf,

    /// UI language (zh, en, lo, th)
    #[arg(long, env = "NUMPICK_LANG", default_value = "en")]
    pub lang: Language,
}

impl StorageArgs {
    pub fn recommender(&self) -> Recommender {
        Recommender::new(self.pool.clone(), self.history.clone())
    }
}

/// Attribute filters as flags (CLI) or query parameters (server).
/// An absent option keeps its default of "everything allowed".
#[derive(Debug, Clone, Default, Args, Deserialize)]
pub struct FilterArgs {
    /// Allowed leading digits, e.g. "0,3,7"
    #[arg(long)]
    pub digits: Option<String>,

    /// Allowed magnitude classes: large, small
    #[arg(long)]
    pub magnitude: Option<String>,

    /// Allowed parity classes: odd, even
    #[arg(long)]
    pub parity: Option<String>,
}

impl FilterArgs {
    pub fn to_criteria(&self) -> Result<FilterCriteria> {
        let mut criteria = FilterCriteria::default();

        if let Some(digits) = &self.digits {
            criteria.digits = parse_digit_list(digits)?;
        }
        if let Some(magnitude) = &self.magnitude {
            criteria.magnitudes = parse_name_list(magnitude)?;
        }
        if let Some(parity) = &self.parity {
            criteria.parities = parse_name_list(parity)?;
        }

        Ok(criteria)
    }
}
