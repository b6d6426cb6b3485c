// numpick - 5-digit code recommender core library
// Exposes all modules for use in the CLI/TUI, API server, and tests

pub mod code;
pub mod config;
pub mod error;
pub mod filter;
pub mod history;
pub mod labels;
pub mod pipeline;
pub mod pool;
pub mod sampler;
pub mod session;

// Re-export commonly used types
pub use code::{is_sequential_run, Code, ParseCodeError, CODE_WIDTH};
pub use config::{FilterArgs, StorageArgs, DEFAULT_HISTORY_FILE, DEFAULT_POOL_FILE};
pub use error::{Error, Result};
pub use filter::{FilterCriteria, Magnitude, Parity};
pub use history::{History, HistoryStore};
pub use labels::{Labels, Language};
pub use pipeline::{filter_pool, FilterReport};
pub use pool::load_pool;
pub use sampler::sample;
pub use session::{clamp_count, Generation, Recommender, Snapshot, DEFAULT_GENERATE_COUNT};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
