//! Source tables and user configuration on disk

pub mod columns;
pub mod loader;
pub mod parse;
pub mod storage;

pub use loader::{LoadError, MarketTables, SourcePaths, TickerStats};
pub use storage::{AppConfig, DataDirectory, OutputFormat, StorageError};
