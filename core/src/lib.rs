pub mod api;
pub mod cli;
pub mod discovery;
pub mod error;
pub mod extraction;
pub mod table;
pub mod types;

pub use api::MetadataExtractor;
pub use cli::report::TableReport;
pub use discovery::Locator;
pub use error::{CmrMetaError, Result};
pub use table::{MetadataRecord, MetadataTable, COLUMNS, DEFAULT_OUTPUT_FILE};
pub use types::*;
