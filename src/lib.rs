pub mod error;
pub mod report;
pub mod utils;

// Re-export common items
pub use error::{ReportError, Result};
pub use report::aggregate::{failed, passed, summary, Summary};
pub use report::html::{render, RenderOptions};
pub use report::sauce::SessionSigner;
pub use report::store::ReportStore;
pub use report::types::TestRecord;
