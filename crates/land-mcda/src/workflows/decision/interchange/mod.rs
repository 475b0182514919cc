//! CSV interchange for alternative score sheets and ranked results.

mod export;
mod import;

pub use export::{results_csv_string, write_results_csv};
pub use import::{AlternativeCsvImporter, AlternativeImportError};
