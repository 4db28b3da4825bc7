// Core logic exports
pub mod export;
pub mod flames;
pub mod scoring;
pub mod stats;

pub use export::{export_filename, submissions_csv, ExportError};
pub use flames::{break_tie, flames, Flames};
pub use scoring::{band, compatibility_score, Band};
pub use stats::{CalculationStats, SubmissionStats};
