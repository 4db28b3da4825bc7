//! Tinker Hearts - heart submissions, love calculator and match reveal
//!
//! The heart of the crate is the deterministic name compatibility score in
//! [`crate::core::scoring`]. The rest is a small HTTP service around injected
//! storage backends.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{band, compatibility_score, flames, Band, Flames};
pub use models::{CompatibilityRecord, MatchResult, NewSubmission, Submission};
pub use services::{CalculationStore, MatchResultStore, StoreError, SubmissionStore};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        assert_eq!(compatibility_score("Alice", "Bob"), 60);
        assert_eq!(band(60), "Good Match");
    }
}
