//! Runner for single and batch comparisons
//!
//! Holds one configuration and applies it to any number of independent
//! offer lists. Comparisons share no state, so batches run in parallel.

use crate::comparison::{Comparator, Comparison};
use crate::config::ComparisonConfig;
use crate::error::ValidationError;
use crate::offer::Offer;
use crate::report::ComparisonTable;
use crate::locale::Language;
use rayon::prelude::*;

/// Pre-configured comparison runner
///
/// # Example
/// ```ignore
/// let runner = ComparisonRunner::from_env();
/// let comparison = runner.run(&offers)?;
/// let table = runner.table(&comparison, Language::De);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ComparisonRunner {
    comparator: Comparator,
}

impl ComparisonRunner {
    /// Runner with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Runner configured from `COMPARATOR_*` environment variables
    pub fn from_env() -> Self {
        Self::with_config(ComparisonConfig::from_env())
    }

    pub fn with_config(config: ComparisonConfig) -> Self {
        Self {
            comparator: Comparator::new(config),
        }
    }

    /// Compare one list of offers
    pub fn run(&self, offers: &[Offer]) -> Result<Comparison, ValidationError> {
        self.comparator.compare(offers)
    }

    /// Compare several independent offer lists; results keep input order
    pub fn run_batch(&self, batches: &[Vec<Offer>]) -> Vec<Result<Comparison, ValidationError>> {
        batches
            .par_iter()
            .map(|offers| self.comparator.compare(offers))
            .collect()
    }

    /// Localized table for a finished comparison
    pub fn table(&self, comparison: &Comparison, lang: Language) -> ComparisonTable {
        ComparisonTable::from_ranges(&comparison.ranges, lang, self.config().top_n)
    }

    pub fn comparator(&self) -> &Comparator {
        &self.comparator
    }

    pub fn config(&self) -> &ComparisonConfig {
        self.comparator.config()
    }
}
