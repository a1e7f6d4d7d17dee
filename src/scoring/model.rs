//! Strength model trait

use crate::ledger::MatchLedger;
use crate::types::CompetitorId;

/// Trait for anything that can rate a competitor from the ledger
///
/// Higher values mean stronger competitors. Competitors without recorded
/// matches get `neutral()` rather than an error.
pub trait StrengthModel: Send + Sync {
    /// Strength of `id` given the current ledger
    fn strength(&self, ledger: &MatchLedger, id: &CompetitorId) -> f64;

    /// Value assigned to competitors with no history
    fn neutral(&self) -> f64;

    /// Short name for logs and reports
    fn name(&self) -> &'static str;
}
