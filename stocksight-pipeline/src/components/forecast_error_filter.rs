use async_trait::async_trait;

use crate::filter::{Filter, FilterResult};
use crate::types::{AdvisoryQuery, ItemCandidate};

/// Sets aside items whose forecast failed or never arrived.
///
/// Those items keep their current reorder point; no suggestion is made.
pub struct ForecastErrorFilter;

#[async_trait]
impl Filter<AdvisoryQuery, ItemCandidate> for ForecastErrorFilter {
    async fn filter(
        &self,
        _query: &AdvisoryQuery,
        candidates: Vec<ItemCandidate>,
    ) -> Result<FilterResult<ItemCandidate>, String> {
        let (kept, removed): (Vec<_>, Vec<_>) = candidates
            .into_iter()
            .partition(|c| c.forecast_error.is_none());

        Ok(FilterResult { kept, removed })
    }
}
