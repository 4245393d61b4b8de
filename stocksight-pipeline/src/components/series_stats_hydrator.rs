use async_trait::async_trait;
use stocksight_stats::{confidence, growth, AdvisoryThresholds};

use crate::hydrator::Hydrator;
use crate::types::{AdvisoryQuery, ItemCandidate};

/// Attaches per-item forecast confidence and next-period growth.
///
/// Confidence is judged from the historical series alone. Growth compares
/// the last historical value with the first predicted one. Items without
/// history get no confidence rather than a made-up number.
pub struct SeriesStatsHydrator {
    pub thresholds: AdvisoryThresholds,
}

impl SeriesStatsHydrator {
    pub fn new(thresholds: AdvisoryThresholds) -> Self {
        Self { thresholds }
    }
}

impl Default for SeriesStatsHydrator {
    fn default() -> Self {
        Self::new(AdvisoryThresholds::default())
    }
}

#[async_trait]
impl Hydrator<AdvisoryQuery, ItemCandidate> for SeriesStatsHydrator {
    async fn hydrate(
        &self,
        query: &AdvisoryQuery,
        candidates: &[ItemCandidate],
    ) -> Result<Vec<ItemCandidate>, String> {
        let time_frame = query.time_frame();
        let hydrated = candidates
            .iter()
            .map(|c| {
                let confidence = confidence::score_series(&c.historical, time_frame, &self.thresholds)
                    .ok()
                    .map(|r| r.percentage);
                let next_period_growth = match (c.historical.last(), c.predicted.first()) {
                    (Some(&previous), Some(&next)) => Some(growth::between(previous, next)),
                    _ => None,
                };
                ItemCandidate {
                    confidence,
                    next_period_growth,
                    ..ItemCandidate::default()
                }
            })
            .collect();
        Ok(hydrated)
    }

    fn update(&self, candidate: &mut ItemCandidate, hydrated: ItemCandidate) {
        candidate.confidence = hydrated.confidence;
        candidate.next_period_growth = hydrated.next_period_growth;
    }
}
