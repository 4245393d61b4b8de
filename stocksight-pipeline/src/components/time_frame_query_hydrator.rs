use async_trait::async_trait;
use stocksight_stats::TimeFrame;

use crate::query_hydrator::QueryHydrator;
use crate::types::AdvisoryQuery;

/// Resolves an unset time frame to the dashboard default (weekly).
pub struct TimeFrameQueryHydrator {
    pub default_time_frame: TimeFrame,
}

impl TimeFrameQueryHydrator {
    pub fn new() -> Self {
        Self {
            default_time_frame: TimeFrame::default(),
        }
    }
}

impl Default for TimeFrameQueryHydrator {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl QueryHydrator<AdvisoryQuery> for TimeFrameQueryHydrator {
    fn enable(&self, query: &AdvisoryQuery) -> bool {
        query.time_frame.is_none()
    }

    async fn hydrate(&self, query: &AdvisoryQuery) -> Result<AdvisoryQuery, String> {
        Ok(AdvisoryQuery {
            time_frame: Some(query.time_frame.unwrap_or(self.default_time_frame)),
            ..query.clone()
        })
    }

    fn update(&self, query: &mut AdvisoryQuery, hydrated: AdvisoryQuery) {
        query.time_frame = hydrated.time_frame;
    }
}
