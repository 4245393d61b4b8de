use async_trait::async_trait;

use crate::util;

/// Candidates a filter kept and the ones it set aside. Both lists keep the
/// input order.
pub struct FilterResult<C> {
    pub kept: Vec<C>,
    pub removed: Vec<C>,
}

/// Partitions candidates after hydration and before scoring.
///
/// Removed candidates skip scoring and selection but are reported in
/// `PipelineResult::filtered_candidates`, which is how items without a
/// usable forecast reach the report. On `Err` the candidates the filter
/// was given move on untouched.
#[async_trait]
pub trait Filter<Q, C>: Send + Sync
where
    Q: Clone + Send + Sync + 'static,
    C: Clone + Send + Sync + 'static,
{
    fn enable(&self, _query: &Q) -> bool {
        true
    }

    async fn filter(&self, query: &Q, candidates: Vec<C>) -> Result<FilterResult<C>, String>;

    fn name(&self) -> &str {
        util::stage_name::<Self>()
    }
}
