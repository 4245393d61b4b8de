use async_trait::async_trait;

use crate::util;

/// Turns a query into the initial candidates.
///
/// Enabled sources run one after another and their outputs are
/// concatenated in source order. A source that returns `Err` contributes
/// nothing and the run continues. The advisory pipeline has a single
/// source yielding one candidate per inventory item.
#[async_trait]
pub trait Source<Q, C>: Send + Sync
where
    Q: Clone + Send + Sync + 'static,
    C: Clone + Send + Sync + 'static,
{
    /// `false` skips the source without logging, e.g. when it has no data.
    fn enable(&self, _query: &Q) -> bool {
        true
    }

    async fn get_candidates(&self, query: &Q) -> Result<Vec<C>, String>;

    fn name(&self) -> &str {
        util::stage_name::<Self>()
    }
}
