use async_trait::async_trait;

use crate::util;

/// Scorers run in sequence after filtering. Like hydrators they return one
/// output per input and merge through `update`, so a later scorer sees the
/// fields written by an earlier one.
#[async_trait]
pub trait Scorer<Q, C>: Send + Sync
where
    Q: Clone + Send + Sync + 'static,
    C: Clone + Send + Sync + 'static,
{
    fn enable(&self, _query: &Q) -> bool {
        true
    }

    async fn score(&self, query: &Q, candidates: &[C]) -> Result<Vec<C>, String>;

    /// Copy only the fields this scorer owns.
    fn update(&self, candidate: &mut C, scored: C);

    fn name(&self) -> &str {
        util::stage_name::<Self>()
    }
}
