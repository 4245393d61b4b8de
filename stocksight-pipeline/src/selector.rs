use std::cmp::Ordering;

use crate::util;

/// Selectors rank the scored candidates and truncate to a limit.
pub trait Selector<Q, C>: Send + Sync
where
    Q: Clone + Send + Sync + 'static,
    C: Clone + Send + Sync + 'static,
{
    fn select(&self, _query: &Q, candidates: Vec<C>) -> Vec<C> {
        let mut ranked = self.sort(candidates);
        if let Some(limit) = self.size() {
            ranked.truncate(limit);
        }
        ranked
    }

    fn enable(&self, _query: &Q) -> bool {
        true
    }

    /// Ranking key; higher ranks first.
    fn score(&self, candidate: &C) -> f64;

    /// Sort by score, descending.
    ///
    /// The sort is stable, so candidates with equal scores keep their input
    /// order and the earliest one ranks first. NaN scores sink to the end.
    fn sort(&self, candidates: Vec<C>) -> Vec<C> {
        let mut ranked = candidates;
        ranked.sort_by(|a, b| descending_nan_last(self.score(a), self.score(b)));
        ranked
    }

    /// Maximum number of candidates to keep; `None` keeps all.
    fn size(&self) -> Option<usize> {
        None
    }

    fn name(&self) -> &str {
        util::stage_name::<Self>()
    }
}

/// Total order for descending scores with NaN placed last.
pub fn descending_nan_last(a: f64, b: f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => b.partial_cmp(&a).unwrap_or(Ordering::Equal),
    }
}
