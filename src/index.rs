use crate::{node::Chain, point::Point};

/// Operations shared by the 2-d tree and the exhaustive-scan index.
///
/// Every search reports how many chains (tree nodes) it examined.
pub trait SpatialIndex<T> {
    fn insert(&mut self, point: Point, item: T);

    /// The chain closest to `query` and the number of comparisons made.
    /// Returns `(None, 0)` when the index is empty.
    fn nearest(&self, query: &Point) -> (Option<&Chain<T>>, usize);

    /// Calls `visit` for every chain within `radius` (inclusive) of `query`
    /// and returns the number of comparisons made.
    fn within_radius<'a, F>(&'a self, query: &Point, radius: f64, visit: F) -> usize
    where
        T: 'a,
        F: FnMut(&'a Chain<T>);

    /// Number of stored items.
    fn len(&self) -> usize;

    /// Number of distinct chains.
    fn num_nodes(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn query_radius<'a>(&'a self, query: &Point, radius: f64) -> (Vec<&'a Chain<T>>, usize)
    where
        T: 'a,
    {
        let mut found = Vec::new();
        let comparisons = self.within_radius(query, radius, |chain| found.push(chain));
        (found, comparisons)
    }
}
