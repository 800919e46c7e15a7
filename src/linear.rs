use std::collections::HashMap;

use ordered_float::OrderedFloat;

use crate::{distance::euclidean, index::SpatialIndex, node::Chain, point::Point};

/// Exhaustive-scan index: every search examines every chain.
///
/// Items are grouped only when their points are bit-for-bit equal, which
/// makes this the reference the tree is checked against.
pub struct LinearIndex<T> {
    chains: Vec<Chain<T>>,
    slots: HashMap<(u64, u64), usize>,
    num_items: usize,
}

impl<T> LinearIndex<T> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            chains: Vec::new(),
            slots: HashMap::new(),
            num_items: 0,
        }
    }

    pub fn chains(&self) -> impl Iterator<Item = &Chain<T>> {
        self.chains.iter()
    }
}

impl<T> Default for LinearIndex<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> SpatialIndex<T> for LinearIndex<T> {
    fn insert(&mut self, point: Point, item: T) {
        self.num_items += 1;
        let key = (point.x.to_bits(), point.y.to_bits());
        if let Some(&slot_id) = self.slots.get(&key) {
            self.chains[slot_id].push_front(item);
        } else {
            self.slots.insert(key, self.chains.len());
            self.chains.push(Chain::new(point, item));
        }
    }

    fn nearest(&self, query: &Point) -> (Option<&Chain<T>>, usize) {
        let nearest = self
            .chains
            .iter()
            .min_by_key(|chain| OrderedFloat(euclidean(chain.point(), query)));
        (nearest, self.chains.len())
    }

    fn within_radius<'a, F>(&'a self, query: &Point, radius: f64, mut visit: F) -> usize
    where
        T: 'a,
        F: FnMut(&'a Chain<T>),
    {
        for chain in &self.chains {
            if euclidean(chain.point(), query) <= radius {
                visit(chain);
            }
        }
        self.chains.len()
    }

    fn len(&self) -> usize {
        self.num_items
    }

    fn num_nodes(&self) -> usize {
        self.chains.len()
    }
}
