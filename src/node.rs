use std::collections::VecDeque;

use crate::point::Point;

/// Items stored at one exact point, most recently inserted first.
#[derive(Clone, Debug)]
pub struct Chain<T> {
    point: Point,
    items: VecDeque<T>,
}

impl<T> Chain<T> {
    #[must_use]
    pub(crate) fn new(point: Point, item: T) -> Chain<T> {
        let mut items = VecDeque::with_capacity(1);
        items.push_back(item);
        Chain { point, items }
    }

    pub(crate) fn push_front(&mut self, item: T) {
        self.items.push_front(item);
    }

    /// The point shared by every item of the chain (that of the first insertion).
    #[must_use]
    pub fn point(&self) -> &Point {
        &self.point
    }

    /// The most recently inserted item.
    #[must_use]
    pub fn head(&self) -> &T {
        &self.items[0]
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Items head-first.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.items.iter()
    }
}

impl<'a, T> IntoIterator for &'a Chain<T> {
    type Item = &'a T;
    type IntoIter = std::collections::vec_deque::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

pub struct Node<T> {
    pub left: usize,
    pub right: usize,
    pub chain: Chain<T>,
}

impl<T> Node<T> {
    #[must_use]
    pub fn new(point: Point, item: T) -> Node<T> {
        Node {
            left: usize::MAX,
            right: usize::MAX,
            chain: Chain::new(point, item),
        }
    }

    #[must_use]
    pub fn point(&self) -> &Point {
        self.chain.point()
    }
}
