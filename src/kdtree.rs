use crate::{
    distance::euclidean,
    index::SpatialIndex,
    node::{Chain, Node},
    point::{Point, DIMENSION, EPSILON},
};

/// A 2-d tree whose nodes each own a chain of items sharing one point.
///
/// Axes alternate by depth, x at the root. Items that land on an existing
/// point are pushed onto that node's chain instead of growing the tree.
pub struct KdTree<T> {
    root: usize,
    nodes: Vec<Node<T>>,
    num_items: usize,
}

// Pending work for the nearest-neighbour walk. A `Far` frame is the
// second child of a node and is only entered if the splitting line is
// still closer than the best distance once the near side is exhausted.
enum Frame {
    Near { slot_id: usize, depth: usize },
    Far { slot_id: usize, depth: usize, plane_distance: f64 },
}

impl<T> KdTree<T> {
    #[must_use]
    pub fn new() -> Self {
        KdTree {
            root: usize::MAX,
            nodes: Vec::new(),
            num_items: 0,
        }
    }

    #[must_use]
    pub fn height(&self) -> usize {
        let mut height = 0;
        let mut stack = Vec::new();
        if self.root != usize::MAX {
            stack.push((self.root, 1));
        }
        while let Some((slot_id, depth)) = stack.pop() {
            height = height.max(depth);
            let node = &self.nodes[slot_id];
            for child in [node.left, node.right] {
                if child != usize::MAX {
                    stack.push((child, depth + 1));
                }
            }
        }
        height
    }

    /// All chains in slot (creation) order.
    pub fn chains(&self) -> impl Iterator<Item = &Chain<T>> {
        self.nodes.iter().map(|node| &node.chain)
    }

    fn add_slot(&mut self, point: Point, item: T) -> usize {
        let slot_id = self.nodes.len();
        self.nodes.push(Node::new(point, item));
        slot_id
    }
}

impl<T> Default for KdTree<T> {
    fn default() -> Self {
        KdTree::new()
    }
}

impl<T> SpatialIndex<T> for KdTree<T> {
    fn insert(&mut self, point: Point, item: T) {
        self.num_items += 1;
        if self.root == usize::MAX {
            self.root = self.add_slot(point, item);
            return;
        }

        let mut current = self.root;
        let mut depth = 0;
        loop {
            let axis = depth % DIMENSION;
            let other = (axis + 1) % DIMENSION;
            let node_point = *self.nodes[current].point();

            // Exact comparison on the splitting axis; only the other axis
            // is checked against the tolerance.
            let delta = point.coord(axis) - node_point.coord(axis);
            let go_right = if delta < 0.0 {
                false
            } else if delta > 0.0 {
                true
            } else if point.coord(other) - node_point.coord(other) < EPSILON {
                self.nodes[current].chain.push_front(item);
                return;
            } else {
                true
            };

            let next = if go_right {
                self.nodes[current].right
            } else {
                self.nodes[current].left
            };
            if next == usize::MAX {
                let slot_id = self.add_slot(point, item);
                if go_right {
                    self.nodes[current].right = slot_id;
                } else {
                    self.nodes[current].left = slot_id;
                }
                return;
            }
            current = next;
            depth += 1;
        }
    }

    fn nearest(&self, query: &Point) -> (Option<&Chain<T>>, usize) {
        if self.root == usize::MAX {
            return (None, 0);
        }

        let mut best_distance = euclidean(self.nodes[self.root].point(), query);
        let mut best = usize::MAX;
        let mut comparisons = 0;

        let mut stack = vec![Frame::Near {
            slot_id: self.root,
            depth: 0,
        }];
        while let Some(frame) = stack.pop() {
            let (slot_id, depth) = match frame {
                Frame::Near { slot_id, depth } => (slot_id, depth),
                Frame::Far {
                    slot_id,
                    depth,
                    plane_distance,
                } => {
                    if plane_distance < best_distance {
                        (slot_id, depth)
                    } else {
                        continue;
                    }
                }
            };
            if slot_id == usize::MAX {
                continue;
            }

            comparisons += 1;
            let node = &self.nodes[slot_id];
            let distance = euclidean(node.point(), query);
            // Ties go to the node visited last.
            if distance <= best_distance {
                best_distance = distance;
                best = slot_id;
            }

            let axis = depth % DIMENSION;
            let delta = node.point().coord(axis) - query.coord(axis);
            let (near, far) = if delta > 0.0 {
                (node.left, node.right)
            } else {
                (node.right, node.left)
            };
            stack.push(Frame::Far {
                slot_id: far,
                depth: depth + 1,
                plane_distance: delta.abs(),
            });
            stack.push(Frame::Near {
                slot_id: near,
                depth: depth + 1,
            });
        }

        (self.nodes.get(best).map(|node| &node.chain), comparisons)
    }

    fn within_radius<'a, F>(&'a self, query: &Point, radius: f64, mut visit: F) -> usize
    where
        T: 'a,
        F: FnMut(&'a Chain<T>),
    {
        let mut comparisons = 0;
        let mut stack = Vec::new();
        if self.root != usize::MAX {
            stack.push((self.root, 0));
        }

        while let Some((slot_id, depth)) = stack.pop() {
            comparisons += 1;
            let node = &self.nodes[slot_id];
            if euclidean(node.point(), query) <= radius {
                visit(&node.chain);
            }

            // Children are pushed right first so the left subtree is
            // reported first.
            let axis = depth % DIMENSION;
            let delta = node.point().coord(axis) - query.coord(axis);
            let children = if delta.abs() <= radius {
                [node.right, node.left]
            } else if delta > 0.0 {
                [usize::MAX, node.left]
            } else {
                [usize::MAX, node.right]
            };
            for child in children {
                if child != usize::MAX {
                    stack.push((child, depth + 1));
                }
            }
        }
        comparisons
    }

    fn len(&self) -> usize {
        self.num_items
    }

    fn num_nodes(&self) -> usize {
        self.nodes.len()
    }
}
