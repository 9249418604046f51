/// A closed interval `[min, max]` on the real line.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Interval {
    pub min: f64,
    pub max: f64,
}

impl Interval {
    pub fn new(a: f64, b: f64) -> Self {
        Interval {
            min: a.min(b),
            max: a.max(b),
        }
    }

    pub fn midpoint(&self) -> f64 {
        (self.min + self.max) / 2.0
    }

    pub fn overlaps(&self, other: &Interval) -> bool {
        self.min <= other.max && self.max >= other.min
    }
}

enum Node<T> {
    Leaf { interval: Interval, item: T },
    Branch { interval: Interval, left: Box<Node<T>>, right: Box<Node<T>> },
}

impl<T> Node<T> {
    fn interval(&self) -> Interval {
        match self {
            Node::Leaf { interval, .. } => *interval,
            Node::Branch { interval, .. } => *interval,
        }
    }

    fn query<'a>(&'a self, target: &Interval, visit: &mut impl FnMut(&'a T) -> bool) -> bool {
        if !self.interval().overlaps(target) {
            return true;
        }
        match self {
            Node::Leaf { item, .. } => visit(item),
            Node::Branch { left, right, .. } => {
                left.query(target, visit) && right.query(target, visit)
            }
        }
    }
}

/// A one-dimensional interval index, sort-packed bottom-up from its full
/// item set. It has two phases: build (via [`SortedPackedIntervalRTree::new`],
/// which inserts everything at once) and query. There is no phase
/// transition back to insert — the spec's "immutable after first query, further
/// inserts throw" rule is enforced here by construction, since the only
/// constructor that accepts items also finishes the build.
pub struct SortedPackedIntervalRTree<T> {
    root: Option<Node<T>>,
}

impl<T> SortedPackedIntervalRTree<T> {
    /// Builds the index from `items`, sorted by interval midpoint and
    /// paired bottom-up into a balanced binary tree.
    pub fn new(mut items: Vec<(Interval, T)>) -> Self {
        items.sort_by(|a, b| a.0.midpoint().partial_cmp(&b.0.midpoint()).unwrap());
        let mut level: Vec<Node<T>> = items
            .into_iter()
            .map(|(interval, item)| Node::Leaf { interval, item })
            .collect();

        if level.is_empty() {
            return SortedPackedIntervalRTree { root: None };
        }

        while level.len() > 1 {
            let mut next = Vec::with_capacity(level.len().div_ceil(2));
            let mut it = level.into_iter();
            while let Some(left) = it.next() {
                match it.next() {
                    Some(right) => {
                        let interval = union(left.interval(), right.interval());
                        next.push(Node::Branch {
                            interval,
                            left: Box::new(left),
                            right: Box::new(right),
                        });
                    }
                    None => next.push(left),
                }
            }
            level = next;
        }

        SortedPackedIntervalRTree {
            root: level.into_iter().next(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Visits every item whose interval overlaps `target`, in index order,
    /// stopping early if `visit` returns `false`.
    pub fn query<'a>(&'a self, target: Interval, mut visit: impl FnMut(&'a T) -> bool) {
        if let Some(root) = &self.root {
            root.query(&target, &mut visit);
        }
    }

    pub fn query_all(&self, target: Interval) -> Vec<&T> {
        let mut out = Vec::new();
        self.query(target, |item| {
            out.push(item);
            true
        });
        out
    }
}

fn union(a: Interval, b: Interval) -> Interval {
    Interval::new(a.min.min(b.min), a.max.max(b.max))
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn finds_every_overlapping_interval() {
        let items: Vec<(Interval, usize)> = (0..100).map(|i| (Interval::new(i as f64, i as f64 + 1.0), i)).collect();
        let tree = SortedPackedIntervalRTree::new(items);
        let found = tree.query_all(Interval::new(10.5, 12.5));
        let mut ids: Vec<usize> = found.into_iter().copied().collect();
        ids.sort_unstable();
        assert_eq!(ids, vec![10, 11, 12]);
    }

    #[test]
    fn empty_tree_returns_nothing() {
        let tree: SortedPackedIntervalRTree<usize> = SortedPackedIntervalRTree::new(vec![]);
        assert!(tree.query_all(Interval::new(0.0, 1.0)).is_empty());
    }
}
