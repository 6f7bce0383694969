use crate::models::AsPath;
use std::collections::BTreeSet;

/// Unique AS paths, compared by their full hop sequence.
///
/// Iteration follows lexicographic hop order regardless of insertion order, so anything rendered
/// from a [PathSet] is reproducible between runs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathSet {
    paths: BTreeSet<AsPath>,
}

impl PathSet {
    pub fn new() -> PathSet {
        PathSet::default()
    }

    /// Insert a path and return whether it was not seen before.
    pub fn insert(&mut self, path: AsPath) -> bool {
        self.paths.insert(path)
    }

    pub fn contains(&self, path: &AsPath) -> bool {
        self.paths.contains(path)
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    pub fn iter(&self) -> impl '_ + Iterator<Item = &AsPath> {
        self.paths.iter()
    }

    /// Collapse consecutive repeated hops of every path, in set order.
    ///
    /// Paths that become equal after the collapse are kept as separate entries; whole-path
    /// deduplication already happened when the set was built.
    pub fn normalize(&self) -> Vec<AsPath> {
        normalize(self)
    }
}

/// Apply [AsPath::normalize] to every path of the set, keeping the set order.
pub fn normalize(path_set: &PathSet) -> Vec<AsPath> {
    path_set.iter().map(AsPath::normalize).collect()
}

impl FromIterator<AsPath> for PathSet {
    fn from_iter<T: IntoIterator<Item = AsPath>>(iter: T) -> Self {
        PathSet {
            paths: iter.into_iter().collect(),
        }
    }
}

impl Extend<AsPath> for PathSet {
    fn extend<T: IntoIterator<Item = AsPath>>(&mut self, iter: T) {
        self.paths.extend(iter)
    }
}

impl IntoIterator for PathSet {
    type Item = AsPath;
    type IntoIter = std::collections::btree_set::IntoIter<AsPath>;

    fn into_iter(self) -> Self::IntoIter {
        self.paths.into_iter()
    }
}

impl<'a> IntoIterator for &'a PathSet {
    type Item = &'a AsPath;
    type IntoIter = std::collections::btree_set::Iter<'a, AsPath>;

    fn into_iter(self) -> Self::IntoIter {
        self.paths.iter()
    }
}
