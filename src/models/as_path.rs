use itertools::Itertools;
use std::fmt::{Display, Formatter};
use std::num::ParseIntError;
use std::str::FromStr;

/// An ordered sequence of AS numbers a route traversed, oldest hop first.
///
/// Ordering is lexicographic by hop sequence, which is what gives [PathSet](crate::models::PathSet)
/// its deterministic iteration order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct AsPath {
    hops: Vec<u32>,
}

impl AsPath {
    pub fn new() -> AsPath {
        AsPath::default()
    }

    pub fn from_sequence<S: AsRef<[u32]>>(seq: S) -> Self {
        AsPath {
            hops: seq.as_ref().to_vec(),
        }
    }

    pub fn hops(&self) -> &[u32] {
        &self.hops
    }

    pub fn len(&self) -> usize {
        self.hops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hops.is_empty()
    }

    /// Collapse consecutive repeated hops (e.g. prepending) while keeping the traversal order.
    ///
    /// Only adjacent duplicates are removed: `[1, 1, 2, 3, 3, 1]` becomes `[1, 2, 3, 1]`.
    pub fn normalize(&self) -> AsPath {
        AsPath {
            hops: self.hops.iter().copied().dedup().collect(),
        }
    }

    /// Consecutive hop pairs `(from, to)` in path order.
    pub fn iter_hop_pairs(&self) -> impl '_ + Iterator<Item = (u32, u32)> {
        self.hops.iter().copied().tuple_windows()
    }
}

impl From<Vec<u32>> for AsPath {
    fn from(hops: Vec<u32>) -> Self {
        AsPath { hops }
    }
}

impl From<AsPath> for Vec<u32> {
    fn from(path: AsPath) -> Self {
        path.hops
    }
}

impl Display for AsPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.hops.iter().join(" "))
    }
}

/// Parses whitespace separated decimal AS numbers.
impl FromStr for AsPath {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hops = s
            .split_whitespace()
            .map(u32::from_str)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(AsPath { hops })
    }
}
