/*!
Graphviz DOT rendering of AS paths.

Every pair of consecutive hops becomes one `src -> dst;` statement. Edges are written in path
order, then hop order. Repeated edges are written as is.
*/
use crate::models::AsPath;
use std::fmt::{Display, Formatter};
use std::io::{self, Write};

/// Directed hop pairs, in the order they appear in the paths.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EdgeSet {
    edges: Vec<(u32, u32)>,
}

impl EdgeSet {
    pub fn from_paths<'a, I>(paths: I) -> EdgeSet
    where
        I: IntoIterator<Item = &'a AsPath>,
    {
        EdgeSet {
            edges: paths
                .into_iter()
                .flat_map(|path| path.iter_hop_pairs())
                .collect(),
        }
    }

    pub fn edges(&self) -> &[(u32, u32)] {
        &self.edges
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }
}

pub struct DotFormatter<'a> {
    edges: &'a EdgeSet,
}

impl<'a> DotFormatter<'a> {
    pub fn new(edges: &'a EdgeSet) -> DotFormatter<'a> {
        DotFormatter { edges }
    }

    pub fn write_to<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        write!(writer, "{}", self)
    }
}

impl Display for DotFormatter<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "digraph {{")?;
        writeln!(f, "  rankdir=TD;")?;
        for (src, dst) in self.edges.edges() {
            writeln!(f, "    {} -> {};", src, dst)?;
        }
        writeln!(f, "}}")
    }
}

/// Render normalized paths as a DOT digraph.
pub fn emit<'a, I>(paths: I) -> String
where
    I: IntoIterator<Item = &'a AsPath>,
{
    DotFormatter::new(&EdgeSet::from_paths(paths)).to_string()
}
