/*!
Data structures shared by the extraction pipeline: AS paths and the deduplicated path set.
*/
mod as_path;
mod path_set;

pub use as_path::AsPath;
pub use path_set::{normalize, PathSet};
