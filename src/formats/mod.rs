/*!
Output formats for extracted AS paths.
*/
pub mod dot;
pub mod paths;

pub use dot::{emit, DotFormatter, EdgeSet};
