/*!
aspath-graph extracts BGP AS paths from a [BIRD](https://bird.network.cz/) routing daemon and
renders them as a directed graph.

The pipeline runs once per invocation:

1. connect to the control socket and send `show route all` ([io::ControlSocket]),
2. reassemble the streamed response into lines ([parser::LineIterator]),
3. parse the `BGP.as_path` attribute of each route into a deduplicated [PathSet],
4. collapse consecutive repeated hops of every path ([AsPath::normalize]),
5. write one DOT edge per pair of consecutive hops ([formats::emit]).

# Examples

Query a running daemon:

```no_run
use aspath_graph::AsPathParser;

let paths = AsPathParser::new("/var/run/bird/bird.ctl").unwrap().extract().unwrap();
let normalized = paths.normalize();
print!("{}", aspath_graph::formats::emit(&normalized));
```

Saved responses can be processed the same way with [AsPathParser::from_reader] or
[AsPathParser::from_dump]:

```
use aspath_graph::AsPathParser;

let dump = "\tBGP.as_path: 100 100 200 300\n\tBGP.as_path: 400 500\n";
let paths = AsPathParser::from_reader(dump.as_bytes()).extract().unwrap();
let dot = aspath_graph::formats::emit(&paths.normalize());
assert_eq!(
    dot,
    "digraph {\n  rankdir=TD;\n    100 -> 200;\n    200 -> 300;\n    400 -> 500;\n}\n"
);
```
*/

pub mod error;
pub mod formats;
pub mod models;

#[cfg(feature = "parser")]
pub mod io;
#[cfg(feature = "parser")]
pub mod parser;

pub use error::{AsGraphError, PathParseError};
pub use models::{AsPath, PathSet};

#[cfg(feature = "parser")]
pub use parser::AsPathParser;
