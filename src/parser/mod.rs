/*!
parser module turns a `show route all` response into a set of unique AS paths.
*/
pub mod as_path;
pub mod lines;

pub use as_path::{
    extract_paths, extract_paths_with_stats, parse_as_path_line, ExtractStats, AS_PATH_MARKER,
};
pub use lines::{extract_lines, LineIterator, TrailingLine};

use crate::error::AsGraphError;
use crate::io::{ChunkIterator, ControlSocket, SHOW_ROUTE_ALL};
use crate::models::PathSet;
use log::debug;
use std::io::Read;
use std::os::unix::net::UnixStream;
use std::path::Path;

/// Reads a routing table dump and extracts its AS paths.
///
/// The source is either a live control socket, which is queried with `show route all`, or any
/// reader holding a previously saved response.
pub struct AsPathParser<R> {
    chunks: ChunkIterator<R>,
    trailing: TrailingLine,
}

impl AsPathParser<UnixStream> {
    /// Connect to the control socket at `path` and request the routing table.
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, AsGraphError> {
        AsPathParser::from_socket(ControlSocket::connect(path)?)
    }

    /// Request the routing table over an already configured [ControlSocket].
    pub fn from_socket(mut socket: ControlSocket) -> Result<Self, AsGraphError> {
        socket.send(SHOW_ROUTE_ALL)?;
        Ok(AsPathParser {
            chunks: socket.into_chunks()?,
            trailing: TrailingLine::default(),
        })
    }
}

impl AsPathParser<Box<dyn Read + Send>> {
    /// Read a saved response from a file (`.gz` and `.bz2` are decompressed) or from standard
    /// input when `path` is `-`.
    pub fn from_dump(path: &str) -> Result<Self, AsGraphError> {
        let reader: Box<dyn Read + Send> = match path {
            "-" => Box::new(std::io::stdin()),
            _ => oneio::get_reader(path).map_err(|source| AsGraphError::InputError {
                path: path.to_string(),
                source: source.into(),
            })?,
        };
        debug!("reading saved response from {}", path);
        Ok(AsPathParser::from_reader(reader))
    }
}

impl<R: Read> AsPathParser<R> {
    pub fn from_reader(reader: R) -> Self {
        AsPathParser {
            chunks: ChunkIterator::new(reader),
            trailing: TrailingLine::default(),
        }
    }

    pub fn with_trailing_line(self, trailing: TrailingLine) -> Self {
        AsPathParser { trailing, ..self }
    }

    pub fn into_line_iter(self) -> LineIterator<ChunkIterator<R>> {
        LineIterator::new(self.chunks).with_trailing_line(self.trailing)
    }

    /// Consume the whole response and return the unique AS paths in it.
    pub fn extract(self) -> Result<PathSet, AsGraphError> {
        extract_paths(self.into_line_iter())
    }

    pub fn extract_with_stats(self) -> Result<(PathSet, ExtractStats), AsGraphError> {
        extract_paths_with_stats(self.into_line_iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AsPath;
    use std::io::Cursor;

    #[test]
    fn test_extract_from_reader() {
        let dump = "1007-Table master4:\n\
            192.0.2.0/24 unicast [p1 12:00:00] * (100) [AS300i]\n\
            \tBGP.as_path: 100 100 200 300\n\
            198.51.100.0/24 unicast [p1 12:00:00] * (100) [AS300i]\n\
            \tBGP.as_path: 100 100 200 300\n\
            203.0.113.0/24 unicast [p2 12:00:00] * (100) [AS500i]\n\
            \tBGP.as_path: 400 500\n\
            0000 \n";
        let paths = AsPathParser::from_reader(Cursor::new(dump))
            .extract()
            .unwrap();
        assert_eq!(paths.len(), 2);
        assert!(paths.contains(&AsPath::from_sequence([100, 100, 200, 300])));
        assert!(paths.contains(&AsPath::from_sequence([400, 500])));
    }

    #[test]
    fn test_trailing_marker_line() {
        let dump = "\tBGP.as_path: 1 2\n\tBGP.as_path: 3 4";
        let paths = AsPathParser::from_reader(Cursor::new(dump))
            .extract()
            .unwrap();
        assert_eq!(paths.len(), 1);

        let paths = AsPathParser::from_reader(Cursor::new(dump))
            .with_trailing_line(TrailingLine::Emit)
            .extract()
            .unwrap();
        assert_eq!(paths.len(), 2);
    }

    #[test]
    fn test_from_dump_missing_file() {
        let res = AsPathParser::from_dump("/nonexistent/aspath-graph/dump.txt");
        assert!(matches!(res, Err(AsGraphError::InputError { .. })));
    }
}
