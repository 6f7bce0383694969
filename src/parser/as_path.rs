use crate::error::{AsGraphError, PathParseError};
use crate::models::{AsPath, PathSet};
use log::{info, warn};

/// Attribute name BIRD prints in front of the AS path of a route.
pub const AS_PATH_MARKER: &str = "BGP.as_path";

/// Parse the AS path carried by a `show route all` line.
///
/// Returns `None` for lines without the [AS_PATH_MARKER]. For marker lines everything after the
/// marker is trimmed, the `:` separator is dropped and each whitespace separated token is parsed
/// as an AS number.
///
/// ```
/// use aspath_graph::parser::parse_as_path_line;
///
/// let path = parse_as_path_line("\tBGP.as_path: 64500 64500 13335").unwrap().unwrap();
/// assert_eq!(path.hops(), &[64500, 64500, 13335]);
/// assert!(parse_as_path_line("\tBGP.next_hop: 192.0.2.1").is_none());
/// ```
pub fn parse_as_path_line(line: &str) -> Option<Result<AsPath, PathParseError>> {
    let (_, payload) = line.split_once(AS_PATH_MARKER)?;
    let payload = payload.trim();
    let payload = payload.strip_prefix(':').unwrap_or(payload);

    let mut hops = Vec::new();
    for token in payload.split_whitespace() {
        match token.parse::<u32>() {
            Ok(asn) => hops.push(asn),
            Err(_) => {
                return Some(Err(PathParseError {
                    token: token.to_string(),
                    line: line.to_string(),
                }))
            }
        }
    }
    Some(Ok(AsPath::from(hops)))
}

/// Counters collected while extracting paths from a response.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExtractStats {
    pub lines: usize,
    pub marker_lines: usize,
    pub paths: usize,
    pub parse_errors: usize,
}

/// Collect the unique AS paths found in `lines`.
///
/// Lines whose payload is not a list of AS numbers are logged and skipped. Any other error aborts
/// the extraction and the paths collected so far are dropped.
pub fn extract_paths<I>(lines: I) -> Result<PathSet, AsGraphError>
where
    I: IntoIterator<Item = Result<String, AsGraphError>>,
{
    extract_paths_with_stats(lines).map(|(paths, _)| paths)
}

/// Same as [extract_paths], also returning the [ExtractStats] of the run.
pub fn extract_paths_with_stats<I>(lines: I) -> Result<(PathSet, ExtractStats), AsGraphError>
where
    I: IntoIterator<Item = Result<String, AsGraphError>>,
{
    let mut paths = PathSet::new();
    let mut stats = ExtractStats::default();

    for line in lines {
        let line = line?;
        stats.lines += 1;
        let parsed = match parse_as_path_line(&line) {
            None => continue,
            Some(parsed) => parsed,
        };
        stats.marker_lines += 1;
        match parsed {
            Ok(path) => {
                paths.insert(path);
            }
            Err(e) => {
                stats.parse_errors += 1;
                warn!("skipping line: {}", e);
            }
        }
    }

    stats.paths = paths.len();
    info!(
        "processed {} lines, {} with AS paths, {} unique paths, {} skipped",
        stats.lines, stats.marker_lines, stats.paths, stats.parse_errors
    );
    Ok((paths, stats))
}
