/*!
Plain-text and JSON listings of AS paths.
*/
use crate::models::AsPath;
use itertools::Itertools;

/// One path per line, hops separated by a space.
pub fn to_lines<'a, I>(paths: I) -> String
where
    I: IntoIterator<Item = &'a AsPath>,
{
    paths
        .into_iter()
        .map(|path| format!("{}\n", path))
        .join("")
}

/// A JSON array of hop arrays, e.g. `[[100,200,300],[400,500]]`.
#[cfg(feature = "serde")]
pub fn to_json<'a, I>(paths: I, pretty: bool) -> serde_json::Result<String>
where
    I: IntoIterator<Item = &'a AsPath>,
{
    let paths = paths.into_iter().collect::<Vec<_>>();
    match pretty {
        true => serde_json::to_string_pretty(&paths),
        false => serde_json::to_string(&paths),
    }
}
