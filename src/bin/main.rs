use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

use aspath_graph::formats::{emit, paths};
use aspath_graph::io::{ControlSocket, DEFAULT_SOCKET_PATH};
use aspath_graph::parser::TrailingLine;
use aspath_graph::{AsGraphError, AsPath, AsPathParser, PathSet};
use clap::{Parser, ValueEnum};

/// aspath-graph dumps the AS paths known to a BIRD daemon as a Graphviz digraph.
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Opts {
    /// Path to the BIRD control socket
    #[clap(short, long, default_value = DEFAULT_SOCKET_PATH)]
    socket: PathBuf,

    /// Read a saved `show route all` response instead of querying the socket. Use `-` for stdin.
    #[clap(short, long)]
    input: Option<String>,

    /// Give up if the daemon sends nothing for this many seconds
    #[clap(short, long, value_parser = clap::value_parser!(u64).range(1..), conflicts_with = "input")]
    timeout: Option<u64>,

    /// Also process a last response line that is not newline-terminated
    #[clap(long)]
    keep_trailing: bool,

    /// Keep consecutive repeated hops (AS prepending) in the output
    #[clap(long)]
    raw: bool,

    /// Output format
    #[clap(short, long, value_enum, default_value_t = OutputFormat::Dot)]
    format: OutputFormat,

    /// Pretty-print JSON output
    #[clap(long)]
    pretty: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum OutputFormat {
    /// Graphviz digraph with one edge per pair of consecutive hops
    Dot,
    /// One AS path per line
    Paths,
    /// JSON array of AS paths
    Json,
}

fn extract(opts: &Opts) -> Result<PathSet, AsGraphError> {
    let trailing = match opts.keep_trailing {
        true => TrailingLine::Emit,
        false => TrailingLine::Discard,
    };
    match &opts.input {
        Some(input) => AsPathParser::from_dump(input)?
            .with_trailing_line(trailing)
            .extract(),
        None => {
            let socket = ControlSocket::connect(&opts.socket)?
                .with_read_timeout(opts.timeout.map(Duration::from_secs));
            AsPathParser::from_socket(socket)?
                .with_trailing_line(trailing)
                .extract()
        }
    }
}

fn render(opts: &Opts, as_paths: &[AsPath]) -> Result<String, serde_json::Error> {
    let output = match opts.format {
        OutputFormat::Dot => emit(as_paths),
        OutputFormat::Paths => paths::to_lines(as_paths),
        OutputFormat::Json => format!("{}\n", paths::to_json(as_paths, opts.pretty)?),
    };
    Ok(output)
}

fn main() {
    let opts: Opts = Opts::parse();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let path_set = match extract(&opts) {
        Ok(p) => p,
        Err(err) => {
            eprintln!("{}", err);
            std::process::exit(1);
        }
    };

    let as_paths = match opts.raw {
        true => path_set.into_iter().collect::<Vec<_>>(),
        false => path_set.normalize(),
    };

    let output = match render(&opts, &as_paths) {
        Ok(o) => o,
        Err(err) => {
            eprintln!("{}", err);
            std::process::exit(1);
        }
    };
    let mut stdout = std::io::stdout();
    if let Err(e) = stdout.write_all(output.as_bytes()) {
        if e.kind() != std::io::ErrorKind::BrokenPipe {
            eprintln!("{}", e);
        }
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_opts_definition() {
        Opts::command().debug_assert();
    }

    #[test]
    fn test_timeout_must_be_positive() {
        assert!(Opts::try_parse_from(["aspath-graph", "--timeout", "0"]).is_err());
        let opts = Opts::try_parse_from(["aspath-graph", "--timeout", "5"]).unwrap();
        assert_eq!(opts.timeout, Some(5));
    }

    #[test]
    fn test_timeout_conflicts_with_input() {
        let res = Opts::try_parse_from(["aspath-graph", "--input", "dump.txt", "--timeout", "5"]);
        assert!(res.is_err());
    }

    #[test]
    fn test_render_formats() {
        let as_paths = vec![
            AsPath::from_sequence([100, 200, 300]),
            AsPath::from_sequence([400, 500]),
        ];

        let opts = Opts::try_parse_from(["aspath-graph", "-f", "json"]).unwrap();
        assert_eq!(
            render(&opts, &as_paths).unwrap(),
            "[[100,200,300],[400,500]]\n"
        );

        let opts = Opts::try_parse_from(["aspath-graph", "-f", "paths"]).unwrap();
        assert_eq!(render(&opts, &as_paths).unwrap(), "100 200 300\n400 500\n");

        let opts = Opts::try_parse_from(["aspath-graph"]).unwrap();
        assert!(render(&opts, &as_paths).unwrap().starts_with("digraph {\n"));
    }
}
