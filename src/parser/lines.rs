/*!
Reassembly of response chunks into text lines.

Chunk boundaries reported by the transport are arbitrary, so bytes are accumulated until a `\n`
is seen. Only complete lines are decoded, which keeps multi-byte characters that straddle two
chunks intact.
*/
use crate::error::AsGraphError;
use bytes::{Buf, BytesMut};
use log::debug;

/// What to do with bytes left in the buffer when the stream ends without a final newline.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TrailingLine {
    /// Drop the unterminated remainder. The daemon always terminates its responses, so a
    /// remainder only shows up for truncated responses.
    #[default]
    Discard,
    /// Emit the remainder as a final line.
    Emit,
}

/// Lazily split a sequence of byte chunks into lines.
///
/// Each item is one line without its `\n` (and without a preceding `\r`). A transport error or a
/// line that is not valid UTF-8 is yielded once, after which the iterator is exhausted.
pub struct LineIterator<I> {
    chunks: I,
    buffer: BytesMut,
    /// Prefix of `buffer` already known to contain no `\n`.
    searched: usize,
    trailing: TrailingLine,
    finished: bool,
}

impl<I> LineIterator<I>
where
    I: Iterator<Item = Result<Vec<u8>, AsGraphError>>,
{
    pub fn new(chunks: I) -> LineIterator<I> {
        LineIterator {
            chunks,
            buffer: BytesMut::new(),
            searched: 0,
            trailing: TrailingLine::default(),
            finished: false,
        }
    }

    pub fn with_trailing_line(self, trailing: TrailingLine) -> LineIterator<I> {
        LineIterator { trailing, ..self }
    }

    /// Split off the first complete line in the buffer, if any.
    fn take_line(&mut self) -> Option<BytesMut> {
        let pos = match self.buffer[self.searched..].iter().position(|b| *b == b'\n') {
            Some(i) => self.searched + i,
            None => {
                self.searched = self.buffer.len();
                return None;
            }
        };
        let mut line = self.buffer.split_to(pos);
        self.buffer.advance(1);
        self.searched = 0;
        if line.last() == Some(&b'\r') {
            line.truncate(line.len() - 1);
        }
        Some(line)
    }

    fn decode(&mut self, line: BytesMut) -> Result<String, AsGraphError> {
        String::from_utf8(line.to_vec()).map_err(|e| {
            self.finished = true;
            AsGraphError::DecodeError(e)
        })
    }
}

impl<I> Iterator for LineIterator<I>
where
    I: Iterator<Item = Result<Vec<u8>, AsGraphError>>,
{
    type Item = Result<String, AsGraphError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        loop {
            if let Some(line) = self.take_line() {
                return Some(self.decode(line));
            }

            match self.chunks.next() {
                Some(Ok(chunk)) => self.buffer.extend_from_slice(&chunk),
                Some(Err(e)) => {
                    self.finished = true;
                    return Some(Err(e));
                }
                None => {
                    self.finished = true;
                    if self.buffer.is_empty() {
                        return None;
                    }
                    let rest = self.buffer.split();
                    self.searched = 0;
                    return match self.trailing {
                        TrailingLine::Discard => {
                            debug!("discarding {} bytes of unterminated trailing line", rest.len());
                            None
                        }
                        TrailingLine::Emit => {
                            let mut rest = rest;
                            if rest.last() == Some(&b'\r') {
                                rest.truncate(rest.len() - 1);
                            }
                            Some(self.decode(rest))
                        }
                    };
                }
            }
        }
    }
}

/// Shorthand for [LineIterator::new].
pub fn extract_lines<I>(chunks: I) -> LineIterator<I::IntoIter>
where
    I: IntoIterator<Item = Result<Vec<u8>, AsGraphError>>,
{
    LineIterator::new(chunks.into_iter())
}

#[cfg(test)]
mod tests {
    use super::*;

    const RESPONSE: &str = "0001 BIRD 2.0.12 ready.\r\n\
        1007-Table master4:\r\n\
        10.0.0.0/24          unicast [peer1 2024-01-01] * (100) [AS200i]\r\n\
        1012-\tBGP.as_path: 100 100 200\r\n\
        \tBGP.next_hop: 192.0.2.1 ünïcödé\n\
        0000 \n";

    fn rechunk(text: &[u8], size: usize) -> Vec<Result<Vec<u8>, AsGraphError>> {
        text.chunks(size).map(|c| Ok(c.to_vec())).collect()
    }

    fn collect(chunks: Vec<Result<Vec<u8>, AsGraphError>>) -> Vec<String> {
        extract_lines(chunks)
            .collect::<Result<Vec<_>, _>>()
            .unwrap()
    }

    #[test]
    fn test_lines_independent_of_chunking() {
        let expected = collect(rechunk(RESPONSE.as_bytes(), RESPONSE.len()));
        assert_eq!(expected.len(), 6);
        assert_eq!(expected[3], "1012-\tBGP.as_path: 100 100 200");
        for size in 1..=RESPONSE.len() {
            assert_eq!(collect(rechunk(RESPONSE.as_bytes(), size)), expected);
        }
    }

    #[test]
    fn test_empty_lines_kept() {
        let lines = collect(rechunk(b"a\n\nb\n", 2));
        assert_eq!(lines, vec!["a", "", "b"]);
    }

    #[test]
    fn test_trailing_line_discarded_by_default() {
        let lines = collect(rechunk(b"first\nsecond", 3));
        assert_eq!(lines, vec!["first"]);
    }

    #[test]
    fn test_trailing_line_emitted() {
        let lines = LineIterator::new(rechunk(b"first\nsecond\r", 3).into_iter())
            .with_trailing_line(TrailingLine::Emit)
            .collect::<Result<Vec<_>, _>>()
            .unwrap();
        assert_eq!(lines, vec!["first", "second"]);
    }

    #[test]
    fn test_partial_line_not_rescanned() {
        let mut iter = extract_lines(Vec::<Result<Vec<u8>, AsGraphError>>::new());
        iter.buffer.extend_from_slice(b"BGP.as_path: 100");
        assert!(iter.take_line().is_none());
        assert_eq!(iter.searched, 16);

        iter.buffer.extend_from_slice(b" 200");
        assert!(iter.take_line().is_none());
        assert_eq!(iter.searched, 20);

        iter.buffer.extend_from_slice(b"\r\nBGP.as");
        assert_eq!(&iter.take_line().unwrap()[..], b"BGP.as_path: 100 200");
        assert_eq!(iter.searched, 0);
        assert!(iter.take_line().is_none());
        assert_eq!(iter.searched, 6);
    }

    #[test]
    fn test_long_line_in_small_chunks() {
        let mut text = "7 ".repeat(50_000).into_bytes();
        text.extend_from_slice(b"\nnext\n");
        let lines = collect(rechunk(&text, 7));
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].len(), 100_000);
        assert_eq!(lines[1], "next");
    }

    #[test]
    fn test_invalid_utf8_stops_iteration() {
        let chunks = vec![Ok(b"ok\n\xff\xfe\nnever\n".to_vec())];
        let mut iter = extract_lines(chunks);
        assert_eq!(iter.next().unwrap().unwrap(), "ok");
        assert!(matches!(
            iter.next(),
            Some(Err(AsGraphError::DecodeError(_)))
        ));
        assert!(iter.next().is_none());
    }

    #[test]
    fn test_transport_error_forwarded_once() {
        let chunks = vec![
            Ok(b"line\npart".to_vec()),
            Err(AsGraphError::ReadError(std::io::Error::other("reset"))),
            Ok(b"ial\n".to_vec()),
        ];
        let mut iter = extract_lines(chunks);
        assert_eq!(iter.next().unwrap().unwrap(), "line");
        assert!(matches!(iter.next(), Some(Err(AsGraphError::ReadError(_)))));
        assert!(iter.next().is_none());
    }
}
