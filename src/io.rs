/*!
Transport to the routing daemon's control socket.

A [ControlSocket] connects to the daemon, sends a single command and is then turned into a
[ChunkIterator] that yields raw response bytes until the daemon closes the connection.
*/
use crate::error::AsGraphError;
use log::{debug, info};
use std::io::{ErrorKind, Read, Write};
use std::os::unix::net::UnixStream;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default endpoint of BIRD's control socket.
pub const DEFAULT_SOCKET_PATH: &str = "/var/run/bird/bird.ctl";

/// Command that dumps the routing table together with all route attributes.
pub const SHOW_ROUTE_ALL: &[u8] = b"show route all";

/// Default number of bytes requested per read.
pub const DEFAULT_CHUNK_SIZE: usize = 4096;

pub struct ControlSocket {
    stream: UnixStream,
    read_timeout: Option<Duration>,
    chunk_size: usize,
}

impl ControlSocket {
    /// Connect to the control socket at `path`.
    pub fn connect<P: AsRef<Path>>(path: P) -> Result<ControlSocket, AsGraphError> {
        let path = path.as_ref();
        let stream =
            UnixStream::connect(path).map_err(|source| AsGraphError::ConnectionError {
                path: PathBuf::from(path),
                source,
            })?;
        debug!("connected to control socket {}", path.display());
        Ok(ControlSocket {
            stream,
            read_timeout: None,
            chunk_size: DEFAULT_CHUNK_SIZE,
        })
    }

    /// Abort reading with [AsGraphError::TimeoutError] if the daemon stays silent for longer than
    /// `timeout`. `None` (the default) waits indefinitely.
    pub fn with_read_timeout(self, timeout: Option<Duration>) -> ControlSocket {
        ControlSocket {
            read_timeout: timeout,
            ..self
        }
    }

    pub fn with_chunk_size(self, chunk_size: usize) -> ControlSocket {
        ControlSocket {
            chunk_size: chunk_size.max(1),
            ..self
        }
    }

    /// Write `command` followed by the `\r\n` terminator in a single write.
    pub fn send(&mut self, command: &[u8]) -> Result<(), AsGraphError> {
        let mut request = Vec::with_capacity(command.len() + 2);
        request.extend_from_slice(command);
        request.extend_from_slice(b"\r\n");
        self.stream
            .write_all(&request)
            .and_then(|_| self.stream.flush())
            .map_err(AsGraphError::WriteError)?;
        debug!("sent command {:?}", String::from_utf8_lossy(command));
        Ok(())
    }

    /// Consume the socket and read the whole response as raw chunks.
    ///
    /// The connection is closed when the returned iterator is dropped.
    pub fn into_chunks(self) -> Result<ChunkIterator<UnixStream>, AsGraphError> {
        self.stream
            .set_read_timeout(self.read_timeout)
            .map_err(AsGraphError::ReadError)?;
        Ok(ChunkIterator::new(self.stream)
            .with_chunk_size(self.chunk_size)
            .with_timeout(self.read_timeout))
    }

    /// Alias of [ControlSocket::into_chunks].
    pub fn read_all(self) -> Result<ChunkIterator<UnixStream>, AsGraphError> {
        self.into_chunks()
    }
}

/// Iterator over raw response chunks of at most `chunk_size` bytes.
///
/// Ends at the first zero-length read (peer closed the stream) or after yielding an error.
pub struct ChunkIterator<R> {
    reader: Option<R>,
    chunk_size: usize,
    timeout: Option<Duration>,
    bytes_read: usize,
}

impl<R: Read> ChunkIterator<R> {
    pub fn new(reader: R) -> ChunkIterator<R> {
        ChunkIterator {
            reader: Some(reader),
            chunk_size: DEFAULT_CHUNK_SIZE,
            timeout: None,
            bytes_read: 0,
        }
    }

    pub fn with_chunk_size(self, chunk_size: usize) -> ChunkIterator<R> {
        ChunkIterator {
            chunk_size: chunk_size.max(1),
            ..self
        }
    }

    fn with_timeout(self, timeout: Option<Duration>) -> ChunkIterator<R> {
        ChunkIterator { timeout, ..self }
    }

    /// Drop the underlying reader; for a socket this closes the connection.
    fn close(&mut self) {
        if self.reader.take().is_some() {
            info!("response finished after {} bytes", self.bytes_read);
        }
    }
}

impl<R: Read> Iterator for ChunkIterator<R> {
    type Item = Result<Vec<u8>, AsGraphError>;

    fn next(&mut self) -> Option<Self::Item> {
        let reader = self.reader.as_mut()?;
        let mut buf = vec![0u8; self.chunk_size];
        loop {
            match reader.read(&mut buf) {
                Ok(0) => {
                    self.close();
                    return None;
                }
                Ok(n) => {
                    buf.truncate(n);
                    self.bytes_read += n;
                    return Some(Ok(buf));
                }
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => {
                    self.close();
                    let err = match (e.kind(), self.timeout) {
                        (ErrorKind::WouldBlock | ErrorKind::TimedOut, Some(timeout)) => {
                            AsGraphError::TimeoutError(timeout)
                        }
                        _ => AsGraphError::ReadError(e),
                    };
                    return Some(Err(err));
                }
            }
        }
    }
}
