//! ssvlog-feeds: line sources for ssvlog.
//!
//! A [`LineFeed`] yields one input line at a time from stdin, a file, or any
//! async buffered reader. Bytes that are not valid UTF-8 are replaced rather
//! than rejected, so a corrupt byte in the middle of a long-running stream
//! never ends it.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};

#[derive(Debug, Error)]
pub enum FeedError {
    #[error("could not open {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("could not read from {kind}: {source}")]
    Read {
        kind: FeedKind,
        #[source]
        source: std::io::Error,
    },
}

/// Where a feed's lines come from.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FeedKind {
    Stdin,
    File(PathBuf),
}

impl std::fmt::Display for FeedKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FeedKind::Stdin => write!(f, "stdin"),
            FeedKind::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Sequential, lossy line reader.
pub struct LineFeed {
    kind: FeedKind,
    reader: Box<dyn AsyncBufRead + Send + Unpin>,
    buf: Vec<u8>,
}

impl LineFeed {
    pub fn stdin() -> Self {
        Self::from_reader(FeedKind::Stdin, BufReader::new(tokio::io::stdin()))
    }

    pub async fn file(path: impl AsRef<Path>) -> Result<Self, FeedError> {
        let path = path.as_ref().to_path_buf();
        let file = tokio::fs::File::open(&path)
            .await
            .map_err(|source| FeedError::Open {
                path: path.clone(),
                source,
            })?;
        tracing::debug!(path = %path.display(), "reading log file");
        Ok(Self::from_reader(FeedKind::File(path), BufReader::new(file)))
    }

    pub fn from_reader<R>(kind: FeedKind, reader: R) -> Self
    where
        R: AsyncBufRead + Send + Unpin + 'static,
    {
        Self {
            kind,
            reader: Box::new(reader),
            buf: Vec::with_capacity(1024),
        }
    }

    pub fn kind(&self) -> &FeedKind {
        &self.kind
    }

    /// The next line without its line terminator, or `None` at end of input.
    pub async fn next_line(&mut self) -> Result<Option<String>, FeedError> {
        self.buf.clear();
        let read = self
            .reader
            .read_until(b'\n', &mut self.buf)
            .await
            .map_err(|source| FeedError::Read {
                kind: self.kind.clone(),
                source,
            })?;
        if read == 0 {
            return Ok(None);
        }
        if self.buf.last() == Some(&b'\n') {
            self.buf.pop();
            if self.buf.last() == Some(&b'\r') {
                self.buf.pop();
            }
        }
        Ok(Some(String::from_utf8_lossy(&self.buf).into_owned()))
    }
}

impl std::fmt::Debug for LineFeed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LineFeed")
            .field("kind", &self.kind)
            .finish_non_exhaustive()
    }
}
