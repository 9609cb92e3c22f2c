use async_trait::async_trait;
use bytes::Bytes;
use tokio::fs::File;
use tokio::io::AsyncReadExt;

use crate::error::Result;
use crate::source::ChunkSource;

const DEFAULT_READ_CHUNK_BYTES: usize = 1024;

/// Reads a file in fixed-size chunks.
///
/// The file is opened on the first `next_chunk` call, so a missing file
/// surfaces as an origin failure of the run rather than at construction.
pub struct FsSource {
    path: String,
    read_chunk_bytes: usize,
    file: Option<File>,
    buf: Vec<u8>,
    done: bool,
}

impl FsSource {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            read_chunk_bytes: DEFAULT_READ_CHUNK_BYTES,
            file: None,
            buf: Vec::new(),
            done: false,
        }
    }

    /// Number of bytes read per filesystem call.
    pub fn read_chunk_bytes(mut self, n: usize) -> Self {
        self.read_chunk_bytes = n.max(1);
        self
    }

    pub fn path(&self) -> &str {
        &self.path
    }
}

#[async_trait]
impl ChunkSource for FsSource {
    fn source_name(&self) -> &'static str {
        "fs"
    }

    async fn next_chunk(&mut self) -> Result<Option<Bytes>> {
        if self.done {
            return Ok(None);
        }
        let file = match self.file.as_mut() {
            Some(file) => file,
            None => {
                let opened = File::open(&self.path).await?;
                self.buf.resize(self.read_chunk_bytes, 0);
                self.file.insert(opened)
            }
        };

        let n = file.read(&mut self.buf).await?;
        if n == 0 {
            self.done = true;
            self.file = None;
            return Ok(None);
        }
        Ok(Some(Bytes::copy_from_slice(&self.buf[..n])))
    }
}
