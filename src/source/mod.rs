use async_trait::async_trait;
use bytes::Bytes;

use crate::error::Result;

pub mod channel;
pub mod fs;
#[cfg(feature = "http")]
pub mod http;

pub use channel::{ChannelSource, Event};
pub use fs::FsSource;
#[cfg(feature = "http")]
pub use http::HttpSource;

/// An asynchronous origin of raw chunks.
///
/// `Ok(None)` means the origin is exhausted; an `Err` means it failed and
/// what would have followed is unknown.
#[async_trait]
pub trait ChunkSource: Send {
    fn source_name(&self) -> &'static str {
        "source"
    }

    async fn next_chunk(&mut self) -> Result<Option<Bytes>>;
}

#[async_trait]
impl<S> ChunkSource for Box<S>
where
    S: ChunkSource + ?Sized,
{
    fn source_name(&self) -> &'static str {
        (**self).source_name()
    }

    async fn next_chunk(&mut self) -> Result<Option<Bytes>> {
        (**self).next_chunk().await
    }
}
