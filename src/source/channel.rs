use async_trait::async_trait;
use bytes::Bytes;
use tokio::sync::mpsc;

use crate::error::{Error, Result};
use crate::source::ChunkSource;

/// Callback-style delivery: one event per `data` callback, one `End`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Data(Bytes),
    End,
}

/// Chunks pushed in from elsewhere (a callback, another task) over a tokio
/// channel.
///
/// The sender must send [`Event::End`]. A channel that closes without it is
/// an origin failure: the producer went away mid-stream.
pub struct ChannelSource {
    rx: mpsc::Receiver<Event>,
    ended: bool,
}

impl ChannelSource {
    pub fn new(rx: mpsc::Receiver<Event>) -> Self {
        Self { rx, ended: false }
    }

    pub fn channel(buffer: usize) -> (mpsc::Sender<Event>, Self) {
        let (tx, rx) = mpsc::channel(buffer.max(1));
        (tx, Self::new(rx))
    }
}

#[async_trait]
impl ChunkSource for ChannelSource {
    fn source_name(&self) -> &'static str {
        "channel"
    }

    async fn next_chunk(&mut self) -> Result<Option<Bytes>> {
        if self.ended {
            return Ok(None);
        }
        match self.rx.recv().await {
            Some(Event::Data(chunk)) => Ok(Some(chunk)),
            Some(Event::End) => {
                self.ended = true;
                self.rx.close();
                Ok(None)
            }
            None => Err(Error::pipeline("source channel closed before end")),
        }
    }
}
