use bytes::Bytes;

use crate::error::Result;
use crate::pipeline::cancel::CancelToken;
use crate::pipeline::stage::Sink;
use crate::source::ChunkSource;

/// Pump an asynchronous origin into the head of a push chain.
///
/// Chunks are accepted in arrival order. End of data, or a cancellation
/// observed while waiting for the next chunk, finishes the head once. An
/// origin failure or a failing `accept` aborts the head instead: the rest of
/// the input is unknown, so buffered state is discarded rather than flushed.
pub async fn drive<S, H>(source: &mut S, head: &mut H, cancel: &CancelToken) -> Result<()>
where
    S: ChunkSource + ?Sized,
    H: Sink<Bytes> + ?Sized,
{
    #[cfg(feature = "tracing")]
    let origin = source.source_name();

    loop {
        let next = tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                #[cfg(feature = "tracing")]
                tracing::event!(tracing::Level::DEBUG, event = "stagepipe.cancelled", source = origin, "stagepipe.cancelled");
                return finish(head);
            },
            next = source.next_chunk() => next,
        };

        match next {
            Ok(Some(chunk)) => {
                #[cfg(feature = "tracing")]
                tracing::event!(tracing::Level::TRACE, event = "stagepipe.source.chunk", source = origin, bytes = chunk.len(), "stagepipe.source.chunk");

                if let Err(err) = head.accept(chunk) {
                    head.abort();
                    return Err(err);
                }
            }
            Ok(None) => {
                #[cfg(feature = "tracing")]
                tracing::event!(tracing::Level::DEBUG, event = "stagepipe.source.end", source = origin, "stagepipe.source.end");

                return finish(head);
            }
            Err(err) => {
                #[cfg(feature = "tracing")]
                tracing::event!(tracing::Level::WARN, event = "stagepipe.source.failed", source = origin, error = %err, "stagepipe.source.failed");

                head.abort();
                return Err(err);
            }
        }
    }
}

fn finish<H>(head: &mut H) -> Result<()>
where
    H: Sink<Bytes> + ?Sized,
{
    match head.finish() {
        Ok(()) => Ok(()),
        Err(err) => {
            head.abort();
            Err(err)
        }
    }
}
