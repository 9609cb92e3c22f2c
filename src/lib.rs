//! # stagepipe
//!
//! **Resumable stream stages, wired push or pull.**
//!
//! `stagepipe` builds text-processing pipelines out of small stateful
//! stages. The same stage runs in either of two dual dataflow modes:
//!
//! - **push**: a driver feeds items into the head; every stage forwards its
//!   outputs to the one downstream it owns.
//! - **pull**: a consumer asks the outermost sequence for the next item;
//!   every stage pulls from the one upstream it wraps, and only when asked.
//!
//! In both modes termination is explicit and propagates: every stage is told
//! exactly once that the stream ended, after it has flushed what it buffered.
//!
//! ---
//!
//! ## Core Model
//!
//! ```text
//! Source → Utf8Decoder → LineSplitter → LineNumberer → Sink
//! ```
//!
//! A [`Stage`] is an explicit state machine with `accept(item)` and
//! `flush()`: no coroutines, no hidden buffering. Nodes wrap stages:
//!
//! - [`Push`] owns a stage and its downstream [`Sink`]. `finish` flushes the
//!   stage into the downstream and only then finishes the downstream.
//! - [`Pull`] owns a stage and its upstream iterator. It is lazy, exhausts
//!   idempotently, and releases its upstream when dropped early.
//!
//! ---
//!
//! ## Example
//!
//! Push mode, chunks in, running totals out:
//!
//! ```no_run
//! use stagepipe::prelude::*;
//! use stagepipe::text::{NumericFilter, RunningSum, Segmenter};
//!
//! fn main() -> stagepipe::error::Result<()> {
//!     let (sink, totals) = CollectSink::shared();
//!     let mut head = push_chain::<String>()
//!         .stage(Segmenter::new())
//!         .stage(NumericFilter::new())
//!         .stage(RunningSum::new())
//!         .into_sink(sink);
//!
//!     let chunks = ["2 appl", "es and 5 ora", "nges."].map(String::from);
//!     send(chunks, &mut head)?;
//!
//!     assert_eq!(*totals.lock().unwrap(), vec![2, 7]);
//!     Ok(())
//! }
//! ```
//!
//! The same chain, pulled:
//!
//! ```no_run
//! use stagepipe::prelude::*;
//! use stagepipe::text::{NumericFilter, RunningSum, Segmenter};
//!
//! let totals = from_iter("2 apples and 5 oranges.".chars())
//!     .stage(Segmenter::new())
//!     .stage(NumericFilter::new())
//!     .stage(RunningSum::new())
//!     .collect::<stagepipe::error::Result<Vec<u64>>>();
//! ```
//!
//! ---
//!
//! ## Termination Contract
//!
//! - `finish` reaches every push node exactly once, in downstream order.
//! - `accept` after termination and a second `finish` are rejected with
//!   [`Error::Protocol`](error::Error::Protocol).
//! - An origin failure calls `abort` instead: buffered state is discarded,
//!   not flushed, and the abort still reaches every node.
//! - A pull node flushes once when its upstream ends, or discards once when
//!   released. Either way it never restarts.
//!
//! ---
//!
//! ## Sources
//!
//! Asynchronous origins implement [`ChunkSource`](source::ChunkSource) and
//! are pumped into a push head with [`drive`](pipeline::driver::drive):
//!
//! ```no_run
//! use bytes::Bytes;
//! use stagepipe::prelude::*;
//! use stagepipe::source::FsSource;
//! use stagepipe::text::{LineNumberer, LineSplitter, Utf8Decoder};
//!
//! # async fn demo() -> stagepipe::error::Result<()> {
//! let mut head = push_chain::<Bytes>()
//!     .stage(Utf8Decoder::new())
//!     .stage(LineSplitter::new())
//!     .stage(LineNumberer::new())
//!     .into_sink(PrintSink::stdout());
//!
//! let mut source = FsSource::new("notes.txt").read_chunk_bytes(1024);
//! drive(&mut source, &mut head, &CancelToken::new()).await?;
//! # Ok(())
//! # }
//! ```
//!
//! Cancelling the [`CancelToken`] makes the driver finish the head early;
//! the stages still flush what they hold.
//!
//! ---
//!
//! ## Observability
//!
//! With the `tracing` feature `stagepipe` emits structured events:
//! `stagepipe.finish`, `stagepipe.abort`, `stagepipe.release`,
//! `stagepipe.exhausted`, `stagepipe.protocol_violation`,
//! `stagepipe.source.chunk`, `stagepipe.source.end`,
//! `stagepipe.source.failed`, `stagepipe.sink.flush_failed` and
//! `stagepipe.cancelled`.
//!
//! ---
//!
//! ## Feature Flags
//!
//! - `tracing` *(default)*: structured events through `tracing`.
//! - `cli` *(default)*: the `stagepipe` binary.
//! - `http`: [`source::HttpSource`] over `reqwest`.
//!
//! [`Stage`]: pipeline::stage::Stage
//! [`Sink`]: pipeline::stage::Sink
//! [`Push`]: pipeline::push::Push
//! [`Pull`]: pipeline::pull::Pull
//! [`CancelToken`]: pipeline::cancel::CancelToken

pub mod error;
pub mod pipeline;
pub mod sink;
pub mod source;
pub mod text;

pub mod prelude {
    //! Convenient imports for most `stagepipe` users.

    pub use crate::pipeline::cancel::CancelToken;
    pub use crate::pipeline::chain::{push_chain, PullExt};
    pub use crate::pipeline::driver::drive;
    pub use crate::pipeline::pull::from_iter;
    pub use crate::pipeline::push::send;
    pub use crate::pipeline::stage::{Emit, Sink, Stage};
    pub use crate::sink::{CollectSink, PrintSink};
}
