use std::collections::VecDeque;

use crate::error::Result;

/// Output handle a [`Stage`] writes into.
///
/// An `Emit` cannot signal end-of-stream. Only the node that owns the stage
/// terminates what lies downstream.
pub trait Emit<T> {
    fn emit(&mut self, item: T) -> Result<()>;
}

impl<T> Emit<T> for VecDeque<T> {
    fn emit(&mut self, item: T) -> Result<()> {
        self.push_back(item);
        Ok(())
    }
}

impl<T> Emit<T> for Vec<T> {
    fn emit(&mut self, item: T) -> Result<()> {
        self.push(item);
        Ok(())
    }
}

/// A resumable unit of transformation.
///
/// A stage is an explicit state machine: its buffered state lives in `self`
/// and it is advanced one item at a time. The same value can run in push mode
/// (wrapped in [`Push`](crate::pipeline::push::Push)) or pull mode (wrapped in
/// [`Pull`](crate::pipeline::pull::Pull)).
///
/// The wrapping node guarantees that `flush` and `discard` are together
/// called at most once, and that `accept` is never called after either.
pub trait Stage<I> {
    type Output;

    fn name(&self) -> &'static str;

    fn accept<E>(&mut self, item: I, out: &mut E) -> Result<()>
    where
        E: Emit<Self::Output> + ?Sized;

    /// End of stream: emit whatever the buffered state still holds.
    fn flush<E>(&mut self, _out: &mut E) -> Result<()>
    where
        E: Emit<Self::Output> + ?Sized,
    {
        Ok(())
    }

    /// Abrupt termination: drop buffered state without emitting it.
    fn discard(&mut self) {}
}

/// Consumer side of the push contract.
///
/// Implemented by push nodes and by terminal sinks alike, so a chain is
/// typed wiring from head to tail.
pub trait Sink<T> {
    fn accept(&mut self, item: T) -> Result<()>;

    /// Normal end of stream. Flushes, then propagates.
    fn finish(&mut self) -> Result<()>;

    /// Abrupt end of stream after an origin failure. Buffered state is
    /// discarded, not flushed. Idempotent.
    fn abort(&mut self);
}

impl<T, S> Sink<T> for &mut S
where
    S: Sink<T> + ?Sized,
{
    fn accept(&mut self, item: T) -> Result<()> {
        (**self).accept(item)
    }

    fn finish(&mut self) -> Result<()> {
        (**self).finish()
    }

    fn abort(&mut self) {
        (**self).abort()
    }
}

impl<T, S> Sink<T> for Box<S>
where
    S: Sink<T> + ?Sized,
{
    fn accept(&mut self, item: T) -> Result<()> {
        (**self).accept(item)
    }

    fn finish(&mut self) -> Result<()> {
        (**self).finish()
    }

    fn abort(&mut self) {
        (**self).abort()
    }
}
