use std::collections::VecDeque;

use crate::error::Result;
use crate::pipeline::stage::Stage;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PullState {
    Running,
    Exhausted,
    Released,
}

/// A pull-mode node: a stage wrapping the lazy sequence it pulls from.
///
/// Nothing happens until `next()` is called. Upstream is only asked for an
/// item when the outputs of the previous item have all been handed out.
///
/// Once upstream ends, the stage is flushed and the upstream handle dropped;
/// every later `next()` yields the remaining flushed outputs and then `None`
/// forever. A node that is dropped (or [`release`](Pull::release)d) before
/// exhaustion discards its stage's buffer and releases its upstream chain.
pub struct Pull<S, U, O> {
    stage: S,
    upstream: Option<U>,
    queue: VecDeque<O>,
    state: PullState,
    #[cfg_attr(not(feature = "tracing"), allow(dead_code))]
    name: &'static str,
    discard: fn(&mut S),
}

impl<S, U, O> Pull<S, U, O> {
    pub fn new<I>(stage: S, upstream: U) -> Self
    where
        U: Iterator<Item = Result<I>>,
        S: Stage<I, Output = O>,
    {
        let name = stage.name();
        Self {
            stage,
            upstream: Some(upstream),
            queue: VecDeque::new(),
            state: PullState::Running,
            name,
            discard: <S as Stage<I>>::discard,
        }
    }

    pub fn stage(&self) -> &S {
        &self.stage
    }

    pub fn is_exhausted(&self) -> bool {
        self.state != PullState::Running && self.queue.is_empty()
    }

    /// Stop pulling early. Idempotent; no-op after a normal exhaustion apart
    /// from dropping undelivered flushed output.
    pub fn release(&mut self) {
        self.queue.clear();
        if self.state != PullState::Running {
            return;
        }
        self.state = PullState::Released;
        (self.discard)(&mut self.stage);
        // Dropping the handle releases the rest of the chain.
        self.upstream = None;

        #[cfg(feature = "tracing")]
        tracing::event!(tracing::Level::DEBUG, event = "stagepipe.release", stage = self.name, "stagepipe.release");
    }
}

impl<I, O, S, U> Iterator for Pull<S, U, O>
where
    U: Iterator<Item = Result<I>>,
    S: Stage<I, Output = O>,
{
    type Item = Result<O>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(item) = self.queue.pop_front() {
                return Some(Ok(item));
            }
            let upstream = self.upstream.as_mut()?;
            match upstream.next() {
                Some(Ok(item)) => {
                    if let Err(err) = self.stage.accept(item, &mut self.queue) {
                        self.release();
                        return Some(Err(err));
                    }
                }
                Some(Err(err)) => {
                    self.release();
                    return Some(Err(err));
                }
                None => {
                    self.upstream = None;
                    self.state = PullState::Exhausted;

                    #[cfg(feature = "tracing")]
                    tracing::event!(tracing::Level::DEBUG, event = "stagepipe.exhausted", stage = self.name, "stagepipe.exhausted");

                    if let Err(err) = self.stage.flush(&mut self.queue) {
                        self.queue.clear();
                        return Some(Err(err));
                    }
                }
            }
        }
    }
}

impl<S, U, O> Drop for Pull<S, U, O> {
    fn drop(&mut self) {
        self.release();
    }
}

/// Lift a plain iterator into a pull source.
///
/// The source is fused: once the inner iterator ends it is dropped and never
/// polled again.
pub fn from_iter<It>(items: It) -> FromIter<It::IntoIter>
where
    It: IntoIterator,
{
    FromIter {
        inner: Some(items.into_iter()),
    }
}

pub struct FromIter<It> {
    inner: Option<It>,
}

impl<It> Iterator for FromIter<It>
where
    It: Iterator,
{
    type Item = Result<It::Item>;

    fn next(&mut self) -> Option<Self::Item> {
        let inner = self.inner.as_mut()?;
        match inner.next() {
            Some(item) => Some(Ok(item)),
            None => {
                self.inner = None;
                None
            }
        }
    }
}
