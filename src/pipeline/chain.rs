use std::marker::PhantomData;

use crate::error::Result;
use crate::pipeline::adapters::{Filter, Inspect, Map};
use crate::pipeline::pull::Pull;
use crate::pipeline::push::Push;
use crate::pipeline::stage::{Sink, Stage};

/// Tail-first wiring of a push chain.
///
/// Push nodes own their downstream, so the last stage has to be built
/// first. `Wire` lets [`PushChain`] collect stages head-first and defer the
/// construction until the terminal sink is known.
pub trait Wire<D> {
    type Head;

    fn wire(self, downstream: D) -> Self::Head;
}

/// The empty chain: the head is the sink itself.
pub struct Root;

impl<D> Wire<D> for Root {
    type Head = D;

    fn wire(self, downstream: D) -> D {
        downstream
    }
}

pub struct Link<P, S, I> {
    prev: P,
    stage: S,
    _in: PhantomData<fn(I)>,
}

impl<P, S, I, D> Wire<D> for Link<P, S, I>
where
    S: Stage<I>,
    D: Sink<S::Output>,
    P: Wire<Push<S, D>>,
{
    type Head = P::Head;

    fn wire(self, downstream: D) -> P::Head {
        self.prev.wire(Push::new(self.stage, downstream))
    }
}

/// Head-first builder for a push chain carrying items of type `T` at its
/// current tail.
///
/// ```ignore
/// let mut head = push_chain::<String>()
///     .stage(LineSplitter::new())
///     .stage(LineNumberer::new())
///     .into_sink(PrintSink::stdout());
/// ```
pub struct PushChain<B, T> {
    wiring: B,
    _item: PhantomData<fn(T)>,
}

pub fn push_chain<T>() -> PushChain<Root, T> {
    PushChain {
        wiring: Root,
        _item: PhantomData,
    }
}

impl<B, T> PushChain<B, T> {
    pub fn stage<S>(self, stage: S) -> PushChain<Link<B, S, T>, S::Output>
    where
        S: Stage<T>,
    {
        PushChain {
            wiring: Link {
                prev: self.wiring,
                stage,
                _in: PhantomData,
            },
            _item: PhantomData,
        }
    }

    pub fn map<N, F>(self, f: F) -> PushChain<Link<B, Map<F, N>, T>, N>
    where
        F: FnMut(T) -> N,
    {
        self.stage(Map::new(f))
    }

    pub fn filter<F>(self, pred: F) -> PushChain<Link<B, Filter<F>, T>, T>
    where
        F: FnMut(&T) -> bool,
    {
        self.stage(Filter(pred))
    }

    pub fn inspect<F>(self, f: F) -> PushChain<Link<B, Inspect<F>, T>, T>
    where
        F: FnMut(&T),
    {
        self.stage(Inspect(f))
    }

    /// Build every node, tail first, and return the primed head.
    pub fn into_sink<D>(self, sink: D) -> B::Head
    where
        D: Sink<T>,
        B: Wire<D>,
    {
        self.wiring.wire(sink)
    }
}

/// Lazy composition over any fallible iterator.
///
/// Each call wraps the current sequence in one more [`Pull`] node; nothing
/// is scanned until the outermost sequence is polled.
pub trait PullExt<T>: Iterator<Item = Result<T>> + Sized {
    fn stage<S>(self, stage: S) -> Pull<S, Self, S::Output>
    where
        S: Stage<T>,
    {
        Pull::new(stage, self)
    }
}

impl<T, It> PullExt<T> for It where It: Iterator<Item = Result<T>> {}
