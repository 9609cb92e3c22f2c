use std::marker::PhantomData;

use crate::error::Result;
use crate::pipeline::stage::{Emit, Stage};

/// map: I -> N, one output per input.
pub struct Map<F, N> {
    f: F,
    _out: PhantomData<fn() -> N>,
}

impl<F, N> Map<F, N> {
    pub fn new(f: F) -> Self {
        Self {
            f,
            _out: PhantomData,
        }
    }
}

impl<I, N, F> Stage<I> for Map<F, N>
where
    F: FnMut(I) -> N,
{
    type Output = N;

    fn name(&self) -> &'static str {
        "map"
    }

    fn accept<E>(&mut self, item: I, out: &mut E) -> Result<()>
    where
        E: Emit<N> + ?Sized,
    {
        out.emit((self.f)(item))
    }
}

/// Forwards only the items the predicate keeps.
pub struct Filter<P>(pub P);

impl<T, P> Stage<T> for Filter<P>
where
    P: FnMut(&T) -> bool,
{
    type Output = T;

    fn name(&self) -> &'static str {
        "filter"
    }

    fn accept<E>(&mut self, item: T, out: &mut E) -> Result<()>
    where
        E: Emit<T> + ?Sized,
    {
        if (self.0)(&item) {
            out.emit(item)?;
        }
        Ok(())
    }
}

/// Observes each item on its way through, e.g. to log it.
pub struct Inspect<F>(pub F);

impl<T, F> Stage<T> for Inspect<F>
where
    F: FnMut(&T),
{
    type Output = T;

    fn name(&self) -> &'static str {
        "inspect"
    }

    fn accept<E>(&mut self, item: T, out: &mut E) -> Result<()>
    where
        E: Emit<T> + ?Sized,
    {
        (self.0)(&item);
        out.emit(item)
    }
}
