use crate::error::Result;
use crate::pipeline::lifecycle::{Lifecycle, Phase};
use crate::pipeline::stage::{Emit, Sink, Stage};

/// A primed push-mode node: a stage plus the one downstream it feeds.
///
/// Ready to accept as soon as it is constructed.
pub struct Push<S, D> {
    stage: S,
    downstream: D,
    lifecycle: Lifecycle,
}

impl<S, D> Push<S, D> {
    pub fn new(stage: S, downstream: D) -> Self {
        Self {
            stage,
            downstream,
            lifecycle: Lifecycle::new(),
        }
    }

    pub fn stage(&self) -> &S {
        &self.stage
    }

    pub fn downstream(&self) -> &D {
        &self.downstream
    }

    pub fn phase(&self) -> Phase {
        self.lifecycle.phase()
    }

    pub fn into_parts(self) -> (S, D) {
        (self.stage, self.downstream)
    }
}

struct Downstream<'a, D>(&'a mut D);

impl<T, D> Emit<T> for Downstream<'_, D>
where
    D: Sink<T>,
{
    fn emit(&mut self, item: T) -> Result<()> {
        self.0.accept(item)
    }
}

impl<I, S, D> Sink<I> for Push<S, D>
where
    S: Stage<I>,
    D: Sink<S::Output>,
{
    fn accept(&mut self, item: I) -> Result<()> {
        self.lifecycle.check_accept(self.stage.name())?;
        self.stage.accept(item, &mut Downstream(&mut self.downstream))
    }

    fn finish(&mut self) -> Result<()> {
        let stage = self.stage.name();
        self.lifecycle.begin_finish(stage)?;
        // Residue goes downstream before downstream learns the stream ended.
        self.stage.flush(&mut Downstream(&mut self.downstream))?;

        #[cfg(feature = "tracing")]
        tracing::event!(tracing::Level::DEBUG, event = "stagepipe.finish", stage = stage, "stagepipe.finish");

        self.downstream.finish()
    }

    fn abort(&mut self) {
        if self.lifecycle.abort() {
            self.stage.discard();

            #[cfg(feature = "tracing")]
            tracing::event!(tracing::Level::DEBUG, event = "stagepipe.abort", stage = self.stage.name(), "stagepipe.abort");
        }
        self.downstream.abort();
    }
}

/// Feed every item into `head` in order, then finish it once.
///
/// On the first error the head is aborted, so no node is left without a
/// termination notice, and the error is returned.
pub fn send<It, H>(items: It, head: &mut H) -> Result<()>
where
    It: IntoIterator,
    H: Sink<It::Item> + ?Sized,
{
    for item in items {
        if let Err(err) = head.accept(item) {
            head.abort();
            return Err(err);
        }
    }
    match head.finish() {
        Ok(()) => Ok(()),
        Err(err) => {
            head.abort();
            Err(err)
        }
    }
}
