use std::sync::{Arc, Mutex};

use crate::error::{Error, Result};
use crate::pipeline::lifecycle::{Lifecycle, Phase};
use crate::pipeline::stage::Sink;

/// Records every item it receives, in order, into a shared vector.
pub struct CollectSink<T> {
    out: Arc<Mutex<Vec<T>>>,
    lifecycle: Lifecycle,
}

impl<T> CollectSink<T> {
    pub fn new(out: Arc<Mutex<Vec<T>>>) -> Self {
        Self {
            out,
            lifecycle: Lifecycle::new(),
        }
    }

    /// A sink together with the handle its items land in.
    pub fn shared() -> (Self, Arc<Mutex<Vec<T>>>) {
        let out = Arc::new(Mutex::new(Vec::new()));
        (Self::new(out.clone()), out)
    }

    pub fn phase(&self) -> Phase {
        self.lifecycle.phase()
    }
}

impl<T> Sink<T> for CollectSink<T> {
    fn accept(&mut self, item: T) -> Result<()> {
        self.lifecycle.check_accept("collect_sink")?;
        self.out
            .lock()
            .map_err(|_| Error::pipeline("collect sink mutex poisoned"))?
            .push(item);
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.lifecycle.begin_finish("collect_sink")
    }

    fn abort(&mut self) {
        self.lifecycle.abort();
    }
}
