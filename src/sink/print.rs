use std::fmt::Display;
use std::io::{self, Stdout, Write};

use crate::error::Result;
use crate::pipeline::lifecycle::Lifecycle;
use crate::pipeline::stage::Sink;

/// Writes each item on its own line.
pub struct PrintSink<W> {
    writer: W,
    lifecycle: Lifecycle,
}

impl PrintSink<Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> PrintSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            lifecycle: Lifecycle::new(),
        }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<T, W> Sink<T> for PrintSink<W>
where
    T: Display,
    W: Write,
{
    fn accept(&mut self, item: T) -> Result<()> {
        self.lifecycle.check_accept("print_sink")?;
        writeln!(self.writer, "{item}")?;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.lifecycle.begin_finish("print_sink")?;
        self.writer.flush()?;

        #[cfg(feature = "tracing")]
        tracing::event!(tracing::Level::DEBUG, event = "stagepipe.finish", stage = "print_sink", "stagepipe.finish");

        Ok(())
    }

    fn abort(&mut self) {
        if self.lifecycle.abort() {
            // Whatever was written stays written; nothing left to release.
            if let Err(_err) = self.writer.flush() {
                #[cfg(feature = "tracing")]
                tracing::event!(tracing::Level::WARN, event = "stagepipe.sink.flush_failed", stage = "print_sink", error = %_err, "stagepipe.sink.flush_failed");
            }
        }
    }
}
