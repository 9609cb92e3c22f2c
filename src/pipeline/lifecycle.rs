use crate::error::{Error, Result, Violation};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Open,
    Finished,
    Aborted,
}

/// Termination gate owned by every push node and reference sink.
///
/// Moves from `Open` to exactly one of `Finished` or `Aborted`, and rejects
/// any call that would break the accept/finish protocol.
#[derive(Debug, Default)]
pub struct Lifecycle {
    phase: Phase,
}

impl Lifecycle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_open(&self) -> bool {
        self.phase == Phase::Open
    }

    pub fn check_accept(&self, stage: &'static str) -> Result<()> {
        if self.is_open() {
            Ok(())
        } else {
            Err(violation(stage, Violation::AcceptAfterTermination))
        }
    }

    /// Claims the single finish. The phase changes before any flushing
    /// happens, so a re-entrant finish is rejected too.
    pub fn begin_finish(&mut self, stage: &'static str) -> Result<()> {
        match self.phase {
            Phase::Open => {
                self.phase = Phase::Finished;
                Ok(())
            }
            Phase::Finished => Err(violation(stage, Violation::FinishTwice)),
            Phase::Aborted => Err(violation(stage, Violation::FinishAfterAbort)),
        }
    }

    /// Returns `true` only on the transition out of `Open`.
    pub fn abort(&mut self) -> bool {
        if self.is_open() {
            self.phase = Phase::Aborted;
            true
        } else {
            false
        }
    }
}

fn violation(stage: &'static str, violation: Violation) -> Error {
    #[cfg(feature = "tracing")]
    tracing::event!(tracing::Level::WARN, event = "stagepipe.protocol_violation", stage = stage, violation = %violation, "stagepipe.protocol_violation");
    Error::protocol(stage, violation)
}
