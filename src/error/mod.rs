use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("pipeline error: {context}")]
    Pipeline { context: &'static str },

    #[error("stage `{stage}` failed: {message}")]
    Stage {
        stage: &'static str,
        message: String,
    },

    #[error("protocol violation in stage `{stage}`: {violation}")]
    Protocol {
        stage: &'static str,
        violation: Violation,
    },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[cfg(feature = "http")]
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Misuse of the accept/finish lifecycle by a caller.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Violation {
    #[error("accept called after the stage terminated")]
    AcceptAfterTermination,

    #[error("finish called twice")]
    FinishTwice,

    #[error("finish called after abort")]
    FinishAfterAbort,
}

impl Error {
    pub fn pipeline(context: &'static str) -> Self {
        Self::Pipeline { context }
    }

    pub fn stage(stage: &'static str, message: impl Into<String>) -> Self {
        Self::Stage {
            stage,
            message: message.into(),
        }
    }

    pub fn protocol(stage: &'static str, violation: Violation) -> Self {
        Self::Protocol { stage, violation }
    }

    /// The lifecycle violation carried by this error, if any.
    pub fn violation(&self) -> Option<Violation> {
        match self {
            Self::Protocol { violation, .. } => Some(*violation),
            _ => None,
        }
    }
}
