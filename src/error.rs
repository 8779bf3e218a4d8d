use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("corpus has no pages")]
    EmptyCorpus,

    #[error("unknown page: {0}")]
    UnknownPage(String),

    #[error("invalid {name}={value}: {reason}")]
    InvalidParameter {
        name: &'static str,
        value: String,
        reason: &'static str,
    },

    #[error("no convergence after {iterations} iterations (delta={delta})")]
    NonConvergence { iterations: usize, delta: f64 },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    pub(crate) fn invalid<V: ToString>(name: &'static str, value: V, reason: &'static str) -> Self {
        Self::InvalidParameter {
            name,
            value: value.to_string(),
            reason,
        }
    }
}
