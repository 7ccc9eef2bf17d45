use crate::expr::ParseError;
use crate::resolver::ResolveError;
use thiserror::Error;

/// Failure to turn one expression into a criteria tree, or one tree back into text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CriteriaError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("unable to resolve '{name}'")]
    Resolution {
        name: String,
        #[source]
        source: ResolveError,
    },

    #[error("unsupported criteria shape: {0}")]
    Schema(String),
}

impl CriteriaError {
    pub(crate) fn resolution(name: &str, source: ResolveError) -> Self {
        Self::Resolution {
            name: name.to_string(),
            source,
        }
    }
}
