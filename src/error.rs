use thiserror::Error;

/// Failures surfaced by navigation handlers.
///
/// Boundary hits and empty fragments are not errors: the pager reports the former as a
/// [`crate::pager::PagerOutcome`] and the latter simply means no paragraph is active.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum NavError {
	#[error("no paragraph with identifier '{0}'")]
	InvalidReference(String),
}

pub type NavResult<T> = Result<T, NavError>;
