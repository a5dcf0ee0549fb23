use std::fmt;

use serde::Serialize;

use crate::{
	document::{DocumentIndex, ParagraphId},
	error::NavResult,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
	Next,
	Previous,
}

impl Direction {
	/// The edge of the document a step in this direction can run into.
	#[must_use]
	pub const fn boundary(self) -> Boundary {
		match self {
			Self::Next => Boundary::Last,
			Self::Previous => Boundary::First,
		}
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Boundary {
	First,
	Last,
}

impl fmt::Display for Boundary {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(match self {
			Self::First => "first paragraph",
			Self::Last => "last paragraph",
		})
	}
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PagerOutcome {
	/// The adjacent paragraph became active.
	Moved(ParagraphId),
	/// Already at the edge; nothing changed.
	Boundary(Boundary),
	/// No paragraph was active, so there is nothing to step from.
	Inactive,
}

/// Where a pager step from `active` in `direction` lands.
///
/// # Errors
///
/// Returns [`crate::error::NavError::InvalidReference`] if `active` is not in `index`.
pub fn step(index: &DocumentIndex, active: Option<&ParagraphId>, direction: Direction) -> NavResult<PagerOutcome> {
	let Some(active) = active else {
		return Ok(PagerOutcome::Inactive);
	};
	let adjacent = match direction {
		Direction::Next => index.next(active.as_str())?,
		Direction::Previous => index.previous(active.as_str())?,
	};
	Ok(adjacent.map_or(PagerOutcome::Boundary(direction.boundary()), |id| PagerOutcome::Moved(id.clone())))
}
