use std::{fmt, str::FromStr};

use serde::Serialize;

use crate::document::ParagraphId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayMode {
	Scrolling,
	#[default]
	Paging,
}

impl DisplayMode {
	#[must_use]
	pub const fn toggled(self) -> Self {
		match self {
			Self::Scrolling => Self::Paging,
			Self::Paging => Self::Scrolling,
		}
	}

	/// The mode toggle is a "scrolling mode" checkbox.
	#[must_use]
	pub const fn from_checked(checked: bool) -> Self {
		if checked { Self::Scrolling } else { Self::Paging }
	}

	#[must_use]
	pub const fn is_paging(self) -> bool {
		matches!(self, Self::Paging)
	}
}

impl fmt::Display for DisplayMode {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(match self {
			Self::Scrolling => "scrolling",
			Self::Paging => "paging",
		})
	}
}

impl FromStr for DisplayMode {
	type Err = String;

	fn from_str(value: &str) -> Result<Self, Self::Err> {
		match value.trim().to_ascii_lowercase().as_str() {
			"scrolling" | "scroll" => Ok(Self::Scrolling),
			"paging" | "page" => Ok(Self::Paging),
			other => Err(format!("unknown display mode '{other}'")),
		}
	}
}

/// Which paragraph is active and how paragraphs are presented.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NavigationState {
	active: Option<ParagraphId>,
	mode: DisplayMode,
}

impl NavigationState {
	#[must_use]
	pub const fn active(&self) -> Option<&ParagraphId> {
		self.active.as_ref()
	}

	#[must_use]
	pub const fn mode(&self) -> DisplayMode {
		self.mode
	}

	/// Returns whether the active paragraph changed.
	pub fn activate(&mut self, id: ParagraphId) -> bool {
		if self.active.as_ref() == Some(&id) {
			return false;
		}
		self.active = Some(id);
		true
	}

	/// Returns whether a paragraph was active.
	pub fn deactivate(&mut self) -> bool {
		self.active.take().is_some()
	}

	pub const fn set_mode(&mut self, mode: DisplayMode) {
		self.mode = mode;
	}
}
