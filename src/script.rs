//! Textual interaction steps, so a session can be replayed from the command line.

use std::{fmt, str::FromStr};

use crate::{
	error::NavResult,
	navigator::{NavEvent, Navigator},
	pager::Direction,
	presenter::Presenter,
	state::DisplayMode,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
	Next,
	Previous,
	Mode(DisplayMode),
	Toggle,
	Link(String),
	Click(String),
	/// The user edits the address bar to this fragment.
	Hash(String),
	/// The user clears the fragment from the address bar.
	Clear,
}

impl FromStr for Step {
	type Err = String;

	fn from_str(raw: &str) -> Result<Self, Self::Err> {
		let raw = raw.trim();
		if let Some((verb, argument)) = raw.split_once(':') {
			let argument = argument.to_string();
			return match verb.to_ascii_lowercase().as_str() {
				"link" if !argument.is_empty() => Ok(Self::Link(argument)),
				"click" if !argument.is_empty() => Ok(Self::Click(argument)),
				"hash" => Ok(Self::Hash(argument)),
				"mode" => argument.parse().map(Self::Mode),
				_ => Err(format!("unknown step '{raw}'")),
			};
		}
		match raw.to_ascii_lowercase().as_str() {
			"next" => Ok(Self::Next),
			"prev" | "previous" => Ok(Self::Previous),
			"scroll" | "scrolling" => Ok(Self::Mode(DisplayMode::Scrolling)),
			"page" | "paging" => Ok(Self::Mode(DisplayMode::Paging)),
			"toggle" => Ok(Self::Toggle),
			"clear" => Ok(Self::Clear),
			_ => Err(format!("unknown step '{raw}'")),
		}
	}
}

impl fmt::Display for Step {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Next => f.write_str("next"),
			Self::Previous => f.write_str("prev"),
			Self::Mode(mode) => write!(f, "mode:{mode}"),
			Self::Toggle => f.write_str("toggle"),
			Self::Link(id) => write!(f, "link:{id}"),
			Self::Click(id) => write!(f, "click:{id}"),
			Self::Hash(fragment) => write!(f, "hash:{fragment}"),
			Self::Clear => f.write_str("clear"),
		}
	}
}

impl Step {
	/// Performs the step as the presentation layer would, then reports it to `navigator`.
	///
	/// # Errors
	///
	/// Propagates [`crate::error::NavError`] from the navigator.
	pub fn apply<P: Presenter>(&self, navigator: &mut Navigator<P>) -> NavResult<()> {
		match self {
			Self::Next => navigator.dispatch(NavEvent::Pager(Direction::Next)),
			Self::Previous => navigator.dispatch(NavEvent::Pager(Direction::Previous)),
			Self::Mode(mode) => {
				navigator.set_mode(*mode);
				Ok(())
			}
			Self::Toggle => {
				let checked = !navigator.mode().toggled().is_paging();
				navigator.dispatch(NavEvent::ModeToggled { checked })
			}
			Self::Link(id) => navigator.dispatch(NavEvent::LinkClicked(id.clone())),
			Self::Click(id) => navigator.dispatch(NavEvent::ParagraphClicked(id.clone())),
			Self::Hash(fragment) => {
				let fragment = if fragment.starts_with('#') { fragment.clone() } else { format!("#{fragment}") };
				navigator.presenter_mut().set_fragment(&fragment);
				navigator.dispatch(NavEvent::FragmentChanged)
			}
			Self::Clear => {
				navigator.presenter_mut().set_fragment("");
				navigator.dispatch(NavEvent::FragmentChanged)
			}
		}
	}
}
