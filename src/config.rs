use std::{path::Path, str::FromStr};

use anyhow::{Context, Result};
use configparser::ini::Ini;

use crate::{pager::Boundary, parser::DEFAULT_PARAGRAPH_SELECTOR};

const SECTION: &str = "navigation";
pub const DEFAULT_LABEL_TEMPLATE: &str = "Paragraph {id}";

/// What to do when an event names a paragraph that does not exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InvalidReferencePolicy {
	/// The handler fails with [`crate::error::NavError::InvalidReference`].
	#[default]
	Strict,
	/// The reference is logged and ignored.
	Lenient,
}

impl FromStr for InvalidReferencePolicy {
	type Err = String;

	fn from_str(value: &str) -> Result<Self, Self::Err> {
		match value.trim().to_ascii_lowercase().as_str() {
			"strict" | "fail" | "error" => Ok(Self::Strict),
			"lenient" | "ignore" | "noop" => Ok(Self::Lenient),
			other => Err(format!("unknown invalid reference policy '{other}'")),
		}
	}
}

/// Widget settings. The display mode is deliberately absent: every load starts in paging mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigatorConfig {
	pub label_template: String,
	pub paragraph_selector: String,
	pub invalid_reference: InvalidReferencePolicy,
	pub previous_label: String,
	pub next_label: String,
	pub mode_toggle_label: String,
	pub first_boundary_message: String,
	pub last_boundary_message: String,
}

impl Default for NavigatorConfig {
	fn default() -> Self {
		Self {
			label_template: DEFAULT_LABEL_TEMPLATE.to_string(),
			paragraph_selector: DEFAULT_PARAGRAPH_SELECTOR.to_string(),
			invalid_reference: InvalidReferencePolicy::Strict,
			previous_label: "Previous".to_string(),
			next_label: "Next".to_string(),
			mode_toggle_label: "Scrolling mode".to_string(),
			first_boundary_message: "This is the first paragraph.".to_string(),
			last_boundary_message: "This is the last paragraph.".to_string(),
		}
	}
}

impl NavigatorConfig {
	/// # Errors
	///
	/// Returns an error if the file cannot be read or parsed, or holds an unknown policy value.
	pub fn load(path: &Path) -> Result<Self> {
		let mut ini = Ini::new();
		ini.load(path)
			.map_err(anyhow::Error::msg)
			.with_context(|| format!("Failed to read config file '{}'", path.display()))?;
		Self::from_ini(&ini).with_context(|| format!("Invalid config file '{}'", path.display()))
	}

	/// # Errors
	///
	/// Returns an error if `contents` is not valid INI or holds an unknown policy value.
	pub fn from_ini_str(contents: &str) -> Result<Self> {
		let mut ini = Ini::new();
		ini.read(contents.to_string()).map_err(anyhow::Error::msg).context("Failed to parse config")?;
		Self::from_ini(&ini)
	}

	fn from_ini(ini: &Ini) -> Result<Self> {
		let defaults = Self::default();
		let get = |key: &str, default: String| ini.get(SECTION, key).filter(|v| !v.is_empty()).unwrap_or(default);
		let invalid_reference = match ini.get(SECTION, "invalid_reference") {
			Some(value) if !value.is_empty() => value.parse::<InvalidReferencePolicy>().map_err(anyhow::Error::msg)?,
			_ => defaults.invalid_reference,
		};
		Ok(Self {
			label_template: get("label_template", defaults.label_template),
			paragraph_selector: get("paragraph_selector", defaults.paragraph_selector),
			invalid_reference,
			previous_label: get("previous_label", defaults.previous_label),
			next_label: get("next_label", defaults.next_label),
			mode_toggle_label: get("mode_toggle_label", defaults.mode_toggle_label),
			first_boundary_message: get("first_boundary_message", defaults.first_boundary_message),
			last_boundary_message: get("last_boundary_message", defaults.last_boundary_message),
		})
	}

	#[must_use]
	pub fn with_invalid_reference(mut self, policy: InvalidReferencePolicy) -> Self {
		self.invalid_reference = policy;
		self
	}

	#[must_use]
	pub fn boundary_message(&self, boundary: Boundary) -> &str {
		match boundary {
			Boundary::First => &self.first_boundary_message,
			Boundary::Last => &self.last_boundary_message,
		}
	}
}
