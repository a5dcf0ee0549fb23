//! Address fragment convention: the fragment value is the active paragraph's identifier.

use std::borrow::Cow;

use percent_encoding::{AsciiSet, CONTROLS, percent_decode_str, utf8_percent_encode};

use crate::document::{DocumentIndex, ParagraphId};

/// The WHATWG fragment percent-encode set, plus `%` so encoded ids decode back to themselves.
const FRAGMENT: &AsciiSet = &CONTROLS.add(b' ').add(b'"').add(b'<').add(b'>').add(b'`').add(b'%');

/// A non-empty address fragment, without its leading `#`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fragment<'a> {
	raw: &'a str,
}

impl<'a> Fragment<'a> {
	/// Reads an address fragment, with or without its leading `#`.
	///
	/// Returns `None` for an absent or empty fragment.
	#[must_use]
	pub fn parse(raw: &'a str) -> Option<Self> {
		let value = raw.strip_prefix('#').unwrap_or(raw);
		(!value.is_empty()).then_some(Self { raw: value })
	}

	/// The value exactly as it appears in the address.
	#[must_use]
	pub const fn raw(&self) -> &'a str {
		self.raw
	}

	#[must_use]
	pub fn decoded(&self) -> Cow<'a, str> {
		percent_decode_str(self.raw).decode_utf8_lossy()
	}

	/// The paragraph this fragment points at. The value as written is tried before its
	/// percent-decoded form.
	#[must_use]
	pub fn target<'i>(&self, index: &'i DocumentIndex) -> Option<&'i ParagraphId> {
		index
			.get(self.raw)
			.or_else(|| index.get(&self.decoded()))
			.map(|paragraph| &paragraph.id)
	}
}

/// Same-document link target for `id`, e.g. `#p2`.
#[must_use]
pub fn format_fragment(id: &ParagraphId) -> String {
	format!("#{}", utf8_percent_encode(id.as_str(), FRAGMENT))
}
