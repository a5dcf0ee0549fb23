use std::{
	borrow::Borrow,
	collections::{HashMap, HashSet},
	fmt,
};

use serde::Serialize;

use crate::error::{NavError, NavResult};

/// Stable identifier of a paragraph; also the address fragment that selects it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ParagraphId(String);

impl ParagraphId {
	#[must_use]
	pub fn new(id: impl Into<String>) -> Self {
		Self(id.into())
	}

	#[must_use]
	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl fmt::Display for ParagraphId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

impl Borrow<str> for ParagraphId {
	fn borrow(&self) -> &str {
		&self.0
	}
}

/// A paragraph as found in the source document, before identifiers are settled.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParagraphSource {
	pub id: Option<String>,
	pub text: String,
}

impl ParagraphSource {
	#[must_use]
	pub fn new(text: impl Into<String>) -> Self {
		Self { id: None, text: text.into() }
	}

	#[must_use]
	pub fn with_id(mut self, id: impl Into<String>) -> Self {
		self.id = Some(id.into());
		self
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Paragraph {
	pub id: ParagraphId,
	pub position: usize,
	pub text: String,
}

/// Paragraphs of one document in source order. Built once, never mutated.
#[derive(Debug, Clone, Default)]
pub struct DocumentIndex {
	paragraphs: Vec<Paragraph>,
	positions: HashMap<ParagraphId, usize>,
}

impl DocumentIndex {
	/// Settles identifiers for `sources` and indexes them.
	///
	/// An explicit, non-empty id is kept unless an earlier paragraph already claimed it.
	/// Every other paragraph gets `p{n}` (1-based source position), suffixed with `-2`, `-3`, ...
	/// when that name is taken by any explicit id in the document.
	#[must_use]
	pub fn from_sources(sources: Vec<ParagraphSource>) -> Self {
		let reserved: HashSet<String> = sources
			.iter()
			.filter_map(|source| source.id.as_deref().map(str::trim))
			.filter(|id| !id.is_empty())
			.map(str::to_string)
			.collect();
		let mut used: HashSet<String> = HashSet::new();
		let mut paragraphs = Vec::with_capacity(sources.len());
		for (position, source) in sources.into_iter().enumerate() {
			let explicit = source.id.as_deref().map(str::trim).filter(|id| !id.is_empty() && !used.contains(*id));
			let id = explicit.map_or_else(|| generated_id(position, &reserved, &used), str::to_string);
			used.insert(id.clone());
			paragraphs.push(Paragraph { id: ParagraphId::new(id), position, text: source.text });
		}
		let positions = paragraphs.iter().map(|p| (p.id.clone(), p.position)).collect();
		Self { paragraphs, positions }
	}

	/// Index of bare paragraphs with the given explicit identifiers.
	#[must_use]
	pub fn from_ids<'a>(ids: impl IntoIterator<Item = &'a str>) -> Self {
		Self::from_sources(ids.into_iter().map(|id| ParagraphSource::new(String::new()).with_id(id)).collect())
	}

	#[must_use]
	pub fn enumerate(&self) -> &[Paragraph] {
		&self.paragraphs
	}

	pub fn iter(&self) -> impl Iterator<Item = &Paragraph> {
		self.paragraphs.iter()
	}

	#[must_use]
	pub fn len(&self) -> usize {
		self.paragraphs.len()
	}

	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.paragraphs.is_empty()
	}

	#[must_use]
	pub fn get(&self, id: &str) -> Option<&Paragraph> {
		self.positions.get(id).and_then(|&idx| self.paragraphs.get(idx))
	}

	#[must_use]
	pub fn contains(&self, id: &str) -> bool {
		self.positions.contains_key(id)
	}

	#[must_use]
	pub fn position(&self, id: &str) -> Option<usize> {
		self.positions.get(id).copied()
	}

	#[must_use]
	pub fn first(&self) -> Option<&Paragraph> {
		self.paragraphs.first()
	}

	#[must_use]
	pub fn last(&self) -> Option<&Paragraph> {
		self.paragraphs.last()
	}

	/// # Errors
	///
	/// Returns [`NavError::InvalidReference`] if `id` is not in the index.
	pub fn next(&self, id: &str) -> NavResult<Option<&ParagraphId>> {
		let idx = self.require(id)?;
		Ok(self.paragraphs.get(idx + 1).map(|p| &p.id))
	}

	/// # Errors
	///
	/// Returns [`NavError::InvalidReference`] if `id` is not in the index.
	pub fn previous(&self, id: &str) -> NavResult<Option<&ParagraphId>> {
		let idx = self.require(id)?;
		Ok(idx.checked_sub(1).and_then(|prev| self.paragraphs.get(prev)).map(|p| &p.id))
	}

	fn require(&self, id: &str) -> NavResult<usize> {
		self.position(id).ok_or_else(|| NavError::InvalidReference(id.to_string()))
	}
}

fn generated_id(position: usize, reserved: &HashSet<String>, used: &HashSet<String>) -> String {
	let base = format!("p{}", position + 1);
	let taken = |candidate: &str| reserved.contains(candidate) || used.contains(candidate);
	if !taken(&base) {
		return base;
	}
	let mut suffix = 2usize;
	loop {
		let candidate = format!("{base}-{suffix}");
		if !taken(&candidate) {
			return candidate;
		}
		suffix += 1;
	}
}
