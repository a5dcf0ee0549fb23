use std::{fs, path::Path};

use anyhow::{Context, Result, anyhow};
use log::debug;
use scraper::{Html, Selector};

use crate::{
	document::{DocumentIndex, ParagraphSource},
	encoding::decode_html,
};

pub const DEFAULT_PARAGRAPH_SELECTOR: &str = "p";

/// Collects the elements matching `selector` in document order.
///
/// # Errors
///
/// Returns an error if `selector` is not a valid CSS selector.
pub fn parse_paragraphs(html: &str, selector: &str) -> Result<Vec<ParagraphSource>> {
	let selector = Selector::parse(selector).map_err(|e| anyhow!("Invalid paragraph selector '{selector}': {e}"))?;
	let document = Html::parse_document(html);
	let paragraphs = document
		.select(&selector)
		.map(|element| ParagraphSource {
			id: element.value().id().map(str::to_string),
			text: collapse_whitespace(&element.text().collect::<String>()),
		})
		.collect();
	Ok(paragraphs)
}

/// # Errors
///
/// Returns an error if `selector` is not a valid CSS selector.
pub fn load_document(html: &str, selector: &str) -> Result<DocumentIndex> {
	let sources = parse_paragraphs(html, selector)?;
	debug!("found {} paragraphs matching '{selector}'", sources.len());
	Ok(DocumentIndex::from_sources(sources))
}

/// # Errors
///
/// Returns an error if the file cannot be read, is empty, or `selector` is invalid.
pub fn load_file(path: &Path, selector: &str) -> Result<DocumentIndex> {
	let bytes = fs::read(path).with_context(|| format!("Failed to open HTML file '{}'", path.display()))?;
	if bytes.is_empty() {
		anyhow::bail!("HTML file is empty: {}", path.display());
	}
	let html = decode_html(&bytes);
	load_document(&html, selector).with_context(|| format!("Failed to index paragraphs of '{}'", path.display()))
}

fn collapse_whitespace(text: &str) -> String {
	text.split_whitespace().collect::<Vec<_>>().join(" ")
}
