use std::{collections::HashMap, fmt};

use bitflags::bitflags;
use serde::Serialize;

use crate::{
	document::ParagraphId,
	menu::{Controls, Menu},
};

/// An element of the rendered page the navigator can mark.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Element {
	Paragraph(ParagraphId),
	Link(ParagraphId),
	Pager,
}

/// The presentation layer (DOM and address bar) as seen by the navigator.
///
/// Every method is a plain write or read; the navigator always re-renders from its own state,
/// so implementations need not diff or guard against repeated calls.
pub trait Presenter {
	/// Receives the menu and controls once, before the first render.
	fn mount(&mut self, menu: &Menu, controls: &Controls);
	fn set_highlighted(&mut self, element: &Element, highlighted: bool);
	fn set_visible(&mut self, element: &Element, visible: bool);
	fn set_tracker_text(&mut self, text: &str);
	fn set_mode_checked(&mut self, checked: bool);
	fn scroll_into_view(&mut self, id: &ParagraphId);
	/// Current address fragment, including the leading `#` when present.
	fn fragment(&self) -> String;
	fn set_fragment(&mut self, fragment: &str);
	/// Shows an informational notice to the user.
	fn announce(&mut self, message: &str);
}

bitflags! {
	#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
	pub struct ElementState: u8 {
		const HIGHLIGHTED = 1 << 0;
		const VISIBLE = 1 << 1;
	}
}

/// A page held in memory: what a browser would display, minus the pixels.
#[derive(Debug, Clone, Default)]
pub struct MemoryPage {
	menu: Menu,
	controls: Option<Controls>,
	paragraph_order: Vec<ParagraphId>,
	states: HashMap<Element, ElementState>,
	tracker: String,
	fragment: String,
	mode_checked: bool,
	scrolled: Vec<ParagraphId>,
	announcements: Vec<String>,
}

impl MemoryPage {
	#[must_use]
	pub fn new() -> Self {
		Self::default()
	}

	/// A page opened at an address that already carries `fragment`.
	#[must_use]
	pub fn with_fragment(fragment: impl Into<String>) -> Self {
		Self { fragment: fragment.into(), ..Self::default() }
	}

	#[must_use]
	pub fn state(&self, element: &Element) -> ElementState {
		self.states.get(element).copied().unwrap_or(ElementState::VISIBLE)
	}

	#[must_use]
	pub fn is_highlighted(&self, element: &Element) -> bool {
		self.state(element).contains(ElementState::HIGHLIGHTED)
	}

	#[must_use]
	pub fn is_visible(&self, element: &Element) -> bool {
		self.state(element).contains(ElementState::VISIBLE)
	}

	#[must_use]
	pub fn highlighted_paragraphs(&self) -> Vec<&ParagraphId> {
		self.paragraph_order.iter().filter(|id| self.is_highlighted(&Element::Paragraph((*id).clone()))).collect()
	}

	#[must_use]
	pub fn highlighted_links(&self) -> Vec<&ParagraphId> {
		self.menu
			.links()
			.iter()
			.map(|link| &link.target)
			.filter(|target| self.is_highlighted(&Element::Link((*target).clone())))
			.collect()
	}

	#[must_use]
	pub fn visible_paragraphs(&self) -> Vec<&ParagraphId> {
		self.paragraph_order.iter().filter(|id| self.is_visible(&Element::Paragraph((*id).clone()))).collect()
	}

	#[must_use]
	pub fn tracker_text(&self) -> &str {
		&self.tracker
	}

	#[must_use]
	pub const fn mode_checked(&self) -> bool {
		self.mode_checked
	}

	#[must_use]
	pub fn scroll_log(&self) -> &[ParagraphId] {
		&self.scrolled
	}

	#[must_use]
	pub fn announcements(&self) -> &[String] {
		&self.announcements
	}

	#[must_use]
	pub const fn menu(&self) -> &Menu {
		&self.menu
	}

	#[must_use]
	pub const fn controls(&self) -> Option<&Controls> {
		self.controls.as_ref()
	}

	#[must_use]
	pub fn snapshot(&self) -> PageSnapshot {
		let paragraphs = self
			.paragraph_order
			.iter()
			.map(|id| {
				let state = self.state(&Element::Paragraph(id.clone()));
				ParagraphView {
					id: id.clone(),
					highlighted: state.contains(ElementState::HIGHLIGHTED),
					visible: state.contains(ElementState::VISIBLE),
				}
			})
			.collect();
		let links = self
			.menu
			.links()
			.iter()
			.map(|link| LinkView {
				target: link.target.clone(),
				label: link.label.clone(),
				href: link.href.clone(),
				highlighted: self.is_highlighted(&Element::Link(link.target.clone())),
			})
			.collect();
		PageSnapshot {
			links,
			paragraphs,
			pager_visible: self.is_visible(&Element::Pager),
			mode_checked: self.mode_checked,
			tracker: self.tracker.clone(),
			fragment: self.fragment.clone(),
			announcements: self.announcements.clone(),
		}
	}

	fn update(&mut self, element: &Element, flag: ElementState, on: bool) {
		let mut state = self.state(element);
		state.set(flag, on);
		self.states.insert(element.clone(), state);
	}
}

impl Presenter for MemoryPage {
	fn mount(&mut self, menu: &Menu, controls: &Controls) {
		self.menu = menu.clone();
		self.controls = Some(controls.clone());
		self.paragraph_order = menu.links().iter().map(|link| link.target.clone()).collect();
	}

	fn set_highlighted(&mut self, element: &Element, highlighted: bool) {
		self.update(element, ElementState::HIGHLIGHTED, highlighted);
	}

	fn set_visible(&mut self, element: &Element, visible: bool) {
		self.update(element, ElementState::VISIBLE, visible);
	}

	fn set_tracker_text(&mut self, text: &str) {
		text.clone_into(&mut self.tracker);
	}

	fn set_mode_checked(&mut self, checked: bool) {
		self.mode_checked = checked;
	}

	fn scroll_into_view(&mut self, id: &ParagraphId) {
		self.scrolled.push(id.clone());
	}

	fn fragment(&self) -> String {
		self.fragment.clone()
	}

	fn set_fragment(&mut self, fragment: &str) {
		fragment.clone_into(&mut self.fragment);
	}

	fn announce(&mut self, message: &str) {
		self.announcements.push(message.to_string());
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParagraphView {
	pub id: ParagraphId,
	pub highlighted: bool,
	pub visible: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LinkView {
	pub target: ParagraphId,
	pub label: String,
	pub href: String,
	pub highlighted: bool,
}

/// Everything a user could observe on a [`MemoryPage`] at one moment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageSnapshot {
	pub links: Vec<LinkView>,
	pub paragraphs: Vec<ParagraphView>,
	pub pager_visible: bool,
	pub mode_checked: bool,
	pub tracker: String,
	pub fragment: String,
	pub announcements: Vec<String>,
}

impl fmt::Display for PageSnapshot {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		writeln!(f, "Menu:")?;
		for link in &self.links {
			let mark = if link.highlighted { '*' } else { ' ' };
			writeln!(f, "  [{mark}] {} ({})", link.label, link.href)?;
		}
		writeln!(f, "Paragraphs:")?;
		for paragraph in &self.paragraphs {
			let visibility = if paragraph.visible { "shown" } else { "hidden" };
			let highlight = if paragraph.highlighted { ", active" } else { "" };
			writeln!(f, "  {} ({visibility}{highlight})", paragraph.id)?;
		}
		let mode = if self.mode_checked { "scrolling" } else { "paging" };
		let pager = if self.pager_visible { "shown" } else { "hidden" };
		writeln!(f, "Mode: {mode} (pager {pager})")?;
		writeln!(f, "Tracker: {}", self.tracker)?;
		writeln!(f, "Fragment: {}", self.fragment)?;
		for message in &self.announcements {
			writeln!(f, "Notice: {message}")?;
		}
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;
	use crate::{config::NavigatorConfig, document::DocumentIndex};

	fn mounted_page() -> MemoryPage {
		let index = DocumentIndex::from_ids(["a", "b"]);
		let mut page = MemoryPage::new();
		page.mount(&Menu::build(index.enumerate(), "{id}"), &Controls::from_config(&NavigatorConfig::default()));
		page
	}

	#[test]
	fn elements_start_visible_and_unhighlighted() {
		let page = mounted_page();
		let a = Element::Paragraph(ParagraphId::new("a"));
		assert!(page.is_visible(&a));
		assert!(!page.is_highlighted(&a));
		assert!(page.is_visible(&Element::Pager));
	}

	#[test]
	fn highlight_and_visibility_are_independent_flags() {
		let mut page = mounted_page();
		let a = Element::Paragraph(ParagraphId::new("a"));
		page.set_highlighted(&a, true);
		page.set_visible(&a, false);
		assert_eq!(page.state(&a), ElementState::HIGHLIGHTED);
		page.set_highlighted(&a, false);
		assert_eq!(page.state(&a), ElementState::empty());
	}

	#[test]
	fn highlighted_queries_follow_document_order() {
		let mut page = mounted_page();
		page.set_highlighted(&Element::Paragraph(ParagraphId::new("b")), true);
		page.set_highlighted(&Element::Link(ParagraphId::new("b")), true);
		assert_eq!(page.highlighted_paragraphs(), vec![&ParagraphId::new("b")]);
		assert_eq!(page.highlighted_links(), vec![&ParagraphId::new("b")]);
		assert_eq!(page.visible_paragraphs().len(), 2);
	}

	#[test]
	fn with_fragment_seeds_the_address() {
		let page = MemoryPage::with_fragment("#b");
		assert_eq!(page.fragment(), "#b");
	}

	#[test]
	fn snapshot_renders_as_text() {
		let mut page = mounted_page();
		page.set_highlighted(&Element::Paragraph(ParagraphId::new("a")), true);
		page.set_highlighted(&Element::Link(ParagraphId::new("a")), true);
		page.set_visible(&Element::Paragraph(ParagraphId::new("b")), false);
		page.set_tracker_text("a");
		page.set_fragment("#a");
		page.announce("hello");
		let expected = "Menu:\n  [*] a (#a)\n  [ ] b (#b)\nParagraphs:\n  a (shown, active)\n  b (hidden)\nMode: paging (pager shown)\nTracker: a\nFragment: #a\nNotice: hello\n";
		assert_eq!(page.snapshot().to_string(), expected);
	}
}
