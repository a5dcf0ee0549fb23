use serde::Serialize;

use crate::{
	config::NavigatorConfig,
	document::{Paragraph, ParagraphId},
	fragment::format_fragment,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MenuLink {
	pub target: ParagraphId,
	pub label: String,
	pub href: String,
}

/// Sidebar links, one per paragraph, in paragraph order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Menu {
	links: Vec<MenuLink>,
}

impl Menu {
	/// Builds one same-document link per paragraph. `{id}` in `label_template` is replaced by the identifier.
	#[must_use]
	pub fn build(paragraphs: &[Paragraph], label_template: &str) -> Self {
		let links = paragraphs
			.iter()
			.map(|p| MenuLink {
				target: p.id.clone(),
				label: link_label(label_template, &p.id),
				href: format_fragment(&p.id),
			})
			.collect();
		Self { links }
	}

	#[must_use]
	pub fn links(&self) -> &[MenuLink] {
		&self.links
	}

	#[must_use]
	pub fn link_for(&self, target: &str) -> Option<&MenuLink> {
		self.links.iter().find(|link| link.target.as_str() == target)
	}

	#[must_use]
	pub fn len(&self) -> usize {
		self.links.len()
	}

	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.links.is_empty()
	}
}

#[must_use]
pub fn link_label(template: &str, id: &ParagraphId) -> String {
	template.replace("{id}", id.as_str())
}

/// The pager buttons and the mode toggle, handed to the presenter alongside the menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Controls {
	pub previous_label: String,
	pub next_label: String,
	pub mode_toggle_label: String,
}

impl Controls {
	#[must_use]
	pub fn from_config(config: &NavigatorConfig) -> Self {
		Self {
			previous_label: config.previous_label.clone(),
			next_label: config.next_label.clone(),
			mode_toggle_label: config.mode_toggle_label.clone(),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::{config::DEFAULT_LABEL_TEMPLATE, document::DocumentIndex};

	#[test]
	fn one_link_per_paragraph_in_order() {
		let index = DocumentIndex::from_ids(["p1", "p2", "p3"]);
		let menu = Menu::build(index.enumerate(), DEFAULT_LABEL_TEMPLATE);
		assert_eq!(menu.len(), 3);
		let targets: Vec<&str> = menu.links().iter().map(|l| l.target.as_str()).collect();
		assert_eq!(targets, vec!["p1", "p2", "p3"]);
		assert_eq!(menu.links()[1].label, "Paragraph p2");
		assert_eq!(menu.links()[1].href, "#p2");
	}

	#[test]
	fn empty_document_builds_an_empty_menu() {
		let menu = Menu::build(&[], DEFAULT_LABEL_TEMPLATE);
		assert!(menu.is_empty());
	}

	#[test]
	fn label_template_without_placeholder_is_used_verbatim() {
		assert_eq!(link_label("Section", &ParagraphId::new("a")), "Section");
		assert_eq!(link_label("{id} / {id}", &ParagraphId::new("a")), "a / a");
	}

	#[test]
	fn link_lookup_by_target() {
		let index = DocumentIndex::from_ids(["intro", "end"]);
		let menu = Menu::build(index.enumerate(), "{id}");
		assert_eq!(menu.link_for("end").map(|l| l.label.as_str()), Some("end"));
		assert!(menu.link_for("missing").is_none());
	}

	#[test]
	fn controls_take_labels_from_config() {
		let controls = Controls::from_config(&NavigatorConfig::default());
		assert_eq!(controls.previous_label, "Previous");
		assert_eq!(controls.next_label, "Next");
		assert_eq!(controls.mode_toggle_label, "Scrolling mode");
	}
}
