use log::{debug, info, warn};

use crate::{
	config::{InvalidReferencePolicy, NavigatorConfig},
	document::{DocumentIndex, ParagraphId},
	error::{NavError, NavResult},
	fragment::{Fragment, format_fragment},
	menu::{Controls, Menu},
	pager::{self, Direction, PagerOutcome},
	presenter::{Element, Presenter},
	state::{DisplayMode, NavigationState},
};

/// Something the presentation layer reports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavEvent {
	/// The page finished loading; its address may already carry a fragment.
	Loaded,
	/// The address fragment changed; the new value is read back from the presenter.
	FragmentChanged,
	LinkClicked(String),
	ParagraphClicked(String),
	Pager(Direction),
	/// The "scrolling mode" checkbox changed.
	ModeToggled { checked: bool },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RenderCause {
	Startup,
	Activate,
	Deactivate,
	Mode,
}

/// Owns the navigation state and keeps every rendered surface in step with it.
pub struct Navigator<P: Presenter> {
	index: DocumentIndex,
	menu: Menu,
	controls: Controls,
	state: NavigationState,
	config: NavigatorConfig,
	presenter: P,
}

impl<P: Presenter> Navigator<P> {
	/// Builds the menu and controls and mounts them on `presenter`. Call [`Self::load`] next.
	pub fn new(index: DocumentIndex, config: NavigatorConfig, mut presenter: P) -> Self {
		let menu = Menu::build(index.enumerate(), &config.label_template);
		let controls = Controls::from_config(&config);
		presenter.mount(&menu, &controls);
		Self { index, menu, controls, state: NavigationState::default(), config, presenter }
	}

	#[must_use]
	pub const fn index(&self) -> &DocumentIndex {
		&self.index
	}

	#[must_use]
	pub const fn menu(&self) -> &Menu {
		&self.menu
	}

	#[must_use]
	pub const fn controls(&self) -> &Controls {
		&self.controls
	}

	#[must_use]
	pub const fn state(&self) -> &NavigationState {
		&self.state
	}

	#[must_use]
	pub const fn active(&self) -> Option<&ParagraphId> {
		self.state.active()
	}

	#[must_use]
	pub const fn mode(&self) -> DisplayMode {
		self.state.mode()
	}

	#[must_use]
	pub const fn presenter(&self) -> &P {
		&self.presenter
	}

	pub const fn presenter_mut(&mut self) -> &mut P {
		&mut self.presenter
	}

	/// Single entry point for presentation-layer events.
	///
	/// # Errors
	///
	/// Returns [`NavError::InvalidReference`] under the strict policy when the event names an
	/// identifier that is not in the document.
	pub fn dispatch(&mut self, event: NavEvent) -> NavResult<()> {
		debug!("dispatching {event:?}");
		match event {
			NavEvent::Loaded => self.load(),
			NavEvent::FragmentChanged => self.fragment_changed(),
			NavEvent::LinkClicked(id) => self.click_link(&id),
			NavEvent::ParagraphClicked(id) => self.activate(&id),
			NavEvent::Pager(direction) => self.advance(direction).map(|_| ()),
			NavEvent::ModeToggled { checked } => {
				self.set_mode(DisplayMode::from_checked(checked));
				Ok(())
			}
		}
	}

	/// Initial render. A fragment already present in the address activates its paragraph and
	/// scrolls to it.
	///
	/// # Errors
	///
	/// Returns [`NavError::InvalidReference`] under the strict policy when the fragment names no
	/// paragraph. The page is still rendered with nothing active.
	pub fn load(&mut self) -> NavResult<()> {
		info!("loading navigator over {} paragraphs", self.index.len());
		self.render(RenderCause::Startup);
		let address = self.presenter.fragment();
		let Some(fragment) = Fragment::parse(&address) else {
			return Ok(());
		};
		if let Some(id) = self.resolve_fragment(fragment)? {
			self.state.activate(id.clone());
			self.render(RenderCause::Startup);
			self.presenter.scroll_into_view(&id);
		}
		Ok(())
	}

	/// Re-reads the address fragment and activates (or clears) accordingly.
	///
	/// # Errors
	///
	/// Returns [`NavError::InvalidReference`] under the strict policy when the fragment names no
	/// paragraph.
	pub fn fragment_changed(&mut self) -> NavResult<()> {
		let address = self.presenter.fragment();
		match Fragment::parse(&address) {
			Some(fragment) => {
				if let Some(id) = self.resolve_fragment(fragment)? {
					self.commit_activation(id);
				}
				Ok(())
			}
			None => {
				self.deactivate();
				Ok(())
			}
		}
	}

	/// Follows a menu link the way a browser would: the fragment changes, and that change drives
	/// the activation.
	///
	/// # Errors
	///
	/// Returns [`NavError::InvalidReference`] under the strict policy when no link targets `target`.
	pub fn click_link(&mut self, target: &str) -> NavResult<()> {
		let Some(href) = self.menu.link_for(target).map(|link| link.href.clone()) else {
			return self.resolve(target).map(|_| ());
		};
		self.presenter.set_fragment(&href);
		self.fragment_changed()
	}

	/// # Errors
	///
	/// Returns [`NavError::InvalidReference`] under the strict policy when `id` names no paragraph.
	pub fn activate(&mut self, id: &str) -> NavResult<()> {
		if let Some(id) = self.resolve(id)? {
			self.commit_activation(id);
		}
		Ok(())
	}

	pub fn deactivate(&mut self) {
		if self.state.deactivate() {
			debug!("no paragraph active");
		}
		if Fragment::parse(&self.presenter.fragment()).is_some() {
			self.presenter.set_fragment("");
		}
		self.render(RenderCause::Deactivate);
	}

	/// Moves the selection one paragraph forward or back. At either end of the document the
	/// boundary is announced and nothing changes.
	///
	/// # Errors
	///
	/// Returns [`NavError::InvalidReference`] if the active paragraph is unknown to the index.
	pub fn advance(&mut self, direction: Direction) -> NavResult<PagerOutcome> {
		let outcome = pager::step(&self.index, self.state.active(), direction)?;
		match &outcome {
			PagerOutcome::Moved(id) => self.commit_activation(id.clone()),
			PagerOutcome::Boundary(boundary) => {
				info!("pager stopped at the {boundary}");
				let message = self.config.boundary_message(*boundary).to_string();
				self.presenter.announce(&message);
			}
			PagerOutcome::Inactive => debug!("pager ignored: no active paragraph"),
		}
		Ok(outcome)
	}

	pub fn set_mode(&mut self, mode: DisplayMode) {
		debug!("switching to {mode} mode");
		self.state.set_mode(mode);
		self.render(RenderCause::Mode);
		if mode.is_paging()
			&& let Some(id) = self.state.active().cloned()
		{
			self.presenter.scroll_into_view(&id);
		}
	}

	pub fn toggle_mode(&mut self) {
		self.set_mode(self.state.mode().toggled());
	}

	fn resolve(&self, id: &str) -> NavResult<Option<ParagraphId>> {
		if let Some(paragraph) = self.index.get(id) {
			return Ok(Some(paragraph.id.clone()));
		}
		match self.config.invalid_reference {
			InvalidReferencePolicy::Strict => Err(NavError::InvalidReference(id.to_string())),
			InvalidReferencePolicy::Lenient => {
				warn!("ignoring reference to unknown paragraph '{id}'");
				Ok(None)
			}
		}
	}

	/// Resolves a fragment by its value as written, then by its percent-decoded form.
	fn resolve_fragment(&self, fragment: Fragment<'_>) -> NavResult<Option<ParagraphId>> {
		match fragment.target(&self.index) {
			Some(id) => Ok(Some(id.clone())),
			None => self.resolve(&fragment.decoded()),
		}
	}

	fn commit_activation(&mut self, id: ParagraphId) {
		let address = self.presenter.fragment();
		let current = Fragment::parse(&address).and_then(|fragment| fragment.target(&self.index));
		if current != Some(&id) {
			self.presenter.set_fragment(&format_fragment(&id));
		}
		if self.state.activate(id) {
			debug!("active paragraph is now {:?}", self.state.active());
		}
		self.render(RenderCause::Activate);
	}

	/// Derives every surface from the current state.
	fn render(&mut self, cause: RenderCause) {
		let active = self.state.active().cloned();
		let paging = self.state.mode().is_paging();
		for paragraph in self.index.iter() {
			let is_active = active.as_ref() == Some(&paragraph.id);
			let element = Element::Paragraph(paragraph.id.clone());
			self.presenter.set_highlighted(&element, is_active);
			self.presenter.set_visible(&element, !paging || is_active);
		}
		for link in self.menu.links() {
			let is_active = active.as_ref() == Some(&link.target);
			self.presenter.set_highlighted(&Element::Link(link.target.clone()), is_active);
		}
		self.presenter.set_tracker_text(active.as_ref().map_or("", ParagraphId::as_str));
		self.presenter.set_visible(&Element::Pager, paging);
		self.presenter.set_mode_checked(!paging);
		if cause == RenderCause::Activate
			&& !paging
			&& let Some(id) = &active
		{
			self.presenter.scroll_into_view(id);
		}
		debug!("rendered after {cause:?}: active={active:?}, mode={}", self.state.mode());
	}
}
