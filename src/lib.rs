#![warn(clippy::all, clippy::nursery, clippy::pedantic)]

pub mod config;
pub mod document;
mod encoding;
pub mod error;
pub mod fragment;
pub mod menu;
pub mod navigator;
pub mod pager;
pub mod parser;
pub mod presenter;
pub mod script;
pub mod state;

pub use document::{DocumentIndex, Paragraph, ParagraphId};
pub use error::NavError;
pub use navigator::{NavEvent, Navigator};
pub use presenter::{MemoryPage, Presenter};
