//! Page-level classification.
//!
//! Every symbol page carries a small header: a title with the fully
//! qualified name, a kind badge, and usually a one-paragraph blurb.
//! Classification only reads the header; the body is handled by the
//! section walk.

use scraper::Html;

use crate::dom;
use crate::error::{Result, ScrapeError};

/// The top-level kind of a symbol page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageKind {
	/// A namespace page: lists child types, module variables, functions.
	Namespace,
	/// A class page: constructor, properties, methods of one type.
	Class,
	/// Any other badge text; the page is skipped.
	Other(String),
}

/// Header metadata of one symbol page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageHeader {
	/// Page kind, from the kind badge.
	pub kind: PageKind,
	/// Fully qualified symbol name, from the page title.
	pub full_name: String,
	/// Short description, when the header carries one.
	pub description: Option<String>,
}

/// Read the header of a parsed page. Fails when the page lacks the main
/// content container or a title, which makes it unusable.
pub fn classify(document: &Html) -> Result<PageHeader> {
	let main = dom::main_content(document)
		.ok_or_else(|| ScrapeError::Page("page has no main content container".to_string()))?;

	let title = dom::select_first(main, &dom::HEADER_TITLE)
		.and_then(dom::inner_text_opt)
		.ok_or_else(|| ScrapeError::Page("page has no header title".to_string()))?;

	let badge = dom::select_first(main, &dom::KIND_LABEL)
		.and_then(dom::inner_text_opt)
		.unwrap_or_default();

	let kind = match badge.to_lowercase().as_str() {
		"namespace" => PageKind::Namespace,
		"class" => PageKind::Class,
		_ => PageKind::Other(badge),
	};

	let description = dom::select_first(main, &dom::HEADER_BLURB).and_then(dom::inner_text_opt);

	Ok(PageHeader {
		kind,
		full_name: title,
		description,
	})
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn classifies_a_namespace_page() {
		let document = dom::parse(
			"<div id=\"jsdoc-main\"><header><h1>chrome.cast.media</h1>\
			 <span class=\"label label-kind\">Namespace</span>\
			 <p>Media related objects.</p></header></div>",
		);
		let header = classify(&document).unwrap();
		assert_eq!(header.kind, PageKind::Namespace);
		assert_eq!(header.full_name, "chrome.cast.media");
		assert_eq!(header.description.as_deref(), Some("Media related objects."));
	}

	#[test]
	fn missing_description_is_not_an_error() {
		let document = dom::parse(
			"<div id=\"jsdoc-main\"><header><h1>chrome.cast.Session</h1>\
			 <span class=\"label label-kind\">Class</span></header></div>",
		);
		let header = classify(&document).unwrap();
		assert_eq!(header.kind, PageKind::Class);
		assert!(header.description.is_none());
	}

	#[test]
	fn unknown_badges_are_preserved() {
		let document = dom::parse(
			"<div id=\"jsdoc-main\"><header><h1>chrome.cast.Thing</h1>\
			 <span class=\"label label-kind\">Interface</span></header></div>",
		);
		let header = classify(&document).unwrap();
		assert_eq!(header.kind, PageKind::Other("Interface".to_string()));
	}

	#[test]
	fn pages_without_main_container_fail() {
		let document = dom::parse("<div><h1>stray</h1></div>");
		assert!(classify(&document).is_err());
	}
}
