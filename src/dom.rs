//! Document-query layer over the HTML parser.
//!
//! The extractor asks narrow questions of a page: "the main container",
//! "the direct child with this class", "the trimmed text of this node".
//! Everything that knows about selectors or node traversal lives here so
//! the scraping code reads in terms of page structure, not DOM plumbing.

use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("whitespace pattern"));

fn selector(css: &str) -> Selector {
	Selector::parse(css).expect("static selector")
}

/// The page's main content container.
pub static MAIN_CONTENT: Lazy<Selector> = Lazy::new(|| selector("#jsdoc-main"));
/// The page title inside the header.
pub static HEADER_TITLE: Lazy<Selector> = Lazy::new(|| selector("header h1"));
/// The kind badge inside the header.
pub static KIND_LABEL: Lazy<Selector> = Lazy::new(|| selector("header .label-kind"));
/// The descriptive paragraph inside the header.
pub static HEADER_BLURB: Lazy<Selector> = Lazy::new(|| selector("header p"));
/// Section headings and symbol-name headings, in document order.
pub static HEADINGS: Lazy<Selector> = Lazy::new(|| selector("h2, h3.symbol-name"));
/// Definition/parameter table rows within a member fragment.
pub static TABLE_ROWS: Lazy<Selector> = Lazy::new(|| selector("section table tbody tr"));
/// Inline code inside a return block.
pub static CODE: Lazy<Selector> = Lazy::new(|| selector("code"));
/// Links on the symbol index page.
pub static INDEX_LINKS: Lazy<Selector> = Lazy::new(|| selector("a.symbol-index-name"));

/// Parse page text into a navigable document.
pub fn parse(html: &str) -> Html {
	Html::parse_document(html)
}

/// Collapse runs of whitespace into single spaces and trim the ends.
pub fn sanitize(text: &str) -> String {
	WHITESPACE.replace_all(text.trim(), " ").into_owned()
}

/// The first descendant of `scope` matching `sel`.
pub fn select_first<'a>(scope: ElementRef<'a>, sel: &Selector) -> Option<ElementRef<'a>> {
	scope.select(sel).next()
}

/// The page's main content container, if present.
pub fn main_content(document: &Html) -> Option<ElementRef<'_>> {
	document.select(&MAIN_CONTENT).next()
}

/// Sanitized text of all descendants. Empty string when there is none.
pub fn inner_text(element: ElementRef<'_>) -> String {
	sanitize(&element.text().collect::<String>())
}

/// Like [`inner_text`], but `None` when the result is empty.
pub fn inner_text_opt(element: ElementRef<'_>) -> Option<String> {
	let text = inner_text(element);
	if text.is_empty() { None } else { Some(text) }
}

/// Sanitized text of the element's direct text children only, skipping
/// nested elements. `None` when empty.
pub fn own_text(element: ElementRef<'_>) -> Option<String> {
	let text: String = element
		.children()
		.filter_map(|node| node.value().as_text().map(|t| t.to_string()))
		.collect();
	let text = sanitize(&text);
	if text.is_empty() { None } else { Some(text) }
}

/// Direct element children of a node.
pub fn child_elements<'a>(element: ElementRef<'a>) -> impl Iterator<Item = ElementRef<'a>> + 'a {
	element.children().filter_map(ElementRef::wrap)
}

/// The first direct child carrying the given class.
pub fn child_with_class<'a>(element: ElementRef<'a>, class: &str) -> Option<ElementRef<'a>> {
	child_elements(element).find(|c| c.value().classes().any(|k| k == class))
}

/// The first direct child with the given tag name.
pub fn child_by_tag<'a>(element: ElementRef<'a>, tag: &str) -> Option<ElementRef<'a>> {
	child_elements(element).find(|c| c.value().name() == tag)
}

/// Direct `<p>` children without any class attribute, in order. The
/// pages use classless paragraphs for prose and classed ones for
/// structured fields.
pub fn plain_paragraphs<'a>(element: ElementRef<'a>) -> impl Iterator<Item = ElementRef<'a>> + 'a {
	child_elements(element)
		.filter(|c| c.value().name() == "p" && c.value().classes().next().is_none())
}

/// The first classless `<p>` child, sanitized; `None` when absent or
/// empty.
pub fn description_paragraph(element: ElementRef<'_>) -> Option<String> {
	plain_paragraphs(element).next().and_then(inner_text_opt)
}

/// The text of the direct `.type-signature` child, when present and
/// non-empty.
pub fn type_signature(element: ElementRef<'_>) -> Option<String> {
	child_with_class(element, "type-signature").and_then(inner_text_opt)
}

/// Whether the fragment carries a constant badge (`div > span.label-constant`).
pub fn has_constant_badge(element: ElementRef<'_>) -> bool {
	child_elements(element)
		.filter(|c| c.value().name() == "div")
		.any(|d| {
			child_elements(d)
				.any(|s| s.value().name() == "span" && s.value().classes().any(|k| k == "label-constant"))
		})
}

/// The enclosing element of a heading; member fragments are the
/// heading's parent container.
pub fn parent_element(element: ElementRef<'_>) -> Option<ElementRef<'_>> {
	element.parent().and_then(ElementRef::wrap)
}
