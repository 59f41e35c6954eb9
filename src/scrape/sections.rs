//! Section heading classification.
//!
//! Pages are organized by `h2` section headings ("Properties",
//! "Methods", ...) with `h3` symbol headings nested under them. The walk
//! keeps one marker — the current section kind — and interprets each
//! symbol heading under it. Namespace and class pages accept different
//! section sets.

use super::page::PageKind;

/// The current section marker during a page walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionKind {
	/// No recognized section seen yet (or the last one was unrecognized).
	None,
	/// "Classes".
	Class,
	/// "Abstract types" — classes with the abstract flag.
	AbstractType,
	/// "Enumerations".
	Enum,
	/// "Properties".
	Property,
	/// "Methods".
	Method,
	/// "Namespaces".
	Namespace,
	/// "Constructor".
	Constructor,
}

/// Map a section heading's text to a kind. Case-insensitive, accepts
/// singular and plural forms. `None` for unrecognized text.
pub fn classify_heading(text: &str) -> Option<SectionKind> {
	match text.trim().to_lowercase().as_str() {
		"classes" | "class" => Some(SectionKind::Class),
		"abstract types" | "abstract type" => Some(SectionKind::AbstractType),
		"enumerations" | "enumeration" => Some(SectionKind::Enum),
		"properties" | "property" => Some(SectionKind::Property),
		"methods" | "method" => Some(SectionKind::Method),
		"namespaces" | "namespace" => Some(SectionKind::Namespace),
		"constructors" | "constructor" => Some(SectionKind::Constructor),
		_ => None,
	}
}

/// Whether a section kind is meaningful on the given page kind. Class
/// listings only appear on namespace pages; constructors only on class
/// pages.
pub fn accepted_on(kind: SectionKind, page: &PageKind) -> bool {
	match page {
		PageKind::Namespace => matches!(
			kind,
			SectionKind::Class
				| SectionKind::AbstractType
				| SectionKind::Enum
				| SectionKind::Property
				| SectionKind::Method
				| SectionKind::Namespace
		),
		PageKind::Class => matches!(
			kind,
			SectionKind::Constructor
				| SectionKind::Enum
				| SectionKind::Property
				| SectionKind::Method
				| SectionKind::Namespace
		),
		PageKind::Other(_) => false,
	}
}
