//! Crawl observability hooks.
//!
//! The scraping core stays silent: every notable moment of a crawl is
//! surfaced through [`ScrapeObserver`] instead of being printed or
//! logged in place. The CLI installs a console observer; tests install
//! recording ones; [`NullObserver`] ignores everything.

use crate::fetch::FetchOutcome;
use crate::model::types::{TypeId, TypeRegistry};
use crate::model::{Member, Statement};

/// Classification of a crawl anomaly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnomalyKind {
	/// The page's kind badge named something other than a namespace or
	/// class page.
	UnrecognizedPageKind,
	/// A section heading did not match any known section name.
	UnrecognizedSection,
	/// A symbol heading appeared under a section marker with no handler
	/// for this page kind.
	MemberDispatch,
	/// A page was missing required structure and was skipped.
	PageStructure,
}

/// A loud-but-nonfatal deviation from the expected page layout.
///
/// These mark documentation shapes the extractor does not handle yet;
/// they are collected and reported rather than silently swallowed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Anomaly {
	/// URL of the page where the anomaly occurred.
	pub page: String,
	/// What went wrong.
	pub kind: AnomalyKind,
	/// The offending text (heading, badge, message).
	pub detail: String,
}

/// Callbacks invoked while a crawl runs. All methods default to no-ops.
pub trait ScrapeObserver {
	/// A page fetch is about to start.
	fn fetch_started(&mut self, _url: &str) {}

	/// A page fetch finished (successfully or not).
	fn fetch_finished(&mut self, _url: &str, _outcome: &FetchOutcome) {}

	/// A namespace page is about to be parsed.
	fn module_started(&mut self, _name: &str) {}

	/// A namespace page finished parsing.
	fn module_finished(&mut self, _name: &str) {}

	/// A type (class or enum definition) is about to be parsed.
	fn type_started(&mut self, _name: &str) {}

	/// A type finished parsing.
	fn type_finished(&mut self, _name: &str) {}

	/// A member was extracted and attached to the named type.
	fn member_produced(&mut self, _type_name: &str, _member: &Member) {}

	/// A statement was extracted and attached to the named module.
	fn statement_produced(&mut self, _module: &str, _statement: &Statement) {}

	/// A dotted type name is being resolved. `resolved` is the registry's
	/// answer (`None` when the name is undeclared). Return `Some` to
	/// override the outcome; return `None` to accept it, in which case an
	/// undeclared name is interned as a placeholder and reported.
	fn type_resolving(
		&mut self,
		_registry: &mut TypeRegistry,
		_name: &str,
		_resolved: Option<TypeId>,
	) -> Option<TypeId> {
		None
	}

	/// An anomaly was recorded.
	fn anomaly(&mut self, _anomaly: &Anomaly) {}
}

/// An observer that ignores every notification.
#[derive(Debug, Default)]
pub struct NullObserver;

impl ScrapeObserver for NullObserver {}
