//! Shared fixtures for integration tests: an in-memory fetcher and
//! builders for the documentation page shapes the extractor understands.
#![allow(dead_code)]

use std::collections::HashMap;

use dtscrape::fetch::{FetchOutcome, PageFetcher};
use dtscrape::model::{Member, Statement};
use dtscrape::observe::{Anomaly, AnomalyKind, ScrapeObserver};
use dtscrape::Result;

/// Root URL used by all fixtures.
pub const ROOT: &str = "https://docs.test/reference/index.html";

/// Serves pages from a map; unknown URLs 404.
pub struct FixtureFetcher {
	pages: HashMap<String, (u16, Option<String>)>,
	pub fetched: Vec<String>,
}

impl FixtureFetcher {
	pub fn new() -> Self {
		Self {
			pages: HashMap::new(),
			fetched: Vec::new(),
		}
	}

	/// Register a successful page under the fixture root.
	pub fn page(mut self, file: &str, html: impl Into<String>) -> Self {
		self.pages
			.insert(resolve(file), (200, Some(html.into())));
		self
	}

	/// Register a failing page under the fixture root.
	pub fn failure(mut self, file: &str, status: u16) -> Self {
		self.pages.insert(resolve(file), (status, None));
		self
	}
}

fn resolve(file: &str) -> String {
	if file.contains("://") {
		file.to_string()
	} else {
		format!("https://docs.test/reference/{file}")
	}
}

impl PageFetcher for FixtureFetcher {
	fn fetch(&mut self, url: &str) -> Result<FetchOutcome> {
		self.fetched.push(url.to_string());
		match self.pages.get(url) {
			Some((status, body)) => Ok(FetchOutcome {
				status: *status,
				body: body.clone(),
			}),
			None => Ok(FetchOutcome {
				status: 404,
				body: None,
			}),
		}
	}
}

/// A symbol index page linking to the given files.
pub fn index_page(files: &[&str]) -> String {
	let mut html = String::from("<html><body><div class=\"index\">");
	for file in files {
		html.push_str(&format!(
			"<a class=\"symbol-index-name\" href=\"{file}#overview\">{file}</a>"
		));
	}
	html.push_str("</div></body></html>");
	html
}

/// A symbol page shell: header with kind badge and optional blurb, body
/// inside the main section.
pub fn symbol_page(kind: &str, full_name: &str, description: Option<&str>, body: &str) -> String {
	let blurb = description
		.map(|text| format!("<p>{text}</p>"))
		.unwrap_or_default();
	format!(
		"<html><body><div id=\"jsdoc-main\">\
		 <header><h1>{full_name}</h1>\
		 <span class=\"label label-kind\">{kind}</span>{blurb}</header>\
		 <section>{body}</section></div></body></html>"
	)
}

/// Records observer notifications for assertions.
#[derive(Default)]
pub struct RecordingObserver {
	pub fetches: Vec<String>,
	pub statements: Vec<String>,
	pub members: Vec<String>,
	pub anomalies: Vec<(AnomalyKind, String)>,
}

impl ScrapeObserver for RecordingObserver {
	fn fetch_started(&mut self, url: &str) {
		self.fetches.push(url.to_string());
	}

	fn statement_produced(&mut self, module: &str, statement: &Statement) {
		self.statements.push(format!("{module}::{}", statement.name()));
	}

	fn member_produced(&mut self, type_name: &str, member: &Member) {
		self.members.push(format!("{type_name}::{}", member.name()));
	}

	fn anomaly(&mut self, anomaly: &Anomaly) {
		self.anomalies.push((anomaly.kind, anomaly.detail.clone()));
	}
}
