//! Page fetching.
//!
//! The crawl does not care where page text comes from: the network, a
//! disk cache, or a test fixture. Everything behind [`PageFetcher`] is
//! interchangeable. HTTP error statuses are part of the outcome — only
//! transport-level failures are errors.

pub mod cache;

use std::io::Read;

use crate::error::{Result, ScrapeError};

pub use self::cache::{CacheConfig, CachingFetcher};

/// The result of fetching one URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchOutcome {
	/// HTTP status code (0 for cached transport failures).
	pub status: u16,
	/// Page text, present only on success.
	pub body: Option<String>,
}

impl FetchOutcome {
	/// Whether the fetch produced usable page text.
	pub fn is_success(&self) -> bool {
		(200..300).contains(&self.status) && self.body.is_some()
	}
}

/// Supplies page text for URLs.
pub trait PageFetcher {
	/// Fetch one URL. `Err` is reserved for transport/environment
	/// failures; an HTTP error status is an `Ok` outcome without a body.
	fn fetch(&mut self, url: &str) -> Result<FetchOutcome>;
}

/// Blocking HTTP fetcher.
#[derive(Debug, Default)]
pub struct HttpFetcher;

impl HttpFetcher {
	/// Create a fetcher with default settings.
	pub fn new() -> Self {
		Self
	}
}

impl PageFetcher for HttpFetcher {
	fn fetch(&mut self, url: &str) -> Result<FetchOutcome> {
		let mut response = match ureq::get(url).call() {
			Ok(response) => response,
			Err(ureq::Error::StatusCode(code)) => {
				return Ok(FetchOutcome {
					status: code,
					body: None,
				});
			}
			Err(err) => {
				return Err(ScrapeError::Http(format!("failed to fetch '{url}': {err}")));
			}
		};

		let status = response.status().as_u16();
		let mut body = String::new();
		response
			.body_mut()
			.as_reader()
			.read_to_string(&mut body)
			.map_err(|err| ScrapeError::Http(format!("failed to read '{url}': {err}")))?;

		Ok(FetchOutcome {
			status,
			body: Some(body),
		})
	}
}
