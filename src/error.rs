use std::fmt;

use serde_json::Error as SerdeError;

/// Aggregate errors produced by the dtscrape library.
#[derive(Debug)]
pub enum ScrapeError {
	/// Transport-level HTTP failure (DNS, TLS, connection). HTTP error
	/// statuses are not errors; they surface as failed fetch outcomes.
	Http(String),
	/// Failed to perform IO operations.
	Io(std::io::Error),
	/// Failed to read or write a page-cache entry.
	Cache(String),
	/// A page violated the structural assumptions of the extractor
	/// (e.g. no main content container). Fatal for that page only.
	Page(String),
	/// The root listing page could not be used to enumerate symbol pages.
	Listing(String),
	/// Failed to encode or decode JSON.
	Serialization(SerdeError),
}

impl fmt::Display for ScrapeError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Http(message) => write!(f, "{message}"),
			Self::Io(err) => write!(f, "{err}"),
			Self::Cache(message) => write!(f, "{message}"),
			Self::Page(message) => write!(f, "{message}"),
			Self::Listing(message) => write!(f, "{message}"),
			Self::Serialization(err) => write!(f, "{err}"),
		}
	}
}

impl std::error::Error for ScrapeError {
	fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
		match self {
			Self::Io(err) => Some(err),
			Self::Serialization(err) => Some(err),
			Self::Http(_) | Self::Cache(_) | Self::Page(_) | Self::Listing(_) => None,
		}
	}
}

impl From<std::io::Error> for ScrapeError {
	fn from(err: std::io::Error) -> Self {
		Self::Io(err)
	}
}

impl From<SerdeError> for ScrapeError {
	fn from(err: SerdeError) -> Self {
		Self::Serialization(err)
	}
}

/// Result type returned by the dtscrape library.
pub type Result<T> = std::result::Result<T, ScrapeError>;
