//! Disk cache for fetched pages.
//!
//! Reference pages change rarely and a crawl touches every one of them,
//! so responses are cached on disk keyed by URL hash. Failed fetches are
//! cached too: a page that 404s once will 404 next run, and re-asking
//! the server for it every time makes iterating on extraction painful.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::path::{Path, PathBuf};
use std::{env, fs};

use serde::{Deserialize, Serialize};

use super::{FetchOutcome, PageFetcher};
use crate::error::{Result, ScrapeError};

/// Configuration for the page cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
	/// Whether caching is enabled.
	pub enabled: bool,
	/// Directory where cached pages are stored.
	/// If None, uses the default cache directory.
	pub cache_dir: Option<PathBuf>,
}

impl Default for CacheConfig {
	fn default() -> Self {
		Self {
			enabled: true,
			cache_dir: None,
		}
	}
}

impl CacheConfig {
	/// Create a new cache configuration with caching enabled.
	pub fn new() -> Self {
		Self::default()
	}

	/// Disable caching.
	pub fn disabled() -> Self {
		Self {
			enabled: false,
			cache_dir: None,
		}
	}

	/// Set a custom cache directory.
	pub fn with_cache_dir(mut self, dir: PathBuf) -> Self {
		self.cache_dir = Some(dir);
		self
	}

	/// Get the cache directory, using the default if not specified.
	fn get_cache_dir(&self) -> Result<PathBuf> {
		if let Some(ref dir) = self.cache_dir {
			return Ok(dir.clone());
		}

		if let Ok(dir) = env::var("DTSCRAPE_CACHE_DIR") {
			return Ok(PathBuf::from(dir));
		}

		let cache_base = dirs::cache_dir()
			.ok_or_else(|| ScrapeError::Cache("Could not determine cache directory".to_string()))?;

		Ok(cache_base.join("dtscrape"))
	}
}

/// One cached fetch outcome, failures included.
#[derive(Debug, Serialize, Deserialize)]
struct CacheEntry {
	url: String,
	status: u16,
	body: Option<String>,
}

fn cache_key(url: &str) -> String {
	let mut hasher = DefaultHasher::new();
	url.hash(&mut hasher);
	format!("{:x}", hasher.finish())
}

fn cache_path(cache_dir: &Path, url: &str) -> PathBuf {
	cache_dir.join(format!("{}.json", cache_key(url)))
}

fn load_cached(config: &CacheConfig, url: &str) -> Result<Option<FetchOutcome>> {
	if !config.enabled {
		return Ok(None);
	}

	let cache_dir = config.get_cache_dir()?;
	let path = cache_path(&cache_dir, url);

	if !path.exists() {
		return Ok(None);
	}

	let data = fs::read_to_string(&path).map_err(|e| {
		ScrapeError::Cache(format!("Failed to read cache file {}: {}", path.display(), e))
	})?;

	match serde_json::from_str::<CacheEntry>(&data) {
		Ok(entry) => Ok(Some(FetchOutcome {
			status: entry.status,
			body: entry.body,
		})),
		Err(_) => {
			// Stale or corrupted entry; drop it and refetch.
			let _ = fs::remove_file(&path);
			Ok(None)
		}
	}
}

fn save_cached(config: &CacheConfig, url: &str, outcome: &FetchOutcome) -> Result<()> {
	if !config.enabled {
		return Ok(());
	}

	let cache_dir = config.get_cache_dir()?;

	fs::create_dir_all(&cache_dir).map_err(|e| {
		ScrapeError::Cache(format!(
			"Failed to create cache directory {}: {}",
			cache_dir.display(),
			e
		))
	})?;

	let path = cache_path(&cache_dir, url);
	let entry = CacheEntry {
		url: url.to_string(),
		status: outcome.status,
		body: outcome.body.clone(),
	};
	let data = serde_json::to_string(&entry)?;

	// Write to a temporary file first, then rename atomically.
	let temp_path = path.with_extension("tmp");
	fs::write(&temp_path, &data).map_err(|e| {
		ScrapeError::Cache(format!(
			"Failed to write cache file {}: {}",
			temp_path.display(),
			e
		))
	})?;

	fs::rename(&temp_path, &path).map_err(|e| {
		ScrapeError::Cache(format!(
			"Failed to finalize cache file {}: {}",
			path.display(),
			e
		))
	})?;

	Ok(())
}

/// Wraps any fetcher with the disk cache.
#[derive(Debug)]
pub struct CachingFetcher<F> {
	inner: F,
	config: CacheConfig,
}

impl<F: PageFetcher> CachingFetcher<F> {
	/// Wrap `inner` with the given cache configuration.
	pub fn new(inner: F, config: CacheConfig) -> Self {
		Self { inner, config }
	}
}

impl<F: PageFetcher> PageFetcher for CachingFetcher<F> {
	fn fetch(&mut self, url: &str) -> Result<FetchOutcome> {
		if let Some(outcome) = load_cached(&self.config, url)? {
			return Ok(outcome);
		}
		let outcome = self.inner.fetch(url)?;
		save_cached(&self.config, url, &outcome)?;
		Ok(outcome)
	}
}
