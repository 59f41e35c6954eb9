//! CLI entrypoint.

use std::collections::HashSet;
use std::error::Error;
use std::fs;
use std::io::IsTerminal;
use std::path::PathBuf;
use std::process;

use clap::Parser;
use dtscrape::fetch::{CacheConfig, CachingFetcher, FetchOutcome, HttpFetcher};
use dtscrape::model::types::{TypeId, TypeRegistry};
use dtscrape::model::{Member, Statement};
use dtscrape::observe::{Anomaly, ScrapeObserver};
use dtscrape::render::Renderer;
use dtscrape::scrape::Scraper;
use owo_colors::OwoColorize;

#[derive(Parser)]
#[command(
	name = "dtscrape",
	version,
	about = "Generate TypeScript declaration files from JSDoc-style API reference sites"
)]
struct Cli {
	/// Root URL of the symbol index page
	url: String,

	/// Output file for the generated declarations ('-' for stdout)
	#[arg(short, long, default_value = "api.d.ts")]
	output: String,

	/// Do not read or write the page cache
	#[arg(long, default_value_t = false)]
	no_cache: bool,

	/// Custom directory for cached pages
	#[arg(long, value_name = "DIR")]
	cache_dir: Option<PathBuf>,

	/// Omit documentation comments from the output
	#[arg(long, default_value_t = false)]
	no_docs: bool,

	/// Disable ANSI colors in CLI output
	#[arg(long, default_value_t = false)]
	no_color: bool,

	/// Only print warnings and the final summary
	#[arg(short, long, default_value_t = false)]
	quiet: bool,
}

fn should_color_output(cli: &Cli) -> bool {
	if cli.no_color {
		return false;
	}
	if std::env::var_os("NO_COLOR").is_some() {
		return false;
	}
	if std::env::var("TERM").ok().as_deref() == Some("dumb") {
		return false;
	}
	std::io::stdout().is_terminal()
}

/// Observer that narrates the crawl on the console.
struct ConsoleObserver {
	colors: bool,
	quiet: bool,
	unknown_seen: HashSet<String>,
}

impl ConsoleObserver {
	fn new(colors: bool, quiet: bool) -> Self {
		Self {
			colors,
			quiet,
			unknown_seen: HashSet::new(),
		}
	}
}

impl ScrapeObserver for ConsoleObserver {
	fn fetch_started(&mut self, url: &str) {
		if !self.quiet {
			println!("Fetching {url}");
		}
	}

	fn fetch_finished(&mut self, url: &str, outcome: &FetchOutcome) {
		if !self.quiet {
			println!("Fetched {} {url}", outcome.status);
		}
	}

	fn module_started(&mut self, name: &str) {
		if !self.quiet {
			println!("module {name} {{");
		}
	}

	fn module_finished(&mut self, _name: &str) {
		if !self.quiet {
			println!("}}");
		}
	}

	fn type_started(&mut self, name: &str) {
		if !self.quiet {
			println!("    type {name} {{");
		}
	}

	fn type_finished(&mut self, _name: &str) {
		if !self.quiet {
			println!("    }}");
		}
	}

	fn member_produced(&mut self, _type_name: &str, member: &Member) {
		if !self.quiet {
			println!("        {}", member.name());
		}
	}

	fn statement_produced(&mut self, _module: &str, statement: &Statement) {
		if !self.quiet {
			println!("    {}", statement.name());
		}
	}

	fn type_resolving(
		&mut self,
		_registry: &mut TypeRegistry,
		name: &str,
		resolved: Option<TypeId>,
	) -> Option<TypeId> {
		if resolved.is_none() && self.unknown_seen.insert(name.to_string()) {
			if self.colors {
				eprintln!("{}", format!("Unknown type: {name}").red());
			} else {
				eprintln!("Unknown type: {name}");
			}
		}
		None
	}

	fn anomaly(&mut self, anomaly: &Anomaly) {
		let message = format!(
			"Anomaly ({:?}) on {}: {}",
			anomaly.kind, anomaly.page, anomaly.detail
		);
		if self.colors {
			eprintln!("{}", message.yellow());
		} else {
			eprintln!("{message}");
		}
	}
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
	let colors = should_color_output(&cli);
	let mut observer = ConsoleObserver::new(colors, cli.quiet);

	let mut cache_config = if cli.no_cache {
		CacheConfig::disabled()
	} else {
		CacheConfig::new()
	};
	if let Some(dir) = cli.cache_dir.clone() {
		cache_config = cache_config.with_cache_dir(dir);
	}
	let fetcher = CachingFetcher::new(HttpFetcher::new(), cache_config);

	let crawl = Scraper::new(fetcher, &mut observer).crawl(&cli.url)?;

	let unresolved = crawl.unresolved_types();
	if !unresolved.is_empty() {
		println!("Unresolved types:");
		for entry in &unresolved {
			let status = if entry.reconciled {
				"declared later"
			} else {
				"never declared"
			};
			if colors {
				let status = if entry.reconciled {
					status.green().to_string()
				} else {
					status.red().to_string()
				};
				println!("    {}: {status}", entry.name);
			} else {
				println!("    {}: {status}", entry.name);
			}
		}
	}
	if !crawl.report.fetch_failures.is_empty() {
		println!("Skipped {} unreachable page(s):", crawl.report.fetch_failures.len());
		for failure in &crawl.report.fetch_failures {
			println!("    {} ({})", failure.url, failure.detail);
		}
	}
	if !crawl.report.anomalies.is_empty() {
		println!(
			"{} layout anomalie(s) recorded; see warnings above",
			crawl.report.anomalies.len()
		);
	}

	let rendered = Renderer::new()
		.with_docs(!cli.no_docs)
		.render(&crawl.graph, &crawl.registry);

	if cli.output == "-" {
		print!("{rendered}");
	} else {
		fs::write(&cli.output, &rendered)?;
		if !cli.quiet {
			println!("Wrote {}", cli.output);
		}
	}

	Ok(())
}

fn main() {
	let cli = Cli::parse();

	if let Err(e) = run(cli) {
		eprintln!("{e}");
		process::exit(1);
	}
}
