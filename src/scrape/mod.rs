//! The crawl driver and member extractors.
//!
//! One [`Scraper`] run fetches the root symbol index, visits every
//! linked page sequentially, and folds each page into the declaration
//! graph and type registry. Pages may reference types declared by later
//! pages; resolution goes through the registry's placeholder mechanism
//! and every fallback is recorded in the [`ScrapeReport`].

pub mod page;
pub mod sections;

use std::collections::HashSet;

use scraper::ElementRef;

use self::page::{PageHeader, PageKind};
use self::sections::SectionKind;
use crate::dom;
use crate::error::{Result, ScrapeError};
use crate::fetch::{FetchOutcome, PageFetcher};
use crate::model::graph::DeclarationGraph;
use crate::model::resolve::{ResolvedType, resolve_expression};
use crate::model::types::{TypeId, TypeRegistry};
use crate::model::{
	AccessModifier, ClassDeclaration, ConstructorDeclaration, Documentation, EnumDeclaration,
	EnumMember, FieldDeclaration, FunctionDeclaration, Member, MethodDeclaration,
	ParameterDeclaration, ParameterDocumentation, PropertyDeclaration, Statement,
	VariableDeclaration,
};
use crate::observe::{Anomaly, AnomalyKind, ScrapeObserver};

/// A URL whose fetch did not produce usable page text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchFailure {
	/// The page URL.
	pub url: String,
	/// Status code or transport error message.
	pub detail: String,
}

/// Everything a crawl wants to tell the caller besides the graph itself.
#[derive(Debug, Default)]
pub struct ScrapeReport {
	/// Pages that could not be fetched, in crawl order.
	pub fetch_failures: Vec<FetchFailure>,
	/// Layout deviations encountered while extracting.
	pub anomalies: Vec<Anomaly>,
	/// Type names that fell back to placeholders, deduplicated, in
	/// first-encounter order.
	pub unresolved: Vec<String>,
}

/// One entry of the end-of-run unresolved-type summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnresolvedType {
	/// The referenced name.
	pub name: String,
	/// Whether a declaration for the name turned up later in the crawl.
	pub reconciled: bool,
}

/// The result of a full crawl.
#[derive(Debug)]
pub struct Crawl {
	/// The assembled declaration tree.
	pub graph: DeclarationGraph,
	/// The type registry the graph's type handles point into.
	pub registry: TypeRegistry,
	/// Failures, anomalies and placeholder fallbacks.
	pub report: ScrapeReport,
}

impl Crawl {
	/// The unresolved-type summary: every name that needed a placeholder,
	/// and whether it was reconciled against a declaration by crawl end.
	pub fn unresolved_types(&self) -> Vec<UnresolvedType> {
		self.report
			.unresolved
			.iter()
			.map(|name| UnresolvedType {
				name: name.clone(),
				reconciled: self
					.registry
					.lookup(name)
					.map(|id| !self.registry.is_unknown(id))
					.unwrap_or(false),
			})
			.collect()
	}
}

/// Crawls a documentation site into a declaration graph.
pub struct Scraper<'a, F> {
	fetcher: F,
	observer: &'a mut dyn ScrapeObserver,
	graph: DeclarationGraph,
	registry: TypeRegistry,
	report: ScrapeReport,
}

fn qualify(module_path: &str, symbol: &str) -> String {
	if symbol.contains('.') || module_path.is_empty() {
		symbol.to_string()
	} else {
		format!("{module_path}.{symbol}")
	}
}

fn short_name(symbol: &str) -> &str {
	symbol.rsplit('.').next().unwrap_or(symbol)
}

fn resolve_href(base: &str, href: &str) -> String {
	if href.contains("://") {
		return href.to_string();
	}
	let path_start = base
		.find("://")
		.map(|scheme_end| scheme_end + 3)
		.and_then(|host_start| base[host_start..].find('/').map(|i| host_start + i));
	if let Some(rest) = href.strip_prefix('/') {
		let origin = match path_start {
			Some(i) => &base[..i],
			None => base,
		};
		return format!("{origin}/{rest}");
	}
	let dir_end = base.rfind('/').filter(|&i| match (base.contains("://"), path_start) {
		(true, Some(p)) => i >= p,
		(true, None) => false,
		(false, _) => true,
	});
	match dir_end {
		Some(i) => format!("{}/{href}", &base[..i]),
		None => format!("{base}/{href}"),
	}
}

impl<'a, F: PageFetcher> Scraper<'a, F> {
	/// Create a scraper over a fetcher, reporting to `observer`.
	pub fn new(fetcher: F, observer: &'a mut dyn ScrapeObserver) -> Self {
		Self {
			fetcher,
			observer,
			graph: DeclarationGraph::new(),
			registry: TypeRegistry::new(),
			report: ScrapeReport::default(),
		}
	}

	/// Crawl the site rooted at the given symbol index page.
	///
	/// Only transport failures on the root listing abort the run; every
	/// per-page problem degrades into a report entry.
	pub fn crawl(mut self, root_url: &str) -> Result<Crawl> {
		let urls = self.page_urls(root_url)?;

		for url in urls {
			match self.fetch(&url) {
				Ok(outcome) => {
					let success = outcome.is_success();
					match outcome.body {
						Some(body) if success => self.process_page(&url, &body),
						_ => self.report.fetch_failures.push(FetchFailure {
							url,
							detail: format!("status {}", outcome.status),
						}),
					}
				}
				Err(err) => self.report.fetch_failures.push(FetchFailure {
					url,
					detail: err.to_string(),
				}),
			}
		}

		Ok(Crawl {
			graph: self.graph,
			registry: self.registry,
			report: self.report,
		})
	}

	fn fetch(&mut self, url: &str) -> Result<FetchOutcome> {
		self.observer.fetch_started(url);
		let outcome = self.fetcher.fetch(url)?;
		self.observer.fetch_finished(url, &outcome);
		Ok(outcome)
	}

	/// Extract the per-symbol page URLs from the root listing, resolved
	/// against it, fragment-stripped, deduplicated in listing order.
	fn page_urls(&mut self, root_url: &str) -> Result<Vec<String>> {
		let outcome = self.fetch(root_url)?;
		let success = outcome.is_success();
		let body = match outcome.body {
			Some(body) if success => body,
			_ => {
				return Err(ScrapeError::Listing(format!(
					"root listing '{root_url}' returned status {}",
					outcome.status
				)));
			}
		};

		let document = dom::parse(&body);
		let mut seen = HashSet::new();
		let mut urls = Vec::new();
		for link in document.select(&dom::INDEX_LINKS) {
			let href = match link.value().attr("href") {
				Some(href) => href,
				None => continue,
			};
			let page = href.split('#').next().unwrap_or("");
			if page.is_empty() {
				continue;
			}
			let resolved = resolve_href(root_url, page);
			if seen.insert(resolved.clone()) {
				urls.push(resolved);
			}
		}

		if urls.is_empty() {
			return Err(ScrapeError::Listing(format!(
				"root listing '{root_url}' contains no symbol links"
			)));
		}
		Ok(urls)
	}

	fn record_anomaly(&mut self, url: &str, kind: AnomalyKind, detail: String) {
		let anomaly = Anomaly {
			page: url.to_string(),
			kind,
			detail,
		};
		self.observer.anomaly(&anomaly);
		self.report.anomalies.push(anomaly);
	}

	fn process_page(&mut self, url: &str, body: &str) {
		let document = dom::parse(body);
		let header = match page::classify(&document) {
			Ok(header) => header,
			Err(err) => {
				self.record_anomaly(url, AnomalyKind::PageStructure, err.to_string());
				return;
			}
		};
		let main = match dom::main_content(&document) {
			Some(main) => main,
			None => return,
		};
		match header.kind {
			PageKind::Namespace => self.parse_namespace_page(url, &header, main),
			PageKind::Class => self.parse_class_page(url, &header, main),
			PageKind::Other(ref badge) => {
				self.record_anomaly(url, AnomalyKind::UnrecognizedPageKind, badge.clone());
			}
		}
	}

	/// Resolve a raw type expression. Leaf names go: registry lookup,
	/// then observer override, then placeholder substitution recorded in
	/// the report.
	fn resolve_type(&mut self, text: Option<&str>) -> ResolvedType {
		let observer = &mut self.observer;
		let unresolved = &mut self.report.unresolved;
		let mut leaf = |registry: &mut TypeRegistry, name: &str| -> TypeId {
			let known = registry.lookup(name);
			if let Some(id) = observer.type_resolving(registry, name, known) {
				return id;
			}
			match known {
				Some(id) => id,
				None => {
					if !unresolved.iter().any(|n| n == name) {
						unresolved.push(name.to_string());
					}
					registry.ensure_unknown(name)
				}
			}
		};
		resolve_expression(&mut self.registry, text, &mut leaf)
	}

	fn section_marker(&mut self, url: &str, page_kind: &PageKind, text: &str) -> SectionKind {
		match sections::classify_heading(text) {
			Some(kind) if sections::accepted_on(kind, page_kind) => kind,
			_ => {
				self.record_anomaly(url, AnomalyKind::UnrecognizedSection, text.to_string());
				SectionKind::None
			}
		}
	}

	fn parse_namespace_page(&mut self, url: &str, header: &PageHeader, main: ElementRef<'_>) {
		let module_path = header.full_name.clone();
		if let Some(module) = self.graph.get_or_create_module(&module_path) {
			if module.documentation.is_none() {
				if let Some(description) = &header.description {
					module.documentation = Some(Documentation::summary(description.clone()));
				}
			}
		}

		self.observer.module_started(&module_path);

		let mut marker = SectionKind::None;
		for heading in main.select(&dom::HEADINGS) {
			if heading.value().name() == "h2" {
				marker = self.section_marker(url, &PageKind::Namespace, &dom::inner_text(heading));
				continue;
			}
			let symbol = match dom::inner_text_opt(heading) {
				Some(symbol) => symbol,
				None => continue,
			};
			let fragment = match dom::parent_element(heading) {
				Some(fragment) => fragment,
				None => continue,
			};
			match marker {
				SectionKind::Class | SectionKind::AbstractType => {
					self.declare_class_stub(
						&module_path,
						&symbol,
						marker == SectionKind::AbstractType,
					);
				}
				SectionKind::Enum => self.extract_enum(&module_path, fragment, &symbol),
				SectionKind::Property => {
					self.extract_module_variable(&module_path, fragment, &symbol);
				}
				SectionKind::Method => {
					self.extract_module_function(&module_path, fragment, &symbol);
				}
				SectionKind::None | SectionKind::Namespace | SectionKind::Constructor => {
					self.record_anomaly(
						url,
						AnomalyKind::MemberDispatch,
						format!("symbol '{symbol}' under unhandled section"),
					);
				}
			}
		}

		self.observer.module_finished(&module_path);
	}

	fn parse_class_page(&mut self, url: &str, header: &PageHeader, main: ElementRef<'_>) {
		let full_name = header.full_name.clone();

		if self.graph.find_class_mut(&full_name).is_none() {
			let (module_path, name) = match full_name.rsplit_once('.') {
				Some((module_path, name)) => (module_path, name),
				None => ("", full_name.as_str()),
			};
			self.registry.declare_class(&full_name);
			let statement = Statement::Class(ClassDeclaration::stub(name, false));
			self.observer.statement_produced(module_path, &statement);
			self.graph.add_statement(module_path, statement);
		}

		if let Some(description) = &header.description {
			if let Some(class) = self.graph.find_class_mut(&full_name) {
				if class.documentation.is_none() {
					class.documentation = Some(Documentation::summary(description.clone()));
				}
			}
		}

		self.observer.type_started(&full_name);

		let mut marker = SectionKind::None;
		for heading in main.select(&dom::HEADINGS) {
			if heading.value().name() == "h2" {
				marker = self.section_marker(url, &PageKind::Class, &dom::inner_text(heading));
				continue;
			}
			let symbol = match dom::inner_text_opt(heading) {
				Some(symbol) => symbol,
				None => continue,
			};
			let fragment = match dom::parent_element(heading) {
				Some(fragment) => fragment,
				None => continue,
			};
			match marker {
				SectionKind::Constructor => {
					let (parameters, _, documentation) = self.extract_callable(fragment);
					self.attach_member(
						&full_name,
						Member::Constructor(ConstructorDeclaration {
							parameters,
							documentation,
						}),
					);
				}
				SectionKind::Property => {
					let resolved = self.resolve_type(dom::type_signature(fragment).as_deref());
					self.attach_member(
						&full_name,
						Member::Property(PropertyDeclaration {
							name: symbol.clone(),
							property_type: resolved.id,
							is_required: resolved.required,
							documentation: dom::description_paragraph(fragment)
								.map(Documentation::summary)
								.unwrap_or_default(),
						}),
					);
				}
				SectionKind::Method => {
					let (parameters, return_type, documentation) =
						self.extract_callable(fragment);
					self.attach_member(
						&full_name,
						Member::Method(MethodDeclaration {
							name: symbol.clone(),
							parameters,
							return_type,
							documentation,
						}),
					);
				}
				SectionKind::None
				| SectionKind::Class
				| SectionKind::AbstractType
				| SectionKind::Enum
				| SectionKind::Namespace => {
					self.record_anomaly(
						url,
						AnomalyKind::MemberDispatch,
						format!("symbol '{symbol}' under unhandled section"),
					);
				}
			}
		}

		self.observer.type_finished(&full_name);
	}

	fn attach_member(&mut self, full_name: &str, member: Member) {
		self.observer.member_produced(full_name, &member);
		self.graph.add_member(full_name, member);
	}

	fn declare_class_stub(&mut self, module_path: &str, symbol: &str, is_abstract: bool) {
		let full_name = qualify(module_path, symbol);
		if self.registry.is_declared(&full_name) {
			return;
		}
		self.registry.declare_class(&full_name);
		let statement = Statement::Class(ClassDeclaration::stub(short_name(symbol), is_abstract));
		self.observer.statement_produced(module_path, &statement);
		self.graph.add_statement(module_path, statement);
	}

	/// An enum fragment either defines a numeric enumeration or, when its
	/// signature names a non-numeric type, a group of typed constants
	/// modeled as a class of public static fields. Decided once here.
	fn extract_enum(&mut self, module_path: &str, fragment: ElementRef<'_>, symbol: &str) {
		let full_name = qualify(module_path, symbol);
		let name = short_name(symbol).to_string();
		let signature = dom::type_signature(fragment);
		let description = dom::description_paragraph(fragment);
		let rows = definition_rows(fragment);

		self.observer.type_started(&full_name);

		let statement = match signature.as_deref() {
			None | Some("number") => {
				self.registry.declare_enum(&full_name);
				Statement::Enum(EnumDeclaration {
					name,
					is_export: true,
					documentation: description.map(Documentation::summary),
					members: rows
						.into_iter()
						.map(|(name, doc)| EnumMember {
							name,
							documentation: doc.map(Documentation::summary),
						})
						.collect(),
				})
			}
			Some(type_text) => {
				let resolved = self.resolve_type(Some(type_text));
				self.registry.declare_class(&full_name);
				Statement::Class(ClassDeclaration {
					name,
					is_export: true,
					is_abstract: false,
					documentation: description.map(Documentation::summary),
					members: rows
						.into_iter()
						.map(|(name, doc)| {
							Member::Field(FieldDeclaration {
								name,
								field_type: resolved.id,
								access_modifier: AccessModifier::Public,
								is_static: true,
								documentation: doc
									.map(Documentation::summary)
									.unwrap_or_default(),
							})
						})
						.collect(),
				})
			}
		};

		self.observer.statement_produced(module_path, &statement);
		self.graph.add_statement(module_path, statement);
		self.observer.type_finished(&full_name);
	}

	fn extract_module_variable(&mut self, module_path: &str, fragment: ElementRef<'_>, symbol: &str) {
		let resolved = self.resolve_type(dom::type_signature(fragment).as_deref());
		let statement = Statement::Variable(VariableDeclaration {
			name: symbol.to_string(),
			variable_type: resolved.id,
			is_constant: dom::has_constant_badge(fragment),
			documentation: dom::description_paragraph(fragment).map(Documentation::summary),
		});
		self.observer.statement_produced(module_path, &statement);
		self.graph.add_statement(module_path, statement);
	}

	fn extract_module_function(&mut self, module_path: &str, fragment: ElementRef<'_>, symbol: &str) {
		let (parameters, return_type, documentation) = self.extract_callable(fragment);
		let statement = Statement::Function(FunctionDeclaration {
			name: symbol.to_string(),
			parameters,
			return_type,
			documentation,
		});
		self.observer.statement_produced(module_path, &statement);
		self.graph.add_statement(module_path, statement);
	}

	/// Shared extraction for methods, constructors and module functions:
	/// summary paragraph, optional return block, parameter table.
	fn extract_callable(
		&mut self,
		fragment: ElementRef<'_>,
	) -> (Vec<ParameterDeclaration>, Option<TypeId>, Documentation) {
		let mut documentation = Documentation {
			summary: dom::description_paragraph(fragment),
			..Documentation::default()
		};

		let mut return_type = None;
		let return_block = dom::child_by_tag(fragment, "dl")
			.and_then(|dl| dom::child_by_tag(dl, "dd"))
			.and_then(|dd| dom::child_by_tag(dd, "p"));
		if let Some(block) = return_block {
			if let Some(code) = dom::select_first(block, &dom::CODE) {
				let resolved = self.resolve_type(Some(&dom::inner_text(code)));
				return_type = Some(resolved.id);
			}
			documentation.returns = dom::own_text(block);
		}

		let mut parameters = Vec::new();
		for row in fragment.select(&dom::TABLE_ROWS) {
			let mut cells = dom::child_elements(row).filter(|c| c.value().name() == "td");
			let name = match cells.next().and_then(dom::inner_text_opt) {
				Some(name) => name,
				None => continue,
			};
			let detail_cell = cells.next();

			let type_text = detail_cell
				.and_then(|cell| dom::child_with_class(cell, "details-table-types"))
				.and_then(dom::inner_text_opt);
			let resolved = self.resolve_type(type_text.as_deref());
			parameters.push(ParameterDeclaration {
				name: name.clone(),
				parameter_type: resolved.id,
				is_required: !resolved.nullable,
			});

			let description = detail_cell
				.map(|cell| {
					dom::plain_paragraphs(cell)
						.map(dom::inner_text)
						.filter(|text| !text.is_empty())
						.collect::<Vec<_>>()
						.join(" ")
				})
				.filter(|text| !text.is_empty());
			documentation.parameters.push(ParameterDocumentation {
				parameter_name: name,
				description,
			});
		}

		(parameters, return_type, documentation)
	}
}

/// Two-column definition table rows: (name, optional description).
fn definition_rows(fragment: ElementRef<'_>) -> Vec<(String, Option<String>)> {
	let mut rows = Vec::new();
	for row in fragment.select(&dom::TABLE_ROWS) {
		let mut cells = dom::child_elements(row).filter(|c| c.value().name() == "td");
		let name = match cells.next().and_then(dom::inner_text_opt) {
			Some(name) => name,
			None => continue,
		};
		let doc = cells.next().and_then(dom::inner_text_opt);
		rows.push((name, doc));
	}
	rows
}
