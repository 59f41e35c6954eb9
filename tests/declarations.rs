//! End-to-end scenarios: crawled fixture pages rendered as declaration
//! text.
mod utils;

use dtscrape::observe::NullObserver;
use dtscrape::render::Renderer;
use dtscrape::scrape::Scraper;
use pretty_assertions::assert_eq;
use utils::*;

fn crawl_and_render(fetcher: FixtureFetcher) -> String {
	let mut observer = NullObserver;
	let crawl = Scraper::new(fetcher, &mut observer).crawl(ROOT).unwrap();
	Renderer::new().render(&crawl.graph, &crawl.registry)
}

#[test]
fn namespace_page_renders_in_source_order() {
	let namespace = symbol_page(
		"Namespace",
		"M",
		None,
		"<h2>Enumerations</h2>\
		 <div><h3 class=\"symbol-name\">E</h3>\
		 <section><table><tbody>\
		 <tr><td>A</td></tr>\
		 <tr><td>B</td></tr>\
		 </tbody></table></section></div>\
		 <h2>Properties</h2>\
		 <div><h3 class=\"symbol-name\">p</h3>\
		 <span class=\"type-signature\">number</span></div>",
	);
	let fetcher = FixtureFetcher::new()
		.page("index.html", index_page(&["M.html"]))
		.page("M.html", namespace);

	let rendered = crawl_and_render(fetcher);
	assert_eq!(
		rendered,
		"declare namespace M {\n\
		 \x20   enum E {\n\
		 \x20       A,\n\
		 \x20       B,\n\
		 \x20   }\n\
		 \x20   var p: number;\n\
		 }\n"
	);
}

#[test]
fn empty_enum_signature_means_a_plain_enumeration() {
	let namespace = symbol_page(
		"Namespace",
		"m",
		None,
		"<h2>Enumerations</h2>\
		 <div><h3 class=\"symbol-name\">Direction</h3>\
		 <span class=\"type-signature\"></span>\
		 <section><table><tbody>\
		 <tr><td>NORTH</td><td>Up on the map.</td></tr>\
		 <tr><td>SOUTH</td></tr>\
		 </tbody></table></section></div>",
	);
	let fetcher = FixtureFetcher::new()
		.page("index.html", index_page(&["m.html"]))
		.page("m.html", namespace);

	let rendered = crawl_and_render(fetcher);
	assert!(rendered.contains("enum Direction {"));
	let north = rendered.find("NORTH").unwrap();
	let south = rendered.find("SOUTH").unwrap();
	assert!(north < south, "row order must be preserved");
	assert!(!rendered.contains("static"), "no typed-constant class expected");
}

#[test]
fn typed_constant_groups_become_static_field_classes() {
	let namespace = symbol_page(
		"Namespace",
		"m",
		None,
		"<h2>Enumerations</h2>\
		 <div><h3 class=\"symbol-name\">Color</h3>\
		 <span class=\"type-signature\">string</span>\
		 <section><table><tbody>\
		 <tr><td>RED</td><td>Red.</td></tr>\
		 <tr><td>BLUE</td><td>Blue.</td></tr>\
		 </tbody></table></section></div>",
	);
	let fetcher = FixtureFetcher::new()
		.page("index.html", index_page(&["m.html"]))
		.page("m.html", namespace);

	let rendered = crawl_and_render(fetcher);
	assert!(rendered.contains("class Color {"));
	assert!(rendered.contains("static RED: string;"));
	assert!(rendered.contains("static BLUE: string;"));
	assert!(!rendered.contains("enum Color"));
}

#[test]
fn missing_property_type_renders_optional_any() {
	let class = symbol_page(
		"Class",
		"m.Widget",
		None,
		"<h2>Properties</h2>\
		 <div><h3 class=\"symbol-name\">payload</h3></div>",
	);
	let fetcher = FixtureFetcher::new()
		.page("index.html", index_page(&["m.Widget.html"]))
		.page("m.Widget.html", class);

	let rendered = crawl_and_render(fetcher);
	assert!(
		rendered.contains("payload?: any;"),
		"missing type text should fall back to optional any:\n{rendered}"
	);
}

#[test]
fn explicit_types_are_never_widened_to_any() {
	let class = symbol_page(
		"Class",
		"m.Widget",
		None,
		"<h2>Properties</h2>\
		 <div><h3 class=\"symbol-name\">count</h3>\
		 <span class=\"type-signature\">number</span></div>",
	);
	let fetcher = FixtureFetcher::new()
		.page("index.html", index_page(&["m.Widget.html"]))
		.page("m.Widget.html", class);

	let rendered = crawl_and_render(fetcher);
	assert!(rendered.contains("count: number;"));
	assert!(!rendered.contains("count: any"));
}

#[test]
fn callables_render_parameters_returns_and_docs() {
	let class = symbol_page(
		"Class",
		"m.Session",
		Some("A session."),
		"<h2>Constructor</h2>\
		 <div><h3 class=\"symbol-name\">Session</h3>\
		 <p>Creates a session.</p>\
		 <section><table><tbody>\
		 <tr><td>id</td>\
		 <td><p class=\"details-table-types\">string</p><p>Session id.</p></td></tr>\
		 </tbody></table></section></div>\
		 <h2>Methods</h2>\
		 <div><h3 class=\"symbol-name\">stop</h3>\
		 <p>Stops the session.</p>\
		 <dl><dd><p><code>boolean</code> Whether anything was stopped.</p></dd></dl>\
		 <section><table><tbody>\
		 <tr><td>force</td>\
		 <td><p class=\"details-table-types\">boolean|null</p>\
		 <p>Force it.</p><p>May be omitted.</p></td></tr>\
		 </tbody></table></section></div>\
		 <div><h3 class=\"symbol-name\">ping</h3></div>",
	);
	let fetcher = FixtureFetcher::new()
		.page("index.html", index_page(&["m.Session.html"]))
		.page("m.Session.html", class);

	let rendered = crawl_and_render(fetcher);
	assert!(rendered.contains("constructor(id: string);"));
	assert!(rendered.contains("stop(force?: boolean): boolean;"));
	assert!(
		rendered.contains("@param force Force it. May be omitted."),
		"multi-paragraph parameter docs join with single spaces:\n{rendered}"
	);
	assert!(rendered.contains("@return Whether anything was stopped."));
	assert!(rendered.contains("ping(): void;"), "absent return type renders void");
}

#[test]
fn module_functions_and_constants_render_at_module_level() {
	let namespace = symbol_page(
		"Namespace",
		"m",
		Some("Top namespace."),
		"<h2>Properties</h2>\
		 <div><h3 class=\"symbol-name\">VERSION</h3>\
		 <span class=\"type-signature\">string</span>\
		 <div><span class=\"label label-constant\">constant</span></div>\
		 <p>Release version.</p></div>\
		 <h2>Methods</h2>\
		 <div><h3 class=\"symbol-name\">initialize</h3>\
		 <p>Starts everything.</p></div>",
	);
	let fetcher = FixtureFetcher::new()
		.page("index.html", index_page(&["m.html"]))
		.page("m.html", namespace);

	let rendered = crawl_and_render(fetcher);
	assert!(rendered.contains("const VERSION: string;"));
	assert!(rendered.contains("function initialize(): void;"));
	assert!(rendered.contains("Top namespace."));
}

#[test]
fn cross_namespace_references_render_fully_qualified() {
	let media = symbol_page(
		"Namespace",
		"chrome.cast.media",
		None,
		"<h2>Classes</h2>\
		 <div><h3 class=\"symbol-name\">chrome.cast.media.Track</h3></div>",
	);
	let class = symbol_page(
		"Class",
		"chrome.cast.Session",
		None,
		"<h2>Properties</h2>\
		 <div><h3 class=\"symbol-name\">track</h3>\
		 <span class=\"type-signature\">chrome.cast.media.Track</span></div>\
		 <div><h3 class=\"symbol-name\">twin</h3>\
		 <span class=\"type-signature\">chrome.cast.Session</span></div>",
	);
	let fetcher = FixtureFetcher::new()
		.page(
			"index.html",
			index_page(&["chrome.cast.media.html", "chrome.cast.Session.html"]),
		)
		.page("chrome.cast.media.html", media)
		.page("chrome.cast.Session.html", class);

	let rendered = crawl_and_render(fetcher);
	assert!(
		rendered.contains("track: media.Track;"),
		"references into nested namespaces drop the shared prefix:\n{rendered}"
	);
	assert!(
		rendered.contains("twin: Session;"),
		"references within the namespace are shortened:\n{rendered}"
	);
}

#[test]
fn array_and_union_types_render_with_their_syntax() {
	let class = symbol_page(
		"Class",
		"m.Widget",
		None,
		"<h2>Properties</h2>\
		 <div><h3 class=\"symbol-name\">tags</h3>\
		 <span class=\"type-signature\">string[]</span></div>\
		 <div><h3 class=\"symbol-name\">id</h3>\
		 <span class=\"type-signature\">string|number</span></div>",
	);
	let fetcher = FixtureFetcher::new()
		.page("index.html", index_page(&["m.Widget.html"]))
		.page("m.Widget.html", class);

	let rendered = crawl_and_render(fetcher);
	assert!(rendered.contains("tags: string[];"));
	assert!(rendered.contains("id: string | number;"));
}

#[test]
fn abstract_type_sections_flag_the_class() {
	let namespace = symbol_page(
		"Namespace",
		"m",
		None,
		"<h2>Abstract Types</h2>\
		 <div><h3 class=\"symbol-name\">m.Media</h3></div>\
		 <h2>Classes</h2>\
		 <div><h3 class=\"symbol-name\">m.Player</h3></div>",
	);
	let fetcher = FixtureFetcher::new()
		.page("index.html", index_page(&["m.html"]))
		.page("m.html", namespace);

	let rendered = crawl_and_render(fetcher);
	assert!(rendered.contains("abstract class Media {"));
	assert!(rendered.contains("class Player {"));
	assert!(!rendered.contains("abstract class Player"));
}
