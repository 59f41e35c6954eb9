//! Parsing of free-text type expressions.
//!
//! Documentation pages spell types as loose text: `string`,
//! `chrome.cast.media.Track[]`, `number|null`, sometimes nothing at all.
//! [`resolve_expression`] turns such text into a [`ResolvedType`]:
//! a registry handle plus the nullability/required qualifiers implied by
//! the text. Leaf names are handed to a caller-supplied resolver, which
//! is where declared-type lookup, observer overrides, and placeholder
//! substitution happen — this function itself never invents a type.

use super::types::{Builtin, TypeId, TypeRegistry};

/// A resolved type expression: the node plus its textual qualifiers.
///
/// The qualifiers belong to the reference, not to the node: `string` and
/// `string|null` share one node but differ in `nullable`/`required`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedType {
	/// The underlying type node.
	pub id: TypeId,
	/// Whether the text allowed `null`/`undefined`.
	pub nullable: bool,
	/// Whether a value is required: false when the text was empty or
	/// nullable, true otherwise.
	pub required: bool,
}

/// Resolver callback for dotted leaf names. Receives the registry so it
/// can intern nodes; must always return a handle.
pub type LeafResolver<'a> = dyn FnMut(&mut TypeRegistry, &str) -> TypeId + 'a;

/// Resolve a raw type expression against the registry.
///
/// Empty or absent text resolves to `any` with `required = false`.
/// Handles `?` markers, `[]` suffixes and `|` unions; `null` and
/// `undefined` union members fold into the nullable flag instead of
/// becoming union members. Everything else is a dotted name passed to
/// `leaf`.
pub fn resolve_expression(
	registry: &mut TypeRegistry,
	text: Option<&str>,
	leaf: &mut LeafResolver<'_>,
) -> ResolvedType {
	let raw = text.map(str::trim).unwrap_or("");
	if raw.is_empty() {
		return ResolvedType {
			id: registry.builtin(Builtin::Any),
			nullable: false,
			required: false,
		};
	}

	let mut nullable = false;
	let mut body = raw;
	if let Some(rest) = body.strip_prefix('?') {
		body = rest.trim();
		nullable = true;
	}
	if let Some(rest) = body.strip_suffix('?') {
		body = rest.trim();
		nullable = true;
	}

	let id = if body.is_empty() {
		registry.builtin(Builtin::Any)
	} else {
		resolve_body(registry, body, leaf, &mut nullable)
	};

	ResolvedType {
		id,
		nullable,
		required: !nullable,
	}
}

fn resolve_body(
	registry: &mut TypeRegistry,
	body: &str,
	leaf: &mut LeafResolver<'_>,
	nullable: &mut bool,
) -> TypeId {
	if body.contains('|') {
		let mut members = Vec::new();
		for part in body.split('|') {
			let part = part.trim();
			if part.is_empty() {
				continue;
			}
			if part.eq_ignore_ascii_case("null") || part.eq_ignore_ascii_case("undefined") {
				*nullable = true;
				continue;
			}
			let id = resolve_body(registry, part, leaf, nullable);
			if !members.contains(&id) {
				members.push(id);
			}
		}
		return match members.len() {
			0 => registry.builtin(Builtin::Any),
			1 => members[0],
			_ => registry.union_of(members),
		};
	}

	if let Some(element_text) = body.strip_suffix("[]") {
		let element = resolve_body(registry, element_text.trim(), leaf, nullable);
		return registry.array_of(element);
	}

	leaf(registry, body)
}
