//! Name-keyed type registry.
//!
//! All type nodes live in one arena and are addressed by [`TypeId`]
//! handles. Declarations and references never hold pointers into the
//! registry; they store ids, so a name can be referenced long before (or
//! long after) its declaring page is parsed. A reference to a name with
//! no known declaration becomes an [`TypeNode::Unknown`] placeholder that
//! is upgraded in place once the declaration shows up, which reconciles
//! every earlier reference at once.

use std::collections::HashMap;

/// Handle to a node in a [`TypeRegistry`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeId(usize);

/// The fixed set of builtin types that resolve without any declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Builtin {
	/// The `any` escape hatch, also the fallback for missing type text.
	Any,
	/// `void`, used for absent return types.
	Void,
	/// `string`.
	String,
	/// `number`.
	Number,
	/// `boolean`.
	Boolean,
	/// `Object`.
	Object,
	/// Bare `function` references without a usable signature.
	Function,
}

const BUILTINS: [Builtin; 7] = [
	Builtin::Any,
	Builtin::Void,
	Builtin::String,
	Builtin::Number,
	Builtin::Boolean,
	Builtin::Object,
	Builtin::Function,
];

impl Builtin {
	/// Canonical rendered name.
	pub fn name(self) -> &'static str {
		match self {
			Self::Any => "any",
			Self::Void => "void",
			Self::String => "string",
			Self::Number => "number",
			Self::Boolean => "boolean",
			Self::Object => "Object",
			Self::Function => "Function",
		}
	}

	/// Match a raw type text against the builtin table.
	pub fn from_text(text: &str) -> Option<Self> {
		match text {
			"any" => Some(Self::Any),
			"void" => Some(Self::Void),
			"string" | "String" => Some(Self::String),
			"number" | "Number" => Some(Self::Number),
			"boolean" | "Boolean" => Some(Self::Boolean),
			"object" | "Object" => Some(Self::Object),
			"function" | "Function" => Some(Self::Function),
			_ => None,
		}
	}
}

/// One node in the type graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeNode {
	/// A member of the fixed builtin table.
	Builtin(Builtin),
	/// A declared class (or abstract type), keyed by fully qualified name.
	Class {
		/// Fully qualified name.
		name: String,
	},
	/// A declared enumeration, keyed by fully qualified name.
	Enum {
		/// Fully qualified name.
		name: String,
	},
	/// Placeholder for a referenced name with no known declaration yet.
	Unknown {
		/// The referenced name, exactly as written.
		name: String,
	},
	/// An array over another node.
	Array {
		/// Element type.
		element: TypeId,
	},
	/// A union over a set of other nodes.
	Union {
		/// Member types, sorted and deduplicated for structural identity.
		members: Vec<TypeId>,
	},
}

/// Arena of type nodes with lookup-or-create semantics.
///
/// Named nodes (builtins, classes, enums, unknowns) are interned by name;
/// arrays and unions are interned by structure, so resolving the same
/// expression twice yields structurally equal results.
#[derive(Debug)]
pub struct TypeRegistry {
	nodes: Vec<TypeNode>,
	by_name: HashMap<String, TypeId>,
	arrays: HashMap<TypeId, TypeId>,
	unions: HashMap<Vec<TypeId>, TypeId>,
}

impl Default for TypeRegistry {
	fn default() -> Self {
		Self::new()
	}
}

impl TypeRegistry {
	/// Create a registry with the builtin table pre-registered.
	pub fn new() -> Self {
		let mut registry = Self {
			nodes: Vec::new(),
			by_name: HashMap::new(),
			arrays: HashMap::new(),
			unions: HashMap::new(),
		};
		for builtin in BUILTINS {
			let id = registry.push(TypeNode::Builtin(builtin));
			registry.by_name.insert(builtin.name().to_string(), id);
		}
		registry
	}

	fn push(&mut self, node: TypeNode) -> TypeId {
		let id = TypeId(self.nodes.len());
		self.nodes.push(node);
		id
	}

	/// The singleton id of a builtin.
	pub fn builtin(&self, builtin: Builtin) -> TypeId {
		// Builtins occupy the first arena slots in table order.
		TypeId(BUILTINS.iter().position(|b| *b == builtin).unwrap_or(0))
	}

	/// Look up a name: builtin aliases first, then any named node
	/// (declared or placeholder). Never creates.
	pub fn lookup(&self, name: &str) -> Option<TypeId> {
		if let Some(builtin) = Builtin::from_text(name) {
			return Some(self.builtin(builtin));
		}
		self.by_name.get(name).copied()
	}

	/// Whether `name` is declared as a class or enum (placeholders and
	/// builtins do not count).
	pub fn is_declared(&self, name: &str) -> bool {
		match self.by_name.get(name) {
			Some(id) => matches!(
				self.nodes[id.0],
				TypeNode::Class { .. } | TypeNode::Enum { .. }
			),
			None => false,
		}
	}

	/// Register `name` as a class, upgrading an existing placeholder in
	/// place. Idempotent; an already-declared name keeps its node.
	pub fn declare_class(&mut self, name: &str) -> TypeId {
		self.declare(name, |name| TypeNode::Class { name })
	}

	/// Register `name` as an enum, upgrading an existing placeholder in
	/// place. Idempotent.
	pub fn declare_enum(&mut self, name: &str) -> TypeId {
		self.declare(name, |name| TypeNode::Enum { name })
	}

	fn declare(&mut self, name: &str, make: impl FnOnce(String) -> TypeNode) -> TypeId {
		if let Some(&id) = self.by_name.get(name) {
			if matches!(self.nodes[id.0], TypeNode::Unknown { .. }) {
				self.nodes[id.0] = make(name.to_string());
			}
			return id;
		}
		let id = self.push(make(name.to_string()));
		self.by_name.insert(name.to_string(), id);
		id
	}

	/// Intern a placeholder for a name that could not be resolved.
	pub fn ensure_unknown(&mut self, name: &str) -> TypeId {
		if let Some(&id) = self.by_name.get(name) {
			return id;
		}
		let id = self.push(TypeNode::Unknown {
			name: name.to_string(),
		});
		self.by_name.insert(name.to_string(), id);
		id
	}

	/// Intern an array over `element`.
	pub fn array_of(&mut self, element: TypeId) -> TypeId {
		if let Some(&id) = self.arrays.get(&element) {
			return id;
		}
		let id = self.push(TypeNode::Array { element });
		self.arrays.insert(element, id);
		id
	}

	/// Intern a union over `members`. The member list is sorted and
	/// deduplicated so that unions are identified by their member set.
	pub fn union_of(&mut self, mut members: Vec<TypeId>) -> TypeId {
		members.sort();
		members.dedup();
		if let Some(&id) = self.unions.get(&members) {
			return id;
		}
		let id = self.push(TypeNode::Union {
			members: members.clone(),
		});
		self.unions.insert(members, id);
		id
	}

	/// Access a node by id.
	pub fn node(&self, id: TypeId) -> &TypeNode {
		&self.nodes[id.0]
	}

	/// Whether the node behind `id` is still an unreconciled placeholder.
	pub fn is_unknown(&self, id: TypeId) -> bool {
		matches!(self.nodes[id.0], TypeNode::Unknown { .. })
	}

	/// Fully qualified display name of a node.
	pub fn display(&self, id: TypeId) -> String {
		self.display_in(id, "")
	}

	/// Display name of a node as seen from inside `namespace`: named
	/// nodes matching the namespace prefix render with it stripped.
	pub fn display_in(&self, id: TypeId, namespace: &str) -> String {
		match &self.nodes[id.0] {
			TypeNode::Builtin(builtin) => builtin.name().to_string(),
			TypeNode::Class { name } | TypeNode::Enum { name } | TypeNode::Unknown { name } => {
				if !namespace.is_empty() {
					if let Some(short) = name.strip_prefix(namespace) {
						if let Some(short) = short.strip_prefix('.') {
							return short.to_string();
						}
					}
				}
				name.clone()
			}
			TypeNode::Array { element } => {
				format!("{}[]", self.display_in(*element, namespace))
			}
			TypeNode::Union { members } => members
				.iter()
				.map(|m| self.display_in(*m, namespace))
				.collect::<Vec<_>>()
				.join(" | "),
		}
	}
}
