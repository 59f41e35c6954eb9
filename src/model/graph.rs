//! The assembled tree of modules, types and members.
//!
//! All declarations produced by a crawl live here, addressed by dotted
//! path on every call rather than by stored references. Modules are
//! deduplicated by path: the same namespace discovered from several
//! pages accumulates into one node, and requesting a deep path
//! materializes the intermediate segments as nested modules.

use super::{ClassDeclaration, Member, ModuleDeclaration, Statement};

/// Root of the declaration tree.
#[derive(Debug, Default)]
pub struct DeclarationGraph {
	statements: Vec<Statement>,
}

fn ensure_child_module<'a>(
	statements: &'a mut Vec<Statement>,
	path: &str,
) -> &'a mut ModuleDeclaration {
	let (head, rest) = match path.split_once('.') {
		Some((head, rest)) => (head, Some(rest)),
		None => (path, None),
	};

	let index = match statements
		.iter()
		.position(|s| matches!(s, Statement::Module(m) if m.name == head))
	{
		Some(index) => index,
		None => {
			statements.push(Statement::Module(ModuleDeclaration::new(head)));
			statements.len() - 1
		}
	};

	match &mut statements[index] {
		Statement::Module(module) => match rest {
			None => module,
			Some(rest) => ensure_child_module(&mut module.statements, rest),
		},
		// The position above only matches module statements.
		_ => unreachable!(),
	}
}

fn find_module<'a>(statements: &'a [Statement], path: &str) -> Option<&'a ModuleDeclaration> {
	let (head, rest) = match path.split_once('.') {
		Some((head, rest)) => (head, Some(rest)),
		None => (path, None),
	};
	let module = statements.iter().find_map(|s| match s {
		Statement::Module(m) if m.name == head => Some(m),
		_ => None,
	})?;
	match rest {
		None => Some(module),
		Some(rest) => find_module(&module.statements, rest),
	}
}

impl DeclarationGraph {
	/// An empty graph.
	pub fn new() -> Self {
		Self::default()
	}

	/// Top-level statements in encounter order.
	pub fn statements(&self) -> &[Statement] {
		&self.statements
	}

	/// Find or create the module at `path`, materializing intermediate
	/// segments as needed. Returns `None` only for an empty path.
	pub fn get_or_create_module(&mut self, path: &str) -> Option<&mut ModuleDeclaration> {
		if path.is_empty() {
			return None;
		}
		Some(ensure_child_module(&mut self.statements, path))
	}

	/// Find the module at `path`, without creating anything.
	pub fn module(&self, path: &str) -> Option<&ModuleDeclaration> {
		if path.is_empty() {
			return None;
		}
		find_module(&self.statements, path)
	}

	/// Append a statement to the module at `module_path` (creating it if
	/// needed), or to the root when the path is empty.
	pub fn add_statement(&mut self, module_path: &str, statement: Statement) {
		match self.get_or_create_module(module_path) {
			Some(module) => module.statements.push(statement),
			None => self.statements.push(statement),
		}
	}

	fn statements_at(&self, module_path: &str) -> Option<&[Statement]> {
		if module_path.is_empty() {
			Some(&self.statements)
		} else {
			self.module(module_path).map(|m| m.statements.as_slice())
		}
	}

	/// Find a declared class or enum by fully qualified name.
	pub fn find_type(&self, full_name: &str) -> Option<&Statement> {
		let (module_path, name) = match full_name.rsplit_once('.') {
			Some((module_path, name)) => (module_path, name),
			None => ("", full_name),
		};
		self.statements_at(module_path)?.iter().find(|s| {
			matches!(s, Statement::Class(c) if c.name == name)
				|| matches!(s, Statement::Enum(e) if e.name == name)
		})
	}

	/// Mutable access to a declared class by fully qualified name.
	pub fn find_class_mut(&mut self, full_name: &str) -> Option<&mut ClassDeclaration> {
		let (module_path, name) = match full_name.rsplit_once('.') {
			Some((module_path, name)) => (module_path, name),
			None => ("", full_name),
		};
		let statements = if module_path.is_empty() {
			&mut self.statements
		} else {
			let module = find_module_mut(&mut self.statements, module_path)?;
			&mut module.statements
		};
		statements.iter_mut().find_map(|s| match s {
			Statement::Class(c) if c.name == name => Some(c),
			_ => None,
		})
	}

	/// Append a member to the class at `full_name`. Returns false when no
	/// such class is declared.
	pub fn add_member(&mut self, full_name: &str, member: Member) -> bool {
		match self.find_class_mut(full_name) {
			Some(class) => {
				class.members.push(member);
				true
			}
			None => false,
		}
	}
}

fn find_module_mut<'a>(
	statements: &'a mut Vec<Statement>,
	path: &str,
) -> Option<&'a mut ModuleDeclaration> {
	let (head, rest) = match path.split_once('.') {
		Some((head, rest)) => (head, Some(rest)),
		None => (path, None),
	};
	let module = statements.iter_mut().find_map(|s| match s {
		Statement::Module(m) if m.name == head => Some(m),
		_ => None,
	})?;
	match rest {
		None => Some(module),
		Some(rest) => find_module_mut(&mut module.statements, rest),
	}
}

#[cfg(test)]
mod tests {
	use super::super::{EnumDeclaration, VariableDeclaration};
	use super::*;
	use crate::model::types::{Builtin, TypeRegistry};

	#[test]
	fn module_creation_is_idempotent() {
		let mut graph = DeclarationGraph::new();
		let first = graph.get_or_create_module("a.b").unwrap() as *const ModuleDeclaration;
		graph
			.get_or_create_module("a.b")
			.unwrap()
			.statements
			.push(Statement::Enum(EnumDeclaration {
				name: "E".to_string(),
				is_export: true,
				documentation: None,
				members: Vec::new(),
			}));
		let second = graph.get_or_create_module("a.b").unwrap();
		assert_eq!(second.statements.len(), 1);
		assert!(std::ptr::eq(second, first));

		// A repeated request must not disturb existing statement order.
		assert_eq!(graph.statements().len(), 1);
	}

	#[test]
	fn intermediate_segments_are_materialized() {
		let mut graph = DeclarationGraph::new();
		graph.get_or_create_module("a.b.c");

		let a = graph.module("a").unwrap();
		assert_eq!(a.statements.len(), 1);
		let b = graph.module("a.b").unwrap();
		assert_eq!(b.statements.len(), 1);
		assert!(graph.module("a.b.c").unwrap().statements.is_empty());
	}

	#[test]
	fn statement_order_is_encounter_order() {
		let registry = TypeRegistry::new();
		let number = registry.builtin(Builtin::Number);
		let mut graph = DeclarationGraph::new();
		for name in ["first", "second", "third"] {
			graph.add_statement(
				"m",
				Statement::Variable(VariableDeclaration {
					name: name.to_string(),
					variable_type: number,
					is_constant: false,
					documentation: None,
				}),
			);
		}
		let names: Vec<&str> = graph
			.module("m")
			.unwrap()
			.statements
			.iter()
			.map(|s| s.name())
			.collect();
		assert_eq!(names, vec!["first", "second", "third"]);
	}

	#[test]
	fn classes_are_found_by_full_name() {
		let mut graph = DeclarationGraph::new();
		graph.add_statement("a.b", Statement::Class(ClassDeclaration::stub("Widget", false)));

		assert!(graph.find_type("a.b.Widget").is_some());
		assert!(graph.find_type("a.Widget").is_none());
		assert!(graph.find_class_mut("a.b.Widget").is_some());
	}
}
