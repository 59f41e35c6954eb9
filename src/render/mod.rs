//! Serialization of the declaration graph into `.d.ts` text.
//!
//! Rendering is a straight walk of the graph in insertion order; nothing
//! is sorted or regrouped. Top-level modules become `declare namespace`
//! blocks; chains of container-only modules (produced when intermediate
//! path segments were materialized) collapse back into dotted names so
//! the output never shows empty wrapper blocks.

pub mod writer;

use self::writer::DeclWriter;
use crate::model::graph::DeclarationGraph;
use crate::model::types::TypeRegistry;
use crate::model::{
	ClassDeclaration, Documentation, EnumDeclaration, FunctionDeclaration, Member,
	ModuleDeclaration, ParameterDeclaration, Statement, VariableDeclaration,
};

/// Renders a declaration graph as TypeScript declaration text.
#[derive(Debug, Clone)]
pub struct Renderer {
	include_docs: bool,
}

impl Default for Renderer {
	fn default() -> Self {
		Self { include_docs: true }
	}
}

impl Renderer {
	/// A renderer with documentation comments enabled.
	pub fn new() -> Self {
		Self::default()
	}

	/// Enable or disable `/** ... */` documentation blocks.
	pub fn with_docs(mut self, include_docs: bool) -> Self {
		self.include_docs = include_docs;
		self
	}

	/// Render the whole graph.
	pub fn render(&self, graph: &DeclarationGraph, registry: &TypeRegistry) -> String {
		let mut w = DeclWriter::new();
		for statement in graph.statements() {
			self.statement(&mut w, registry, statement, "", true);
		}
		w.finish()
	}

	fn statement(
		&self,
		w: &mut DeclWriter,
		registry: &TypeRegistry,
		statement: &Statement,
		namespace: &str,
		top_level: bool,
	) {
		match statement {
			Statement::Module(module) => self.module(w, registry, module, namespace, top_level),
			Statement::Class(class) => self.class(w, registry, class, namespace, top_level),
			Statement::Enum(decl) => self.enumeration(w, decl),
			Statement::Variable(var) => self.variable(w, registry, var, namespace, top_level),
			Statement::Function(func) => self.function(w, registry, func, namespace, top_level),
		}
	}

	fn module(
		&self,
		w: &mut DeclWriter,
		registry: &TypeRegistry,
		module: &ModuleDeclaration,
		namespace: &str,
		top_level: bool,
	) {
		// Collapse container-only chains: a module whose sole statement is
		// another module renders as one dotted header.
		let mut path = module.name.clone();
		let mut current = module;
		let mut documentation = module.documentation.as_ref();
		while current.statements.len() == 1 {
			let Statement::Module(inner) = &current.statements[0] else {
				break;
			};
			path.push('.');
			path.push_str(&inner.name);
			if inner.documentation.is_some() {
				documentation = inner.documentation.as_ref();
			}
			current = inner;
		}

		self.docs(w, documentation);
		let keyword = if top_level { "declare namespace" } else { "namespace" };
		w.open(&format!("{keyword} {path} {{"));

		let child_namespace = if namespace.is_empty() {
			path.clone()
		} else {
			format!("{namespace}.{path}")
		};
		for statement in &current.statements {
			self.statement(w, registry, statement, &child_namespace, false);
		}
		w.close("}");
	}

	fn class(
		&self,
		w: &mut DeclWriter,
		registry: &TypeRegistry,
		class: &ClassDeclaration,
		namespace: &str,
		top_level: bool,
	) {
		self.docs(w, class.documentation.as_ref());
		let declare = if top_level { "declare " } else { "" };
		let modifier = if class.is_abstract { "abstract " } else { "" };
		w.open(&format!("{declare}{modifier}class {} {{", class.name));
		for member in &class.members {
			self.member(w, registry, member, namespace);
		}
		w.close("}");
	}

	fn member(&self, w: &mut DeclWriter, registry: &TypeRegistry, member: &Member, namespace: &str) {
		match member {
			Member::Constructor(ctor) => {
				self.member_docs(w, &ctor.documentation);
				let params = self.parameters(registry, &ctor.parameters, namespace);
				w.line(&format!("constructor({params});"));
			}
			Member::Method(method) => {
				self.member_docs(w, &method.documentation);
				let params = self.parameters(registry, &method.parameters, namespace);
				let returns = method
					.return_type
					.map(|id| registry.display_in(id, namespace))
					.unwrap_or_else(|| "void".to_string());
				w.line(&format!("{}({params}): {returns};", method.name));
			}
			Member::Property(property) => {
				self.member_docs(w, &property.documentation);
				let optional = if property.is_required { "" } else { "?" };
				let ty = registry.display_in(property.property_type, namespace);
				w.line(&format!("{}{optional}: {ty};", property.name));
			}
			Member::Field(field) => {
				self.member_docs(w, &field.documentation);
				let modifier = if field.is_static { "static " } else { "" };
				let ty = registry.display_in(field.field_type, namespace);
				w.line(&format!("{modifier}{}: {ty};", field.name));
			}
		}
	}

	fn enumeration(&self, w: &mut DeclWriter, decl: &EnumDeclaration) {
		self.docs(w, decl.documentation.as_ref());
		w.open(&format!("enum {} {{", decl.name));
		for member in &decl.members {
			self.docs(w, member.documentation.as_ref());
			w.line(&format!("{},", member.name));
		}
		w.close("}");
	}

	fn variable(
		&self,
		w: &mut DeclWriter,
		registry: &TypeRegistry,
		var: &VariableDeclaration,
		namespace: &str,
		top_level: bool,
	) {
		self.docs(w, var.documentation.as_ref());
		let declare = if top_level { "declare " } else { "" };
		let keyword = if var.is_constant { "const" } else { "var" };
		let ty = registry.display_in(var.variable_type, namespace);
		w.line(&format!("{declare}{keyword} {}: {ty};", var.name));
	}

	fn function(
		&self,
		w: &mut DeclWriter,
		registry: &TypeRegistry,
		func: &FunctionDeclaration,
		namespace: &str,
		top_level: bool,
	) {
		self.member_docs(w, &func.documentation);
		let declare = if top_level { "declare " } else { "" };
		let params = self.parameters(registry, &func.parameters, namespace);
		let returns = func
			.return_type
			.map(|id| registry.display_in(id, namespace))
			.unwrap_or_else(|| "void".to_string());
		w.line(&format!("{declare}function {}({params}): {returns};", func.name));
	}

	fn parameters(
		&self,
		registry: &TypeRegistry,
		parameters: &[ParameterDeclaration],
		namespace: &str,
	) -> String {
		parameters
			.iter()
			.map(|p| {
				let optional = if p.is_required { "" } else { "?" };
				let ty = registry.display_in(p.parameter_type, namespace);
				format!("{}{optional}: {ty}", p.name)
			})
			.collect::<Vec<_>>()
			.join(", ")
	}

	fn docs(&self, w: &mut DeclWriter, documentation: Option<&Documentation>) {
		if let Some(documentation) = documentation {
			self.member_docs(w, documentation);
		}
	}

	fn member_docs(&self, w: &mut DeclWriter, documentation: &Documentation) {
		if !self.include_docs || documentation.is_empty() {
			return;
		}
		let mut lines = Vec::new();
		match &documentation.summary {
			Some(summary) => lines.push(summary.clone()),
			// The writer keeps a blank entry so parameter lines do not
			// masquerade as the summary.
			None => lines.push(String::new()),
		}
		for parameter in &documentation.parameters {
			let mut line = format!("@param {}", parameter.parameter_name);
			if let Some(description) = &parameter.description {
				line.push(' ');
				line.push_str(description);
			}
			lines.push(line);
		}
		if let Some(returns) = &documentation.returns {
			lines.push(format!("@return {returns}"));
		}
		w.doc_block(&lines);
	}
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;
	use crate::model::graph::DeclarationGraph;
	use crate::model::types::Builtin;
	use crate::model::{EnumMember, PropertyDeclaration};

	#[test]
	fn modules_render_as_declare_namespace_blocks() {
		let mut registry = TypeRegistry::new();
		let number = registry.builtin(Builtin::Number);

		let mut graph = DeclarationGraph::new();
		graph.add_statement(
			"a.b",
			Statement::Enum(EnumDeclaration {
				name: "E".to_string(),
				is_export: true,
				documentation: None,
				members: vec![
					EnumMember {
						name: "A".to_string(),
						documentation: None,
					},
					EnumMember {
						name: "B".to_string(),
						documentation: None,
					},
				],
			}),
		);
		graph.add_statement(
			"a.b",
			Statement::Variable(VariableDeclaration {
				name: "p".to_string(),
				variable_type: number,
				is_constant: false,
				documentation: None,
			}),
		);

		let rendered = Renderer::new().render(&graph, &registry);
		assert_eq!(
			rendered,
			"declare namespace a.b {\n    enum E {\n        A,\n        B,\n    }\n    var p: number;\n}\n"
		);
	}

	#[test]
	fn type_names_render_relative_to_the_namespace() {
		let mut registry = TypeRegistry::new();
		let widget = registry.declare_class("a.b.Widget");

		let mut graph = DeclarationGraph::new();
		graph.add_statement(
			"a.b",
			Statement::Class(ClassDeclaration {
				name: "Holder".to_string(),
				is_export: true,
				is_abstract: false,
				documentation: None,
				members: vec![Member::Property(PropertyDeclaration {
					name: "widget".to_string(),
					property_type: widget,
					is_required: false,
					documentation: Documentation::default(),
				})],
			}),
		);

		let rendered = Renderer::new().render(&graph, &registry);
		assert!(
			rendered.contains("widget?: Widget;"),
			"expected a namespace-relative property type:\n{rendered}"
		);
	}

	#[test]
	fn methods_default_to_void_and_mark_optional_parameters() {
		let registry = TypeRegistry::new();
		let string = registry.builtin(Builtin::String);

		let mut graph = DeclarationGraph::new();
		graph.add_statement(
			"m",
			Statement::Function(FunctionDeclaration {
				name: "log".to_string(),
				parameters: vec![
					ParameterDeclaration {
						name: "message".to_string(),
						parameter_type: string,
						is_required: true,
					},
					ParameterDeclaration {
						name: "detail".to_string(),
						parameter_type: string,
						is_required: false,
					},
				],
				return_type: None,
				documentation: Documentation::default(),
			}),
		);

		let rendered = Renderer::new().render(&graph, &registry);
		assert!(rendered.contains("function log(message: string, detail?: string): void;"));
	}

	#[test]
	fn container_only_chains_collapse_into_dotted_names() {
		let mut graph = DeclarationGraph::new();
		graph.get_or_create_module("x.y.z");

		let registry = TypeRegistry::new();
		let rendered = Renderer::new().render(&graph, &registry);
		assert_eq!(rendered, "declare namespace x.y.z {\n}\n");
	}

	#[test]
	fn abstract_classes_carry_the_keyword() {
		let mut graph = DeclarationGraph::new();
		graph.add_statement("m", Statement::Class(ClassDeclaration::stub("Base", true)));

		let registry = TypeRegistry::new();
		let rendered = Renderer::new().render(&graph, &registry);
		assert!(rendered.contains("abstract class Base {"));
	}
}
