//! In-memory model of the scraped declaration surface.
//!
//! The model splits in two: the [`graph`] of declarations (modules,
//! classes, enums and their members, owned exclusively by the
//! [`graph::DeclarationGraph`]) and the [`types`] registry of type nodes
//! that declarations reference by [`types::TypeId`] handle. Keeping type
//! references as handles instead of nested nodes is what lets pages
//! mention types in any order.

pub mod graph;
pub mod resolve;
pub mod types;

use self::types::TypeId;

/// Documentation attached to a declaration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Documentation {
	/// Leading description paragraph.
	pub summary: Option<String>,
	/// Description of the return value, for callables.
	pub returns: Option<String>,
	/// Per-parameter descriptions, in parameter order.
	pub parameters: Vec<ParameterDocumentation>,
}

impl Documentation {
	/// Documentation carrying only a summary.
	pub fn summary(text: impl Into<String>) -> Self {
		Self {
			summary: Some(text.into()),
			..Self::default()
		}
	}

	/// True when there is nothing to render.
	pub fn is_empty(&self) -> bool {
		self.summary.is_none() && self.returns.is_none() && self.parameters.is_empty()
	}
}

/// Documentation for one parameter of a callable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterDocumentation {
	/// The parameter this description belongs to.
	pub parameter_name: String,
	/// Description text, absent when the page had none.
	pub description: Option<String>,
}

/// Visibility of a field declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessModifier {
	/// Publicly visible (the only modifier the scraped pages produce).
	Public,
	/// Declared but not part of the public surface.
	Private,
}

/// One parameter of a callable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterDeclaration {
	/// Parameter name.
	pub name: String,
	/// Parameter type.
	pub parameter_type: TypeId,
	/// Whether the parameter must be supplied (not nullable).
	pub is_required: bool,
}

/// A constructor of a class.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConstructorDeclaration {
	/// Ordered parameter list.
	pub parameters: Vec<ParameterDeclaration>,
	/// Attached documentation.
	pub documentation: Documentation,
}

/// A method of a class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodDeclaration {
	/// Method name.
	pub name: String,
	/// Ordered parameter list.
	pub parameters: Vec<ParameterDeclaration>,
	/// Return type; `None` renders as `void`.
	pub return_type: Option<TypeId>,
	/// Attached documentation.
	pub documentation: Documentation,
}

/// A property of a class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyDeclaration {
	/// Property name.
	pub name: String,
	/// Property type.
	pub property_type: TypeId,
	/// Whether the property is always present.
	pub is_required: bool,
	/// Attached documentation.
	pub documentation: Documentation,
}

/// A field of a class; the scraper produces these as typed constants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDeclaration {
	/// Field name.
	pub name: String,
	/// Field type.
	pub field_type: TypeId,
	/// Visibility.
	pub access_modifier: AccessModifier,
	/// Whether the field belongs to the type rather than instances.
	pub is_static: bool,
	/// Attached documentation.
	pub documentation: Documentation,
}

/// A member of a class declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Member {
	/// Constructor.
	Constructor(ConstructorDeclaration),
	/// Instance method.
	Method(MethodDeclaration),
	/// Instance property.
	Property(PropertyDeclaration),
	/// Field (static typed constant).
	Field(FieldDeclaration),
}

impl Member {
	/// Display name of the member, for observers and logs.
	pub fn name(&self) -> &str {
		match self {
			Self::Constructor(_) => "constructor",
			Self::Method(m) => &m.name,
			Self::Property(p) => &p.name,
			Self::Field(f) => &f.name,
		}
	}
}

/// A class (or abstract type) declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassDeclaration {
	/// Short name (final path segment).
	pub name: String,
	/// Whether the declaration is exported from its module.
	pub is_export: bool,
	/// Whether the source page declared an abstract type.
	pub is_abstract: bool,
	/// Attached documentation.
	pub documentation: Option<Documentation>,
	/// Ordered members, mirroring source-page encounter order.
	pub members: Vec<Member>,
}

impl ClassDeclaration {
	/// An empty exported class declaration, as created for listing stubs.
	pub fn stub(name: impl Into<String>, is_abstract: bool) -> Self {
		Self {
			name: name.into(),
			is_export: true,
			is_abstract,
			documentation: None,
			members: Vec::new(),
		}
	}
}

/// One member of a plain enumeration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumMember {
	/// Constant name.
	pub name: String,
	/// Attached documentation.
	pub documentation: Option<Documentation>,
}

/// A numeric enumeration declaration.
///
/// Constant groups backed by a non-numeric type are not enums in the
/// model; they become a [`ClassDeclaration`] of static fields, decided
/// once when the defining fragment is extracted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumDeclaration {
	/// Short name (final path segment).
	pub name: String,
	/// Whether the declaration is exported from its module.
	pub is_export: bool,
	/// Attached documentation.
	pub documentation: Option<Documentation>,
	/// Ordered members, mirroring definition-table row order.
	pub members: Vec<EnumMember>,
}

/// A module-level variable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariableDeclaration {
	/// Variable name.
	pub name: String,
	/// Variable type.
	pub variable_type: TypeId,
	/// Whether the page carried a constant badge.
	pub is_constant: bool,
	/// Attached documentation.
	pub documentation: Option<Documentation>,
}

/// A module-level function.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionDeclaration {
	/// Function name.
	pub name: String,
	/// Ordered parameter list.
	pub parameters: Vec<ParameterDeclaration>,
	/// Return type; `None` renders as `void`.
	pub return_type: Option<TypeId>,
	/// Attached documentation.
	pub documentation: Documentation,
}

/// A module-level namespace declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleDeclaration {
	/// Path segment name (not the full dotted path).
	pub name: String,
	/// Attached documentation.
	pub documentation: Option<Documentation>,
	/// Ordered child statements, mirroring encounter order.
	pub statements: Vec<Statement>,
}

impl ModuleDeclaration {
	/// An empty module for one path segment.
	pub fn new(name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			documentation: None,
			statements: Vec::new(),
		}
	}
}

/// One statement in a module body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Statement {
	/// A nested module.
	Module(ModuleDeclaration),
	/// A class declaration.
	Class(ClassDeclaration),
	/// An enumeration declaration.
	Enum(EnumDeclaration),
	/// A module-level variable.
	Variable(VariableDeclaration),
	/// A module-level function.
	Function(FunctionDeclaration),
}

impl Statement {
	/// Display name of the statement, for observers and logs.
	pub fn name(&self) -> &str {
		match self {
			Self::Module(m) => &m.name,
			Self::Class(c) => &c.name,
			Self::Enum(e) => &e.name,
			Self::Variable(v) => &v.name,
			Self::Function(f) => &f.name,
		}
	}
}
