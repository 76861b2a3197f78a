//! Host front-end boundary: per-declaration facts for one translation unit.
//!
//! The compiler front end that parses source and evaluates constant
//! expressions is an external collaborator. It reports each declaration (and
//! each string/character literal expression) as one row in a flat,
//! depth-first table with explicit parent indices, so naming never needs a
//! live syntax-tree query.

use serde::{Deserialize, Serialize};

use crate::consts::value::ConstValue;

/// Flat declaration table for one translation unit, in traversal order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UnitFacts {
	/// Declarations in depth-first translation-unit order.
	#[serde(default)]
	pub decls: Vec<Decl>,
}

impl UnitFacts {
	/// Declaration at `idx`, if in range.
	pub fn decl(&self, idx: u32) -> Option<&Decl> {
		self.decls.get(idx as usize)
	}

	/// Iterator over the enclosing declarations of `idx`, nearest first.
	///
	/// Stops silently on an out-of-range parent index; a malformed table
	/// terminates the walk rather than the pass.
	pub fn ancestors(&self, idx: u32) -> Ancestors<'_> {
		Ancestors {
			unit: self,
			next: self.decl(idx).and_then(|decl| decl.parent),
		}
	}
}

/// Iterator produced by [`UnitFacts::ancestors`].
#[derive(Debug)]
pub struct Ancestors<'a> {
	unit: &'a UnitFacts,
	next: Option<u32>,
}

impl<'a> Iterator for Ancestors<'a> {
	type Item = (u32, &'a Decl);

	fn next(&mut self) -> Option<Self::Item> {
		let idx = self.next?;
		let decl = self.unit.decl(idx)?;
		self.next = decl.parent;
		Some((idx, decl))
	}
}

/// One declaration (or literal expression) as reported by the host front end.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Decl {
	/// Unqualified spelling; empty for literals and anonymous declarations.
	#[serde(default)]
	pub name: Box<str>,
	/// Host-resolved fully qualified name.
	#[serde(default)]
	pub qualified_name: Box<str>,
	/// Table index of the enclosing declaration.
	#[serde(default)]
	pub parent: Option<u32>,
	/// Kind-specific facts.
	pub kind: DeclKind,
}

/// Kind-specific declaration facts.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeclKind {
	/// Namespace or other purely scoping declaration.
	Namespace,
	/// Variable declaration.
	Var(VarFacts),
	/// Function declaration.
	Func(FuncFacts),
	/// Enum declaration with its enumerators.
	Enum(EnumFacts),
	/// Record (class/struct) declaration.
	Record(RecordFacts),
	/// String or character literal expression.
	Literal(LiteralFacts),
}

/// Facts for a variable declaration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VarFacts {
	/// Host verdict: the declared type is a literal type.
	#[serde(default)]
	pub literal_type: bool,
	/// Declaration is a function parameter.
	#[serde(default)]
	pub is_param: bool,
	/// Declaration carries an initializer.
	#[serde(default)]
	pub has_init: bool,
	/// Declared `constexpr`.
	#[serde(default)]
	pub is_constexpr: bool,
	/// Host verdict: initializer is usable in constant expressions.
	#[serde(default)]
	pub const_usable: bool,
	/// Evaluated value, when constant evaluation succeeded.
	#[serde(default)]
	pub value: Option<ConstValue>,
}

/// Reference qualifier on a member function signature.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RefQualifier {
	/// No reference qualifier.
	#[default]
	None,
	/// `&` qualified.
	Lvalue,
	/// `&&` qualified.
	Rvalue,
}

/// Facts for a function declaration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FuncFacts {
	/// Definition (body) is present.
	#[serde(default)]
	pub has_body: bool,
	/// Declaration belongs to an uninstantiated template.
	#[serde(default)]
	pub templated: bool,
	/// Declared `constexpr`.
	#[serde(default)]
	pub is_constexpr: bool,
	/// Rendered parameter type names, in order.
	#[serde(default)]
	pub params: Vec<Box<str>>,
	/// Signature is variadic (`...`).
	#[serde(default)]
	pub variadic: bool,
	/// Return type is `void`.
	#[serde(default)]
	pub returns_void: bool,
	/// Member function is `const` qualified.
	#[serde(default)]
	pub is_const: bool,
	/// Member function is `volatile` qualified.
	#[serde(default)]
	pub is_volatile: bool,
	/// Member function reference qualifier.
	#[serde(default)]
	pub ref_qualifier: RefQualifier,
	/// Result of evaluating a synthetic zero-argument call, when it succeeded.
	#[serde(default)]
	pub value: Option<ConstValue>,
}

/// One enumerator inside an enum declaration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnumeratorFacts {
	/// Host-resolved qualified name. Unscoped C++ enums omit the enum name
	/// from this path; the value is taken as given.
	pub qualified_name: Box<str>,
	/// Enumerator value.
	pub value: i64,
}

/// Facts for an enum declaration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EnumFacts {
	/// Declaration belongs to an uninstantiated template.
	#[serde(default)]
	pub templated: bool,
	/// Bit width of the underlying integer type.
	#[serde(default = "default_int_bits")]
	pub int_bits: u16,
	/// Enumerators in declaration order.
	#[serde(default)]
	pub enumerators: Vec<EnumeratorFacts>,
}

fn default_int_bits() -> u16 {
	32
}

/// Facts for a record (class/struct) declaration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecordFacts {
	/// A full definition is present.
	#[serde(default)]
	pub has_definition: bool,
	/// Declaration is a closure (lambda) type.
	#[serde(default)]
	pub is_lambda: bool,
	/// Host verdict: the type is a literal type.
	#[serde(default)]
	pub literal_type: bool,
	/// Declaration belongs to an uninstantiated template.
	#[serde(default)]
	pub templated: bool,
	/// Own field names in declaration order.
	#[serde(default)]
	pub fields: Vec<Box<str>>,
	/// Table indices of base record declarations, in declaration order.
	#[serde(default)]
	pub bases: Vec<u32>,
}

/// Facts for a string or character literal expression.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LiteralFacts {
	/// Literal is located inside a system header.
	#[serde(default)]
	pub in_system_header: bool,
	/// Literal is a narrow (ordinary) literal.
	#[serde(default)]
	pub is_narrow: bool,
	/// Spelled content, without delimiters or encoding prefix.
	#[serde(default)]
	pub text: Box<str>,
	/// Presumed file name at the literal's location.
	#[serde(default)]
	pub file_name: Box<str>,
	/// Evaluated value, when constant evaluation succeeded.
	#[serde(default)]
	pub value: Option<ConstValue>,
}
