use tracing::trace;

use crate::consts::facts::{Decl, DeclKind, EnumFacts, FuncFacts, LiteralFacts, RecordFacts, UnitFacts, VarFacts};

/// Base chains deeper than this are treated as contributing nothing.
const MAX_BASE_DEPTH: u32 = 64;

/// Discovery verdict for one declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
	/// Not reportable; excluded from the stream.
	Skip,
	/// Constant variable with an evaluated value.
	Scalar,
	/// Enum declaration, emitted as one block.
	Enum,
	/// String/character literal not bound to any named constant.
	MagicLiteral,
	/// Zero-parameter constexpr function with an evaluated call result.
	ZeroArgConstFn,
	/// Literal-capable record type, reported by shape only.
	AggregateShape,
}

/// Classify the declaration at `idx`.
///
/// Rules are order-sensitive and every failing condition yields `Skip`;
/// a skip is always local and never a pass-level failure.
pub fn classify(unit: &UnitFacts, idx: u32) -> Classification {
	let Some(decl) = unit.decl(idx) else {
		return Classification::Skip;
	};

	match &decl.kind {
		DeclKind::Namespace => Classification::Skip,
		DeclKind::Var(var) => classify_var(decl, var),
		DeclKind::Func(func) => classify_func(decl, func),
		DeclKind::Enum(item) => classify_enum(decl, item),
		DeclKind::Record(record) => classify_record(unit, decl, record),
		DeclKind::Literal(literal) => classify_literal(unit, idx, literal),
	}
}

fn classify_var(decl: &Decl, var: &VarFacts) -> Classification {
	if !var.literal_type {
		trace!(name = %decl.qualified_name, "skip var: not a literal type");
		return Classification::Skip;
	}
	if var.is_param {
		trace!(name = %decl.qualified_name, "skip var: function parameter");
		return Classification::Skip;
	}
	if !var.has_init {
		trace!(name = %decl.qualified_name, "skip var: no initializer");
		return Classification::Skip;
	}
	if !var.is_constexpr && !var.const_usable {
		trace!(name = %decl.qualified_name, "skip var: not usable as a constant expression");
		return Classification::Skip;
	}
	if var.value.is_none() {
		trace!(name = %decl.qualified_name, "skip var: no evaluated value");
		return Classification::Skip;
	}
	Classification::Scalar
}

fn classify_func(decl: &Decl, func: &FuncFacts) -> Classification {
	if !func.has_body {
		trace!(name = %decl.qualified_name, "skip fn: no body");
		return Classification::Skip;
	}
	if func.templated {
		trace!(name = %decl.qualified_name, "skip fn: template definition");
		return Classification::Skip;
	}
	if !func.is_constexpr {
		trace!(name = %decl.qualified_name, "skip fn: not constexpr");
		return Classification::Skip;
	}
	if !func.params.is_empty() || func.variadic {
		trace!(name = %decl.qualified_name, "skip fn: takes parameters");
		return Classification::Skip;
	}
	if func.returns_void {
		trace!(name = %decl.qualified_name, "skip fn: returns void");
		return Classification::Skip;
	}
	if func.value.is_none() {
		trace!(name = %decl.qualified_name, "skip fn: call evaluation failed");
		return Classification::Skip;
	}
	Classification::ZeroArgConstFn
}

fn classify_enum(decl: &Decl, item: &EnumFacts) -> Classification {
	// Template definitions are excluded uniformly, instantiations included.
	if item.templated {
		trace!(name = %decl.qualified_name, "skip enum: template definition");
		return Classification::Skip;
	}
	Classification::Enum
}

fn classify_record(unit: &UnitFacts, decl: &Decl, record: &RecordFacts) -> Classification {
	if decl.name.is_empty() {
		trace!(name = %decl.qualified_name, "skip record: anonymous");
		return Classification::Skip;
	}
	if !record.has_definition {
		trace!(name = %decl.qualified_name, "skip record: no definition");
		return Classification::Skip;
	}
	if record.is_lambda {
		trace!(name = %decl.qualified_name, "skip record: closure type");
		return Classification::Skip;
	}
	if !record.literal_type {
		trace!(name = %decl.qualified_name, "skip record: not a literal type");
		return Classification::Skip;
	}
	if record.templated {
		trace!(name = %decl.qualified_name, "skip record: template definition");
		return Classification::Skip;
	}
	if !record_has_any_fields(unit, record, 0) {
		trace!(name = %decl.qualified_name, "skip record: no fields anywhere in base chain");
		return Classification::Skip;
	}
	Classification::AggregateShape
}

fn classify_literal(unit: &UnitFacts, idx: u32, literal: &LiteralFacts) -> Classification {
	if literal.in_system_header {
		trace!(idx, "skip literal: system header");
		return Classification::Skip;
	}
	if literal.is_narrow && *literal.text == *literal.file_name {
		trace!(idx, "skip literal: file-name identity literal");
		return Classification::Skip;
	}
	if literal_bound_to_var(unit, idx) {
		trace!(idx, "skip literal: bound to a named variable");
		return Classification::Skip;
	}
	if let Some(func) = enclosing_function(unit, idx)
		&& literal.is_narrow
		&& *literal.text == *func.name
	{
		trace!(idx, "skip literal: function-name identity literal");
		return Classification::Skip;
	}
	if literal.value.is_none() {
		trace!(idx, "skip literal: evaluation failed");
		return Classification::Skip;
	}
	Classification::MagicLiteral
}

/// Whether the record reaches at least one field through itself or its bases.
pub fn record_has_any_fields(unit: &UnitFacts, record: &RecordFacts, depth: u32) -> bool {
	if depth >= MAX_BASE_DEPTH {
		return false;
	}
	if !record.fields.is_empty() {
		return true;
	}
	record.bases.iter().any(|base_idx| match unit.decl(*base_idx).map(|decl| &decl.kind) {
		Some(DeclKind::Record(base)) => record_has_any_fields(unit, base, depth + 1),
		_ => false,
	})
}

/// Nearest enclosing function declaration, if any.
pub fn enclosing_function(unit: &UnitFacts, idx: u32) -> Option<&Decl> {
	unit.ancestors(idx).map(|(_, decl)| decl).find(|decl| matches!(decl.kind, DeclKind::Func(_)))
}

fn literal_bound_to_var(unit: &UnitFacts, idx: u32) -> bool {
	unit.ancestors(idx).any(|(_, decl)| match &decl.kind {
		DeclKind::Var(var) => !var.is_param,
		_ => false,
	})
}
