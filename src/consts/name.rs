use crate::consts::classify::enclosing_function;
use crate::consts::facts::{Decl, DeclKind, FuncFacts, RefQualifier, UnitFacts};

/// Terminal path segment given to anonymous literals.
pub const LITERAL_SEGMENT: &str = "(literal)";

/// Render the full signature form of a function name:
/// `qname(param1, param2[, ...])[ const][ volatile][ &|&&]`.
pub fn function_signature(decl: &Decl, func: &FuncFacts) -> String {
	let mut out = String::new();
	out.push_str(&decl.qualified_name);
	out.push('(');
	for (i, param) in func.params.iter().enumerate() {
		if i > 0 {
			out.push_str(", ");
		}
		out.push_str(param);
	}
	if func.variadic {
		if !func.params.is_empty() {
			out.push_str(", ");
		}
		out.push_str("...");
	}
	out.push(')');
	if func.is_const {
		out.push_str(" const");
	}
	if func.is_volatile {
		out.push_str(" volatile");
	}
	match func.ref_qualifier {
		RefQualifier::None => {}
		RefQualifier::Lvalue => out.push_str(" &"),
		RefQualifier::Rvalue => out.push_str(" &&"),
	}
	out
}

/// Compute the stream name for a magic literal at `idx`.
///
/// The nearest enclosing function wins and contributes its full signature;
/// otherwise the nearest named enclosing declaration contributes its
/// qualified name; a literal at global scope gets the bare terminal.
pub fn literal_name(unit: &UnitFacts, idx: u32) -> String {
	if let Some(func_decl) = enclosing_function(unit, idx)
		&& let DeclKind::Func(func) = &func_decl.kind
	{
		let mut name = function_signature(func_decl, func);
		name.push_str("::");
		name.push_str(LITERAL_SEGMENT);
		return name;
	}

	if let Some(owner) = nearest_named_ancestor(unit, idx) {
		let mut name = owner.qualified_name.to_string();
		name.push_str("::");
		name.push_str(LITERAL_SEGMENT);
		return name;
	}

	format!("::{LITERAL_SEGMENT}")
}

fn nearest_named_ancestor<'a>(unit: &'a UnitFacts, idx: u32) -> Option<&'a Decl> {
	unit.ancestors(idx).map(|(_, decl)| decl).find(|decl| !decl.qualified_name.is_empty())
}

#[cfg(test)]
mod tests {
	use super::{function_signature, literal_name};
	use crate::consts::facts::{Decl, DeclKind, FuncFacts, LiteralFacts, RefQualifier, UnitFacts};

	fn literal(parent: Option<u32>) -> Decl {
		Decl {
			name: "".into(),
			qualified_name: "".into(),
			parent,
			kind: DeclKind::Literal(LiteralFacts::default()),
		}
	}

	#[test]
	fn literal_in_function_gets_signature_scope() {
		let unit = UnitFacts {
			decls: vec![
				Decl {
					name: "f".into(),
					qualified_name: "ns::f".into(),
					parent: None,
					kind: DeclKind::Func(FuncFacts {
						has_body: true,
						params: vec!["int".into()],
						..FuncFacts::default()
					}),
				},
				literal(Some(0)),
			],
		};
		assert_eq!(literal_name(&unit, 1), "ns::f(int)::(literal)");
	}

	#[test]
	fn literal_in_namespace_gets_qualified_scope() {
		let unit = UnitFacts {
			decls: vec![
				Decl {
					name: "detail".into(),
					qualified_name: "ns::detail".into(),
					parent: None,
					kind: DeclKind::Namespace,
				},
				literal(Some(0)),
			],
		};
		assert_eq!(literal_name(&unit, 1), "ns::detail::(literal)");
	}

	#[test]
	fn global_literal_gets_bare_terminal() {
		let unit = UnitFacts { decls: vec![literal(None)] };
		assert_eq!(literal_name(&unit, 0), "::(literal)");
	}

	#[test]
	fn signature_renders_qualifiers_and_variadic() {
		let decl = Decl {
			name: "log".into(),
			qualified_name: "app::Logger::log".into(),
			parent: None,
			kind: DeclKind::Namespace,
		};
		let func = FuncFacts {
			params: vec!["const char *".into(), "int".into()],
			variadic: true,
			is_const: true,
			ref_qualifier: RefQualifier::Lvalue,
			..FuncFacts::default()
		};
		assert_eq!(function_signature(&decl, &func), "app::Logger::log(const char *, int, ...) const &");
	}

	#[test]
	fn variadic_without_params_has_no_leading_comma() {
		let decl = Decl {
			name: "trace".into(),
			qualified_name: "trace".into(),
			parent: None,
			kind: DeclKind::Namespace,
		};
		let func = FuncFacts {
			variadic: true,
			..FuncFacts::default()
		};
		assert_eq!(function_signature(&decl, &func), "trace(...)");
	}
}
