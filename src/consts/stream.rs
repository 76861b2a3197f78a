use tracing::debug;

use crate::consts::classify::{Classification, classify};
use crate::consts::encode::encode_value;
use crate::consts::facts::{DeclKind, UnitFacts};
use crate::consts::name::literal_name;
use crate::consts::shape::encode_shape;
use crate::consts::value::ConstValue;

/// Two-character token separating a name from its encoded value.
pub const VALUE_SEP: &str = ":=";
/// Line prefix marking magic-literal entries.
pub const LITERAL_PREFIX: &str = "#literal ";

/// One reportable item discovered in a translation unit.
#[derive(Debug, Clone, PartialEq)]
pub enum Entity {
	/// Constant variable.
	Scalar {
		/// Qualified name.
		name: Box<str>,
		/// Evaluated value.
		value: ConstValue,
	},
	/// Zero-argument constexpr function result.
	ConstFn {
		/// Qualified name.
		name: Box<str>,
		/// Evaluated call result.
		value: ConstValue,
	},
	/// Magic string/character literal.
	Literal {
		/// Computed scope-qualified name ending in `(literal)`.
		name: Box<str>,
		/// Evaluated value.
		value: ConstValue,
	},
	/// Enum declaration, one atomic block.
	Enum {
		/// Qualified enum name.
		name: Box<str>,
		/// Enumerator qualified names and values, in declaration order.
		enumerators: Vec<(Box<str>, i64)>,
	},
	/// Aggregate shape, structure only.
	Shape {
		/// Qualified type name.
		name: Box<str>,
		/// Rendered comma-separated field list.
		fields: Box<str>,
	},
}

/// Discover all reportable entities in a unit.
///
/// Shapes are collected in a first pass over the table and values in a
/// second, matching the original dump order; within each pass entities keep
/// translation-unit traversal order. Skipped declarations are dropped here
/// and never surface as errors.
pub fn collect_entities(unit: &UnitFacts) -> Vec<Entity> {
	let mut entities = Vec::new();

	for (idx, decl) in unit.decls.iter().enumerate() {
		let idx = idx as u32;
		if classify(unit, idx) != Classification::AggregateShape {
			continue;
		}
		if let DeclKind::Record(record) = &decl.kind {
			debug!(name = %decl.qualified_name, "emit shape");
			entities.push(Entity::Shape {
				name: decl.qualified_name.clone(),
				fields: encode_shape(unit, record).into_boxed_str(),
			});
		}
	}

	for (idx, decl) in unit.decls.iter().enumerate() {
		let idx = idx as u32;
		match classify(unit, idx) {
			Classification::Skip | Classification::AggregateShape => {}
			Classification::Scalar => {
				if let DeclKind::Var(var) = &decl.kind
					&& let Some(value) = &var.value
				{
					debug!(name = %decl.qualified_name, "emit scalar");
					entities.push(Entity::Scalar {
						name: decl.qualified_name.clone(),
						value: value.clone(),
					});
				}
			}
			Classification::ZeroArgConstFn => {
				if let DeclKind::Func(func) = &decl.kind
					&& let Some(value) = &func.value
				{
					debug!(name = %decl.qualified_name, "emit constexpr fn result");
					entities.push(Entity::ConstFn {
						name: decl.qualified_name.clone(),
						value: value.clone(),
					});
				}
			}
			Classification::MagicLiteral => {
				if let DeclKind::Literal(literal) = &decl.kind
					&& let Some(value) = &literal.value
				{
					let name = literal_name(unit, idx);
					debug!(name = %name, "emit magic literal");
					entities.push(Entity::Literal {
						name: name.into_boxed_str(),
						value: value.clone(),
					});
				}
			}
			Classification::Enum => {
				if let DeclKind::Enum(item) = &decl.kind {
					debug!(name = %decl.qualified_name, "emit enum block");
					entities.push(Entity::Enum {
						name: decl.qualified_name.clone(),
						enumerators: item.enumerators.iter().map(|e| (e.qualified_name.clone(), e.value)).collect(),
					});
				}
			}
		}
	}

	entities
}

/// Render entities into the final text stream.
pub fn render_stream(entities: &[Entity]) -> String {
	let mut out = String::new();
	for entity in entities {
		match entity {
			Entity::Scalar { name, value } | Entity::ConstFn { name, value } => {
				out.push_str(name);
				out.push_str(VALUE_SEP);
				out.push_str(&encode_value(value));
				out.push('\n');
			}
			Entity::Literal { name, value } => {
				out.push_str(LITERAL_PREFIX);
				out.push_str(name);
				out.push_str(VALUE_SEP);
				out.push_str(&encode_value(value));
				out.push('\n');
			}
			Entity::Enum { name, enumerators } => {
				out.push_str("enum ");
				out.push_str(name);
				out.push_str(" {\n");
				for (enumerator, value) in enumerators {
					out.push_str(enumerator);
					out.push_str(VALUE_SEP);
					out.push_str(&value.to_string());
					out.push_str(",\n");
				}
				out.push_str("}\n");
			}
			Entity::Shape { name, fields } => {
				out.push_str(name);
				out.push('{');
				out.push_str(fields);
				out.push_str("}\n");
			}
		}
	}
	out
}

/// Discover and render one unit in a single call.
pub fn dump_unit(unit: &UnitFacts) -> String {
	render_stream(&collect_entities(unit))
}

#[cfg(test)]
mod tests {
	use super::{Entity, collect_entities, render_stream};
	use crate::consts::facts::{Decl, DeclKind, EnumFacts, EnumeratorFacts, LiteralFacts, RecordFacts, UnitFacts, VarFacts};
	use crate::consts::value::{CharWidth, ConstValue};

	fn str_value(text: &str) -> ConstValue {
		ConstValue::Str {
			codes: text.chars().map(u32::from).collect(),
			width: CharWidth::Narrow,
		}
	}

	#[test]
	fn enum_block_renders_with_trailing_commas() {
		let unit = UnitFacts {
			decls: vec![Decl {
				name: "Color".into(),
				qualified_name: "ui::Color".into(),
				parent: None,
				kind: DeclKind::Enum(EnumFacts {
					enumerators: vec![
						EnumeratorFacts {
							qualified_name: "ui::Color::RED".into(),
							value: 0,
						},
						EnumeratorFacts {
							qualified_name: "ui::Color::GREEN".into(),
							value: 1,
						},
						EnumeratorFacts {
							qualified_name: "ui::Color::BLUE".into(),
							value: 2,
						},
					],
					..EnumFacts::default()
				}),
			}],
		};
		let stream = render_stream(&collect_entities(&unit));
		assert_eq!(
			stream,
			"enum ui::Color {\nui::Color::RED:=0,\nui::Color::GREEN:=1,\nui::Color::BLUE:=2,\n}\n"
		);
	}

	#[test]
	fn scalar_line_uses_value_separator() {
		let unit = UnitFacts {
			decls: vec![Decl {
				name: "x".into(),
				qualified_name: "x".into(),
				parent: None,
				kind: DeclKind::Var(VarFacts {
					literal_type: true,
					has_init: true,
					is_constexpr: true,
					value: Some(ConstValue::Int(100)),
					..VarFacts::default()
				}),
			}],
		};
		assert_eq!(render_stream(&collect_entities(&unit)), "x:=100\n");
	}

	#[test]
	fn literal_line_carries_prefix_and_scope_name() {
		let unit = UnitFacts {
			decls: vec![
				Decl {
					name: "f".into(),
					qualified_name: "ns::f".into(),
					parent: None,
					kind: DeclKind::Func(crate::consts::facts::FuncFacts {
						has_body: true,
						params: vec!["int".into()],
						..Default::default()
					}),
				},
				Decl {
					name: "".into(),
					qualified_name: "".into(),
					parent: Some(0),
					kind: DeclKind::Literal(LiteralFacts {
						is_narrow: true,
						text: "oops".into(),
						value: Some(str_value("oops")),
						..LiteralFacts::default()
					}),
				},
			],
		};
		assert_eq!(render_stream(&collect_entities(&unit)), "#literal ns::f(int)::(literal):=\"oops\"\n");
	}

	#[test]
	fn shapes_are_emitted_ahead_of_values() {
		let unit = UnitFacts {
			decls: vec![
				Decl {
					name: "x".into(),
					qualified_name: "x".into(),
					parent: None,
					kind: DeclKind::Var(VarFacts {
						literal_type: true,
						has_init: true,
						is_constexpr: true,
						value: Some(ConstValue::Int(1)),
						..VarFacts::default()
					}),
				},
				Decl {
					name: "Point".into(),
					qualified_name: "geo::Point".into(),
					parent: None,
					kind: DeclKind::Record(RecordFacts {
						has_definition: true,
						literal_type: true,
						fields: vec!["x".into(), "y".into()],
						..RecordFacts::default()
					}),
				},
			],
		};
		let entities = collect_entities(&unit);
		assert!(matches!(&entities[0], Entity::Shape { .. }));
		assert_eq!(render_stream(&entities), "geo::Point{x,y}\nx:=1\n");
	}
}
