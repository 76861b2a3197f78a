use crate::consts::facts::{DeclKind, RecordFacts, UnitFacts};

/// Base chains deeper than this stop contributing field names.
const MAX_BASE_DEPTH: u32 = 64;

/// Render the structure of a record declaration: flattened base field names
/// depth-first, then own field names, comma-separated without a trailing
/// comma. Bases that contribute nothing are elided entirely.
pub fn encode_shape(unit: &UnitFacts, record: &RecordFacts) -> String {
	let mut parts = Vec::new();
	collect_field_names(unit, record, &mut parts, 0);
	parts.join(",")
}

fn collect_field_names<'a>(unit: &'a UnitFacts, record: &'a RecordFacts, parts: &mut Vec<&'a str>, depth: u32) {
	if depth >= MAX_BASE_DEPTH {
		return;
	}
	for base_idx in &record.bases {
		if let Some(DeclKind::Record(base)) = unit.decl(*base_idx).map(|decl| &decl.kind) {
			collect_field_names(unit, base, parts, depth + 1);
		}
	}
	for field in &record.fields {
		parts.push(field);
	}
}

#[cfg(test)]
mod tests {
	use super::encode_shape;
	use crate::consts::facts::{Decl, DeclKind, RecordFacts, UnitFacts};

	fn record_decl(name: &str, fields: &[&str], bases: &[u32]) -> Decl {
		Decl {
			name: name.into(),
			qualified_name: name.into(),
			parent: None,
			kind: DeclKind::Record(RecordFacts {
				has_definition: true,
				literal_type: true,
				fields: fields.iter().map(|f| Box::from(*f)).collect(),
				bases: bases.to_vec(),
				..RecordFacts::default()
			}),
		}
	}

	fn record(unit: &UnitFacts, idx: u32) -> &RecordFacts {
		match &unit.decls[idx as usize].kind {
			DeclKind::Record(record) => record,
			_ => unreachable!(),
		}
	}

	#[test]
	fn own_fields_join_without_trailing_comma() {
		let unit = UnitFacts {
			decls: vec![record_decl("Point", &["x", "y"], &[])],
		};
		assert_eq!(encode_shape(&unit, record(&unit, 0)), "x,y");
	}

	#[test]
	fn base_fields_flatten_ahead_of_own_fields() {
		let unit = UnitFacts {
			decls: vec![record_decl("Base", &["id"], &[]), record_decl("Derived", &["x"], &[0])],
		};
		assert_eq!(encode_shape(&unit, record(&unit, 1)), "id,x");
	}

	#[test]
	fn empty_base_contributes_nothing() {
		let unit = UnitFacts {
			decls: vec![record_decl("Tag", &[], &[]), record_decl("Derived", &["x"], &[0])],
		};
		assert_eq!(encode_shape(&unit, record(&unit, 1)), "x");
	}

	#[test]
	fn deep_base_chain_flattens_depth_first() {
		let unit = UnitFacts {
			decls: vec![
				record_decl("A", &["a"], &[]),
				record_decl("B", &["b"], &[0]),
				record_decl("C", &["c"], &[1]),
			],
		};
		assert_eq!(encode_shape(&unit, record(&unit, 2)), "a,b,c");
	}
}
