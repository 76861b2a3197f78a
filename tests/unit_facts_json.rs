//! Facts files arrive as JSON from the host front end; absent fields take
//! their defaults.

use hdrconst::consts::{Classification, UnitFacts, classify, dump_unit};

#[test]
fn minimal_var_row_parses_and_dumps() {
	let json = r#"{
		"decls": [
			{
				"name": "x",
				"qualified_name": "x",
				"kind": {
					"var": {
						"literal_type": true,
						"has_init": true,
						"is_constexpr": true,
						"value": { "int": 100 }
					}
				}
			}
		]
	}"#;
	let unit: UnitFacts = serde_json::from_str(json).expect("facts json");
	assert_eq!(classify(&unit, 0), Classification::Scalar);
	assert_eq!(dump_unit(&unit), "x:=100\n");
}

#[test]
fn enum_row_defaults_underlying_width() {
	let json = r#"{
		"decls": [
			{
				"name": "Flag",
				"qualified_name": "Flag",
				"kind": {
					"enum": {
						"enumerators": [
							{ "qualified_name": "ON", "value": 1 }
						]
					}
				}
			}
		]
	}"#;
	let unit: UnitFacts = serde_json::from_str(json).expect("facts json");
	assert_eq!(dump_unit(&unit), "enum Flag {\nON:=1,\n}\n");
}

#[test]
fn uninteresting_rows_are_skipped_silently() {
	let json = r#"{
		"decls": [
			{ "name": "ns", "qualified_name": "ns", "kind": "namespace" },
			{
				"name": "v",
				"qualified_name": "ns::v",
				"parent": 0,
				"kind": { "var": { "literal_type": true } }
			}
		]
	}"#;
	let unit: UnitFacts = serde_json::from_str(json).expect("facts json");
	assert_eq!(classify(&unit, 1), Classification::Skip);
	assert_eq!(dump_unit(&unit), "");
}
