//! Merging streams from several translation units into one tree.

use hdrconst::consts::{Decoded, Node, decode};

#[test]
fn later_units_win_on_shared_names() {
	let mut merged = decode("app::limit:=10\napp::name:=\"alpha\"\n").expect("first");
	merged.merge(decode("app::limit:=20\napp::extra:=true\n").expect("second"));

	assert_eq!(merged.value("app::limit"), Some(Decoded::Int(20)));
	assert_eq!(merged.value("app::name"), Some(Decoded::Str("alpha".into())));
	assert_eq!(merged.value("app::extra"), Some(Decoded::Bool(true)));
}

#[test]
fn sub_scopes_merge_instead_of_replacing() {
	let mut merged = decode("app::ui::width:=640\n").expect("first");
	merged.merge(decode("app::ui::height:=480\n").expect("second"));

	assert_eq!(merged.value("app::ui::width"), Some(Decoded::Int(640)));
	assert_eq!(merged.value("app::ui::height"), Some(Decoded::Int(480)));
}

#[test]
fn enums_and_shapes_survive_a_merge() {
	let mut merged = decode("enum ui::Color {\nui::Color::RED:=0,\n}\n").expect("first");
	merged.merge(decode("geo::Point{x,y}\ngeo::Point::UNIT:=1\n").expect("second"));

	assert!(matches!(merged.node("ui::Color"), Some(Node::Enum(_))));
	assert!(merged.shape("geo::Point").is_some());
	assert_eq!(merged.value("geo::Point::UNIT"), Some(Decoded::Int(1)));

	let enums = merged.enums();
	assert_eq!(enums.len(), 1);
	assert_eq!(enums[0].0, "ui::Color");
}
