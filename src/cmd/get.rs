use std::path::PathBuf;

use hdrconst::consts::{ConstError, Node, Result};

use crate::cmd::util;

pub fn run(path: PathBuf, name: &str, lenient: bool) -> Result<()> {
	let scope = util::decode_file(&path, lenient)?;

	if let Some(value) = scope.value(name) {
		println!("{}", util::render_decoded(&value));
		return Ok(());
	}
	match scope.node(name) {
		Some(Node::Enum(def)) => {
			let items: Vec<String> = def.items().map(|(item, value)| format!("{item} = {value}")).collect();
			println!("enum {} {{{}}}", def.name, items.join(", "));
			return Ok(());
		}
		Some(Node::Scope(sub)) => {
			print!("{}", util::render_tree(sub));
			return Ok(());
		}
		_ => {}
	}
	if let Some(shape) = scope.shape(name) {
		println!("{}{{{}}}", shape.qualified_name, shape.fields.join(","));
		return Ok(());
	}

	Err(ConstError::NameNotFound { name: name.to_owned() })
}
