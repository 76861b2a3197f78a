use std::path::PathBuf;

use hdrconst::consts::Result;

use crate::cmd::util;

pub fn run(path: PathBuf, lenient: bool) -> Result<()> {
	let scope = util::decode_file(&path, lenient)?;
	for (name, def) in scope.enums() {
		let items: Vec<String> = def.items().map(|(item, value)| format!("{item}={value}")).collect();
		println!("{name}\t[{}]", items.join(", "));
	}
	Ok(())
}
