use std::path::PathBuf;

use hdrconst::consts::{Result, Scope};

use crate::cmd::util;

pub fn run(paths: Vec<PathBuf>, format: &str, lenient: bool) -> Result<()> {
	let format = util::parse_format(format)?;
	let mut merged = Scope::new();
	for path in &paths {
		merged.merge(util::decode_file(path, lenient)?);
	}
	util::print_scope(&merged, format)
}
