use std::path::PathBuf;

use hdrconst::consts::Result;

use crate::cmd::util;

pub fn run(path: PathBuf, format: &str, lenient: bool) -> Result<()> {
	let format = util::parse_format(format)?;
	let scope = util::decode_file(&path, lenient)?;
	util::print_scope(&scope, format)
}
