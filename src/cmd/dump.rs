use std::path::PathBuf;

use hdrconst::consts::{Result, UnitFacts, dump_unit};

pub fn run(facts: PathBuf) -> Result<()> {
	let data = std::fs::read_to_string(&facts)?;
	let unit: UnitFacts = serde_json::from_str(&data)?;
	print!("{}", dump_unit(&unit));
	Ok(())
}
