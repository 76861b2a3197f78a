use std::path::Path;

use hdrconst::consts::{ConstError, DecodeOptions, Decoded, Node, Result, Scope, decode_with, split_last};

/// Selected rendering of a decoded scope.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum OutputFormat {
	Tree,
	Pretty,
	Json,
}

pub(crate) fn parse_format(format: &str) -> Result<OutputFormat> {
	match format {
		"tree" => Ok(OutputFormat::Tree),
		"pretty" => Ok(OutputFormat::Pretty),
		"json" => Ok(OutputFormat::Json),
		_ => Err(ConstError::InvalidFormat { format: format.to_owned() }),
	}
}

pub(crate) fn decode_file(path: &Path, lenient: bool) -> Result<Scope> {
	let input = std::fs::read_to_string(path)?;
	let options = DecodeOptions { strict: !lenient };
	decode_with(&input, &options)
}

pub(crate) fn print_scope(scope: &Scope, format: OutputFormat) -> Result<()> {
	match format {
		OutputFormat::Tree => print!("{}", render_tree(scope)),
		OutputFormat::Pretty => print!("{}", render_pretty(scope)),
		OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&scope_to_json(scope))?),
	}
	Ok(())
}

/// Render the scope as an ASCII tree, one branch per entry.
pub(crate) fn render_tree(scope: &Scope) -> String {
	let mut out = String::new();
	tree_lines(scope, "", &mut out);
	out
}

fn tree_lines(scope: &Scope, prefix: &str, out: &mut String) {
	let count = scope.len();
	for (i, (name, node)) in scope.entries().enumerate() {
		let last = i + 1 == count;
		let branch = if last { "`--- " } else { "+--- " };
		let cont = if last { "     " } else { "|    " };
		match node {
			Node::Value(value) => {
				out.push_str(prefix);
				out.push_str(branch);
				out.push_str(name);
				out.push_str(": ");
				out.push_str(&render_decoded(value));
				out.push('\n');
			}
			Node::Enum(def) => {
				out.push_str(prefix);
				out.push_str(branch);
				out.push_str(name);
				out.push_str(" (enum)\n");
				let inner = format!("{prefix}{cont}");
				for (j, (item, value)) in def.items().enumerate() {
					let b = if j + 1 == def.len() { "`--- " } else { "+--- " };
					out.push_str(&inner);
					out.push_str(b);
					out.push_str(item);
					out.push_str(": ");
					out.push_str(&value.to_string());
					out.push('\n');
				}
			}
			Node::Scope(sub) => {
				out.push_str(prefix);
				out.push_str(branch);
				out.push_str(name);
				out.push('\n');
				tree_lines(sub, &format!("{prefix}{cont}"), out);
			}
		}
	}
}

/// Render the scope as indented blocks, shapes included.
pub(crate) fn render_pretty(scope: &Scope) -> String {
	let mut out = String::new();
	pretty_lines(scope, 0, &mut out);
	out
}

fn pretty_lines(scope: &Scope, depth: usize, out: &mut String) {
	let indent = "  ".repeat(depth);
	for shape in scope.shapes() {
		out.push_str(&indent);
		out.push_str("struct ");
		out.push_str(split_last(&shape.qualified_name).1);
		out.push_str(" {");
		out.push_str(&shape.fields.join(", "));
		out.push_str("}\n");
	}
	for (name, node) in scope.entries() {
		match node {
			Node::Value(value) => {
				out.push_str(&indent);
				out.push_str(name);
				out.push_str(" = ");
				out.push_str(&render_decoded(value));
				out.push('\n');
			}
			Node::Enum(def) => {
				out.push_str(&indent);
				out.push_str("enum ");
				out.push_str(name);
				out.push_str(":\n");
				for (item, value) in def.items() {
					out.push_str(&indent);
					out.push_str("  ");
					out.push_str(item);
					out.push_str(" = ");
					out.push_str(&value.to_string());
					out.push('\n');
				}
			}
			Node::Scope(sub) => {
				out.push_str(&indent);
				out.push_str(name);
				out.push_str(":\n");
				pretty_lines(sub, depth + 1, out);
			}
		}
	}
}

/// One-line display form of a decoded value.
pub(crate) fn render_decoded(value: &Decoded) -> String {
	match value {
		Decoded::Bool(v) => v.to_string(),
		Decoded::Int(v) => v.to_string(),
		Decoded::Uint(v) => v.to_string(),
		Decoded::Float(v) => v.to_string(),
		Decoded::Char(c) => format!("{c:?}"),
		Decoded::Str(s) => format!("{s:?}"),
		Decoded::Bytes(b) => format!("{b:?}"),
		Decoded::List(items) => format!("[{}]", join_decoded(items)),
		Decoded::Tuple(items) => format!("({})", join_decoded(items)),
		Decoded::NonLiteral => "<non-literal>".to_owned(),
		Decoded::Raw(s) => s.to_string(),
	}
}

fn join_decoded(items: &[Decoded]) -> String {
	items.iter().map(render_decoded).collect::<Vec<_>>().join(", ")
}

pub(crate) fn scope_to_json(scope: &Scope) -> serde_json::Value {
	let mut map = serde_json::Map::new();
	for (name, node) in scope.entries() {
		map.insert(name.to_owned(), node_to_json(node));
	}
	serde_json::Value::Object(map)
}

fn node_to_json(node: &Node) -> serde_json::Value {
	match node {
		Node::Value(value) => decoded_to_json(value),
		Node::Scope(scope) => scope_to_json(scope),
		Node::Enum(def) => {
			let mut map = serde_json::Map::new();
			for (item, value) in def.items() {
				map.insert(item.to_owned(), serde_json::json!(value));
			}
			serde_json::Value::Object(map)
		}
	}
}

fn decoded_to_json(value: &Decoded) -> serde_json::Value {
	match value {
		Decoded::Bool(v) => serde_json::json!(v),
		Decoded::Int(v) => serde_json::json!(v),
		Decoded::Uint(v) => serde_json::json!(v),
		Decoded::Float(v) => serde_json::json!(v),
		Decoded::Char(c) => serde_json::json!(c.to_string()),
		Decoded::Str(s) => serde_json::json!(s.as_ref()),
		Decoded::Bytes(b) => serde_json::json!(b),
		Decoded::List(items) | Decoded::Tuple(items) => serde_json::Value::Array(items.iter().map(decoded_to_json).collect()),
		Decoded::NonLiteral => serde_json::Value::Null,
		Decoded::Raw(s) => serde_json::json!(s.as_ref()),
	}
}

#[cfg(test)]
mod tests {
	use super::{render_decoded, render_tree, scope_to_json};
	use hdrconst::consts::{Decoded, Scope, decode};

	#[test]
	fn tree_marks_last_branch() {
		let mut scope = Scope::new();
		scope.insert_value("app::a", Decoded::Int(1));
		scope.insert_value("app::b", Decoded::Int(2));
		assert_eq!(render_tree(&scope), "`--- app\n     +--- a: 1\n     `--- b: 2\n");
	}

	#[test]
	fn decoded_values_render_like_source() {
		assert_eq!(render_decoded(&Decoded::Char('\n')), "'\\n'");
		assert_eq!(render_decoded(&Decoded::Str("hi".into())), "\"hi\"");
		assert_eq!(
			render_decoded(&Decoded::Tuple(vec![Decoded::Int(3), Decoded::Int(4)])),
			"(3, 4)"
		);
	}

	#[test]
	fn json_view_nests_scopes_and_enums() {
		let scope = decode("enum ui::Color {\nui::Color::RED:=0,\n}\nui::size:=5\n").expect("decode");
		let json = scope_to_json(&scope);
		assert_eq!(json["ui"]["Color"]["RED"], serde_json::json!(0));
		assert_eq!(json["ui"]["size"], serde_json::json!(5));
	}
}
