use crate::consts::value::{CharWidth, ConstValue};

/// Delimiter for single characters.
pub const CHAR_DELIM: char = '\'';
/// Delimiter for strings.
pub const STRING_DELIM: char = '"';
/// Escape character used inside quoted values.
pub const ESCAPE_CHAR: char = '\\';
/// Sentinel emitted for values with no defined rendering rule.
pub const NON_LITERAL: &str = "<non-literal>";

/// Render one typed value into the stream grammar.
pub fn encode_value(value: &ConstValue) -> String {
	let mut out = String::new();
	write_value(&mut out, value);
	out
}

fn write_value(out: &mut String, value: &ConstValue) {
	match value {
		ConstValue::Bool(v) => out.push_str(if *v { "true" } else { "false" }),
		ConstValue::Int(v) => out.push_str(&v.to_string()),
		ConstValue::Uint(v) => out.push_str(&v.to_string()),
		ConstValue::Float(v) => out.push_str(&format_float(*v)),
		ConstValue::Char { code, width } => write_char(out, *code, *width),
		ConstValue::Str { codes, .. } => write_quoted(out, codes),
		ConstValue::Array { elems } => write_array(out, elems),
		ConstValue::Record { type_name, bases, fields } => write_record(out, type_name.as_deref(), bases, fields),
		ConstValue::NonLiteral => out.push_str(NON_LITERAL),
	}
}

/// Scientific form whose mantissa always carries a decimal point, so the
/// decoder can tell floats from integers without a type tag.
fn format_float(v: f64) -> String {
	let s = format!("{v:e}");
	match s.find('e') {
		Some(pos) if !s[..pos].contains('.') => format!("{}.0{}", &s[..pos], &s[pos..]),
		_ => s,
	}
}

fn write_char(out: &mut String, code: u32, width: CharWidth) {
	match width {
		CharWidth::Narrow => {
			out.push(CHAR_DELIM);
			write_escaped(out, code, CHAR_DELIM);
			out.push(CHAR_DELIM);
		}
		// Wide and fixed-width characters render through their type name so
		// the decoder can pick the right code-unit interpretation.
		_ => {
			out.push_str(width.type_name());
			out.push('(');
			out.push_str(&code.to_string());
			out.push(')');
		}
	}
}

fn write_quoted(out: &mut String, codes: &[u32]) {
	out.push(STRING_DELIM);
	for code in codes {
		write_escaped(out, *code, STRING_DELIM);
	}
	out.push(STRING_DELIM);
}

/// Printable ASCII passes through (delimiter and escape get a backslash);
/// non-printable byte values become zero-padded 3-digit octal escapes.
/// Code points above one byte pass through verbatim so the escape stays
/// within the decoder's 3-digit window.
fn write_escaped(out: &mut String, code: u32, delim: char) {
	if (0x20..0x7F).contains(&code) {
		let ch = char::from(code as u8);
		if ch == delim || ch == ESCAPE_CHAR {
			out.push(ESCAPE_CHAR);
		}
		out.push(ch);
	} else if code <= 0xFF {
		out.push(ESCAPE_CHAR);
		out.push_str(&format!("{code:03o}"));
	} else {
		match char::from_u32(code) {
			Some(ch) => out.push(ch),
			None => {
				out.push(ESCAPE_CHAR);
				out.push_str(&format!("{code:03o}"));
			}
		}
	}
}

fn write_array(out: &mut String, elems: &[ConstValue]) {
	match elems.first() {
		Some(ConstValue::Char { width: CharWidth::Narrow, .. }) => {
			let mut codes: Vec<u32> = elems
				.iter()
				.map(|elem| match elem {
					ConstValue::Char { code, .. } => *code,
					_ => 0,
				})
				.collect();
			// C-string semantics already imply the terminator.
			if codes.last() == Some(&0) {
				codes.pop();
			}
			write_quoted(out, &codes);
		}
		Some(ConstValue::Char { width, .. }) => {
			out.push_str(width.type_name());
			out.push_str("[]");
			write_elements(out, elems);
		}
		_ => write_elements(out, elems),
	}
}

fn write_elements(out: &mut String, elems: &[ConstValue]) {
	out.push('(');
	for (i, elem) in elems.iter().enumerate() {
		if i > 0 {
			out.push(',');
		}
		write_value(out, elem);
	}
	out.push(')');
}

fn write_record(out: &mut String, type_name: Option<&str>, bases: &[ConstValue], fields: &[ConstValue]) {
	if let Some(name) = type_name {
		out.push_str(name);
	}
	let mut parts = Vec::new();
	collect_contributions(&mut parts, bases, fields);
	out.push('(');
	out.push_str(&parts.join(","));
	out.push(')');
}

/// Depth-first flattening of base sub-values ahead of own fields.
///
/// A base that contributes no field anywhere in its own chain is elided
/// entirely; joining the flattened parts afterwards makes comma elision an
/// explicit property of the collected list instead of printing control flow.
fn collect_contributions(parts: &mut Vec<String>, bases: &[ConstValue], fields: &[ConstValue]) {
	for base in bases {
		if let ConstValue::Record {
			bases: base_bases,
			fields: base_fields,
			..
		} = base
			&& base.has_any_fields()
		{
			collect_contributions(parts, base_bases, base_fields);
		}
	}
	for field in fields {
		parts.push(encode_value(field));
	}
}

#[cfg(test)]
mod tests {
	use super::encode_value;
	use crate::consts::value::{CharWidth, ConstValue};

	fn narrow(code: u32) -> ConstValue {
		ConstValue::Char {
			code,
			width: CharWidth::Narrow,
		}
	}

	#[test]
	fn scalars_render_in_decimal() {
		assert_eq!(encode_value(&ConstValue::Int(100)), "100");
		assert_eq!(encode_value(&ConstValue::Int(-7)), "-7");
		assert_eq!(encode_value(&ConstValue::Uint(u64::MAX)), "18446744073709551615");
		assert_eq!(encode_value(&ConstValue::Bool(true)), "true");
	}

	#[test]
	fn floats_render_in_dotted_scientific_form() {
		assert_eq!(encode_value(&ConstValue::Float(2.5)), "2.5e0");
		assert_eq!(encode_value(&ConstValue::Float(100.0)), "1.0e2");
		assert_eq!(encode_value(&ConstValue::Float(-0.25)), "-2.5e-1");
	}

	#[test]
	fn printable_narrow_char_is_quoted() {
		assert_eq!(encode_value(&narrow(u32::from(b'A'))), "'A'");
	}

	#[test]
	fn control_chars_use_three_octal_digits() {
		assert_eq!(encode_value(&narrow(10)), "'\\012'");
		assert_eq!(encode_value(&narrow(0)), "'\\000'");
		assert_eq!(encode_value(&narrow(0x7F)), "'\\177'");
		assert_eq!(encode_value(&narrow(0xFF)), "'\\377'");
	}

	#[test]
	fn delimiter_and_escape_are_backslashed() {
		assert_eq!(encode_value(&narrow(u32::from(b'\''))), "'\\''");
		assert_eq!(encode_value(&narrow(u32::from(b'\\'))), "'\\\\'");
		let text = ConstValue::Str {
			codes: vec![u32::from(b'a'), u32::from(b'"'), u32::from(b'b')],
			width: CharWidth::Narrow,
		};
		assert_eq!(encode_value(&text), "\"a\\\"b\"");
	}

	#[test]
	fn wide_char_renders_through_type_name() {
		let ch = ConstValue::Char {
			code: 119,
			width: CharWidth::Wide,
		};
		assert_eq!(encode_value(&ch), "wchar_t(119)");
	}

	#[test]
	fn narrow_char_array_renders_as_string_with_terminator_trimmed() {
		let arr = ConstValue::Array {
			elems: vec![narrow(u32::from(b'h')), narrow(u32::from(b'i')), narrow(0)],
		};
		assert_eq!(encode_value(&arr), "\"hi\"");
	}

	#[test]
	fn wide_char_array_renders_with_element_type_prefix() {
		let arr = ConstValue::Array {
			elems: vec![
				ConstValue::Char {
					code: 104,
					width: CharWidth::Utf16,
				},
				ConstValue::Char {
					code: 105,
					width: CharWidth::Utf16,
				},
			],
		};
		assert_eq!(encode_value(&arr), "char16_t[](char16_t(104),char16_t(105))");
	}

	#[test]
	fn plain_array_renders_parenthesized() {
		let arr = ConstValue::Array {
			elems: vec![ConstValue::Int(1), ConstValue::Int(2), ConstValue::Int(3)],
		};
		assert_eq!(encode_value(&arr), "(1,2,3)");
	}

	#[test]
	fn named_record_prefixes_type_name() {
		let point = ConstValue::Record {
			type_name: Some("geo::Point".into()),
			bases: Vec::new(),
			fields: vec![ConstValue::Int(3), ConstValue::Int(4)],
		};
		assert_eq!(encode_value(&point), "geo::Point(3,4)");
	}

	#[test]
	fn empty_base_is_elided_without_spurious_separators() {
		let empty_base = ConstValue::Record {
			type_name: Some("Tag".into()),
			bases: Vec::new(),
			fields: Vec::new(),
		};
		let derived = ConstValue::Record {
			type_name: Some("Derived".into()),
			bases: vec![empty_base],
			fields: vec![ConstValue::Int(7)],
		};
		assert_eq!(encode_value(&derived), "Derived(7)");
	}

	#[test]
	fn fields_only_in_final_base_yield_single_list_without_trailing_comma() {
		let empty = ConstValue::Record {
			type_name: Some("A".into()),
			bases: Vec::new(),
			fields: Vec::new(),
		};
		let carrier = ConstValue::Record {
			type_name: Some("B".into()),
			bases: Vec::new(),
			fields: vec![ConstValue::Int(1), ConstValue::Int(2)],
		};
		let derived = ConstValue::Record {
			type_name: Some("C".into()),
			bases: vec![empty, carrier],
			fields: Vec::new(),
		};
		assert_eq!(encode_value(&derived), "C(1,2)");
	}

	#[test]
	fn base_fields_come_before_own_fields() {
		let base = ConstValue::Record {
			type_name: Some("Base".into()),
			bases: Vec::new(),
			fields: vec![ConstValue::Int(10)],
		};
		let derived = ConstValue::Record {
			type_name: Some("Derived".into()),
			bases: vec![base],
			fields: vec![ConstValue::Int(20)],
		};
		assert_eq!(encode_value(&derived), "Derived(10,20)");
	}

	#[test]
	fn non_literal_renders_sentinel() {
		assert_eq!(encode_value(&ConstValue::NonLiteral), "<non-literal>");
	}
}
