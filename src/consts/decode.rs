use std::collections::HashMap;

use tracing::warn;

use crate::consts::encode::{CHAR_DELIM, ESCAPE_CHAR, NON_LITERAL, STRING_DELIM};
use crate::consts::error::{ConstError, Result};
use crate::consts::name::LITERAL_SEGMENT;
use crate::consts::scope::{Decoded, EnumDef, Node, Scope, split_last};
use crate::consts::stream::{LITERAL_PREFIX, VALUE_SEP};
use crate::consts::value::CharWidth;

/// Decoder behavior switches.
#[derive(Debug, Clone)]
pub struct DecodeOptions {
	/// When set, a line matching no stream production is an error. When
	/// clear, such lines are logged and skipped; block-structure errors and
	/// name collisions still fail either way.
	pub strict: bool,
}

impl Default for DecodeOptions {
	fn default() -> Self {
		DecodeOptions { strict: true }
	}
}

/// Decode one stream into a fresh scope tree with default options.
pub fn decode(input: &str) -> Result<Scope> {
	decode_with(input, &DecodeOptions::default())
}

/// Decode one stream into a fresh scope tree.
pub fn decode_with(input: &str, options: &DecodeOptions) -> Result<Scope> {
	let mut scope = Scope::new();
	decode_into(input, options, &mut scope)?;
	Ok(scope)
}

/// Decode one stream into an existing scope, last write wins per path.
pub fn decode_into(input: &str, options: &DecodeOptions, scope: &mut Scope) -> Result<()> {
	let mut decoder = Decoder {
		scope,
		open_enum: None,
		literal_counts: HashMap::new(),
		anon_enum_counts: HashMap::new(),
	};
	for (i, raw) in input.lines().enumerate() {
		let line_no = i + 1;
		match decoder.line(line_no, raw) {
			Ok(()) => {}
			Err(err) if !options.strict && err.is_line_local() => {
				warn!(line_no, %err, "skipping unparsed line");
			}
			Err(err) => return Err(err),
		}
	}
	if let Some(name) = decoder.open_enum {
		return Err(ConstError::UnterminatedEnumBlock { name });
	}
	Ok(())
}

impl ConstError {
	/// Whether the error is confined to a single line and can be skipped in
	/// lenient decoding without corrupting block structure.
	fn is_line_local(&self) -> bool {
		matches!(
			self,
			ConstError::MalformedLine { .. }
				| ConstError::BadEnumerator { .. }
				| ConstError::UnterminatedQuote { .. }
				| ConstError::UnbalancedDelimiters { .. }
		)
	}
}

struct Decoder<'a> {
	scope: &'a mut Scope,
	/// Qualified path of the enum block currently open, if any.
	open_enum: Option<String>,
	/// Per-scope counters disambiguating repeated literal names.
	literal_counts: HashMap<String, usize>,
	/// Per-scope counters naming anonymous enums.
	anon_enum_counts: HashMap<String, usize>,
}

impl Decoder<'_> {
	fn line(&mut self, line_no: usize, raw: &str) -> Result<()> {
		let line = raw.trim();
		if line.is_empty() {
			return Ok(());
		}
		if let Some(name) = enum_header(line) {
			return self.open_enum(line_no, name);
		}
		if line == "}" {
			if self.open_enum.take().is_none() {
				return Err(ConstError::StrayEnumEnd { line_no });
			}
			return Ok(());
		}
		if self.open_enum.is_some() {
			return self.enumerator(line_no, line);
		}
		if let Some(rest) = line.strip_prefix(LITERAL_PREFIX) {
			return self.literal(line_no, line, rest);
		}
		if let Some(pos) = line.find(VALUE_SEP) {
			return self.constant(line_no, line, pos);
		}
		if let Some((name, fields)) = shape_line(line) {
			return self.shape(name, fields);
		}
		Err(ConstError::MalformedLine {
			line_no,
			line: line.to_string(),
		})
	}

	fn open_enum(&mut self, line_no: usize, name: &str) -> Result<()> {
		if self.open_enum.is_some() {
			return Err(ConstError::NestedEnumBlock {
				line_no,
				name: name.to_string(),
			});
		}
		let (prefix, last) = split_last(name);
		let path = if is_anonymous_segment(last) {
			let n = next_count(&mut self.anon_enum_counts, prefix.unwrap_or(""));
			format!("{name}`{n}")
		} else {
			name.to_string()
		};
		let def = EnumDef::new(split_last(&path).1);
		self.scope.insert_node(&path, Node::Enum(def));
		self.open_enum = Some(path);
		Ok(())
	}

	fn enumerator(&mut self, line_no: usize, line: &str) -> Result<()> {
		let bad = || ConstError::BadEnumerator {
			line_no,
			line: line.to_string(),
		};
		let Some(pos) = line.find(VALUE_SEP) else {
			return Err(bad());
		};
		let name = line[..pos].trim();
		let text = strip_trailing_comma(&line[pos + VALUE_SEP.len()..]);
		let Ok(Decoded::Int(value)) = parse_value(text) else {
			return Err(bad());
		};
		if name.is_empty() {
			return Err(bad());
		}
		// The enumerator lands twice: once under its own qualified name, once
		// as an item of the open enum so reverse lookup sees it. For a scoped
		// enum both writes hit the same slot.
		self.scope.insert_value(name, Decoded::Int(value));
		if let Some(enum_path) = &self.open_enum {
			let item_path = format!("{enum_path}::{}", split_last(name).1);
			self.scope.insert_value(&item_path, Decoded::Int(value));
		}
		Ok(())
	}

	fn literal(&mut self, line_no: usize, line: &str, rest: &str) -> Result<()> {
		let malformed = || ConstError::MalformedLine {
			line_no,
			line: line.to_string(),
		};
		let Some(pos) = rest.find(VALUE_SEP) else {
			return Err(malformed());
		};
		let name = rest[..pos].trim();
		if !name.ends_with(LITERAL_SEGMENT) {
			return Err(malformed());
		}
		let value = parse_value(&rest[pos + VALUE_SEP.len()..])?;
		// Several literals in one scope share a name; a counter keeps them
		// individually addressable.
		let n = next_count(&mut self.literal_counts, split_last(name).0.unwrap_or(""));
		self.scope.insert_value(&format!("{name}`{n}"), value);
		Ok(())
	}

	fn constant(&mut self, line_no: usize, line: &str, sep: usize) -> Result<()> {
		let name = line[..sep].trim();
		if name.is_empty() {
			return Err(ConstError::MalformedLine {
				line_no,
				line: line.to_string(),
			});
		}
		if self.scope.shape(name).is_some() {
			return Err(ConstError::ShapeValueCollision { name: name.to_string() });
		}
		let value = parse_value(strip_trailing_comma(&line[sep + VALUE_SEP.len()..]))?;
		self.scope.insert_value(name, value);
		Ok(())
	}

	fn shape(&mut self, name: &str, fields: &str) -> Result<()> {
		let fields: Vec<Box<str>> = fields
			.split(',')
			.map(str::trim)
			.filter(|f| !f.is_empty())
			.map(Box::from)
			.collect();
		self.scope.insert_shape(name, fields)
	}
}

/// `enum NAME {` with a non-empty name and no value separator.
fn enum_header(line: &str) -> Option<&str> {
	let rest = line.strip_prefix("enum ")?;
	if rest.contains(VALUE_SEP) {
		return None;
	}
	let name = rest.strip_suffix('{')?.trim();
	if name.is_empty() { None } else { Some(name) }
}

/// `NAME{field,field}` with a non-empty unquoted name.
fn shape_line(line: &str) -> Option<(&str, &str)> {
	let body = line.strip_suffix('}')?;
	let open = body.find('{')?;
	let name = body[..open].trim();
	if name.is_empty() || name.contains([CHAR_DELIM, STRING_DELIM]) {
		return None;
	}
	Some((name, &body[open + 1..]))
}

fn strip_trailing_comma(text: &str) -> &str {
	text.trim().strip_suffix(',').unwrap_or(text.trim()).trim()
}

/// Compiler placeholders for unnamed entities, e.g. `(anonymous)` or
/// `(unnamed enum at input.cc:3:1)`: punctuation, then the word `anonymous`
/// or `unnamed`, then more punctuation.
fn is_anonymous_segment(seg: &str) -> bool {
	let rest = seg.trim_start_matches(|c: char| !(c.is_ascii_alphanumeric() || c == '_'));
	if rest.len() == seg.len() {
		return false;
	}
	for marker in ["anonymous", "unnamed"] {
		if rest.len() > marker.len()
			&& rest[..marker.len()].eq_ignore_ascii_case(marker)
			&& !rest[marker.len()..].starts_with(|c: char| c.is_ascii_alphanumeric() || c == '_')
		{
			return true;
		}
	}
	false
}

fn next_count(counts: &mut HashMap<String, usize>, key: &str) -> usize {
	let slot = counts.entry(key.to_string()).or_insert(0);
	let n = *slot;
	*slot += 1;
	n
}

/// Parse one encoded value into its native form.
///
/// Unrecognized text is kept verbatim as [`Decoded::Raw`]; only structural
/// problems (unbalanced brackets, unterminated quotes) are errors.
pub fn parse_value(text: &str) -> Result<Decoded> {
	let text = text.trim();
	if is_int_literal(text) {
		if let Ok(v) = text.parse::<i64>() {
			return Ok(Decoded::Int(v));
		}
		if let Ok(v) = text.parse::<u64>() {
			return Ok(Decoded::Uint(v));
		}
		return Ok(Decoded::Raw(text.into()));
	}
	if is_float_literal(text)
		&& let Ok(v) = text.parse::<f64>()
	{
		return Ok(Decoded::Float(v));
	}
	if text.starts_with(CHAR_DELIM) {
		let content = unquote(text, CHAR_DELIM)?;
		let mut chars = content.chars();
		return Ok(match (chars.next(), chars.next()) {
			(Some(c), None) => Decoded::Char(c),
			_ => Decoded::Str(content.into()),
		});
	}
	if text.starts_with(STRING_DELIM) {
		return Ok(Decoded::Str(unquote(text, STRING_DELIM)?.into()));
	}
	if text.eq_ignore_ascii_case("true") {
		return Ok(Decoded::Bool(true));
	}
	if text.eq_ignore_ascii_case("false") {
		return Ok(Decoded::Bool(false));
	}
	if text == NON_LITERAL {
		return Ok(Decoded::NonLiteral);
	}
	if text.starts_with('(') && text.ends_with(')') {
		let parts = contextual_split(text, &text[1..text.len() - 1])?;
		let mut elems = Vec::with_capacity(parts.len());
		for part in parts {
			elems.push(parse_value(part)?);
		}
		return Ok(Decoded::List(elems));
	}
	if text.ends_with(')') && text.contains('(') {
		return parse_call(text);
	}
	Ok(Decoded::Raw(text.into()))
}

/// `TypeName(args)` constructor form. Character types decode to chars or
/// strings; anything else unwraps a single argument or collects a tuple.
fn parse_call(text: &str) -> Result<Decoded> {
	let (type_name, params_text) = func_split(text)?;
	let type_name = type_name.trim();
	let params = contextual_split(text, params_text)?;

	if let Some(width) = char_type_width(type_name)
		&& params.len() == 1
		&& let Ok(code) = params[0].parse::<u32>()
	{
		return Ok(decode_char_unit(width, code));
	}
	if let Some(width) = type_name.strip_suffix("[]").and_then(char_type_width)
		&& let Some(codes) = extract_code_units(width, &params)
	{
		return Ok(decode_string_units(width, &codes));
	}

	let mut decoded = Vec::with_capacity(params.len());
	for part in &params {
		decoded.push(parse_value(part)?);
	}
	if decoded.len() == 1 {
		return Ok(decoded.swap_remove(0));
	}
	Ok(Decoded::Tuple(decoded))
}

fn char_type_width(type_name: &str) -> Option<CharWidth> {
	match type_name {
		"wchar_t" => Some(CharWidth::Wide),
		"char8_t" => Some(CharWidth::Utf8),
		"char16_t" => Some(CharWidth::Utf16),
		"char32_t" => Some(CharWidth::Utf32),
		_ => None,
	}
}

/// Pull raw code units out of `Type(code)` elements; `None` when any element
/// deviates from that form.
fn extract_code_units(width: CharWidth, params: &[&str]) -> Option<Vec<u32>> {
	let mut codes = Vec::with_capacity(params.len());
	for param in params {
		let inner = param.strip_suffix(')')?;
		let open = inner.find('(')?;
		if inner[..open].trim() != width.type_name() {
			return None;
		}
		codes.push(inner[open + 1..].trim().parse::<u32>().ok()?);
	}
	Some(codes)
}

fn decode_char_unit(width: CharWidth, code: u32) -> Decoded {
	match width {
		CharWidth::Narrow | CharWidth::Wide | CharWidth::Utf32 => match char::from_u32(code) {
			Some(c) => Decoded::Char(c),
			None => Decoded::Bytes(code.to_le_bytes().to_vec()),
		},
		CharWidth::Utf8 => {
			if code <= 0x7F {
				Decoded::Char(code as u8 as char)
			} else {
				Decoded::Bytes(vec![code as u8])
			}
		}
		CharWidth::Utf16 => match char::decode_utf16([code as u16]).next() {
			Some(Ok(c)) => Decoded::Char(c),
			_ => Decoded::Bytes((code as u16).to_le_bytes().to_vec()),
		},
	}
}

/// Combine code units into text; units that do not form valid text in the
/// width's encoding fall back to little-endian bytes.
fn decode_string_units(width: CharWidth, codes: &[u32]) -> Decoded {
	match width {
		CharWidth::Narrow | CharWidth::Utf8 => {
			let bytes: Vec<u8> = codes.iter().map(|&c| c as u8).collect();
			match String::from_utf8(bytes.clone()) {
				Ok(text) => Decoded::Str(text.into()),
				Err(_) => Decoded::Bytes(bytes),
			}
		}
		CharWidth::Utf16 => {
			let units: Vec<u16> = codes.iter().map(|&c| c as u16).collect();
			match char::decode_utf16(units.iter().copied()).collect::<std::result::Result<String, _>>() {
				Ok(text) => Decoded::Str(text.into()),
				Err(_) => Decoded::Bytes(units.iter().flat_map(|u| u.to_le_bytes()).collect()),
			}
		}
		CharWidth::Wide | CharWidth::Utf32 => match codes.iter().map(|&c| char::from_u32(c)).collect::<Option<String>>() {
			Some(text) => Decoded::Str(text.into()),
			None => Decoded::Bytes(codes.iter().flat_map(|c| c.to_le_bytes()).collect()),
		},
	}
}

fn is_int_literal(text: &str) -> bool {
	let digits = text.strip_prefix('-').unwrap_or(text);
	!digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

/// Dotted scientific form: `-?digits.digits e [+-]? digits`. Plain decimals
/// never appear in the stream, so they fall through to raw text.
fn is_float_literal(text: &str) -> bool {
	let all_digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
	let rest = text.strip_prefix('-').unwrap_or(text);
	let Some((mantissa, exp)) = rest.split_once('e') else {
		return false;
	};
	let Some((whole, frac)) = mantissa.split_once('.') else {
		return false;
	};
	let exp = exp.strip_prefix(['+', '-']).unwrap_or(exp);
	all_digits(whole) && all_digits(frac) && all_digits(exp)
}

/// Strip matching quote delimiters and undo escapes: `\ooo` reads up to
/// three octal digits, any other escaped character stands for itself.
fn unquote(text: &str, delim: char) -> Result<String> {
	let err = || ConstError::UnterminatedQuote { text: text.to_string() };
	let mut chars = text.chars().peekable();
	if chars.next() != Some(delim) {
		return Err(err());
	}
	let mut out = String::new();
	loop {
		match chars.next() {
			None => return Err(err()),
			Some(ch) if ch == delim => {
				return if chars.next().is_none() { Ok(out) } else { Err(err()) };
			}
			Some(ch) if ch == ESCAPE_CHAR => match chars.next() {
				None => return Err(err()),
				Some(d) if d.is_digit(8) => {
					let mut code = d.to_digit(8).unwrap_or(0);
					let mut taken = 1;
					while taken < 3
						&& let Some(next) = chars.peek().and_then(|c| c.to_digit(8))
					{
						code = code * 8 + next;
						chars.next();
						taken += 1;
					}
					if let Some(c) = char::from_u32(code) {
						out.push(c);
					}
				}
				Some(other) => out.push(other),
			},
			Some(ch) => out.push(ch),
		}
	}
}

/// Split `Name(params)` at the parenthesis matching the trailing one,
/// ignoring brackets inside quotes.
fn func_split(text: &str) -> Result<(&str, &str)> {
	let err = || ConstError::UnbalancedDelimiters { text: text.to_string() };
	let mut stack = Vec::new();
	let mut in_quote: Option<char> = None;
	let mut escaped = false;
	let last = text.len() - 1;
	for (i, ch) in text.char_indices() {
		if let Some(q) = in_quote {
			if escaped {
				escaped = false;
			} else if ch == ESCAPE_CHAR {
				escaped = true;
			} else if ch == q {
				in_quote = None;
			}
			continue;
		}
		match ch {
			CHAR_DELIM | STRING_DELIM => in_quote = Some(ch),
			'(' => stack.push(i),
			')' => {
				let open = stack.pop().ok_or_else(err)?;
				if i == last {
					return Ok((&text[..open], &text[open + 1..i]));
				}
			}
			_ => {}
		}
	}
	Err(err())
}

/// Split on top-level commas, ignoring separators inside brackets and
/// quotes. `whole` only feeds error reports.
fn contextual_split<'a>(whole: &str, text: &'a str) -> Result<Vec<&'a str>> {
	let unbalanced = || ConstError::UnbalancedDelimiters { text: whole.to_string() };
	let mut parts = Vec::new();
	let mut depth = 0_i32;
	let mut in_quote: Option<char> = None;
	let mut escaped = false;
	let mut start = 0_usize;
	for (i, ch) in text.char_indices() {
		if let Some(q) = in_quote {
			if escaped {
				escaped = false;
			} else if ch == ESCAPE_CHAR {
				escaped = true;
			} else if ch == q {
				in_quote = None;
			}
			continue;
		}
		match ch {
			CHAR_DELIM | STRING_DELIM => in_quote = Some(ch),
			'(' | '[' => depth += 1,
			')' | ']' => {
				depth -= 1;
				if depth < 0 {
					return Err(unbalanced());
				}
			}
			',' if depth == 0 => {
				parts.push(text[start..i].trim());
				start = i + 1;
			}
			_ => {}
		}
	}
	if depth != 0 {
		return Err(unbalanced());
	}
	if in_quote.is_some() {
		return Err(ConstError::UnterminatedQuote { text: whole.to_string() });
	}
	if start < text.len() || !parts.is_empty() {
		parts.push(text[start..].trim());
	}
	Ok(parts)
}
