use serde::{Deserialize, Serialize};

/// Character width classes the encoder distinguishes.
///
/// `Narrow` covers plain `char` (and its signed/unsigned spellings); the rest
/// are the wide and fixed-width character types, which render through a
/// `TypeName(code)` prefix instead of quoting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CharWidth {
	/// Plain narrow `char`.
	Narrow,
	/// `wchar_t`.
	Wide,
	/// `char8_t`.
	Utf8,
	/// `char16_t`.
	Utf16,
	/// `char32_t`.
	Utf32,
}

impl CharWidth {
	/// Canonical type name used as the wide-character rendering prefix.
	pub fn type_name(self) -> &'static str {
		match self {
			CharWidth::Narrow => "char",
			CharWidth::Wide => "wchar_t",
			CharWidth::Utf8 => "char8_t",
			CharWidth::Utf16 => "char16_t",
			CharWidth::Utf32 => "char32_t",
		}
	}
}

/// One evaluated compile-time value.
///
/// The variant, not the payload, selects the encoding branch: the host front
/// end resolves typedef identity before handing a value over, so a `uint8_t`
/// arrives as `Int` while a true `char` arrives as `Char`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConstValue {
	/// Boolean constant.
	Bool(bool),
	/// Signed integer constant.
	Int(i64),
	/// Unsigned integer constant outside the signed range.
	Uint(u64),
	/// Floating-point constant.
	Float(f64),
	/// Single character of any width.
	Char {
		/// Code unit value.
		code: u32,
		/// Character type class.
		width: CharWidth,
	},
	/// String literal or pointer-to-character value.
	Str {
		/// Code unit sequence, without any terminator.
		codes: Vec<u32>,
		/// Element type class.
		width: CharWidth,
	},
	/// Fixed-size array value; only initialized elements are carried.
	Array {
		/// Initialized elements in declaration order.
		elems: Vec<ConstValue>,
	},
	/// Aggregate (struct/class) value with base sub-values ahead of fields.
	Record {
		/// Qualified type name, if the type is named.
		type_name: Option<Box<str>>,
		/// Base-class sub-values in declaration order.
		bases: Vec<ConstValue>,
		/// Field values in declaration order.
		fields: Vec<ConstValue>,
	},
	/// Value of a type with no defined rendering rule.
	NonLiteral,
}

impl ConstValue {
	/// Whether a record value contributes at least one field, transitively
	/// through its base chain. Non-record values contribute nothing.
	pub fn has_any_fields(&self) -> bool {
		match self {
			ConstValue::Record { bases, fields, .. } => !fields.is_empty() || bases.iter().any(ConstValue::has_any_fields),
			_ => false,
		}
	}
}
