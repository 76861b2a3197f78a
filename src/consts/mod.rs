mod classify;
mod decode;
mod encode;
mod error;
mod facts;
mod name;
mod scope;
mod shape;
mod stream;
mod value;

/// Declaration classification over translation-unit facts.
pub use classify::{Classification, classify};
/// Stream decoding entry points and options.
pub use decode::{DecodeOptions, decode, decode_into, decode_with, parse_value};
/// Value rendering into the stream grammar.
pub use encode::{CHAR_DELIM, ESCAPE_CHAR, NON_LITERAL, STRING_DELIM, encode_value};
/// Error and result aliases.
pub use error::{ConstError, Result};
/// Translation-unit facts tables.
pub use facts::{
	Ancestors, Decl, DeclKind, EnumFacts, EnumeratorFacts, FuncFacts, LiteralFacts, RecordFacts, RefQualifier, UnitFacts,
	VarFacts,
};
/// Literal naming and function signature rendering.
pub use name::{LITERAL_SEGMENT, function_signature, literal_name};
/// Decoded scope tree and path utilities.
pub use scope::{Decoded, EnumDef, Node, PATH_SEP, RecordShape, Scope, split_last, split_path};
/// Aggregate shape rendering.
pub use shape::encode_shape;
/// Entity discovery and stream assembly.
pub use stream::{Entity, LITERAL_PREFIX, VALUE_SEP, collect_entities, dump_unit, render_stream};
/// Typed compile-time value model.
pub use value::{CharWidth, ConstValue};
