use thiserror::Error;

/// Crate-local result type.
pub type Result<T> = std::result::Result<T, ConstError>;

/// Errors produced while loading facts, decoding streams, and querying scopes.
#[derive(Debug, Error)]
pub enum ConstError {
	/// Filesystem or stream IO failure.
	#[error("io: {0}")]
	Io(#[from] std::io::Error),
	/// Translation-unit facts file was not valid JSON.
	#[error("facts: {0}")]
	FactsJson(#[from] serde_json::Error),
	/// Line matched no known stream production.
	#[error("malformed line {line_no}: {line:?}")]
	MalformedLine {
		/// One-based line number in the input stream.
		line_no: usize,
		/// Offending line content.
		line: String,
	},
	/// String or character value was not closed by its delimiter.
	#[error("unterminated quote in value: {text:?}")]
	UnterminatedQuote {
		/// Offending value text.
		text: String,
	},
	/// Parenthesis nesting in a value never balanced out.
	#[error("unbalanced delimiters in value: {text:?}")]
	UnbalancedDelimiters {
		/// Offending value text.
		text: String,
	},
	/// An `enum ... {` header appeared while a previous block was still open.
	#[error("enum block {name} opened inside an unterminated enum block at line {line_no}")]
	NestedEnumBlock {
		/// One-based line number of the inner header.
		line_no: usize,
		/// Name carried by the inner header.
		name: String,
	},
	/// A closing `}` appeared with no enum block open.
	#[error("stray enum block terminator at line {line_no}")]
	StrayEnumEnd {
		/// One-based line number of the terminator.
		line_no: usize,
	},
	/// Input ended while an enum block was still open.
	#[error("unterminated enum block: {name}")]
	UnterminatedEnumBlock {
		/// Qualified name of the open block.
		name: String,
	},
	/// Enumerator line did not carry an integer value.
	#[error("non-integer enumerator at line {line_no}: {line:?}")]
	BadEnumerator {
		/// One-based line number of the enumerator.
		line_no: usize,
		/// Offending line content.
		line: String,
	},
	/// Aggregate-shape line names a path already holding a plain value.
	#[error("shape name collides with a value: {name}")]
	ShapeValueCollision {
		/// Conflicting qualified name.
		name: String,
	},
	/// Requested qualified name was not found in the decoded scope.
	#[error("name not found: {name}")]
	NameNotFound {
		/// Requested qualified name.
		name: String,
	},
	/// CLI output format argument was invalid.
	#[error("invalid output format: {format}")]
	InvalidFormat {
		/// User-provided format string.
		format: String,
	},
}
