use crate::consts::error::{ConstError, Result};

/// Path separator between scope segments.
pub const PATH_SEP: &str = "::";

/// One decoded native value.
#[derive(Debug, Clone, PartialEq)]
pub enum Decoded {
	/// Boolean.
	Bool(bool),
	/// Signed integer.
	Int(i64),
	/// Unsigned integer outside the signed range.
	Uint(u64),
	/// Floating-point number.
	Float(f64),
	/// Single character.
	Char(char),
	/// Text string.
	Str(Box<str>),
	/// Code units that did not form valid text.
	Bytes(Vec<u8>),
	/// Array value.
	List(Vec<Decoded>),
	/// Constructor call of an unrecognized type with two or more parts.
	Tuple(Vec<Decoded>),
	/// The encoder's `<non-literal>` sentinel.
	NonLiteral,
	/// Unrecognized raw text kept verbatim (lenient decoding).
	Raw(Box<str>),
}

/// Decoded enum: ordered enumerator names and values with reverse lookup.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EnumDef {
	/// Unqualified enum name.
	pub name: Box<str>,
	items: Vec<(Box<str>, i64)>,
}

impl EnumDef {
	/// Create an empty enum definition.
	pub fn new(name: &str) -> Self {
		EnumDef {
			name: name.into(),
			items: Vec::new(),
		}
	}

	/// Enumerator value by name.
	pub fn get(&self, name: &str) -> Option<i64> {
		self.items.iter().find(|(item, _)| **item == *name).map(|(_, value)| *value)
	}

	/// First enumerator name carrying `value`.
	pub fn name_of(&self, value: i64) -> Option<&str> {
		self.items.iter().find(|(_, v)| *v == value).map(|(name, _)| name.as_ref())
	}

	/// Insert or overwrite one enumerator.
	pub fn set(&mut self, name: &str, value: i64) {
		match self.items.iter_mut().find(|(item, _)| **item == *name) {
			Some(slot) => slot.1 = value,
			None => self.items.push((name.into(), value)),
		}
	}

	/// Enumerators in declaration order.
	pub fn items(&self) -> impl Iterator<Item = (&str, i64)> {
		self.items.iter().map(|(name, value)| (name.as_ref(), *value))
	}

	/// Number of enumerators.
	pub fn len(&self) -> usize {
		self.items.len()
	}

	/// Whether the enum has no enumerators.
	pub fn is_empty(&self) -> bool {
		self.items.is_empty()
	}
}

/// Shape metadata for one aggregate type. Lives in a namespace parallel to
/// values, so a type description never collides with a constant of the same
/// name.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordShape {
	/// Fully qualified type name.
	pub qualified_name: Box<str>,
	/// Flattened field names in layout order.
	pub fields: Vec<Box<str>>,
}

/// One node in the decoded tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
	/// Leaf value.
	Value(Decoded),
	/// Nested scope.
	Scope(Scope),
	/// Enum group.
	Enum(EnumDef),
}

/// Nested, name-addressable tree of decoded values.
///
/// Keys are `::`-delimited path segments; segment splitting ignores
/// separators inside brackets, so function-signature segments like
/// `f(std::string)` stay intact. Insertion order is preserved.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scope {
	entries: Vec<(Box<str>, Node)>,
	shapes: Vec<(Box<str>, RecordShape)>,
}

impl Scope {
	/// Create an empty scope.
	pub fn new() -> Self {
		Scope::default()
	}

	/// Number of direct entries.
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	/// Whether the scope has no direct entries.
	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Direct entries in insertion order.
	pub fn entries(&self) -> impl Iterator<Item = (&str, &Node)> {
		self.entries.iter().map(|(name, node)| (name.as_ref(), node))
	}

	/// Shapes attached directly to this scope, in insertion order.
	pub fn shapes(&self) -> impl Iterator<Item = &RecordShape> {
		self.shapes.iter().map(|(_, shape)| shape)
	}

	/// Insert a leaf value at `path`, creating intermediate scopes.
	/// Last write wins: an existing node at the full path is replaced, and a
	/// leaf blocking an intermediate segment is replaced by a scope.
	pub fn insert_value(&mut self, path: &str, value: Decoded) {
		self.insert_node(path, Node::Value(value));
	}

	/// Insert an arbitrary node at `path` (see [`Scope::insert_value`]).
	///
	/// Writing an integer one segment below an enum node stores an
	/// enumerator instead of replacing the enum.
	pub fn insert_node(&mut self, path: &str, node: Node) {
		let segs = split_path(path);
		self.insert_inner(&segs, node);
	}

	fn insert_inner(&mut self, segs: &[&str], node: Node) {
		let Some(head) = segs.first() else {
			return;
		};
		if segs.len() == 1 {
			match self.position(head) {
				Some(i) => self.entries[i].1 = node,
				None => self.entries.push(((*head).into(), node)),
			}
			return;
		}

		let rest = &segs[1..];
		let i = match self.position(head) {
			Some(i) => i,
			None => {
				self.entries.push(((*head).into(), Node::Scope(Scope::new())));
				self.entries.len() - 1
			}
		};

		enum Step {
			Descend,
			EnumItem,
			Replace,
		}
		let step = match &self.entries[i].1 {
			Node::Scope(_) => Step::Descend,
			Node::Enum(_) if rest.len() == 1 && matches!(node, Node::Value(Decoded::Int(_))) => Step::EnumItem,
			_ => Step::Replace,
		};
		match step {
			Step::Descend => {
				if let Node::Scope(scope) = &mut self.entries[i].1 {
					scope.insert_inner(rest, node);
				}
			}
			Step::EnumItem => {
				if let (Node::Enum(item), Node::Value(Decoded::Int(value))) = (&mut self.entries[i].1, node) {
					item.set(rest[0], value);
				}
			}
			Step::Replace => {
				self.entries[i].1 = Node::Scope(Scope::new());
				if let Node::Scope(scope) = &mut self.entries[i].1 {
					scope.insert_inner(rest, node);
				}
			}
		}
	}

	/// Structural node at `path`. Enumerator paths resolve through
	/// [`Scope::value`], not here.
	pub fn node(&self, path: &str) -> Option<&Node> {
		let segs = split_path(path);
		self.node_inner(&segs)
	}

	fn node_inner(&self, segs: &[&str]) -> Option<&Node> {
		let (head, rest) = segs.split_first()?;
		let node = self.entry(head)?;
		if rest.is_empty() {
			return Some(node);
		}
		match node {
			Node::Scope(scope) => scope.node_inner(rest),
			_ => None,
		}
	}

	/// Decoded value at `path`, if the path names a leaf or an enumerator.
	pub fn value(&self, path: &str) -> Option<Decoded> {
		let segs = split_path(path);
		self.value_inner(&segs)
	}

	fn value_inner(&self, segs: &[&str]) -> Option<Decoded> {
		let (head, rest) = segs.split_first()?;
		match self.entry(head)? {
			Node::Value(value) if rest.is_empty() => Some(value.clone()),
			Node::Scope(scope) if !rest.is_empty() => scope.value_inner(rest),
			Node::Enum(item) if rest.len() == 1 => item.get(rest[0]).map(Decoded::Int),
			_ => None,
		}
	}

	/// Whether `path` names a leaf value, an enumerator, or a node.
	pub fn contains(&self, path: &str) -> bool {
		self.value(path).is_some() || self.node(path).is_some()
	}

	/// Attach shape metadata under `qualified_name`'s parent scope.
	/// A plain value already present at the same name is an error.
	pub fn insert_shape(&mut self, qualified_name: &str, fields: Vec<Box<str>>) -> Result<()> {
		let segs = split_path(qualified_name);
		let shape = RecordShape {
			qualified_name: qualified_name.into(),
			fields,
		};
		self.insert_shape_inner(&segs, shape)
	}

	fn insert_shape_inner(&mut self, segs: &[&str], shape: RecordShape) -> Result<()> {
		let Some((head, rest)) = segs.split_first() else {
			return Ok(());
		};
		if rest.is_empty() {
			if matches!(self.entry(head), Some(Node::Value(_))) {
				return Err(ConstError::ShapeValueCollision {
					name: shape.qualified_name.to_string(),
				});
			}
			match self.shapes.iter_mut().find(|(seg, _)| **seg == **head) {
				Some(slot) => slot.1 = shape,
				None => self.shapes.push(((*head).into(), shape)),
			}
			return Ok(());
		}

		let i = match self.position(head) {
			Some(i) => i,
			None => {
				self.entries.push(((*head).into(), Node::Scope(Scope::new())));
				self.entries.len() - 1
			}
		};
		if !matches!(self.entries[i].1, Node::Scope(_)) {
			self.entries[i].1 = Node::Scope(Scope::new());
		}
		match &mut self.entries[i].1 {
			Node::Scope(scope) => scope.insert_shape_inner(rest, shape),
			_ => Ok(()),
		}
	}

	/// Shape metadata at `path`, if any.
	pub fn shape(&self, path: &str) -> Option<&RecordShape> {
		let segs = split_path(path);
		self.shape_inner(&segs)
	}

	fn shape_inner(&self, segs: &[&str]) -> Option<&RecordShape> {
		let (head, rest) = segs.split_first()?;
		if rest.is_empty() {
			return self.shapes.iter().find(|(seg, _)| **seg == **head).map(|(_, shape)| shape);
		}
		match self.entry(head)? {
			Node::Scope(scope) => scope.shape_inner(rest),
			_ => None,
		}
	}

	/// Merge another scope into this one, last write wins per full path.
	/// Matching sub-scopes merge recursively; any other pairing replaces.
	pub fn merge(&mut self, other: Scope) {
		for (name, node) in other.entries {
			match (self.position(&name), node) {
				(Some(i), Node::Scope(incoming)) => {
					if let Node::Scope(existing) = &mut self.entries[i].1 {
						existing.merge(incoming);
					} else {
						self.entries[i].1 = Node::Scope(incoming);
					}
				}
				(Some(i), node) => self.entries[i].1 = node,
				(None, node) => self.entries.push((name, node)),
			}
		}
		for (seg, shape) in other.shapes {
			match self.shapes.iter_mut().find(|(existing, _)| **existing == *seg) {
				Some(slot) => slot.1 = shape,
				None => self.shapes.push((seg, shape)),
			}
		}
	}

	/// All enums in the tree as (qualified name, definition) pairs.
	pub fn enums(&self) -> Vec<(String, &EnumDef)> {
		let mut out = Vec::new();
		self.collect_enums("", &mut out);
		out
	}

	fn collect_enums<'a>(&'a self, prefix: &str, out: &mut Vec<(String, &'a EnumDef)>) {
		for (name, node) in &self.entries {
			let path = if prefix.is_empty() {
				name.to_string()
			} else {
				format!("{prefix}{PATH_SEP}{name}")
			};
			match node {
				Node::Enum(item) => out.push((path, item)),
				Node::Scope(scope) => scope.collect_enums(&path, out),
				Node::Value(_) => {}
			}
		}
	}

	fn entry(&self, seg: &str) -> Option<&Node> {
		self.entries.iter().find(|(name, _)| **name == *seg).map(|(_, node)| node)
	}

	fn position(&self, seg: &str) -> Option<usize> {
		self.entries.iter().position(|(name, _)| **name == *seg)
	}
}

/// Split a qualified name on `::` at bracket depth zero. A leading global
/// qualifier (`::name`) does not produce an empty first segment.
pub fn split_path(path: &str) -> Vec<&str> {
	let bytes = path.as_bytes();
	let mut segs = Vec::new();
	let mut depth = 0_u32;
	let mut start = 0_usize;
	let mut i = 0_usize;
	while i < bytes.len() {
		match bytes[i] {
			b'(' | b'[' | b'{' | b'<' => depth += 1,
			b')' | b']' | b'}' | b'>' => depth = depth.saturating_sub(1),
			b':' if depth == 0 && bytes.get(i + 1) == Some(&b':') => {
				segs.push(&path[start..i]);
				i += 2;
				start = i;
				continue;
			}
			_ => {}
		}
		i += 1;
	}
	segs.push(&path[start..]);
	if segs.len() > 1 && segs[0].is_empty() {
		segs.remove(0);
	}
	segs
}

/// Split a qualified name into (enclosing scope, last segment) at the last
/// depth-zero `::`. Names without a separator have no enclosing scope.
pub fn split_last(path: &str) -> (Option<&str>, &str) {
	let bytes = path.as_bytes();
	let mut depth = 0_u32;
	let mut last_sep = None;
	let mut i = 0_usize;
	while i < bytes.len() {
		match bytes[i] {
			b'(' | b'[' | b'{' | b'<' => depth += 1,
			b')' | b']' | b'}' | b'>' => depth = depth.saturating_sub(1),
			b':' if depth == 0 && bytes.get(i + 1) == Some(&b':') => {
				last_sep = Some(i);
				i += 2;
				continue;
			}
			_ => {}
		}
		i += 1;
	}
	match last_sep {
		Some(pos) => (Some(&path[..pos]), &path[pos + PATH_SEP.len()..]),
		None => (None, path),
	}
}
