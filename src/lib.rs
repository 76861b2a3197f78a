//! Public library API for discovering compile-time constants in C and C++
//! translation units and shipping them through a line-oriented text stream.

/// Classification, naming, value encoding, stream assembly, decoding, and the
/// decoded scope tree.
pub mod consts;
