/// Facts-to-stream dump command.
pub mod dump;
/// Enum listing command.
pub mod enums;
/// Single-name lookup command.
pub mod get;
/// Multi-stream merge command.
pub mod merge;
/// Decoded tree display command.
pub mod show;

mod util;
