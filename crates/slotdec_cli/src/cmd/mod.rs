/// Snapshot value decode command.
pub mod decode;
/// Type identifier inspection command.
pub mod describe;
/// Snapshot summary command.
pub mod info;
/// Text and JSON rendering of decoded values.
pub mod print;
/// Argument parsing helpers.
pub(crate) mod util;
