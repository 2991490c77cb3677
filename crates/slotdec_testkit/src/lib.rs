//! Shared test helpers for workspace crates.

use std::path::{Path, PathBuf};

/// Resolve the workspace root path.
pub fn workspace_root() -> PathBuf {
	let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
	manifest_dir
		.join("..")
		.join("..")
		.canonicalize()
		.unwrap_or_else(|_| manifest_dir.join("..").join(".."))
}

/// Resolve a fixture path under `<workspace>/fixtures`.
pub fn fixture_path(name: &str) -> PathBuf {
	workspace_root().join("fixtures").join(name)
}

/// Read and parse a JSON fixture.
pub fn fixture_json(name: &str) -> serde_json::Value {
	let path = fixture_path(name);
	let raw = std::fs::read(&path).unwrap_or_else(|err| panic!("fixture {} readable: {err}", path.display()));
	serde_json::from_slice(&raw).unwrap_or_else(|err| panic!("fixture {} is json: {err}", path.display()))
}

/// Big-endian 32-byte word holding `value`.
pub fn uint_word(value: u64) -> [u8; 32] {
	let mut word = [0_u8; 32];
	word[24..].copy_from_slice(&value.to_be_bytes());
	word
}

/// Text bytes left-aligned in a zero-padded word.
pub fn text_word(text: &str) -> [u8; 32] {
	assert!(text.len() <= 32, "text fits one word");
	let mut word = [0_u8; 32];
	word[..text.len()].copy_from_slice(text.as_bytes());
	word
}

/// Inline storage string slot: text left-aligned, `len * 2` in the last byte.
pub fn inline_string_slot(text: &str) -> [u8; 32] {
	assert!(text.len() <= 31, "inline strings hold at most 31 bytes");
	let mut word = text_word(text);
	word[31] = (text.len() * 2) as u8;
	word
}
