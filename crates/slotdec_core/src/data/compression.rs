use std::io::Read;

use crate::data::{DecodeError, Result};

const MAX_DECOMPRESSED_BYTES: usize = 64 * 1024 * 1024;
/// zstd frame magic used by compressed snapshots.
pub const ZSTD_MAGIC: [u8; 4] = [0x28, 0xB5, 0x2F, 0xFD];

/// Compression mode detected for a snapshot file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Compression {
	/// Raw JSON text.
	None,
	/// zstd-compressed JSON.
	Zstd,
}

impl Compression {
	/// Render compression mode as a stable lowercase label.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::None => "none",
			Self::Zstd => "zstd",
		}
	}
}

/// Detect and decode compression, returning `(mode, json_bytes)`.
pub fn decode_bytes(raw: Vec<u8>) -> Result<(Compression, Vec<u8>)> {
	if looks_like_json(&raw) {
		return Ok((Compression::None, raw));
	}

	if raw.starts_with(&ZSTD_MAGIC) {
		let out = decode_zstd(&raw)?;
		if !looks_like_json(&out) {
			return Err(DecodeError::UnknownMagic { magic: first4(&out) });
		}
		return Ok((Compression::Zstd, out));
	}

	Err(DecodeError::UnknownMagic { magic: first4(&raw) })
}

fn decode_zstd(raw: &[u8]) -> Result<Vec<u8>> {
	let mut decoder = zstd::stream::read::Decoder::new(raw)?;
	let mut out = Vec::new();
	let mut buf = [0_u8; 8192];

	loop {
		let read = decoder.read(&mut buf)?;
		if read == 0 {
			break;
		}

		if out.len() + read > MAX_DECOMPRESSED_BYTES {
			return Err(DecodeError::DecompressedTooLarge { limit: MAX_DECOMPRESSED_BYTES });
		}

		out.extend_from_slice(&buf[..read]);
	}

	Ok(out)
}

fn looks_like_json(bytes: &[u8]) -> bool {
	bytes.iter().find(|byte| !byte.is_ascii_whitespace()) == Some(&b'{')
}

fn first4(bytes: &[u8]) -> [u8; 4] {
	let mut magic = [0_u8; 4];
	let take = bytes.len().min(4);
	magic[..take].copy_from_slice(&bytes[..take]);
	magic
}

#[cfg(test)]
mod tests {
	use super::{Compression, decode_bytes};
	use crate::data::DecodeError;

	#[test]
	fn plain_json_passes_through() {
		let (mode, out) = decode_bytes(b"  {\"memory\": \"0x\"}".to_vec()).expect("json detected");
		assert_eq!(mode, Compression::None);
		assert!(out.ends_with(b"}"));
	}

	#[test]
	fn zstd_frames_are_decompressed() {
		let raw = zstd::encode_all(&b"{}"[..], 3).expect("compresses");
		let (mode, out) = decode_bytes(raw).expect("zstd detected");
		assert_eq!(mode, Compression::Zstd);
		assert_eq!(out, b"{}");
	}

	#[test]
	fn unknown_magic_is_rejected() {
		assert!(matches!(decode_bytes(b"BLOB".to_vec()), Err(DecodeError::UnknownMagic { magic }) if magic == *b"BLOB"));

		let raw = zstd::encode_all(&b"nope"[..], 3).expect("compresses");
		assert!(matches!(decode_bytes(raw), Err(DecodeError::UnknownMagic { magic }) if magic == *b"nope"));
	}
}
