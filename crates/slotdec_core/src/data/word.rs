use alloy_primitives::{Address, I256, U256, hex};

use crate::data::{DecodeError, Result};

/// Width in bytes of one addressable word in both regions.
pub const WORD_SIZE: usize = 32;

/// One raw 32-byte word, big-endian.
pub type Word = [u8; WORD_SIZE];

const ADDRESS_SIZE: usize = 20;

/// Bounded cursor that hands out consecutive slices of a byte payload.
pub struct WordCursor<'a> {
	bytes: &'a [u8],
	pos: usize,
}

impl<'a> WordCursor<'a> {
	/// Create a cursor at position 0.
	pub fn new(bytes: &'a [u8]) -> Self {
		Self { bytes, pos: 0 }
	}

	/// Return current byte offset.
	pub fn pos(&self) -> usize {
		self.pos
	}

	/// Return remaining unread bytes.
	pub fn remaining(&self) -> usize {
		self.bytes.len().saturating_sub(self.pos)
	}

	/// Read exactly `n` bytes and advance cursor.
	pub fn read_exact(&mut self, n: usize) -> Result<&'a [u8]> {
		if n > self.remaining() {
			return Err(DecodeError::UnexpectedEof {
				at: self.pos,
				need: n,
				rem: self.remaining(),
			});
		}

		let start = self.pos;
		self.pos += n;
		Ok(&self.bytes[start..self.pos])
	}

	/// Read one full word.
	pub fn read_word(&mut self) -> Result<&'a [u8]> {
		self.read_exact(WORD_SIZE)
	}
}

/// Interpret big-endian bytes of any width as an unsigned integer.
pub fn to_unsigned(bytes: &[u8]) -> Result<U256> {
	if bytes.is_empty() {
		return Ok(U256::ZERO);
	}
	U256::try_from_be_slice(bytes).ok_or(DecodeError::IntegerTooWide { len: bytes.len() })
}

/// Interpret big-endian bytes as a two's-complement integer of `bytes.len()` width.
pub fn to_signed(bytes: &[u8]) -> Result<I256> {
	let Some(first) = bytes.first() else {
		return Ok(I256::ZERO);
	};
	let negative = first & 0x80 != 0;

	let tail = if bytes.len() > WORD_SIZE {
		let (excess, tail) = bytes.split_at(bytes.len() - WORD_SIZE);
		let fill = if negative { 0xff } else { 0x00 };
		let tail_negative = tail[0] & 0x80 != 0;
		if excess.iter().any(|byte| *byte != fill) || tail_negative != negative {
			return Err(DecodeError::IntegerTooWide { len: bytes.len() });
		}
		tail
	} else {
		bytes
	};

	let raw = to_unsigned(tail)?;
	let raw = if negative && tail.len() < WORD_SIZE {
		raw | (U256::MAX << (tail.len() * 8))
	} else {
		raw
	};
	Ok(I256::from_raw(raw))
}

/// Render the low 20 bytes as a `0x`-prefixed address, optionally checksummed.
pub fn to_address_string(bytes: &[u8], checksum: bool) -> String {
	let mut raw = [0_u8; ADDRESS_SIZE];
	let take = bytes.len().min(ADDRESS_SIZE);
	raw[ADDRESS_SIZE - take..].copy_from_slice(&bytes[bytes.len() - take..]);

	if checksum {
		Address::from(raw).to_checksum(None)
	} else {
		hex::encode_prefixed(raw)
	}
}

/// Narrow an unsigned word to `usize`, naming the quantity on overflow.
pub fn to_usize(value: U256, what: &'static str) -> Result<usize> {
	if value > U256::from(usize::MAX) {
		return Err(DecodeError::LengthOverflow { what });
	}
	Ok(value.as_limbs()[0] as usize)
}

/// Left-pad up to 32 bytes into a word.
pub fn left_pad(bytes: &[u8]) -> Option<Word> {
	if bytes.len() > WORD_SIZE {
		return None;
	}
	let mut word = [0_u8; WORD_SIZE];
	word[WORD_SIZE - bytes.len()..].copy_from_slice(bytes);
	Some(word)
}

/// Parse a hex byte literal with optional `0x` prefix; odd digit counts are left-padded.
pub fn parse_hex_bytes(value: &str) -> Result<Vec<u8>> {
	let digits = value.strip_prefix("0x").or_else(|| value.strip_prefix("0X")).unwrap_or(value);
	let decoded = if digits.len() % 2 == 1 {
		hex::decode(format!("0{digits}"))
	} else {
		hex::decode(digits)
	};
	decoded.map_err(|_| DecodeError::InvalidHex { value: value.to_owned() })
}

/// Parse a decimal or `0x`-prefixed hex 256-bit literal.
pub fn parse_u256(value: &str) -> Result<U256> {
	let parsed = if let Some(stripped) = value.strip_prefix("0x").or_else(|| value.strip_prefix("0X")) {
		U256::from_str_radix(stripped, 16)
	} else {
		U256::from_str_radix(value, 10)
	};

	parsed.map_err(|_| DecodeError::InvalidNumber { value: value.to_owned() })
}
