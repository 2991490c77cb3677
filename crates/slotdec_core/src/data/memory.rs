use crate::data::{WORD_SIZE, Word};

/// Read access to the linear, word-addressed scratch region.
pub trait MemoryRegion {
	/// Read one word at a byte offset; `None` where nothing was ever written.
	fn read_word(&self, offset: usize) -> Option<Word>;

	/// Read `len` bytes starting at `offset`, zero-filled past the written end.
	fn read_bytes(&self, offset: usize, len: usize) -> Vec<u8>;
}

/// Memory image backed by one contiguous byte buffer.
#[derive(Debug, Clone, Default)]
pub struct LinearMemory {
	bytes: Vec<u8>,
}

impl LinearMemory {
	/// Wrap a memory image starting at offset 0.
	pub fn new(bytes: Vec<u8>) -> Self {
		Self { bytes }
	}

	/// Written image length in bytes.
	pub fn len(&self) -> usize {
		self.bytes.len()
	}

	/// Whether nothing was written.
	pub fn is_empty(&self) -> bool {
		self.bytes.is_empty()
	}

	/// Write `data` at `offset`, growing the image as needed.
	///
	/// # Panics
	///
	/// Panics if `offset + data.len()` overflows `usize`.
	pub fn write(&mut self, offset: usize, data: &[u8]) {
		let Some(end) = offset.checked_add(data.len()) else {
			panic!("memory write at {offset} of {} bytes overflows the address space", data.len());
		};
		if end > self.bytes.len() {
			self.bytes.resize(end, 0);
		}
		self.bytes[offset..end].copy_from_slice(data);
	}
}

impl MemoryRegion for LinearMemory {
	fn read_word(&self, offset: usize) -> Option<Word> {
		if offset >= self.bytes.len() {
			return None;
		}
		let mut word = [0_u8; WORD_SIZE];
		word.copy_from_slice(&self.read_bytes(offset, WORD_SIZE));
		Some(word)
	}

	fn read_bytes(&self, offset: usize, len: usize) -> Vec<u8> {
		let mut out = vec![0_u8; len];
		if offset < self.bytes.len() {
			let end = offset.saturating_add(len).min(self.bytes.len());
			out[..end - offset].copy_from_slice(&self.bytes[offset..end]);
		}
		out
	}
}

#[cfg(test)]
mod tests {
	use super::{LinearMemory, MemoryRegion};

	#[test]
	fn unwritten_word_is_absent() {
		let memory = LinearMemory::new(vec![1; 64]);
		assert!(memory.read_word(64).is_none());
		assert!(memory.read_word(1_000).is_none());
		assert_eq!(memory.read_word(0), Some([1; 32]));
	}

	#[test]
	fn partial_tail_is_zero_filled() {
		let memory = LinearMemory::new(vec![7; 40]);
		let word = memory.read_word(16).expect("offset inside image");
		assert_eq!(word[..24], [7; 24]);
		assert_eq!(word[24..], [0; 8]);

		assert_eq!(memory.read_bytes(38, 4), vec![7, 7, 0, 0]);
		assert_eq!(memory.read_bytes(100, 3), vec![0, 0, 0]);
	}

	#[test]
	fn write_grows_image() {
		let mut memory = LinearMemory::default();
		memory.write(32, &[9, 9]);
		assert_eq!(memory.len(), 34);
		assert_eq!(memory.read_bytes(31, 3), vec![0, 9, 9]);
	}

	#[test]
	#[should_panic(expected = "overflows the address space")]
	fn write_past_address_space_panics() {
		let mut memory = LinearMemory::default();
		memory.write(usize::MAX, &[1]);
	}
}
