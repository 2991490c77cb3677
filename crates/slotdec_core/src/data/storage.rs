use std::collections::BTreeMap;

use alloy_primitives::{U256, keccak256};

use crate::data::{WORD_SIZE, Word};

/// Where a storage byte-range read starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotRef {
	/// Start at the slot itself.
	Slot(U256),
	/// Start at the first slot of the family derived from a base slot.
	Family(U256),
}

/// Read access to the persistent, slot-addressed region.
pub trait StorageRegion {
	/// Read one slot; `None` where nothing was ever written.
	fn read_word(&self, slot: U256) -> Option<Word>;

	/// First slot of the family anchored at `base`.
	fn derive_family(&self, base: U256) -> U256 {
		family_start(base)
	}

	/// Read `len` bytes across consecutive slots, zero-filling unwritten ones.
	fn read_bytes(&self, at: SlotRef, len: usize) -> Vec<u8> {
		let mut slot = match at {
			SlotRef::Slot(slot) => slot,
			SlotRef::Family(base) => self.derive_family(base),
		};

		let mut out = Vec::with_capacity(len);
		while out.len() < len {
			let word = self.read_word(slot).unwrap_or([0_u8; WORD_SIZE]);
			let take = (len - out.len()).min(WORD_SIZE);
			out.extend_from_slice(&word[..take]);
			slot = slot.wrapping_add(U256::from(1_u8));
		}
		out
	}
}

/// `keccak256` of the base slot as a 32-byte big-endian word.
pub fn family_start(base: U256) -> U256 {
	U256::from_be_bytes(keccak256(base.to_be_bytes::<WORD_SIZE>()).0)
}

/// Sparse storage image keyed by slot.
#[derive(Debug, Clone, Default)]
pub struct SlotStorage {
	slots: BTreeMap<U256, Word>,
}

impl SlotStorage {
	/// Create an empty image.
	pub fn new() -> Self {
		Self::default()
	}

	/// Set one slot.
	pub fn insert(&mut self, slot: U256, word: Word) {
		self.slots.insert(slot, word);
	}

	/// Write `data` across consecutive slots starting at `at`, right-padding the last one.
	pub fn store_bytes(&mut self, at: SlotRef, data: &[u8]) {
		let mut slot = match at {
			SlotRef::Slot(slot) => slot,
			SlotRef::Family(base) => self.derive_family(base),
		};
		for chunk in data.chunks(WORD_SIZE) {
			let mut word = [0_u8; WORD_SIZE];
			word[..chunk.len()].copy_from_slice(chunk);
			self.slots.insert(slot, word);
			slot = slot.wrapping_add(U256::from(1_u8));
		}
	}

	/// Number of written slots.
	pub fn len(&self) -> usize {
		self.slots.len()
	}

	/// Whether no slot was written.
	pub fn is_empty(&self) -> bool {
		self.slots.is_empty()
	}
}

impl StorageRegion for SlotStorage {
	fn read_word(&self, slot: U256) -> Option<Word> {
		self.slots.get(&slot).copied()
	}
}
