use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use crate::data::compression::decode_bytes;
use crate::data::{
	Compression, DecodeError, DecodeState, DeclId, LinearMemory, MemberDecl, Registry, Result, SlotStorage, StructDecl, TypeDescriptor, left_pad, parse_hex_bytes,
	parse_u256,
};

/// Memory image, storage slots, and declarations loaded from one snapshot file.
pub struct Snapshot {
	/// Compression detected on the source file.
	pub compression: Compression,
	/// Memory image starting at offset 0.
	pub memory: LinearMemory,
	/// Written storage slots.
	pub storage: SlotStorage,
	/// Struct declarations.
	pub registry: Registry,
}

#[derive(Deserialize, Default)]
#[serde(default, deny_unknown_fields)]
struct SnapshotFile {
	memory: String,
	storage: BTreeMap<String, String>,
	declarations: Vec<DeclarationFile>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct DeclarationFile {
	id: u64,
	name: String,
	#[serde(default)]
	members: Vec<MemberFile>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct MemberFile {
	name: String,
	#[serde(rename = "type")]
	ty: String,
}

impl Snapshot {
	/// Read a snapshot file, plain or zstd-compressed JSON.
	pub fn open(path: impl AsRef<Path>) -> Result<Self> {
		let raw = fs::read(path)?;
		let (compression, bytes) = decode_bytes(raw)?;
		let mut snapshot = Self::from_json_slice(&bytes)?;
		snapshot.compression = compression;
		Ok(snapshot)
	}

	/// Parse uncompressed snapshot JSON.
	pub fn from_json_slice(bytes: &[u8]) -> Result<Self> {
		let file: SnapshotFile = serde_json::from_slice(bytes)?;

		let memory = if file.memory.is_empty() {
			LinearMemory::default()
		} else {
			LinearMemory::new(parse_hex_bytes(&file.memory)?)
		};

		let mut storage = SlotStorage::new();
		for (slot_raw, word_raw) in &file.storage {
			let slot = parse_u256(slot_raw)?;
			let bytes = parse_hex_bytes(word_raw)?;
			let word = left_pad(&bytes).ok_or_else(|| DecodeError::StorageWordTooLong {
				slot: slot_raw.clone(),
				len: bytes.len(),
			})?;
			storage.insert(slot, word);
		}

		let mut registry = Registry::new();
		for decl in file.declarations {
			let members = decl
				.members
				.iter()
				.map(|member| Ok(MemberDecl::new(&member.name, TypeDescriptor::parse(&member.ty)?)))
				.collect::<Result<Vec<_>>>()?;
			registry.insert(
				DeclId(decl.id),
				StructDecl {
					name: decl.name.into_boxed_str(),
					members,
				},
			)?;
		}

		debug!(
			memory_bytes = memory.len(),
			slots = storage.len(),
			declarations = registry.len(),
			"snapshot loaded"
		);

		Ok(Self {
			compression: Compression::None,
			memory,
			storage,
			registry,
		})
	}

	/// Borrow the snapshot as decode state.
	pub fn state(&self) -> DecodeState<'_> {
		DecodeState::new(&self.memory, &self.storage, &self.registry)
	}
}
