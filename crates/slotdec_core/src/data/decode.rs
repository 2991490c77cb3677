use alloy_primitives::U256;
use tracing::{debug, trace};

use crate::data::word::{WordCursor, to_address_string, to_signed, to_unsigned, to_usize};
use crate::data::{
	DataLocation, DecodeError, DeclId, FieldValue, MemoryRegion, Registry, Result, SlotRef, StorageRegion, StructValue, TypeClass, TypeDescriptor, Value, WORD_SIZE,
	Word,
};

/// Runtime limits and behavior switches for value decoding.
#[derive(Debug, Clone)]
pub struct DecodeOptions {
	/// Maximum recursive dispatch depth.
	pub max_depth: u32,
	/// Maximum allowed array element count.
	pub max_array_elems: usize,
	/// Maximum string or array payload read in bytes.
	pub max_payload_bytes: usize,
	/// Render addresses with mixed-case checksum.
	pub checksum_addresses: bool,
}

impl Default for DecodeOptions {
	fn default() -> Self {
		Self {
			max_depth: 32,
			max_array_elems: 4096,
			max_payload_bytes: 1024 * 1024,
			checksum_addresses: true,
		}
	}
}

/// Read-only regions and declarations shared by every recursive decode call.
#[derive(Clone, Copy)]
pub struct DecodeState<'a> {
	/// Linear scratch region.
	pub memory: &'a dyn MemoryRegion,
	/// Slot-addressed region.
	pub storage: &'a dyn StorageRegion,
	/// Struct declarations.
	pub registry: &'a Registry,
}

impl<'a> DecodeState<'a> {
	/// Bundle regions and registry.
	pub fn new(memory: &'a dyn MemoryRegion, storage: &'a dyn StorageRegion, registry: &'a Registry) -> Self {
		Self { memory, storage, registry }
	}
}

/// Where the value to decode lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Location<'a> {
	/// Raw bytes of a value type.
	Bytes(&'a [u8]),
	/// Byte offset into memory.
	Pointer(usize),
	/// Storage slot key.
	Slot(U256),
}

impl Location<'_> {
	fn kind(&self) -> &'static str {
		match self {
			Self::Bytes(_) => "bytes",
			Self::Pointer(_) => "pointer",
			Self::Slot(_) => "slot",
		}
	}
}

/// Decode a value of type `ty` found at `location`.
pub fn decode(ty: &TypeDescriptor, location: Location<'_>, state: &DecodeState<'_>, opt: &DecodeOptions) -> Result<Value> {
	Decoder { state: *state, opt }.decode(ty, location, 0)
}

/// Decode a value type (or a reference payload already sliced) from raw bytes.
pub fn decode_value(ty: &TypeDescriptor, bytes: &[u8], state: &DecodeState<'_>, opt: &DecodeOptions) -> Result<Value> {
	Decoder { state: *state, opt }.value(ty, bytes, 0)
}

/// Decode a memory-resident reference whose header word sits at `pointer`.
pub fn decode_memory_reference(ty: &TypeDescriptor, pointer: usize, state: &DecodeState<'_>, opt: &DecodeOptions) -> Result<Value> {
	let decoder = Decoder { state: *state, opt };
	match classify(ty) {
		Strategy::Memory(kind) => decoder.memory(ty, kind, pointer, 0),
		_ => Ok(unrecognized(ty, "memory reference")),
	}
}

/// Decode a storage-resident reference anchored at `slot`.
pub fn decode_storage_reference(ty: &TypeDescriptor, slot: U256, state: &DecodeState<'_>, opt: &DecodeOptions) -> Result<Value> {
	let decoder = Decoder { state: *state, opt };
	match classify(ty) {
		Strategy::Storage(kind) => decoder.storage(ty, kind, slot, 0),
		_ => Ok(unrecognized(ty, "storage reference")),
	}
}

enum Strategy<'t> {
	Value,
	Memory(MemoryRef<'t>),
	Storage(StorageRef),
	Unrecognized,
}

enum MemoryRef<'t> {
	String,
	Array,
	Struct { name: &'t str, declaration: DeclId },
}

enum StorageRef {
	String,
	Array,
}

fn classify(ty: &TypeDescriptor) -> Strategy<'_> {
	match (ty.location, &ty.class) {
		(None, _) => Strategy::Value,
		(Some(DataLocation::Memory), TypeClass::String) => Strategy::Memory(MemoryRef::String),
		(Some(DataLocation::Memory), TypeClass::Array { .. }) => Strategy::Memory(MemoryRef::Array),
		(Some(DataLocation::Memory), TypeClass::Struct { name, declaration }) => Strategy::Memory(MemoryRef::Struct {
			name,
			declaration: *declaration,
		}),
		(Some(DataLocation::Storage), TypeClass::String) => Strategy::Storage(StorageRef::String),
		(Some(DataLocation::Storage), TypeClass::Array { .. }) => Strategy::Storage(StorageRef::Array),
		_ => Strategy::Unrecognized,
	}
}

/// Human-readable label of the decoding strategy `ty` selects.
pub fn describe_strategy(ty: &TypeDescriptor) -> &'static str {
	match classify(ty) {
		Strategy::Value => "value",
		Strategy::Memory(MemoryRef::String) => "memory string",
		Strategy::Memory(MemoryRef::Array) => "memory array",
		Strategy::Memory(MemoryRef::Struct { .. }) => "memory struct",
		Strategy::Storage(StorageRef::String) => "storage string",
		Strategy::Storage(StorageRef::Array) => "storage array",
		Strategy::Unrecognized => "unrecognized",
	}
}

fn unrecognized(ty: &TypeDescriptor, site: &'static str) -> Value {
	debug!(ty = %ty, site, "unrecognized type");
	Value::Unrecognized
}

struct Decoder<'a> {
	state: DecodeState<'a>,
	opt: &'a DecodeOptions,
}

impl Decoder<'_> {
	fn decode(&self, ty: &TypeDescriptor, location: Location<'_>, depth: u32) -> Result<Value> {
		if depth >= self.opt.max_depth {
			return Err(DecodeError::DecodeDepthExceeded { max_depth: self.opt.max_depth });
		}

		match (classify(ty), location) {
			(Strategy::Unrecognized, _) => Ok(unrecognized(ty, "dispatch")),
			(Strategy::Value, Location::Bytes(bytes)) => self.value(ty, bytes, depth),
			(Strategy::Value, other) => Err(DecodeError::LocationMismatch {
				expected: "bytes",
				got: other.kind(),
			}),
			(Strategy::Memory(kind), Location::Pointer(pointer)) => self.memory(ty, kind, pointer, depth),
			(Strategy::Storage(kind), Location::Slot(slot)) => self.storage(ty, kind, slot, depth),
			// Reference-typed array elements arrive as flat words and are not chased.
			(Strategy::Memory(_) | Strategy::Storage(_), Location::Bytes(_)) => Ok(unrecognized(ty, "reference element")),
			(Strategy::Memory(_), other) => Err(DecodeError::LocationMismatch {
				expected: "pointer",
				got: other.kind(),
			}),
			(Strategy::Storage(_), other) => Err(DecodeError::LocationMismatch {
				expected: "slot",
				got: other.kind(),
			}),
		}
	}

	fn value(&self, ty: &TypeDescriptor, bytes: &[u8], depth: u32) -> Result<Value> {
		match &ty.class {
			TypeClass::Bool => Ok(Value::Bool(bytes.iter().any(|byte| *byte != 0))),
			TypeClass::Uint(_) => Ok(Value::Uint(to_unsigned(bytes)?)),
			TypeClass::Int(_) => Ok(Value::Int(to_signed(bytes)?)),
			TypeClass::Address => Ok(Value::Address(to_address_string(bytes, self.opt.checksum_addresses).into_boxed_str())),
			TypeClass::String => Ok(Value::String(bytes.iter().map(|byte| char::from(*byte)).collect::<String>().into_boxed_str())),
			TypeClass::Array { element, .. } => self.array(element, bytes, depth),
			_ => Ok(unrecognized(ty, "value")),
		}
	}

	fn array(&self, element: &TypeDescriptor, bytes: &[u8], depth: u32) -> Result<Value> {
		if bytes.len() % WORD_SIZE != 0 {
			return Err(DecodeError::MisalignedArray {
				len: bytes.len(),
				width: WORD_SIZE,
			});
		}
		let count = bytes.len() / WORD_SIZE;
		self.check_count(count)?;

		let mut cursor = WordCursor::new(bytes);
		let mut values = Vec::with_capacity(count);
		for idx in 0..count {
			trace!(idx, at = cursor.pos(), "array element");
			let chunk = cursor.read_word()?;
			values.push(self.decode(element, Location::Bytes(chunk), depth + 1)?);
		}
		Ok(Value::Array(values))
	}

	#[tracing::instrument(level = "trace", skip_all, fields(ty = %ty, pointer = pointer))]
	fn memory(&self, ty: &TypeDescriptor, kind: MemoryRef<'_>, pointer: usize, depth: u32) -> Result<Value> {
		match kind {
			MemoryRef::String => {
				let len = to_usize(self.memory_header(pointer)?, "memory string length")?;
				self.check_payload(len)?;
				let bytes = self.state.memory.read_bytes(payload_offset(pointer)?, len);
				self.value(ty, &bytes, depth)
			}
			MemoryRef::Array => {
				let count = to_usize(self.memory_header(pointer)?, "memory array length")?;
				self.check_count(count)?;
				let len = count.checked_mul(WORD_SIZE).ok_or(DecodeError::LengthOverflow { what: "memory array length" })?;
				self.check_payload(len)?;
				let bytes = self.state.memory.read_bytes(payload_offset(pointer)?, len);
				self.value(ty, &bytes, depth)
			}
			MemoryRef::Struct { name, declaration } => self.memory_struct(name, declaration, pointer, depth),
		}
	}

	fn memory_header(&self, pointer: usize) -> Result<U256> {
		let header = self.state.memory.read_word(pointer).unwrap_or([0_u8; WORD_SIZE]);
		to_unsigned(&header)
	}

	fn memory_struct(&self, name: &str, declaration: DeclId, pointer: usize, depth: u32) -> Result<Value> {
		let members = self
			.state
			.registry
			.members_of(declaration)
			.ok_or(DecodeError::MissingDeclaration { id: declaration.0 })?;

		let mut fields = Vec::with_capacity(members.len());
		for (idx, member) in members.iter().enumerate() {
			let at = idx
				.checked_mul(WORD_SIZE)
				.and_then(|offset| pointer.checked_add(offset))
				.ok_or(DecodeError::LengthOverflow { what: "struct member offset" })?;
			let word: Word = self.state.memory.read_word(at).unwrap_or([0_u8; WORD_SIZE]);
			let member_ty = member.ty.to_memory();
			trace!(member = %member.name, ty = %member_ty, at, "memory struct member");

			let value = match classify(&member_ty) {
				Strategy::Value => self.decode(&member_ty, Location::Bytes(&word), depth + 1)?,
				Strategy::Memory(_) => {
					let target = to_usize(to_unsigned(&word)?, "struct member pointer")?;
					self.decode(&member_ty, Location::Pointer(target), depth + 1)?
				}
				Strategy::Storage(_) | Strategy::Unrecognized => unrecognized(&member_ty, "struct member"),
			};
			fields.push(FieldValue {
				name: member.name.clone(),
				value,
			});
		}

		Ok(Value::Struct(StructValue {
			type_name: name.into(),
			fields,
		}))
	}

	#[tracing::instrument(level = "trace", skip_all, fields(ty = %ty, slot = %slot))]
	fn storage(&self, ty: &TypeDescriptor, kind: StorageRef, slot: U256, depth: u32) -> Result<Value> {
		let Some(data) = self.state.storage.read_word(slot) else {
			debug!(slot = %slot, "no data in storage slot");
			return Ok(Value::Absent);
		};

		let (len, at) = match kind {
			StorageRef::Array => {
				let count = to_usize(to_unsigned(&data)?, "storage array length")?;
				self.check_count(count)?;
				let len = count.checked_mul(WORD_SIZE).ok_or(DecodeError::LengthOverflow { what: "storage array length" })?;
				(len, SlotRef::Family(slot))
			}
			StorageRef::String => {
				let last = data[WORD_SIZE - 1];
				if last % 2 == 0 {
					(usize::from(last / 2), SlotRef::Slot(slot))
				} else {
					let raw = to_unsigned(&data)?;
					let len = to_usize((raw - U256::from(1_u8)) >> 1, "storage string length")?;
					(len, SlotRef::Family(slot))
				}
			}
		};

		self.check_payload(len)?;
		trace!(len, at = ?at, "storage payload");
		let bytes = self.state.storage.read_bytes(at, len);
		self.value(ty, &bytes, depth)
	}

	fn check_count(&self, count: usize) -> Result<()> {
		if count > self.opt.max_array_elems {
			return Err(DecodeError::DecodeArrayTooLarge {
				count,
				max: self.opt.max_array_elems,
			});
		}
		Ok(())
	}

	fn check_payload(&self, len: usize) -> Result<()> {
		if len > self.opt.max_payload_bytes {
			return Err(DecodeError::DecodePayloadTooLarge {
				len,
				max: self.opt.max_payload_bytes,
			});
		}
		Ok(())
	}
}

fn payload_offset(pointer: usize) -> Result<usize> {
	pointer.checked_add(WORD_SIZE).ok_or(DecodeError::LengthOverflow { what: "memory pointer" })
}
