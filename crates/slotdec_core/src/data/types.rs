use std::fmt;

use crate::data::{DecodeError, Result};

/// Identifier of a struct declaration in the [`Registry`](crate::data::Registry).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DeclId(pub u64);

impl fmt::Display for DeclId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.0)
	}
}

/// Region a reference type lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataLocation {
	/// Linear word-addressed scratch region.
	Memory,
	/// Persistent slot-addressed region.
	Storage,
	/// Read-only call input; recognized but not decoded.
	Calldata,
}

impl DataLocation {
	/// Render location as a stable lowercase label.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Memory => "memory",
			Self::Storage => "storage",
			Self::Calldata => "calldata",
		}
	}
}

/// Declared type class, carrying per-class metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeClass {
	/// Boolean.
	Bool,
	/// Unsigned integer with declared bit width.
	Uint(u16),
	/// Signed integer with declared bit width.
	Int(u16),
	/// 20-byte account address, payable or not.
	Address,
	/// Dynamic UTF-8 string.
	String,
	/// Dynamic byte array.
	Bytes,
	/// Fixed or dynamic array.
	Array {
		/// Element type descriptor.
		element: Box<TypeDescriptor>,
		/// Static length, or `None` for dynamic arrays.
		length: Option<u64>,
	},
	/// User-defined struct.
	Struct {
		/// Declared struct name.
		name: Box<str>,
		/// Registry key for the member layout.
		declaration: DeclId,
	},
	/// Mapping; keeps the raw `$_key_$_value_$` identifier tail.
	Mapping(Box<str>),
	/// Any other identifier body.
	Other(Box<str>),
}

/// Declared type of a value plus its location qualifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDescriptor {
	/// Type class and class-specific metadata.
	pub class: TypeClass,
	/// Location qualifier; present only for reference types.
	pub location: Option<DataLocation>,
	/// Whether the identifier carried a `_ptr` suffix.
	pub pointer: bool,
}

const LOCATION_SUFFIXES: [(&str, DataLocation, bool); 6] = [
	("_memory_ptr", DataLocation::Memory, true),
	("_storage_ptr", DataLocation::Storage, true),
	("_calldata_ptr", DataLocation::Calldata, true),
	("_memory", DataLocation::Memory, false),
	("_storage", DataLocation::Storage, false),
	("_calldata", DataLocation::Calldata, false),
];

impl TypeDescriptor {
	/// Build a value-type descriptor with no location qualifier.
	pub fn new(class: TypeClass) -> Self {
		Self {
			class,
			location: None,
			pointer: false,
		}
	}

	/// Return a copy qualified with `location`.
	pub fn at(self, location: DataLocation) -> Self {
		Self {
			location: Some(location),
			pointer: location != DataLocation::Storage,
			..self
		}
	}

	/// Dynamic array of `element`.
	pub fn array_of(element: TypeDescriptor) -> Self {
		Self::new(TypeClass::Array {
			element: Box::new(element),
			length: None,
		})
	}

	/// Struct reference resolved through `declaration`.
	pub fn struct_ref(name: &str, declaration: DeclId) -> Self {
		Self::new(TypeClass::Struct {
			name: name.into(),
			declaration,
		})
	}

	/// Parse a compiler type identifier such as `t_array$_t_uint256_$dyn_memory_ptr`.
	pub fn parse(identifier: &str) -> Result<Self> {
		let invalid = || DecodeError::InvalidTypeIdentifier {
			identifier: identifier.to_owned(),
		};

		let body = identifier.strip_prefix("t_").ok_or_else(invalid)?;
		let (body, location, pointer) = split_location(body);

		let class = if let Some(rest) = body.strip_prefix("array$_") {
			let close = find_close(rest).ok_or_else(invalid)?;
			let element = Self::parse(&rest[..close])?;
			let length = match &rest[close + 2..] {
				"dyn" => None,
				digits => Some(digits.parse::<u64>().map_err(|_| invalid())?),
			};
			TypeClass::Array {
				element: Box::new(element),
				length,
			}
		} else if let Some(rest) = body.strip_prefix("struct$_") {
			let close = find_close(rest).ok_or_else(invalid)?;
			let id = rest[close + 2..].parse::<u64>().map_err(|_| invalid())?;
			TypeClass::Struct {
				name: rest[..close].into(),
				declaration: DeclId(id),
			}
		} else if let Some(rest) = body.strip_prefix("mapping") {
			if !rest.starts_with("$_") || !rest.ends_with("_$") {
				return Err(invalid());
			}
			TypeClass::Mapping(rest.into())
		} else if let Some(bits) = body.strip_prefix("uint") {
			TypeClass::Uint(parse_bits(bits).ok_or_else(invalid)?)
		} else if let Some(bits) = body.strip_prefix("int") {
			TypeClass::Int(parse_bits(bits).ok_or_else(invalid)?)
		} else {
			match body {
				"bool" => TypeClass::Bool,
				"address" | "address_payable" => TypeClass::Address,
				"string" => TypeClass::String,
				"bytes" => TypeClass::Bytes,
				"" => return Err(invalid()),
				other => TypeClass::Other(other.into()),
			}
		};

		Ok(Self { class, location, pointer })
	}

	/// Stable lowercase tag for the type class.
	pub fn type_class(&self) -> &str {
		match &self.class {
			TypeClass::Bool => "bool",
			TypeClass::Uint(_) => "uint",
			TypeClass::Int(_) => "int",
			TypeClass::Address => "address",
			TypeClass::String => "string",
			TypeClass::Bytes => "bytes",
			TypeClass::Array { .. } => "array",
			TypeClass::Struct { .. } => "struct",
			TypeClass::Mapping(_) => "mapping",
			TypeClass::Other(name) => name,
		}
	}

	/// Whether the value is reached through a pointer or slot.
	pub fn is_reference(&self) -> bool {
		self.location.is_some()
	}

	/// Location category of a reference type.
	pub fn reference_category(&self) -> Option<DataLocation> {
		self.location
	}

	/// Element type of an array.
	pub fn element_type(&self) -> Option<&TypeDescriptor> {
		match &self.class {
			TypeClass::Array { element, .. } => Some(element),
			_ => None,
		}
	}

	/// Declaration id of a struct.
	pub fn declaration_id(&self) -> Option<DeclId> {
		match &self.class {
			TypeClass::Struct { declaration, .. } => Some(*declaration),
			_ => None,
		}
	}

	/// Redescribe every storage qualifier, including nested element types, as memory.
	pub fn to_memory(&self) -> Self {
		let class = match &self.class {
			TypeClass::Array { element, length } => TypeClass::Array {
				element: Box::new(element.to_memory()),
				length: *length,
			},
			other => other.clone(),
		};

		match self.location {
			Some(DataLocation::Storage) => Self {
				class,
				location: Some(DataLocation::Memory),
				pointer: true,
			},
			location => Self {
				class,
				location,
				pointer: self.pointer,
			},
		}
	}
}

impl fmt::Display for TypeDescriptor {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str("t_")?;
		match &self.class {
			TypeClass::Bool => f.write_str("bool")?,
			TypeClass::Uint(bits) => write!(f, "uint{bits}")?,
			TypeClass::Int(bits) => write!(f, "int{bits}")?,
			TypeClass::Address => f.write_str("address")?,
			TypeClass::String => f.write_str("string")?,
			TypeClass::Bytes => f.write_str("bytes")?,
			TypeClass::Array { element, length } => match length {
				Some(length) => write!(f, "array$_{element}_${length}")?,
				None => write!(f, "array$_{element}_$dyn")?,
			},
			TypeClass::Struct { name, declaration } => write!(f, "struct$_{name}_${declaration}")?,
			TypeClass::Mapping(tail) => write!(f, "mapping{tail}")?,
			TypeClass::Other(name) => f.write_str(name)?,
		}
		if let Some(location) = self.location {
			write!(f, "_{}", location.as_str())?;
			if self.pointer {
				f.write_str("_ptr")?;
			}
		}
		Ok(())
	}
}

fn split_location(body: &str) -> (&str, Option<DataLocation>, bool) {
	for (suffix, location, pointer) in LOCATION_SUFFIXES {
		if let Some(rest) = body.strip_suffix(suffix) {
			return (rest, Some(location), pointer);
		}
	}
	(body, None, false)
}

/// Find the `_$` closing the bracket opened just before `rest`, skipping nested `$_` pairs.
///
/// A `mapping$_K_$_V_$` bracket holds one extra `_$` separating key from value.
fn find_close(rest: &str) -> Option<usize> {
	let bytes = rest.as_bytes();
	// One entry per open bracket; `true` while a mapping still awaits its key separator.
	let mut open: Vec<bool> = Vec::new();
	let mut idx = 0;
	while idx + 1 < bytes.len() {
		match (bytes[idx], bytes[idx + 1]) {
			(b'$', b'_') => {
				open.push(rest[..idx].ends_with("mapping"));
				idx += 2;
			}
			(b'_', b'$') => {
				match open.last_mut() {
					None => return Some(idx),
					Some(awaiting) if *awaiting => *awaiting = false,
					Some(_) => {
						open.pop();
					}
				}
				idx += 2;
			}
			_ => idx += 1,
		}
	}
	None
}

fn parse_bits(raw: &str) -> Option<u16> {
	if raw.is_empty() {
		return Some(256);
	}
	let bits = raw.parse::<u16>().ok()?;
	(bits > 0 && bits <= 256 && bits % 8 == 0).then_some(bits)
}
