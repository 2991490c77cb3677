use alloy_primitives::{I256, U256};

/// Decoded runtime value tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
	/// The region had no data at the queried location.
	Absent,
	/// The type class is not handled at this call site.
	Unrecognized,
	/// Boolean; any non-zero byte is `true`.
	Bool(bool),
	/// Unsigned integer up to 256 bits.
	Uint(U256),
	/// Two's-complement signed integer up to 256 bits.
	Int(I256),
	/// `0x`-prefixed hex address.
	Address(Box<str>),
	/// Text payload, one char per byte.
	String(Box<str>),
	/// Array elements in index order.
	Array(Vec<Value>),
	/// Struct instance.
	Struct(StructValue),
}

impl Value {
	/// Stable lowercase label for the value kind.
	pub fn kind(&self) -> &'static str {
		match self {
			Self::Absent => "absent",
			Self::Unrecognized => "unrecognized",
			Self::Bool(_) => "bool",
			Self::Uint(_) => "uint",
			Self::Int(_) => "int",
			Self::Address(_) => "address",
			Self::String(_) => "string",
			Self::Array(_) => "array",
			Self::Struct(_) => "struct",
		}
	}
}

/// Decoded struct instance with members in declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructValue {
	/// Declared struct name.
	pub type_name: Box<str>,
	/// Decoded members.
	pub fields: Vec<FieldValue>,
}

impl StructValue {
	/// Look up a member value by name.
	pub fn field(&self, name: &str) -> Option<&Value> {
		self.fields.iter().find(|field| field.name.as_ref() == name).map(|field| &field.value)
	}
}

/// One decoded struct member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldValue {
	/// Member name.
	pub name: Box<str>,
	/// Member value.
	pub value: Value,
}
