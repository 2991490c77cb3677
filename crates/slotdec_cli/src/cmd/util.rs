use alloy_primitives::U256;
use slotdec::data::{DecodeError, Location, Result, parse_hex_bytes, parse_u256, to_usize};

/// Location chosen on the command line.
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum LocationArg {
	Pointer(usize),
	Slot(U256),
	Bytes(Vec<u8>),
}

impl LocationArg {
	/// Borrow as a decoder location.
	pub(crate) fn location(&self) -> Location<'_> {
		match self {
			Self::Pointer(pointer) => Location::Pointer(*pointer),
			Self::Slot(slot) => Location::Slot(*slot),
			Self::Bytes(bytes) => Location::Bytes(bytes),
		}
	}

	/// Render as a stable `kind:value` label.
	pub(crate) fn label(&self) -> String {
		match self {
			Self::Pointer(pointer) => format!("pointer:0x{pointer:x}"),
			Self::Slot(slot) => format!("slot:0x{slot:x}"),
			Self::Bytes(bytes) => format!("bytes:{}", bytes.len()),
		}
	}
}

/// Parse exactly one of `--pointer`, `--slot`, `--bytes`.
pub(crate) fn parse_location_arg(pointer: Option<String>, slot: Option<String>, bytes: Option<String>) -> Result<LocationArg> {
	match (pointer, slot, bytes) {
		(Some(pointer), None, None) => Ok(LocationArg::Pointer(to_usize(parse_u256(&pointer)?, "pointer argument")?)),
		(None, Some(slot), None) => Ok(LocationArg::Slot(parse_u256(&slot)?)),
		(None, None, Some(bytes)) => Ok(LocationArg::Bytes(parse_hex_bytes(&bytes)?)),
		_ => Err(DecodeError::InvalidLocationArgs),
	}
}

/// Print a serializable payload as pretty JSON on stdout.
pub(crate) fn emit_json<T: serde::Serialize>(payload: &T) -> Result<()> {
	println!("{}", serde_json::to_string_pretty(payload)?);
	Ok(())
}

/// Keep at most `max_len` chars, marking the cut with `...`.
pub(crate) fn truncate(input: &str, max_len: usize) -> String {
	if input.chars().count() <= max_len {
		return input.to_owned();
	}
	let out: String = input.chars().take(max_len).collect();
	format!("{out}...")
}

#[cfg(test)]
mod tests {
	use alloy_primitives::U256;
	use slotdec::data::{DecodeError, Location};

	use super::{LocationArg, parse_location_arg, truncate};

	#[test]
	fn exactly_one_location_flag_is_required() {
		assert!(matches!(parse_location_arg(None, None, None), Err(DecodeError::InvalidLocationArgs)));
		assert!(matches!(
			parse_location_arg(Some("1".to_owned()), Some("2".to_owned()), None),
			Err(DecodeError::InvalidLocationArgs)
		));
	}

	#[test]
	fn literals_map_to_locations() {
		let pointer = parse_location_arg(Some("0x80".to_owned()), None, None).expect("pointer parses");
		assert_eq!(pointer, LocationArg::Pointer(0x80));
		assert_eq!(pointer.location(), Location::Pointer(0x80));
		assert_eq!(pointer.label(), "pointer:0x80");

		let slot = parse_location_arg(None, Some("5".to_owned()), None).expect("slot parses");
		assert_eq!(slot.location(), Location::Slot(U256::from(5_u8)));
		assert_eq!(slot.label(), "slot:0x5");

		let bytes = parse_location_arg(None, None, Some("0x0102".to_owned())).expect("bytes parse");
		assert_eq!(bytes.location(), Location::Bytes(&[1, 2]));
		assert_eq!(bytes.label(), "bytes:2");
	}

	#[test]
	fn truncate_marks_cut() {
		assert_eq!(truncate("abc", 5), "abc");
		assert_eq!(truncate("abcdef", 3), "abc...");
	}
}
