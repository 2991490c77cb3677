use std::path::PathBuf;

use slotdec::data::{DecodeOptions, Snapshot, TypeDescriptor, decode, describe_strategy};

use crate::cmd::print::{PrintOptions, print_value, value_to_json_value};
use crate::cmd::util::{emit_json, parse_location_arg};

/// Arguments for `slotdec decode`.
#[derive(clap::Args)]
pub struct Args {
	/// Snapshot file (JSON, optionally zstd-compressed).
	pub path: PathBuf,
	/// Compiler type identifier of the value.
	#[arg(long = "type")]
	pub type_id: String,
	/// Memory byte offset of a reference value.
	#[arg(long)]
	pub pointer: Option<String>,
	/// Storage slot of a reference value.
	#[arg(long)]
	pub slot: Option<String>,
	/// Raw hex bytes of a value-type value.
	#[arg(long)]
	pub bytes: Option<String>,
	/// Emit JSON instead of text.
	#[arg(long)]
	pub json: bool,
	#[arg(long)]
	pub max_depth: Option<u32>,
	#[arg(long = "max-array")]
	pub max_array: Option<usize>,
	/// Render addresses as lowercase hex.
	#[arg(long)]
	pub lowercase: bool,
}

/// Decode one typed value from a snapshot and print it.
pub fn run(args: Args) -> slotdec::data::Result<()> {
	let ty = TypeDescriptor::parse(&args.type_id)?;
	let location = parse_location_arg(args.pointer, args.slot, args.bytes)?;
	let snapshot = Snapshot::open(&args.path)?;

	let mut options = DecodeOptions::default();
	if let Some(max_depth) = args.max_depth {
		options.max_depth = max_depth;
	}
	if let Some(max_array) = args.max_array {
		options.max_array_elems = max_array;
	}
	options.checksum_addresses = !args.lowercase;

	let value = decode(&ty, location.location(), &snapshot.state(), &options)?;
	tracing::debug!(ty = %ty, location = %location.label(), kind = value.kind(), "decoded value");

	if args.json {
		return emit_json(&DecodeJson {
			path: args.path.display().to_string(),
			type_id: ty.to_string(),
			strategy: describe_strategy(&ty),
			location: location.label(),
			value: value_to_json_value(&value),
		});
	}

	println!("path: {}", args.path.display());
	println!("type: {ty}");
	println!("strategy: {}", describe_strategy(&ty));
	println!("location: {}", location.label());
	println!("value:");
	print_value(&value, 2, PrintOptions::default());

	Ok(())
}

#[derive(serde::Serialize)]
struct DecodeJson {
	path: String,
	#[serde(rename = "type")]
	type_id: String,
	strategy: &'static str,
	location: String,
	value: serde_json::Value,
}
