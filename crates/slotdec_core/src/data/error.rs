use thiserror::Error;

/// Crate-local result type.
pub type Result<T> = std::result::Result<T, DecodeError>;

/// Errors produced while loading snapshots and decoding values.
#[derive(Debug, Error)]
pub enum DecodeError {
	/// Filesystem or stream IO failure.
	#[error("io: {0}")]
	Io(#[from] std::io::Error),
	/// Snapshot JSON could not be parsed.
	#[error("snapshot json: {0}")]
	Json(#[from] serde_json::Error),
	/// Unknown leading snapshot bytes.
	#[error("unsupported compression or not a snapshot (magic={magic:?})")]
	UnknownMagic {
		/// First up-to-4 bytes of the stream.
		magic: [u8; 4],
	},
	/// Decompression output exceeded configured safety limit.
	#[error("decompressed output exceeded limit {limit} bytes")]
	DecompressedTooLarge {
		/// Maximum allowed output bytes.
		limit: usize,
	},
	/// Not enough bytes remained for a requested read.
	#[error("unexpected eof at offset {at}, need {need} bytes, remaining {rem}")]
	UnexpectedEof {
		/// Byte offset where the read was attempted.
		at: usize,
		/// Requested bytes.
		need: usize,
		/// Bytes still available.
		rem: usize,
	},
	/// Hex literal could not be parsed.
	#[error("invalid hex literal: {value}")]
	InvalidHex {
		/// Offending literal.
		value: String,
	},
	/// Numeric literal could not be parsed.
	#[error("invalid number literal: {value}")]
	InvalidNumber {
		/// Offending literal.
		value: String,
	},
	/// Storage word literal is longer than one word.
	#[error("storage word for slot {slot} is {len} bytes (max 32)")]
	StorageWordTooLong {
		/// Slot key as written in the snapshot.
		slot: String,
		/// Decoded byte length.
		len: usize,
	},
	/// Type identifier could not be parsed.
	#[error("invalid type identifier: {identifier}")]
	InvalidTypeIdentifier {
		/// Original identifier text.
		identifier: String,
	},
	/// Two declarations share an id.
	#[error("duplicate declaration id {id}")]
	DuplicateDeclaration {
		/// Duplicated declaration id.
		id: u64,
	},
	/// Struct declaration referenced by a type is not registered.
	#[error("decode missing declaration {id}")]
	MissingDeclaration {
		/// Missing declaration id.
		id: u64,
	},
	/// Location variant does not fit the decoding strategy.
	#[error("location mismatch: expected {expected}, got {got}")]
	LocationMismatch {
		/// Location kind the strategy needs.
		expected: &'static str,
		/// Location kind that was supplied.
		got: &'static str,
	},
	/// Array payload is not a whole number of words.
	#[error("array payload of {len} bytes is not a multiple of {width}")]
	MisalignedArray {
		/// Payload byte length.
		len: usize,
		/// Element width in bytes.
		width: usize,
	},
	/// Integer bytes do not fit 256 bits.
	#[error("integer of {len} bytes does not fit 256 bits")]
	IntegerTooWide {
		/// Byte width of the input.
		len: usize,
	},
	/// Length header or derived offset does not fit the address space.
	#[error("length or offset overflow: {what}")]
	LengthOverflow {
		/// Which quantity overflowed.
		what: &'static str,
	},
	/// Decoder recursion depth exceeded configured limit.
	#[error("decode depth exceeded (max={max_depth})")]
	DecodeDepthExceeded {
		/// Configured depth ceiling.
		max_depth: u32,
	},
	/// Array element count exceeded configured limit.
	#[error("decode array too large: count={count}, max={max}")]
	DecodeArrayTooLarge {
		/// Requested array length.
		count: usize,
		/// Maximum permitted array length.
		max: usize,
	},
	/// String or array payload exceeded configured limit.
	#[error("decode payload too large: len={len}, max={max}")]
	DecodePayloadTooLarge {
		/// Requested payload length in bytes.
		len: usize,
		/// Maximum permitted payload length.
		max: usize,
	},
	/// CLI location flags were missing or conflicting.
	#[error("expected exactly one of --pointer, --slot, --bytes")]
	InvalidLocationArgs,
}
