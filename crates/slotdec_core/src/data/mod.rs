mod compression;
mod decode;
mod error;
mod memory;
mod registry;
mod snapshot;
mod storage;
mod types;
mod value;
mod word;

/// Compression detection result.
pub use compression::Compression;
/// Dispatcher, resolvers, and decode configuration.
pub use decode::{DecodeOptions, DecodeState, Location, decode, describe_strategy, decode_memory_reference, decode_storage_reference, decode_value};
/// Error and result aliases.
pub use error::{DecodeError, Result};
/// Memory region contract and linear image.
pub use memory::{LinearMemory, MemoryRegion};
/// Struct declaration registry.
pub use registry::{MemberDecl, Registry, StructDecl};
/// Snapshot file loading.
pub use snapshot::Snapshot;
/// Storage region contract, slot tokens, and sparse image.
pub use storage::{SlotRef, SlotStorage, StorageRegion, family_start};
/// Type descriptor model.
pub use types::{DataLocation, DeclId, TypeClass, TypeDescriptor};
/// Decoded runtime value types.
pub use value::{FieldValue, StructValue, Value};
/// Word width, numeric helpers, and literal parsers.
pub use word::{WORD_SIZE, Word, WordCursor, left_pad, parse_hex_bytes, parse_u256, to_address_string, to_signed, to_unsigned, to_usize};
