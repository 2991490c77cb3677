//! Public library API for decoding typed values out of word-addressed memory and slot-addressed storage.

/// Type descriptors, region access, snapshot loading, and the value decoder.
pub mod data;
