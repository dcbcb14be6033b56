//! Enless frame codecs.
//!
//! The uplink decoder follows a layered structure:
//! - `layout`: header offsets (source of truth for the wire format)
//! - `reader`: bounds-checked big-endian reads
//! - `value`: sign extension, scaling and validity
//! - `parser`: schema-driven frame decoding (no direct byte indexing)
//! - `error`: explicit, actionable errors
//!
//! The downlink encoder is a placeholder. Codecs are pure and contain no
//! I/O; sources and the `codec` layer handle files and timestamps.

pub(crate) mod common;
pub mod downlink;
pub mod uplink;
