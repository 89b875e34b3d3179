//! Data File Module
//!
//! Binary I/O for the main append-style data file.
//!
//! ## Responsibilities
//! - Encode/decode the fixed 8-byte varint size fields
//! - Append size-prefixed key/value records (producer side)
//! - Sequential scan for the build phase
//! - Random-offset record reads for query verification
//!
//! ## File Format
//! ```text
//! ┌─────────────────────────────────────────────────┐
//! │ Record 1                                        │
//! │ ┌──────────────┬─────┬────────────────┬───────┐ │
//! │ │ keySize (8)  │ key │ valueSize (8)  │ value │ │
//! │ └──────────────┴─────┴────────────────┴───────┘ │
//! ├─────────────────────────────────────────────────┤
//! │ Record 2                                        │
//! │ ...                                             │
//! └─────────────────────────────────────────────────┘
//! ```
//!
//! Each size field is an LEB128 varint padded with zero bytes to exactly
//! 8 bytes, so records can be walked with fixed-width field reads while the
//! sizes themselves stay variable-length encoded.

mod record;
mod reader;
mod writer;

pub use record::{decode_u64_field, encode_u64_field, SIZE_FIELD_LEN};
pub use reader::{DataFileReader, ScannedRecord};
pub use writer::DataFileWriter;
