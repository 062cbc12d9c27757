//! Binary structures of the PAC format.
//!
//! An archive is laid out as:
//!
//! ```text
//! offset 0:           Header (HEADER_SIZE bytes)
//! offset HEADER_SIZE: file_count entries of entry_size bytes
//! offset data_start:  file data, addressed by each entry's offset and size
//! ```
//!
//! All integers are unsigned 32-bit little-endian.

#[doc(inline)]
pub use self::constants::*;
#[doc(inline)]
pub use self::directory::*;
#[doc(inline)]
pub use self::header::*;
#[doc(inline)]
pub use self::layout::*;

mod constants;
mod directory;
mod header;
mod layout;
