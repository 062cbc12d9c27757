/// Magic bytes at the start of every archive.
pub const PAC_MAGIC: [u8; 4] = *b"FPAC";

/// Width in bytes of every integer field.
pub const INT_SIZE: u32 = 4;

/// Directory entries are sized in multiples of this many bytes when building.
pub const BLOCK_SIZE: u32 = 16;

/// Length of the fixed header: the magic and seven integer fields.
pub const HEADER_SIZE: u32 = 32;

/// Number of meaningful integer fields in a directory entry (id, offset, size).
pub const ENTRY_FIELDS: u32 = 3;

/// File extension of archives, without the dot.
pub const ARCHIVE_EXTENSION: &str = "pac";
