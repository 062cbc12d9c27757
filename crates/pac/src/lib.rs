//! PAC: codec for FPAC fixed-layout archives.
//!
//! A PAC archive bundles named, opaque files: a fixed [header](format::Header), a directory of
//! fixed-width [entries](format::Entry), then the concatenated file data.
//!
//! Use [`decode::enumerate()`] and [`decode::extract()`] to read archives, and
//! [`encode::build()`] or the [`Encoder`](encode::Encoder) to write them. The [`fs`] module has
//! the filesystem conveniences used by the command line tool.

#![warn(clippy::unwrap_used, missing_docs)]
#![deny(rust_2018_idioms)]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

pub mod decode;
pub mod encode;
pub mod error;
pub mod format;
pub mod fs;

#[doc(inline)]
pub use error::{Error, ErrorKind, Result};
