//! # hf2
//!
//! Huffman compression of whole files into the HF2 container format.
//!
//! ```
//! use hf2::{AutoSafe, compress, decompress};
//!
//! let text = "a rose is a rose is a rose ".repeat(100);
//! let container = compress(text.as_bytes(), AutoSafe::Reject)?;
//! assert!(container.len() < text.len());
//! assert_eq!(decompress(&container)?, text.as_bytes());
//! # Ok::<(), hf2::Error>(())
//! ```

pub mod bitpack;
pub mod cipher;
pub mod codec;
pub mod config;
pub mod container;
pub mod error;
pub mod frequency;
pub mod logging;
pub mod pipeline;
pub mod store;
pub mod tree;

pub use codec::{AutoSafe, compress, decompress};
pub use error::{Error, FormatError, PolicyError, Result, StreamError};
