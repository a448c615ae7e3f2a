//! CartPack - codec for the block compression format used by cartridge
//! asset images
//!
//! Blocks are stored as a variable-width LZW codeword stream (9 to 12 bits,
//! least significant bit first) over a run-length encoded byte layer. The
//! crate decodes blocks in place inside a full image, reports how many bytes
//! a block occupies, and recompresses data bit-identically to the original
//! packer, so a repacked image matches the source image byte for byte.
//!
//! # Example - Unpacking
//!
//! ```no_run
//! use cartpack::unpack_block;
//!
//! let image = std::fs::read("assets.img")?;
//! let block = unpack_block(&image, 0x4000)?;
//! println!("{} bytes, {} compressed", block.data.len(), block.compressed_len);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Example - Packing
//!
//! ```
//! use cartpack::{pack_block, unpack_block};
//!
//! let packed = pack_block(b"Hello, World! Hello, World!")?;
//! let block = unpack_block(&packed, 0)?;
//! assert_eq!(block.data, b"Hello, World! Hello, World!");
//! # Ok::<(), cartpack::CartPackError>(())
//! ```

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

// Public modules
pub mod bits;
pub mod common;
pub mod error;
pub mod pack;
pub mod unpack;

// Async modules (only available with async feature)
#[cfg(feature = "async")]
pub mod async_batch;
#[cfg(feature = "async")]
pub mod async_convenience;

// Re-export commonly used types
pub use common::{
    BlockStats, CartPackError, Codeword, Result, CODE_END, CODE_LIMIT, CODE_RESET,
    FIRST_PHRASE_CODE, MAX_CODE_WIDTH, MIN_CODE_WIDTH, RLE_MARKER, RLE_MAX_RUN, RLE_MIN_RUN,
};
pub use pack::{pack_block, pack_codewords};
pub use unpack::{block_stats, unpack_block, UnpackedBlock};

// Re-export async types when async feature is enabled
#[cfg(feature = "async")]
pub use async_batch::AsyncBatchProcessor;
#[cfg(feature = "async")]
pub use async_convenience::*;
