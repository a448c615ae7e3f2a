//! Block compression
//!
//! This module packs raw asset bytes into a compressed block:
//! run-length collapse -> LZW compression -> codeword packing. The encoder
//! mirrors the original packer decision for decision, so recompressing a
//! block that came from a real cartridge image reproduces the original
//! bytes bit-for-bit.

mod lzw;
mod rle;
mod writer;

pub use lzw::compress_lzw;
pub use rle::compress_rle;
pub use writer::pack_codewords;

use crate::common::Result;

/// Compress raw asset bytes into a block.
///
/// The output is self-delimiting: re-reading it from offset 0 yields exactly
/// the codewords written, terminated by the end code.
pub fn pack_block(data: &[u8]) -> Result<Vec<u8>> {
    pack_codewords(&compress_lzw(&compress_rle(data)))
}
