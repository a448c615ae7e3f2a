//! Block decompression
//!
//! This module unpacks one compressed block from a cartridge image:
//! codeword stream -> LZW expansion -> run-length expansion.

mod lzw;
mod reader;
mod rle;

pub use lzw::decompress_lzw;
pub use reader::read_codewords;
pub use rle::decompress_rle;

use crate::common::{BlockStats, Result};

/// One decompressed block plus the number of image bytes it occupied.
#[derive(Debug, Clone)]
pub struct UnpackedBlock {
    /// The raw asset bytes
    pub data: Vec<u8>,
    /// Exact number of compressed bytes consumed from the image, rounded up
    /// to a whole byte. The next block starts at `offset + compressed_len`.
    pub compressed_len: usize,
}

/// Decompress the block starting at `offset` in `image`.
///
/// Never reads past the end code; `compressed_len` in the result is the
/// authoritative consumed-length for callers walking consecutive blocks.
pub fn unpack_block(image: &[u8], offset: usize) -> Result<UnpackedBlock> {
    let (codewords, compressed_len) = read_codewords(image, offset)?;
    let rle = decompress_lzw(&codewords)?;
    let data = decompress_rle(&rle)?;
    Ok(UnpackedBlock {
        data,
        compressed_len,
    })
}

/// Decompress the block at `offset` and report size statistics for each
/// stage of the pipeline.
pub fn block_stats(image: &[u8], offset: usize) -> Result<BlockStats> {
    let (codewords, compressed_len) = read_codewords(image, offset)?;
    let rle = decompress_lzw(&codewords)?;
    let raw = decompress_rle(&rle)?;
    Ok(BlockStats {
        codeword_count: codewords.len(),
        compressed_len,
        rle_len: rle.len(),
        raw_len: raw.len(),
    })
}
