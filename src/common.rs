//! Common types and constants for the cartridge block codec
//!
//! This module defines the format constants, the codeword type, and the error
//! type shared by the compression (pack) and decompression (unpack) halves.

use thiserror::Error;

/// Codeword width at the start of a block and after every dictionary reset
pub const MIN_CODE_WIDTH: u32 = 9;

/// Largest codeword width the format allows
pub const MAX_CODE_WIDTH: u32 = 12;

/// Control code that rebuilds the dictionary and drops back to the minimum width
pub const CODE_RESET: u16 = 0x100;

/// Control code that terminates a block
pub const CODE_END: u16 = 0x101;

/// First codeword value assigned to a dictionary phrase
pub const FIRST_PHRASE_CODE: u16 = 0x102;

/// Exclusive upper bound on codeword values; the packer resets the dictionary
/// before any codeword would need more than [`MAX_CODE_WIDTH`] bits
pub const CODE_LIMIT: u16 = 1 << MAX_CODE_WIDTH;

/// Escape marker byte of the run-length layer
pub const RLE_MARKER: u8 = 0x81;

/// Shortest run the RLE encoder replaces with an escape sequence
pub const RLE_MIN_RUN: usize = 3;

/// Longest run a single escape sequence can describe (the count is one byte)
pub const RLE_MAX_RUN: usize = 255;

/// A single unit of the compressed bitstream.
///
/// Codewords are 9 to 12 bits wide on the wire; the raw value space is
/// literals (`0x00..=0xFF`), the two control codes, and dictionary
/// references from [`FIRST_PHRASE_CODE`] up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Codeword {
    /// A literal byte value (raw codes `0x00..=0xFF`)
    Literal(u8),
    /// A back-reference to a dictionary phrase (raw codes `0x102` and up)
    Reference(u16),
    /// Dictionary reset (raw code `0x100`)
    Reset,
    /// End of block (raw code `0x101`)
    End,
}

impl Codeword {
    /// Classify a raw codeword value.
    pub fn from_raw(raw: u16) -> Self {
        match raw {
            0x00..=0xFF => Codeword::Literal(raw as u8),
            CODE_RESET => Codeword::Reset,
            CODE_END => Codeword::End,
            _ => Codeword::Reference(raw),
        }
    }

    /// The raw value written to the bitstream.
    pub fn raw(self) -> u16 {
        match self {
            Codeword::Literal(byte) => byte as u16,
            Codeword::Reference(code) => code,
            Codeword::Reset => CODE_RESET,
            Codeword::End => CODE_END,
        }
    }
}

/// Error type for cartpack operations
#[derive(Debug, Error)]
pub enum CartPackError {
    /// Bit or byte read past the end of the source buffer
    #[error("read past end of data at byte offset {offset}")]
    OutOfBounds {
        /// Block-relative byte offset of the failed read
        offset: usize,
    },

    /// A codeword references a dictionary entry that has not been defined yet
    #[error("corrupt stream: codeword {code:#05x} references an undefined dictionary entry (next free code {next:#05x})")]
    UndefinedCode {
        /// The offending codeword value
        code: u16,
        /// The next code the dictionary would assign
        next: u16,
    },

    /// The codeword directly after a dictionary reset must be a literal
    #[error("corrupt stream: codeword {code:#05x} directly after a dictionary reset is not a literal")]
    NonLiteralAfterReset {
        /// The offending codeword value
        code: u16,
    },

    /// A run-length escape marker with no count byte at the end of the data
    #[error("corrupt stream: run-length escape truncated at end of data")]
    TruncatedRun,

    /// A value does not fit in the current codeword width (encoder invariant
    /// violation, not a data-dependent condition)
    #[error("encoding overflow: value {value:#05x} does not fit in {width} bits")]
    EncodingOverflow {
        /// The value that was being written
        value: u16,
        /// The width it had to fit in
        width: u32,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for cartpack operations
pub type Result<T> = std::result::Result<T, CartPackError>;

/// Statistics for one compressed block
#[derive(Debug, Default, Clone, Copy)]
pub struct BlockStats {
    /// Number of codewords in the block, including the end code
    pub codeword_count: usize,
    /// Compressed size in bytes, as consumed from the image
    pub compressed_len: usize,
    /// Size of the intermediate run-length stream
    pub rle_len: usize,
    /// Size of the raw asset bytes
    pub raw_len: usize,
}
