//! LZW expansion
//!
//! The decode-side dictionary is an arena of `(first byte, previous code)`
//! pairs; phrase bytes are materialized by walking the chain back to a
//! literal. Codewords are plain indices into this arena, offset by
//! [`FIRST_PHRASE_CODE`].

use crate::common::{CartPackError, Codeword, Result, CODE_RESET, FIRST_PHRASE_CODE};

/// Decode-side phrase table, rebuilt at block start and on every reset.
#[derive(Debug, Default)]
struct PhraseTable {
    entries: Vec<(u8, u16)>,
}

impl PhraseTable {
    fn new() -> Self {
        Self::default()
    }

    fn clear(&mut self) {
        self.entries.clear();
    }

    /// The code the next defined entry will receive.
    fn next_code(&self) -> usize {
        FIRST_PHRASE_CODE as usize + self.entries.len()
    }

    fn push(&mut self, first_byte: u8, prev_code: u16) {
        self.entries.push((first_byte, prev_code));
    }

    /// Materialize the phrase bytes for `code` by walking the chain.
    fn phrase(&self, mut code: u16) -> Result<Vec<u8>> {
        let mut bytes = Vec::new();
        while code > 0xFF {
            let entry = (code as usize)
                .checked_sub(FIRST_PHRASE_CODE as usize)
                .and_then(|index| self.entries.get(index));
            let Some(&(byte, prev)) = entry else {
                return Err(CartPackError::UndefinedCode {
                    code,
                    next: self.next_code() as u16,
                });
            };
            bytes.push(byte);
            code = prev;
        }
        bytes.push(code as u8);
        bytes.reverse();
        Ok(bytes)
    }
}

/// Expand a codeword sequence into the intermediate run-length stream.
///
/// Decoding stops at the end code; a reset reinitializes the dictionary and
/// the codeword that follows it bypasses the dictionary entirely (it must be
/// a literal). A codeword equal to the next free code names the entry about
/// to be defined and expands to the previous phrase plus its own first byte.
pub fn decompress_lzw(codewords: &[Codeword]) -> Result<Vec<u8>> {
    let mut table = PhraseTable::new();
    let mut out = Vec::new();
    let mut prev: u16 = 0;

    for &codeword in codewords {
        match codeword {
            Codeword::End => break,
            Codeword::Reset => table.clear(),
            _ => {
                let raw = codeword.raw();
                if prev == CODE_RESET {
                    let Codeword::Literal(byte) = codeword else {
                        return Err(CartPackError::NonLiteralAfterReset { code: raw });
                    };
                    out.push(byte);
                } else {
                    let phrase = if (raw as usize) < table.next_code() {
                        table.phrase(raw)?
                    } else if raw as usize == table.next_code() {
                        let mut phrase = table.phrase(prev)?;
                        phrase.push(phrase[0]);
                        phrase
                    } else {
                        return Err(CartPackError::UndefinedCode {
                            code: raw,
                            next: table.next_code() as u16,
                        });
                    };
                    table.push(phrase[0], prev);
                    out.extend_from_slice(&phrase);
                }
            }
        }
        prev = codeword.raw();
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::Codeword::{End, Literal, Reference, Reset};

    #[test]
    fn test_literals_only() {
        let codewords = [Reset, Literal(0x41), Literal(0x42), Literal(0x43), End];
        assert_eq!(decompress_lzw(&codewords).unwrap(), b"ABC");
    }

    #[test]
    fn test_phrase_reference() {
        // After A, B the table holds 0x102 = "AB"
        let codewords = [Reset, Literal(0x41), Literal(0x42), Reference(0x102), End];
        assert_eq!(decompress_lzw(&codewords).unwrap(), b"ABAB");
    }

    #[test]
    fn test_kwkwk_reference() {
        // 0x102 is not defined yet when it is read: previous phrase "A" plus
        // its own first byte gives "AA".
        let codewords = [Reset, Literal(0x41), Reference(0x102), End];
        assert_eq!(decompress_lzw(&codewords).unwrap(), b"AAA");
    }

    #[test]
    fn test_reset_rebuilds_dictionary() {
        let codewords = [
            Reset,
            Literal(0x41),
            Literal(0x42),
            Reset,
            Literal(0x43),
            Reference(0x102),
            End,
        ];
        // The old "AB" entry is gone; 0x102 after the reset is the KwKwK
        // case over "C".
        assert_eq!(decompress_lzw(&codewords).unwrap(), b"ABCCC");
    }

    #[test]
    fn test_undefined_reference_fails() {
        let codewords = [Reset, Literal(0x41), Reference(0x200), End];
        assert!(matches!(
            decompress_lzw(&codewords),
            Err(CartPackError::UndefinedCode { code: 0x200, .. })
        ));
    }

    #[test]
    fn test_reference_after_reset_fails() {
        let codewords = [Reset, Reference(0x102), End];
        assert!(matches!(
            decompress_lzw(&codewords),
            Err(CartPackError::NonLiteralAfterReset { code: 0x102 })
        ));
    }

    #[test]
    fn test_stops_at_end_code() {
        let codewords = [Reset, Literal(0x41), End, Literal(0x42)];
        assert_eq!(decompress_lzw(&codewords).unwrap(), b"A");
    }
}
