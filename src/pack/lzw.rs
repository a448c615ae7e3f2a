//! LZW compression
//!
//! The encode-side dictionary stores full phrases and is searched for the
//! longest prefix of the remaining input. Search order, tie-breaks, the
//! KwKwK candidate, and the reset schedule all match the original packer,
//! so recompression is bit-identical rather than merely decodable.

use crate::common::{Codeword, CODE_LIMIT, FIRST_PHRASE_CODE};

/// Encode-side phrase table.
#[derive(Debug, Default)]
struct PhraseDict {
    phrases: Vec<Vec<u8>>,
}

impl PhraseDict {
    fn new() -> Self {
        Self::default()
    }

    fn clear(&mut self) {
        self.phrases.clear();
    }

    /// The code the next defined phrase will receive.
    fn next_code(&self) -> u16 {
        FIRST_PHRASE_CODE + self.phrases.len() as u16
    }

    fn push(&mut self, phrase: Vec<u8>) {
        self.phrases.push(phrase);
    }

    /// Longest phrase that prefixes `data`; the first-defined phrase wins
    /// ties, matching the original packer's scan order.
    fn longest_match(&self, data: &[u8]) -> Option<(u16, usize)> {
        let mut best: Option<(u16, usize)> = None;
        for (index, phrase) in self.phrases.iter().enumerate() {
            if phrase.len() > best.map_or(0, |(_, len)| len) && data.starts_with(phrase) {
                best = Some((FIRST_PHRASE_CODE + index as u16, phrase.len()));
            }
        }
        best
    }
}

/// Compress a byte stream into a codeword sequence.
///
/// The stream opens with a reset, the first byte is written directly, and a
/// fresh reset is emitted whenever the dictionary reaches the 12-bit code
/// ceiling. Empty input compresses to the end code alone.
pub fn compress_lzw(data: &[u8]) -> Vec<Codeword> {
    let mut out = Vec::new();
    if data.is_empty() {
        out.push(Codeword::End);
        return out;
    }

    let mut dict = PhraseDict::new();
    out.push(Codeword::Reset);
    out.push(Codeword::Literal(data[0]));
    let mut prev: Vec<u8> = vec![data[0]];
    // 0 disables the KwKwK candidate until a phrase code has been emitted
    let mut prev_code: u16 = 0;
    let mut pos = 1;

    while pos < data.len() {
        let rest = &data[pos..];
        let matched = dict.longest_match(rest);

        // The decoder accepts the code one past the table (KwKwK); the
        // original packer prefers it whenever it covers at least as much
        // input as the best table match.
        let special = if prev_code >= FIRST_PHRASE_CODE {
            let mut phrase = prev.clone();
            phrase.push(prev[0]);
            Some(phrase)
        } else {
            None
        };

        let (code, phrase) = match special {
            Some(phrase)
                if phrase.len() >= matched.map_or(0, |(_, len)| len)
                    && rest.starts_with(&phrase) =>
            {
                (dict.next_code(), phrase)
            }
            _ => match matched {
                Some((code, len)) => (code, rest[..len].to_vec()),
                None => (u16::from(rest[0]), vec![rest[0]]),
            },
        };

        out.push(Codeword::from_raw(code));
        let mut entry = prev;
        entry.push(phrase[0]);
        dict.push(entry);
        pos += phrase.len();
        prev = phrase;
        prev_code = code;

        if dict.next_code() >= CODE_LIMIT {
            out.push(Codeword::Reset);
            dict.clear();
            if pos < data.len() {
                out.push(Codeword::Literal(data[pos]));
                prev = vec![data[pos]];
                prev_code = 0;
                pos += 1;
            }
        }
    }

    out.push(Codeword::End);
    out
}
