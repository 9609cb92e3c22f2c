use bytes::Bytes;

use crate::error::Result;
use crate::pipeline::stage::{Emit, Stage};

/// Decodes byte chunks into text chunks.
///
/// A multi-byte character split across two chunks is carried over and
/// decoded whole. Invalid sequences, and an incomplete one left at end of
/// stream, become U+FFFD.
#[derive(Default)]
pub struct Utf8Decoder {
    carry: Vec<u8>,
}

impl Utf8Decoder {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Stage<Bytes> for Utf8Decoder {
    type Output = String;

    fn name(&self) -> &'static str {
        "utf8_decoder"
    }

    fn accept<E>(&mut self, chunk: Bytes, out: &mut E) -> Result<()>
    where
        E: Emit<String> + ?Sized,
    {
        let joined: Vec<u8>;
        let mut rest: &[u8] = if self.carry.is_empty() {
            &chunk
        } else {
            let mut buf = std::mem::take(&mut self.carry);
            buf.extend_from_slice(&chunk);
            joined = buf;
            &joined
        };

        let mut text = String::with_capacity(rest.len());
        loop {
            match std::str::from_utf8(rest) {
                Ok(valid) => {
                    text.push_str(valid);
                    break;
                }
                Err(err) => {
                    let (valid, tail) = rest.split_at(err.valid_up_to());
                    text.push_str(&String::from_utf8_lossy(valid));
                    match err.error_len() {
                        Some(bad) => {
                            text.push(char::REPLACEMENT_CHARACTER);
                            rest = &tail[bad..];
                        }
                        None => {
                            // Incomplete sequence at the end of the chunk.
                            self.carry = tail.to_vec();
                            break;
                        }
                    }
                }
            }
        }

        if text.is_empty() {
            return Ok(());
        }
        out.emit(text)
    }

    fn flush<E>(&mut self, out: &mut E) -> Result<()>
    where
        E: Emit<String> + ?Sized,
    {
        if self.carry.is_empty() {
            return Ok(());
        }
        self.carry.clear();
        out.emit(char::REPLACEMENT_CHARACTER.to_string())
    }

    fn discard(&mut self) {
        self.carry = Vec::new();
    }
}
