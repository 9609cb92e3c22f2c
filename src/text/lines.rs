use crate::error::{Error, Result};
use crate::pipeline::stage::{Emit, Stage};

/// Reassembles arbitrarily chunked text into delimiter-separated units.
///
/// Chunk boundaries need not line up with delimiters. Text after the last
/// delimiter stays pending across chunks and is emitted as a final unit at
/// end of stream, so every character fed in ends up in exactly one unit.
///
/// - `"\n\n"` yields two empty units, never coalesced.
/// - A chunk ending exactly on a delimiter leaves nothing pending.
/// - No chunks at all yields no units.
pub struct LineSplitter {
    pending: String,
    delimiter: char,
    strip_cr: bool,
    max_line_bytes: Option<usize>,
}

impl LineSplitter {
    pub fn new() -> Self {
        Self {
            pending: String::new(),
            delimiter: '\n',
            strip_cr: false,
            max_line_bytes: None,
        }
    }

    pub fn delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Drop one trailing `\r` from each unit (CRLF input).
    pub fn strip_cr(mut self, yes: bool) -> Self {
        self.strip_cr = yes;
        self
    }

    /// Longest unit, in bytes, this splitter will hold. Exceeding it is an
    /// error.
    pub fn max_line_bytes(mut self, n: usize) -> Self {
        self.max_line_bytes = Some(n);
        self
    }

    /// Text received since the last delimiter.
    pub fn pending(&self) -> &str {
        &self.pending
    }

    fn check_len(&self, len: usize) -> Result<()> {
        match self.max_line_bytes {
            Some(max) if len > max => Err(Error::stage(
                "line_splitter",
                format!("line exceeded max_line_bytes ({len} > {max})"),
            )),
            _ => Ok(()),
        }
    }

    fn unit(&self, raw: &str) -> String {
        if self.strip_cr {
            raw.strip_suffix('\r').unwrap_or(raw).to_owned()
        } else {
            raw.to_owned()
        }
    }

    fn absorb<E>(&mut self, chunk: &str, out: &mut E) -> Result<()>
    where
        E: Emit<String> + ?Sized,
    {
        // Only the new text can hold a delimiter not seen before.
        let mut search_from = self.pending.len();
        self.pending.push_str(chunk);

        let mut consumed = 0;
        let scanned = loop {
            let Some(offset) = self.pending[search_from..].find(self.delimiter) else {
                break Ok(());
            };
            let end = search_from + offset;
            let unit = &self.pending[consumed..end];
            let emitted = self
                .check_len(unit.len())
                .and_then(|()| out.emit(self.unit(unit)));
            consumed = end + self.delimiter.len_utf8();
            search_from = consumed;
            if let Err(err) = emitted {
                break Err(err);
            }
        };

        self.pending.drain(..consumed);
        scanned?;
        self.check_len(self.pending.len())
    }
}

impl Default for LineSplitter {
    fn default() -> Self {
        Self::new()
    }
}

impl Stage<String> for LineSplitter {
    type Output = String;

    fn name(&self) -> &'static str {
        "line_splitter"
    }

    fn accept<E>(&mut self, chunk: String, out: &mut E) -> Result<()>
    where
        E: Emit<String> + ?Sized,
    {
        self.absorb(&chunk, out)
    }

    fn flush<E>(&mut self, out: &mut E) -> Result<()>
    where
        E: Emit<String> + ?Sized,
    {
        if self.pending.is_empty() {
            return Ok(());
        }
        let rest = std::mem::take(&mut self.pending);
        out.emit(self.unit(&rest))
    }

    fn discard(&mut self) {
        self.pending = String::new();
    }
}

/// Prefixes each line with its index: `"0: first"`, `"1: second"`, ...
/// Numbering past `u64::MAX` is a stage error.
pub struct LineNumberer {
    // `None` once `u64::MAX` has been handed out.
    next: Option<u64>,
}

impl LineNumberer {
    pub fn new() -> Self {
        Self { next: Some(0) }
    }

    pub fn starting_at(mut self, first: u64) -> Self {
        self.next = Some(first);
        self
    }
}

impl Default for LineNumberer {
    fn default() -> Self {
        Self::new()
    }
}

impl Stage<String> for LineNumberer {
    type Output = String;

    fn name(&self) -> &'static str {
        "line_numberer"
    }

    fn accept<E>(&mut self, line: String, out: &mut E) -> Result<()>
    where
        E: Emit<String> + ?Sized,
    {
        let n = self
            .next
            .ok_or_else(|| Error::stage("line_numberer", "line numbers exhausted"))?;
        self.next = n.checked_add(1);
        out.emit(format!("{n}: {line}"))
    }
}
