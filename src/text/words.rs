use crate::error::{Error, Result};
use crate::pipeline::stage::{Emit, Stage};

fn is_word_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric()
}

/// Groups runs of `[A-Za-z0-9]` into words.
///
/// A word is emitted as soon as the first character after it arrives, or at
/// end of stream. Every other character only ends words; it is never
/// forwarded.
#[derive(Default)]
pub struct Segmenter {
    word: String,
}

impl Segmenter {
    pub fn new() -> Self {
        Self::default()
    }

    fn push_char<E>(&mut self, ch: char, out: &mut E) -> Result<()>
    where
        E: Emit<String> + ?Sized,
    {
        if is_word_char(ch) {
            self.word.push(ch);
            return Ok(());
        }
        if self.word.is_empty() {
            return Ok(());
        }
        out.emit(std::mem::take(&mut self.word))
    }

    fn end_word<E>(&mut self, out: &mut E) -> Result<()>
    where
        E: Emit<String> + ?Sized,
    {
        if self.word.is_empty() {
            return Ok(());
        }
        out.emit(std::mem::take(&mut self.word))
    }
}

impl Stage<char> for Segmenter {
    type Output = String;

    fn name(&self) -> &'static str {
        "segmenter"
    }

    fn accept<E>(&mut self, ch: char, out: &mut E) -> Result<()>
    where
        E: Emit<String> + ?Sized,
    {
        self.push_char(ch, out)
    }

    fn flush<E>(&mut self, out: &mut E) -> Result<()>
    where
        E: Emit<String> + ?Sized,
    {
        self.end_word(out)
    }

    fn discard(&mut self) {
        self.word = String::new();
    }
}

/// Text chunks are scanned character by character; a word may span chunks.
impl Stage<String> for Segmenter {
    type Output = String;

    fn name(&self) -> &'static str {
        "segmenter"
    }

    fn accept<E>(&mut self, chunk: String, out: &mut E) -> Result<()>
    where
        E: Emit<String> + ?Sized,
    {
        chunk.chars().try_for_each(|ch| self.push_char(ch, out))
    }

    fn flush<E>(&mut self, out: &mut E) -> Result<()>
    where
        E: Emit<String> + ?Sized,
    {
        self.end_word(out)
    }

    fn discard(&mut self) {
        self.word = String::new();
    }
}

/// Keeps words made only of decimal digits, parsed as `u64`.
///
/// Digit words that overflow `u64` are outside this stage's domain and fail
/// the stage.
#[derive(Default)]
pub struct NumericFilter;

impl NumericFilter {
    pub fn new() -> Self {
        Self
    }
}

impl Stage<String> for NumericFilter {
    type Output = u64;

    fn name(&self) -> &'static str {
        "numeric_filter"
    }

    fn accept<E>(&mut self, word: String, out: &mut E) -> Result<()>
    where
        E: Emit<u64> + ?Sized,
    {
        if word.is_empty() || !word.bytes().all(|b| b.is_ascii_digit()) {
            return Ok(());
        }
        let value = word.parse::<u64>().map_err(|err| {
            Error::stage("numeric_filter", format!("{word:?} is not a u64: {err}"))
        })?;
        out.emit(value)
    }
}

/// Emits the total of all numbers seen so far, once per number.
#[derive(Default)]
pub struct RunningSum {
    total: u64,
}

impl RunningSum {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn total(&self) -> u64 {
        self.total
    }
}

impl Stage<u64> for RunningSum {
    type Output = u64;

    fn name(&self) -> &'static str {
        "running_sum"
    }

    fn accept<E>(&mut self, n: u64, out: &mut E) -> Result<()>
    where
        E: Emit<u64> + ?Sized,
    {
        let total = self.total;
        self.total = total.checked_add(n).ok_or_else(|| {
            Error::stage(
                "running_sum",
                format!("total overflowed u64 adding {n} to {total}"),
            )
        })?;
        out.emit(self.total)
    }
}
