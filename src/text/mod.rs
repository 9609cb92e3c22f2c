pub mod lines;
pub mod utf8;
pub mod words;

pub use lines::{LineNumberer, LineSplitter};
pub use utf8::Utf8Decoder;
pub use words::{NumericFilter, RunningSum, Segmenter};
