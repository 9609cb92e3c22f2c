pub mod collect;
pub mod print;

pub use collect::CollectSink;
pub use print::PrintSink;
