pub mod adapters;
pub mod cancel;
pub mod chain;
pub mod driver;
pub mod lifecycle;
pub mod pull;
pub mod push;
pub mod stage;
