//! Embassy async tasks

pub mod serve;

pub use serve::serve_task;
