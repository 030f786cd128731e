//! Shared utilities

pub mod config;
pub mod process;
pub mod sink;

pub use config::Config;
pub use process::{ProcessBuilder, ProcessResult};
pub use sink::{BufferSink, ConsoleSink, OutputSink};
