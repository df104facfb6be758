pub mod output;
pub mod progress;

pub use progress::TerminalProgress;
