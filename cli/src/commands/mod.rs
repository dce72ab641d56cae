//! CLI commands for the bytepair tool.

pub mod decode;
pub mod inspect;
pub mod train;

pub use decode::DecodeCommand;
pub use inspect::InspectCommand;
pub use train::TrainCommand;
