pub mod cli;
pub mod display_metadata;
pub mod error;
pub mod fits;
pub mod image;
pub mod output;
pub mod render;
pub mod types;

// Re-export commonly used functions
pub use display_metadata::print_frame_info;
