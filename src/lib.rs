pub mod clean;
pub mod color;
pub mod config;
pub mod error;
pub mod mask;
pub mod pipeline;
pub mod render;
