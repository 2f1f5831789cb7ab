//! Toroidal Game of Life for the terminal and the Linux framebuffer

pub mod config;
pub mod error;
pub mod grid;
pub mod life;
pub mod render;
pub mod settings;
pub mod sim;
