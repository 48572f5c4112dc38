pub mod command;
mod markdown;
pub mod render;
