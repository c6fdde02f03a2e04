//! CLI module graph.

pub mod command;
pub mod handle;
pub mod output;
pub mod rack;
pub mod run;
pub mod stack;
