pub mod airport;
pub mod boundary;
pub mod color;
pub mod common;
pub mod coordinates;
pub mod data_loader;
pub mod errors;
pub mod export;
pub mod generate_commands;
pub mod interaction;
pub mod legend;
pub mod plan;
pub mod plan_execution;
pub mod projection;
pub mod render_context;
