pub mod common;
pub mod config;
pub mod grid;
pub mod node;
pub mod planner;
pub mod scenario;

mod search;
mod stat;
