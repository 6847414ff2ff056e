//! Integration test suite modules.

mod render;
mod strategies;
