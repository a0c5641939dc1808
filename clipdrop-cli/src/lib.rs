// ABOUTME: Library exports for Clipdrop CLI modules for testing and external use
// ABOUTME: Makes argument parsing, configuration, and dispatch available to integration tests

pub mod cli;
pub mod commands;
pub mod config;
