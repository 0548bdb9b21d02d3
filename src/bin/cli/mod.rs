//! CLI module for ChainSpec
//!
//! Handles command dispatch, spec discovery for batch runs, and output formatting

pub mod commands;
pub mod output;
