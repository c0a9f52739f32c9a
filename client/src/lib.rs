//! AI Fitness Coach terminal client
//!
//! This library exposes the client modules for use in tests and the binary.

pub mod api;
pub mod commands;
pub mod config;
pub mod error;
pub mod render;
pub mod repl;
pub mod services;
pub mod session;
pub mod state;
