//! Integration tests
//!
//! These tests verify that multiple components work together correctly.

#[path = "../common/mod.rs"]
pub mod common;

pub mod cli;
pub mod navigation_flow;
pub mod platform_flow;
pub mod screen_flow;
