//! Unit tests for storeflow configuration types.
//!
//! This module contains tests organised into:
//! - [`helpers`] - Shared fixtures and helper functions
//! - [`types_tests`] - Type defaults, TOML parsing and validation
//! - [`layer_precedence_tests`] - `MergeComposer` layer precedence tests

mod helpers;
