//! Integration tests for damage-control

mod bash_tests;
mod edit_tests;
