//! Shared test fixtures and helpers.

#![allow(dead_code)]

pub mod model_fixtures;
