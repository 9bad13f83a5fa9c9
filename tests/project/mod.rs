//! Configuration and project context tests

pub mod tests_context;
