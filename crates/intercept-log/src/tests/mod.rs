//! Test module for intercept-log
//!
//! Property-based and scenario tests using proptest, covering directive
//! precedence, filtering, masking, value formatting and the interceptor.

#[cfg(test)]
pub mod directive_tests;
