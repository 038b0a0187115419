//! Integration tests for action-hooks
//!
//! Exercise the public API end to end: hook registration and guarded
//! dispatch, model event binding, and config loading.


mod hooks_tests;

pub use common::*;
