//! Unit test harness for finger-drive.
//!
//! This module organizes configuration tests that go through the public API.

mod config_parsing;
mod config_validation;
