//! System-level tests for the Interactive schema models.
//!
//! Fixtures can be found in `resources/schema`; the tests live in `tests`.
