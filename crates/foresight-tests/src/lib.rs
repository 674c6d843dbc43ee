//! Workspace-level integration and property tests.
//!
//! Everything lives under `tests/`; this library target is intentionally
//! empty.

#![deny(unsafe_code)]
