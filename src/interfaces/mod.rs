//! I/O edges of the crate: JSON-lines readers and writers used by the demo
//! driver and tests.

pub mod json;
