//! Adapters backing the domain ports: in-memory storage and a mock of the
//! external processor boundary.

pub mod in_memory;
pub mod mock_processor;
