//! Execution backends - serial and task-parallel executors, plus the
//! policy-driven algorithm entry points that consume a strategy descriptor.

#![warn(missing_docs)]

pub mod executor;
pub mod lanes;
pub mod algorithms;

#[cfg(feature = "backend-rayon")]
pub use executor::RayonExecutor;
pub use executor::{preferred_chunk_size, ActiveExecutor, Executor, SerialExecutor};
pub use algorithms::{for_each, for_each_iter, reduce, transform};
