//! execsel core types.
//!
//! This crate decides, at compile time, how a parallel algorithm call is
//! allowed to execute: vectorized or not, on the parallel backend or on the
//! calling thread. The inputs are an execution policy and the categories of
//! the iterators the algorithm was handed.
//!
//! # Backend features
//!
//! Exactly one of `backend-rayon` (default) and `backend-serial` must be
//! enabled. Both of these fail to build with a `compile_error!`:
//!
//! ```text
//! cargo check -p execsel-core --no-default-features
//! cargo check -p execsel-core --features backend-serial
//! ```
//!
//! The second keeps the default `backend-rayon` on; use
//! `--no-default-features --features backend-serial` for the serial build.

#![warn(missing_docs)]

// Selector inputs
mod category;
mod policy;

// Selection
mod backend;
mod strategy;

// Element ordering
mod ordering;

mod error;

// Re-exports
pub use category::{
    all_random_access, category_of, is_random_access, Categorized, IteratorCategory, IteratorList,
    ListOf, Opaque,
};
pub use policy::{
    ExecutionPolicy, Parallel, ParallelUnsequenced, PolicyKind, Sequenced, Unsequenced, PAR,
    PAR_UNSEQ, SEQ, UNSEQ,
};

pub use backend::{ParallelBackend, PAR_BACKEND};
pub use strategy::{
    select, select_backend, selection_table, strategy_of, BackendKind, Selected, SelectionRow,
    StrategyDescriptor,
};

pub use ordering::{
    common_category, satisfies, satisfies_with, three_way_result, CommonCategory,
    ComparisonCategory, ThreeWayComparable, ThreeWayComparableWith,
};

pub use error::{ParseError, Result};
