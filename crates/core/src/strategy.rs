//! Strategy selection.
//!
//! Maps an execution policy and a list of iterator types to a
//! [`StrategyDescriptor`]:
//!
//! ```text
//! policy                 vector                      backend
//! sequenced              false                       none
//! unsequenced            all iterators random-access none
//! parallel               false                       parallel
//! parallel-unsequenced   all iterators random-access parallel
//! ```
//!
//! Selection happens entirely at compile time through [`strategy_of`] and
//! [`Selected`]; [`select`] is the same table over runtime values.

use std::marker::PhantomData;

use serde::{Deserialize, Serialize};

use crate::backend::{ParallelBackend, PAR_BACKEND};
use crate::category::IteratorList;
use crate::policy::{ExecutionPolicy, PolicyKind};

/// Whether an algorithm may hand work to the parallel backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BackendKind {
    /// Run on the calling thread.
    None,
    /// Run on the build's configured [`ParallelBackend`].
    Parallel,
}

impl BackendKind {
    /// The concrete backend this kind resolves to in the current build.
    pub const fn resolve(self) -> Option<ParallelBackend> {
        match self {
            Self::None => None,
            Self::Parallel => Some(PAR_BACKEND),
        }
    }
}

impl std::fmt::Display for BackendKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::None => f.write_str("none"),
            Self::Parallel => write!(f, "parallel({PAR_BACKEND})"),
        }
    }
}

/// Immutable result of strategy selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StrategyDescriptor {
    /// Vectorized (unsequenced) execution is permitted
    pub vector: bool,

    /// Backend permitted for the call
    pub backend: BackendKind,
}

impl StrategyDescriptor {
    /// Plain sequential execution.
    pub const SERIAL: Self = Self {
        vector: false,
        backend: BackendKind::None,
    };

    /// Whether vectorized execution is permitted.
    pub const fn is_vector(&self) -> bool {
        self.vector
    }

    /// Whether the parallel backend is permitted.
    pub const fn is_parallel(&self) -> bool {
        matches!(self.backend, BackendKind::Parallel)
    }
}

impl std::fmt::Display for StrategyDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "vector={} backend={}", self.vector, self.backend)
    }
}

/// Select a strategy from a policy kind and the iterator classification.
pub const fn select(kind: PolicyKind, all_random_access: bool) -> StrategyDescriptor {
    match kind {
        PolicyKind::Sequenced => StrategyDescriptor::SERIAL,
        PolicyKind::Unsequenced => StrategyDescriptor {
            vector: all_random_access,
            backend: BackendKind::None,
        },
        PolicyKind::Parallel => StrategyDescriptor {
            vector: false,
            backend: BackendKind::Parallel,
        },
        PolicyKind::ParallelUnsequenced => StrategyDescriptor {
            vector: all_random_access,
            backend: BackendKind::Parallel,
        },
    }
}

/// Select a strategy from types alone.
pub const fn strategy_of<P: ExecutionPolicy, L: IteratorList>() -> StrategyDescriptor {
    select(P::KIND, L::ALL_RANDOM_ACCESS)
}

/// Zero-sized tag naming the strategy selected for `P` over `L`.
///
/// Downstream algorithms branch on its associated constants, so every
/// untaken path is removed at compile time.
pub struct Selected<P, L> {
    _marker: PhantomData<fn() -> (P, L)>,
}

impl<P: ExecutionPolicy, L: IteratorList> Selected<P, L> {
    /// The selected descriptor.
    pub const DESCRIPTOR: StrategyDescriptor = strategy_of::<P, L>();

    /// Vectorized execution is permitted.
    pub const IS_VECTOR: bool = Self::DESCRIPTOR.vector;

    /// Backend permitted for the call.
    pub const BACKEND: BackendKind = Self::DESCRIPTOR.backend;

    /// Create the tag.
    pub const fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }

    /// The selected descriptor.
    pub const fn descriptor(&self) -> StrategyDescriptor {
        Self::DESCRIPTOR
    }
}

impl<P: ExecutionPolicy, L: IteratorList> Default for Selected<P, L> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P, L> Clone for Selected<P, L> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<P, L> Copy for Selected<P, L> {}

impl<P: ExecutionPolicy, L: IteratorList> std::fmt::Debug for Selected<P, L> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Selected")
            .field("policy", &P::KIND)
            .field("descriptor", &Self::DESCRIPTOR)
            .finish()
    }
}

/// Select a strategy at a call site from a policy value and the iterators
/// the algorithm was handed.
pub fn select_backend<P: ExecutionPolicy, L: IteratorList>(
    _policy: P,
    _iterators: &L,
) -> Selected<P, L> {
    Selected::new()
}

/// One row of the selection table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionRow {
    /// Policy kind
    pub policy: PolicyKind,

    /// Whether every iterator is random-access
    pub all_random_access: bool,

    /// Selected strategy
    pub descriptor: StrategyDescriptor,
}

/// The full selection table, one row per (policy, classification) pair.
pub fn selection_table() -> Vec<SelectionRow> {
    PolicyKind::ALL
        .into_iter()
        .flat_map(|policy| {
            [true, false].into_iter().map(move |all_random_access| SelectionRow {
                policy,
                all_random_access,
                descriptor: select(policy, all_random_access),
            })
        })
        .collect()
}
