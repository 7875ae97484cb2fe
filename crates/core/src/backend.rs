//! Build-wide parallel backend choice.
//!
//! Exactly one of the `backend-rayon` and `backend-serial` features must be
//! enabled. The choice is fixed for the whole build and never varies per call.
//! `--no-default-features` alone, or `--features backend-serial` on top of the
//! defaults, stops the build at one of the `compile_error!`s below.

use serde::{Deserialize, Serialize};

#[cfg(not(any(feature = "backend-rayon", feature = "backend-serial")))]
compile_error!(
    "a parallel backend must be specified: enable exactly one of the \
     `backend-rayon` or `backend-serial` features"
);

#[cfg(all(feature = "backend-rayon", feature = "backend-serial"))]
compile_error!(
    "more than one parallel backend specified: `backend-rayon` and \
     `backend-serial` are mutually exclusive"
);

/// Implementation behind the parallel-backend kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ParallelBackend {
    /// Work-stealing task parallelism.
    TaskParallel,
    /// Trivial serial execution, used when no parallel runtime is configured.
    Serial,
}

impl ParallelBackend {
    /// Name of the Cargo feature that selects this backend.
    pub const fn feature(self) -> &'static str {
        match self {
            Self::TaskParallel => "backend-rayon",
            Self::Serial => "backend-serial",
        }
    }

    /// Short display name.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::TaskParallel => "task-parallel",
            Self::Serial => "serial",
        }
    }
}

impl std::fmt::Display for ParallelBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The parallel backend this build was configured with.
#[cfg(all(feature = "backend-rayon", not(feature = "backend-serial")))]
pub const PAR_BACKEND: ParallelBackend = ParallelBackend::TaskParallel;

/// The parallel backend this build was configured with.
#[cfg(all(feature = "backend-serial", not(feature = "backend-rayon")))]
pub const PAR_BACKEND: ParallelBackend = ParallelBackend::Serial;
