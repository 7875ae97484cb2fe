//! Execution policies.
//!
//! A policy says how an algorithm call is permitted to run. The set is
//! closed: [`PolicyKind`] at the value level, and one zero-sized marker type
//! per variant at the type level.

use serde::{Deserialize, Serialize};

use crate::error::ParseError;

/// The closed set of execution policy kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PolicyKind {
    /// In order, on the calling thread.
    Sequenced,
    /// On the calling thread, possibly vectorized.
    Unsequenced,
    /// Possibly on several threads, each element in order.
    Parallel,
    /// Possibly on several threads and vectorized.
    ParallelUnsequenced,
}

impl PolicyKind {
    /// Every policy kind, in declaration order.
    pub const ALL: [PolicyKind; 4] = [
        PolicyKind::Sequenced,
        PolicyKind::Unsequenced,
        PolicyKind::Parallel,
        PolicyKind::ParallelUnsequenced,
    ];

    /// Short name used on the command line.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Sequenced => "seq",
            Self::Unsequenced => "unseq",
            Self::Parallel => "par",
            Self::ParallelUnsequenced => "par-unseq",
        }
    }

    /// Whether this policy permits out-of-order (unsequenced) execution.
    pub const fn is_unsequenced(self) -> bool {
        matches!(self, Self::Unsequenced | Self::ParallelUnsequenced)
    }

    /// Whether this policy permits a parallel backend.
    pub const fn is_parallel(self) -> bool {
        matches!(self, Self::Parallel | Self::ParallelUnsequenced)
    }
}

impl std::fmt::Display for PolicyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for PolicyKind {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "seq" | "sequenced" => Ok(Self::Sequenced),
            "unseq" | "unsequenced" => Ok(Self::Unsequenced),
            "par" | "parallel" => Ok(Self::Parallel),
            "par-unseq" | "parallel-unsequenced" => Ok(Self::ParallelUnsequenced),
            _ => Err(ParseError::Policy(s.to_string())),
        }
    }
}

mod sealed {
    pub trait Sealed {}
}

/// Type-level execution policy.
///
/// Sealed: the four markers below are the only implementors, so a match on
/// [`ExecutionPolicy::KIND`] is always exhaustive.
pub trait ExecutionPolicy: sealed::Sealed + Copy + Default + Send + Sync + 'static {
    /// The policy kind this marker stands for.
    const KIND: PolicyKind;
}

macro_rules! policy_marker {
    ($(#[$meta:meta])* $name:ident, $constant:ident => $kind:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
        pub struct $name;

        impl sealed::Sealed for $name {}

        impl ExecutionPolicy for $name {
            const KIND: PolicyKind = PolicyKind::$kind;
        }

        #[doc = concat!("Ready-made [`", stringify!($name), "`] value for call sites.")]
        pub const $constant: $name = $name;
    };
}

policy_marker!(
    /// Sequenced execution policy marker.
    Sequenced, SEQ => Sequenced
);
policy_marker!(
    /// Unsequenced execution policy marker.
    Unsequenced, UNSEQ => Unsequenced
);
policy_marker!(
    /// Parallel execution policy marker.
    Parallel, PAR => Parallel
);
policy_marker!(
    /// Parallel unsequenced execution policy marker.
    ParallelUnsequenced, PAR_UNSEQ => ParallelUnsequenced
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_policy_kind_parse() {
        assert_eq!("seq".parse::<PolicyKind>().unwrap(), PolicyKind::Sequenced);
        assert_eq!("Unsequenced".parse::<PolicyKind>().unwrap(), PolicyKind::Unsequenced);
        assert_eq!("par".parse::<PolicyKind>().unwrap(), PolicyKind::Parallel);
        assert_eq!("par_unseq".parse::<PolicyKind>().unwrap(), PolicyKind::ParallelUnsequenced);
        assert_eq!(
            "parallel-unsequenced".parse::<PolicyKind>().unwrap(),
            PolicyKind::ParallelUnsequenced
        );
    }

    #[test]
    fn test_policy_kind_parse_unknown() {
        let err = "vectorized".parse::<PolicyKind>().unwrap_err();
        assert_eq!(err, ParseError::Policy("vectorized".to_string()));
    }

    #[test]
    fn test_policy_kind_display_roundtrips() {
        for kind in PolicyKind::ALL {
            assert_eq!(kind.to_string().parse::<PolicyKind>().unwrap(), kind);
        }
    }

    #[test]
    fn test_policy_flags() {
        assert!(!PolicyKind::Sequenced.is_parallel());
        assert!(!PolicyKind::Sequenced.is_unsequenced());
        assert!(PolicyKind::Unsequenced.is_unsequenced());
        assert!(PolicyKind::Parallel.is_parallel());
        assert!(!PolicyKind::Parallel.is_unsequenced());
        assert!(PolicyKind::ParallelUnsequenced.is_parallel());
        assert!(PolicyKind::ParallelUnsequenced.is_unsequenced());
    }

    #[test]
    fn test_marker_kinds() {
        assert_eq!(Sequenced::KIND, PolicyKind::Sequenced);
        assert_eq!(Unsequenced::KIND, PolicyKind::Unsequenced);
        assert_eq!(Parallel::KIND, PolicyKind::Parallel);
        assert_eq!(ParallelUnsequenced::KIND, PolicyKind::ParallelUnsequenced);
    }

    #[test]
    fn test_policy_kind_serde() {
        let json = serde_json::to_string(&PolicyKind::ParallelUnsequenced).unwrap();
        assert_eq!(json, "\"parallel-unsequenced\"");
    }
}
