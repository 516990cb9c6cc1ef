//! Evaluation configuration.
//!
//! Policy
//! - The only knob is the verification toggle. It is an explicit `Copy` value
//!   carried by `Predicates`, fixed by the caller for as long as it likes; the
//!   predicate layer only reads it.
//! - Free functions (`sign`, `compare_distances`, ...) use
//!   `Predicates::default()`, i.e. verification off.

use tracing::error;

/// Configuration for predicate evaluation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PredCfg {
    /// Cross-check every certain fast-tier answer against the exact tier and
    /// panic on disagreement. Slow; meant for test and debug runs.
    pub verify: bool,
}

/// Predicate evaluator bound to a configuration.
///
/// Every predicate is a method on this type; the module-level free functions
/// forward to `Predicates::default()`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Predicates {
    pub cfg: PredCfg,
}

impl Predicates {
    pub fn new(cfg: PredCfg) -> Self {
        Self { cfg }
    }

    /// Evaluator with verification enabled.
    pub fn verifying() -> Self {
        Self::new(PredCfg { verify: true })
    }

    /// Returns `fast` after checking it against `exact()` when verification
    /// is on. Only certain (non-zero) fast answers are checked.
    #[inline]
    pub(crate) fn checked(&self, what: &'static str, fast: i32, exact: impl FnOnce() -> i32) -> i32 {
        if self.cfg.verify && fast != 0 {
            let slow = exact();
            if slow != fast {
                error!(predicate = what, fast, exact = slow, "triage disagrees with exact tier");
                panic!("{what}: triage returned {fast} but exact evaluation gives {slow}");
            }
        }
        fast
    }
}
