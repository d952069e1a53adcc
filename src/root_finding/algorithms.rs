//! Root-finding algorithm definitions.
//!
//! Provides the [`Algorithm`] enum, which enumerates all supported methods,
//! along with the shared [`GLOBAL_MAX_ITER_FALLBACK`] hard cap.


/// Most methods use heuristic defaults from [`Algorithm::default_max_iter`].
/// This cap is only applied when a bracket algorithm's theoretical iteration
/// bound would otherwise exceed it (e.g. [`BracketFamily::Bisection`] with a
/// very wide interval or a very tight width tolerance).
///
/// Serves as a practical safeguard against iteration counts that are
/// mathematically valid but computationally excessive.
pub const GLOBAL_MAX_ITER_FALLBACK: usize = 500;


/// Root-finding algorithm variants.
/// - [`Algorithm::Bracket`] contains bracket methods for root-finding
/// - [`Algorithm::Open`]    contains open methods for root-finding
/// - [`Algorithm::Hybrid`]  mixes bracket safety with open-method speed
#[derive(Debug, Copy, Clone)]
pub enum Algorithm {
    Bracket(BracketFamily),
    Open(OpenFamily),
    Hybrid(HybridFamily),
}

#[derive(Debug, Copy, Clone)]
pub enum BracketFamily {
    Bisection,
}

#[derive(Debug, Copy, Clone)]
pub enum OpenFamily {
    Newton,
    Secant,
    Steffensen,
}

#[derive(Debug, Copy, Clone)]
pub enum HybridFamily {
    /// Seeded with a sign-change interval; interpolation steps guarded by
    /// midpoint fallback.
    Bracketed,
    /// Seeded with a single guess; secant-class steps guarded by any
    /// bracket discovered along the way.
    PointSeeded,
}

impl Algorithm {
    /// Default iteration count if `max_iter` is unset in config.
    ///
    /// # Notes
    /// - Applied only when `max_iter` is unset.
    /// - Values are heuristic and method-specific.
    /// - Methods with theoretical bounds (e.g. [`BracketFamily::Bisection`])
    ///   return `None`, meaning "compute theoretical bound instead".
    ///   - If that bound exceeds practical limits,
    ///     [`GLOBAL_MAX_ITER_FALLBACK`] is used.
    pub const fn default_max_iter(self) -> Option<usize> {
        match self {
            Algorithm::Bracket(BracketFamily::Bisection)  => None,
            Algorithm::Open(OpenFamily::Newton)
            | Algorithm::Open(OpenFamily::Secant)
            | Algorithm::Open(OpenFamily::Steffensen)     => Some(100),
            Algorithm::Hybrid(HybridFamily::Bracketed)    => None,
            Algorithm::Hybrid(HybridFamily::PointSeeded)  => Some(100),
        }
    }

    pub const fn algorithm_name(self) -> &'static str {
        match self {
            Algorithm::Bracket(BracketFamily::Bisection)  => "bisection",
            Algorithm::Open(OpenFamily::Newton)           => "newton",
            Algorithm::Open(OpenFamily::Secant)           => "secant",
            Algorithm::Open(OpenFamily::Steffensen)       => "steffensen",
            Algorithm::Hybrid(HybridFamily::Bracketed)    => "find_zero_bracketed",
            Algorithm::Hybrid(HybridFamily::PointSeeded)  => "find_zero_point",
        }
    }
}
impl std::fmt::Display for Algorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.algorithm_name())
    }
}
