//! Animation time model.
//!
//! One `Frame` is one discrete simulation step plus its render update.
//! Frames are 0-based and line up with statistics table rows: the row
//! recorded during frame `n` sits at index `n`.

use std::fmt;

// ── Frame ────────────────────────────────────────────────────────────────────

/// An absolute frame counter.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Frame(pub u64);

impl Frame {
    /// Return the frame `n` steps after `self`.
    #[inline]
    pub fn offset(self, n: u64) -> Frame {
        Frame(self.0 + n)
    }

    /// The frame immediately after `self`.
    #[inline]
    pub fn next(self) -> Frame {
        self.offset(1)
    }

    /// Cast to `usize` for indexing table rows and series points.
    #[inline(always)]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "F{}", self.0)
    }
}

// ── FrameBudget ──────────────────────────────────────────────────────────────

/// How many frames an animation pass produces before it ends (or repeats).
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FrameBudget {
    /// Exactly this many frames per pass.
    Finite(u64),
    /// Frames are produced until the scheduler is stopped.
    Unbounded,
}

impl FrameBudget {
    /// `true` once `produced` frames exhaust the budget.
    #[inline]
    pub fn is_exhausted(self, produced: u64) -> bool {
        match self {
            FrameBudget::Finite(n) => produced >= n,
            FrameBudget::Unbounded => false,
        }
    }

    /// The finite frame count, if any.
    #[inline]
    pub fn limit(self) -> Option<u64> {
        match self {
            FrameBudget::Finite(n) => Some(n),
            FrameBudget::Unbounded => None,
        }
    }
}

impl Default for FrameBudget {
    fn default() -> Self {
        FrameBudget::Finite(100)
    }
}
