//! Algorithm selection.
//!
//! Parsing never fails: unknown identifiers fall back to [`Algorithm::Bubble`].

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// The four instrumented sorting algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Algorithm {
    #[default]
    Bubble,
    Selection,
    Insertion,
    Merge,
}

impl Algorithm {
    /// All algorithms in selector order.
    pub const ALL: [Algorithm; 4] = [
        Algorithm::Bubble,
        Algorithm::Selection,
        Algorithm::Insertion,
        Algorithm::Merge,
    ];

    /// Lowercase identifier (`"bubble"`, `"merge"`, ...).
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Bubble => "bubble",
            Self::Selection => "selection",
            Self::Insertion => "insertion",
            Self::Merge => "merge",
        }
    }

    /// Title-cased label for display.
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Bubble => "Bubble",
            Self::Selection => "Selection",
            Self::Insertion => "Insertion",
            Self::Merge => "Merge",
        }
    }

    /// Next algorithm in selector order, wrapping around.
    pub fn next(self) -> Self {
        let pos = Self::ALL.iter().position(|a| *a == self).unwrap_or(0);
        Self::ALL[(pos + 1) % Self::ALL.len()]
    }

    /// Lenient lookup. Unknown names resolve to bubble sort.
    pub fn from_name(name: &str) -> Self {
        let name = name.trim().to_ascii_lowercase();
        let name = name.strip_suffix(" sort").unwrap_or(&name);
        match name {
            "bubble" => Self::Bubble,
            "selection" => Self::Selection,
            "insertion" => Self::Insertion,
            "merge" => Self::Merge,
            _ => Self::Bubble,
        }
    }
}

impl FromStr for Algorithm {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_name(s))
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
