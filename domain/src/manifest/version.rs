//! Version and requirement matching.
//!
//! A deliberately small subset of semantic versioning: exact, caret,
//! greater-or-equal, and wildcard requirements. Lock files always pin exact
//! versions; requirements only appear in the project manifest.

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// A pinned version: `major.minor.patch` with an optional pre-release tag.
///
/// Missing components default to zero, so `"3.10"` parses as `3.10.0`.
/// A trailing non-numeric suffix on the last component (`"2.0.0b1"`,
/// `"1.0.0-rc1"`) becomes the pre-release tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Version {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
    pub pre: Option<String>,
}

impl Version {
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        Self {
            major,
            minor,
            patch,
            pre: None,
        }
    }

    fn triple(&self) -> (u64, u64, u64) {
        (self.major, self.minor, self.patch)
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        self.triple().cmp(&other.triple()).then_with(|| {
            // A pre-release sorts below the plain release of the same triple.
            match (&self.pre, &other.pre) {
                (None, None) => Ordering::Equal,
                (None, Some(_)) => Ordering::Greater,
                (Some(_), None) => Ordering::Less,
                (Some(a), Some(b)) => a.cmp(b),
            }
        })
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)?;
        if let Some(pre) = &self.pre {
            write!(f, "-{}", pre)?;
        }
        Ok(())
    }
}

impl FromStr for Version {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(DomainError::InvalidVersion(s.to_string()));
        }

        let components: Vec<&str> = s.split('.').collect();
        if components.len() > 3 {
            return Err(DomainError::InvalidVersion(s.to_string()));
        }

        let mut parts = [0u64; 3];
        let mut pre = None;
        let last = components.len() - 1;

        for (i, raw) in components.into_iter().enumerate() {
            let digits: String = raw.chars().take_while(|c| c.is_ascii_digit()).collect();
            if digits.is_empty() {
                return Err(DomainError::InvalidVersion(s.to_string()));
            }
            let rest = &raw[digits.len()..];
            if !rest.is_empty() {
                // Only the last component may carry a pre-release tag.
                if i < last {
                    return Err(DomainError::InvalidVersion(s.to_string()));
                }
                pre = Some(rest.trim_start_matches('-').to_string());
            }
            parts[i] = digits
                .parse()
                .map_err(|_| DomainError::InvalidVersion(s.to_string()))?;
        }

        Ok(Self {
            major: parts[0],
            minor: parts[1],
            patch: parts[2],
            pre,
        })
    }
}

impl TryFrom<String> for Version {
    type Error = DomainError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Version> for String {
    fn from(v: Version) -> Self {
        v.to_string()
    }
}

/// A version requirement from the project manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Requirement {
    /// `1.2.3`: exactly this version.
    Exact(Version),
    /// `^1.2.3`: compatible within the leftmost non-zero component.
    Caret(Version),
    /// `>=1.2.3`: this version or anything newer.
    GreaterEq(Version),
    /// `*`: any version.
    Wildcard,
}

impl Requirement {
    /// Whether the locked `version` satisfies this requirement.
    pub fn matches(&self, version: &Version) -> bool {
        match self {
            Requirement::Exact(v) => version == v,
            Requirement::Caret(lower) => version >= lower && version < &caret_upper(lower),
            Requirement::GreaterEq(lower) => version >= lower,
            Requirement::Wildcard => true,
        }
    }
}

/// Exclusive upper bound for a caret requirement.
fn caret_upper(lower: &Version) -> Version {
    if lower.major > 0 {
        Version::new(lower.major + 1, 0, 0)
    } else if lower.minor > 0 {
        Version::new(0, lower.minor + 1, 0)
    } else {
        Version::new(0, 0, lower.patch + 1)
    }
}

impl fmt::Display for Requirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Requirement::Exact(v) => write!(f, "{}", v),
            Requirement::Caret(v) => write!(f, "^{}", v),
            Requirement::GreaterEq(v) => write!(f, ">={}", v),
            Requirement::Wildcard => write!(f, "*"),
        }
    }
}

impl FromStr for Requirement {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s == "*" {
            return Ok(Requirement::Wildcard);
        }
        if let Some(rest) = s.strip_prefix('^') {
            return Ok(Requirement::Caret(rest.parse()?));
        }
        if let Some(rest) = s.strip_prefix(">=") {
            return Ok(Requirement::GreaterEq(rest.trim_start().parse()?));
        }
        if s.starts_with(['<', '>', '=', '~']) {
            return Err(DomainError::InvalidRequirement(s.to_string()));
        }
        Ok(Requirement::Exact(s.parse()?))
    }
}

impl TryFrom<String> for Requirement {
    type Error = DomainError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Requirement> for String {
    fn from(r: Requirement) -> Self {
        r.to_string()
    }
}
