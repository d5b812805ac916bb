use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

static ORG_NUMBER_FORMAT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{9}$").expect("invalid org number pattern"));

/// Canonical nine-digit organization identifier. The join key across every
/// upstream source, only constructible through [`OrgNumber::parse`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrgNumber(String);

impl OrgNumber {
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if ORG_NUMBER_FORMAT.is_match(trimmed) {
            Some(OrgNumber(trimmed.to_string()))
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OrgNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Terms version as a major.minor.patch triple. Derived ordering is field
/// order, which matches semver precedence.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
pub struct Version {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
}

impl Version {
    /// Display default for organizations with no acceptance record.
    pub const ZERO: Version = Version {
        major: 0,
        minor: 0,
        patch: 0,
    };

    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

impl FromStr for Version {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.trim().splitn(3, '.');
        let mut next = |name: &str| -> Result<u64, String> {
            parts
                .next()
                .ok_or_else(|| format!("missing {} component in '{}'", name, s))?
                .parse::<u64>()
                .map_err(|e| format!("invalid {} component in '{}': {}", name, s, e))
        };
        let major = next("major")?;
        let minor = next("minor")?;
        let patch = next("patch")?;
        Ok(Version {
            major,
            minor,
            patch,
        })
    }
}

/// Ordered, deduplicated sequence of resolved organizations and the terms
/// version each has accepted. Insertion order is the output contract.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolutionResult {
    entries: Vec<(OrgNumber, Version)>,
}

impl ResolutionResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// First occurrence wins; later pushes for the same organization are
    /// dropped.
    pub fn push(&mut self, org: OrgNumber, version: Version) {
        if !self.entries.iter().any(|(existing, _)| existing == &org) {
            self.entries.push((org, version));
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn entries(&self) -> &[(OrgNumber, Version)] {
        &self.entries
    }
}

impl FromIterator<(OrgNumber, Version)> for ResolutionResult {
    fn from_iter<I: IntoIterator<Item = (OrgNumber, Version)>>(iter: I) -> Self {
        let mut result = ResolutionResult::new();
        for (org, version) in iter {
            result.push(org, version);
        }
        result
    }
}

impl fmt::Display for ResolutionResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (org, version)) in self.entries.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{}:{}", org, version)?;
        }
        Ok(())
    }
}
