// Copyright (c) 2025 - Cowboy AI, Inc.
//! Domain Pattern Value Object with DNS Validation Invariants

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter;
use thiserror::Error;

/// Literal prefix marking a wildcard domain pattern
pub const WILDCARD_PREFIX: &str = "*.";

/// Domain pattern validation error
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainPatternError {
    #[error("Domain pattern is empty")]
    Empty,

    #[error("Domain pattern exceeds maximum length of 253 characters: {0}")]
    TooLong(usize),

    #[error("Label exceeds maximum length of 63 characters: {0}")]
    LabelTooLong(String),

    #[error("Invalid character in domain pattern: {0}")]
    InvalidCharacter(char),

    #[error("Label cannot start or end with hyphen: {0}")]
    InvalidLabelFormat(String),

    #[error("Top-level label cannot be all numeric: {0}")]
    NumericLabel(String),

    #[error("Wildcard is only allowed as the whole leftmost label: {0}")]
    MisplacedWildcard(String),
}

/// Domain name, optionally prefixed with the wildcard marker `*.`
///
/// Validated following RFC 1123 for every label after the optional
/// wildcard:
/// - Total length ≤ 253 characters
/// - Each label 1-63 characters of alphanumerics and hyphens
/// - Labels cannot start or end with hyphens
/// - The top-level label cannot be all numeric
///
/// # Examples
///
/// ```rust
/// use cim_topology::domain::DomainPattern;
///
/// let pattern = DomainPattern::new("*.example.com").unwrap();
/// assert!(pattern.is_wildcard());
/// assert_eq!(pattern.canonical(), "example.com");
///
/// assert!(DomainPattern::new("a.*.example.com").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DomainPattern(String);

impl DomainPattern {
    /// Maximum total length (RFC 1123)
    pub const MAX_LENGTH: usize = 253;

    /// Maximum length for a single label (RFC 1123)
    pub const MAX_LABEL_LENGTH: usize = 63;

    /// Create a new domain pattern with validation
    pub fn new(pattern: impl Into<String>) -> Result<Self, DomainPatternError> {
        let pattern = pattern.into();

        if pattern.is_empty() {
            return Err(DomainPatternError::Empty);
        }

        if pattern.len() > Self::MAX_LENGTH {
            return Err(DomainPatternError::TooLong(pattern.len()));
        }

        let domain = canonical_domain(&pattern);
        if domain.contains('*') {
            return Err(DomainPatternError::MisplacedWildcard(pattern.clone()));
        }

        for label in domain.split('.') {
            Self::validate_label(label)?;
        }

        if let Some(tld) = domain.rsplit('.').next() {
            if tld.chars().all(|c| c.is_ascii_digit()) {
                return Err(DomainPatternError::NumericLabel(tld.to_string()));
            }
        }

        Ok(Self(pattern))
    }

    fn validate_label(label: &str) -> Result<(), DomainPatternError> {
        if label.is_empty() {
            return Err(DomainPatternError::Empty);
        }

        if label.len() > Self::MAX_LABEL_LENGTH {
            return Err(DomainPatternError::LabelTooLong(label.to_string()));
        }

        if let Some(ch) = label.chars().find(|ch| !ch.is_ascii_alphanumeric() && *ch != '-') {
            return Err(DomainPatternError::InvalidCharacter(ch));
        }

        if label.starts_with('-') || label.ends_with('-') {
            return Err(DomainPatternError::InvalidLabelFormat(label.to_string()));
        }

        Ok(())
    }

    /// Get the pattern as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Check if the pattern starts with the wildcard marker
    pub fn is_wildcard(&self) -> bool {
        self.0.starts_with(WILDCARD_PREFIX)
    }

    /// Domain with the wildcard marker stripped
    pub fn canonical(&self) -> &str {
        canonical_domain(&self.0)
    }

    /// Ancestor chain of the canonical domain, see [`ancestor_chain`]
    pub fn ancestors(&self) -> Vec<&str> {
        ancestor_chain(self.canonical())
    }
}

/// Strip a leading `*.` from a domain pattern
pub fn canonical_domain(pattern: &str) -> &str {
    pattern.strip_prefix(WILDCARD_PREFIX).unwrap_or(pattern)
}

/// Number of `.` characters in a raw pattern, wildcard marker included
pub fn dot_count(pattern: &str) -> usize {
    pattern.matches('.').count()
}

/// Dot-separated suffixes of `domain`, most general first
///
/// The bare top-level label is excluded; the chain ends with `domain`
/// itself. A single-label domain has an empty chain.
///
/// ```rust
/// use cim_topology::domain::ancestor_chain;
///
/// assert_eq!(ancestor_chain("x.a.com"), vec!["a.com", "x.a.com"]);
/// assert!(ancestor_chain("com").is_empty());
/// ```
pub fn ancestor_chain(domain: &str) -> Vec<&str> {
    let mut chain: Vec<&str> = iter::once(domain)
        .chain(domain.match_indices('.').map(|(i, _)| &domain[i + 1..]))
        .collect();
    // bare top-level label
    chain.pop();
    chain.reverse();
    chain
}

impl fmt::Display for DomainPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for DomainPattern {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for DomainPattern {
    type Error = DomainPatternError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for DomainPattern {
    type Error = DomainPatternError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<DomainPattern> for String {
    fn from(pattern: DomainPattern) -> Self {
        pattern.0
    }
}
