//! Identity Column Resolver
//!
//! Finds the column holding the source IP in an arbitrary CSV header.
//! Matching is exact after canonicalization - no fuzzy matching.

use std::collections::HashSet;

use thiserror::Error;

use crate::constants::DEFAULT_IDENTITY_ALIASES;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdentityError {
    #[error("No IP address column found. Available columns: {available:?}")]
    ColumnNotFound { available: Vec<String> },
}

/// Resolved identity column: position in the header and its original name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedIdentity {
    pub index: usize,
    pub name: String,
}

/// Canonical form of a column name.
///
/// Trims, lower-cases and treats runs of whitespace, `_`, `-` and `.` as a
/// single `_`. `" IP  Address"` and `"ip_address"` both become `ip_address`.
pub fn canonicalize(name: &str) -> String {
    name.trim()
        .to_lowercase()
        .split(|c: char| c.is_whitespace() || matches!(c, '_' | '-' | '.'))
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("_")
}

#[derive(Debug, Clone)]
pub struct IdentityResolver {
    aliases: Vec<String>,
    canonical: HashSet<String>,
}

impl Default for IdentityResolver {
    fn default() -> Self {
        Self::new(DEFAULT_IDENTITY_ALIASES)
    }
}

impl IdentityResolver {
    pub fn new<I, S>(aliases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let aliases: Vec<String> = aliases
            .into_iter()
            .map(|alias| alias.as_ref().to_string())
            .collect();

        // An alias that canonicalizes to nothing would match blank headers
        let canonical = aliases
            .iter()
            .map(|alias| canonicalize(alias))
            .filter(|alias| !alias.is_empty())
            .collect();

        Self { aliases, canonical }
    }

    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }

    /// Return the first column, in header order, matching any alias
    pub fn resolve<S: AsRef<str>>(&self, columns: &[S]) -> Result<ResolvedIdentity, IdentityError> {
        columns
            .iter()
            .position(|column| self.canonical.contains(&canonicalize(column.as_ref())))
            .map(|index| ResolvedIdentity {
                index,
                name: columns[index].as_ref().to_string(),
            })
            .ok_or_else(|| IdentityError::ColumnNotFound {
                available: columns.iter().map(|c| c.as_ref().to_string()).collect(),
            })
    }
}
