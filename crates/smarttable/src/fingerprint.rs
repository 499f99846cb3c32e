//! Content fingerprints.
//!
//! A fingerprint is a cheap, order-sensitive summary of the rendered rows.
//! It is only ever compared for equality, never parsed. Two render states
//! with identical visible text produce identical fingerprints.

use crate::driver::GridDriver;
use crate::result::TableResult;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which part of the rendered rows a fingerprint covers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FingerprintScope {
    /// Text of the first rendered row
    #[default]
    First,
    /// Texts of all rendered rows, joined by a separator
    All,
    /// Number of rendered rows
    Count,
}

impl FingerprintScope {
    /// Name of this scope
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::First => "first",
            Self::All => "all",
            Self::Count => "count",
        }
    }
}

impl fmt::Display for FingerprintScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Opaque snapshot of rendered content
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Fingerprint(String);

impl Fingerprint {
    /// Build a fingerprint from already-fetched row texts
    #[must_use]
    pub fn from_texts(texts: &[String], scope: FingerprintScope, separator: &str) -> Self {
        let value = match scope {
            FingerprintScope::First => texts.first().cloned().unwrap_or_default(),
            FingerprintScope::All => texts.join(separator),
            FingerprintScope::Count => texts.len().to_string(),
        };
        Self(value)
    }

    /// Raw fingerprint value
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Capture the fingerprint of the rows currently matching `rows_selector`
pub async fn capture(
    driver: &dyn GridDriver,
    rows_selector: &str,
    scope: FingerprintScope,
    separator: &str,
) -> TableResult<Fingerprint> {
    match scope {
        FingerprintScope::Count => Ok(Fingerprint(
            driver.count(rows_selector).await?.to_string(),
        )),
        FingerprintScope::First => Ok(Fingerprint(
            driver
                .inner_text(rows_selector, 0)
                .await?
                .unwrap_or_default(),
        )),
        FingerprintScope::All => {
            let texts = driver.inner_texts(rows_selector).await?;
            Ok(Fingerprint::from_texts(&texts, scope, separator))
        }
    }
}
