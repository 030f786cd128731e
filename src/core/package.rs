//! Package identifiers and sets.
//!
//! A [`PackageSpec`] is a normalized package identifier: a name, optionally
//! pinned to a version (`name==version`, the form `pip freeze` emits). A
//! [`PackageSet`] is an ordered, duplicate-free collection of specs,
//! rebuilt from scratch on every enumeration.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;

/// Leading package-name token of a `site-packages` directory name
/// (everything before a `-version` or metadata suffix).
static DIR_NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_]+").expect("valid regex"));

/// An ordered, duplicate-free set of package specs.
pub type PackageSet = BTreeSet<PackageSpec>;

/// A normalized package identifier, optionally pinned to a version.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PackageSpec {
    name: String,
    version: Option<String>,
}

impl PackageSpec {
    /// A bare package name with no version.
    pub fn bare(name: impl Into<String>) -> Self {
        PackageSpec {
            name: name.into(),
            version: None,
        }
    }

    /// A `name==version` pin.
    pub fn versioned(name: impl Into<String>, version: impl Into<String>) -> Self {
        PackageSpec {
            name: name.into(),
            version: Some(version.into()),
        }
    }

    /// Package name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Pinned version, if any.
    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }
}

impl fmt::Display for PackageSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.version {
            Some(version) => write!(f, "{}=={}", self.name, version),
            None => write!(f, "{}", self.name),
        }
    }
}

impl FromStr for PackageSpec {
    type Err = String;

    /// Parse a freeze-style line: `name` or `name==version`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err("empty package spec".to_string());
        }
        match s.split_once("==") {
            Some((name, version)) => Ok(PackageSpec::versioned(name.trim(), version.trim())),
            None => Ok(PackageSpec::bare(s)),
        }
    }
}

/// Extract the package name from a `site-packages` directory name.
///
/// `requests-2.28.1` and `requests-2.28.1.dist-info` both yield
/// `requests`; names with no leading alphanumeric/underscore token yield
/// `None`.
pub fn package_name_from_dir(dir_name: &str) -> Option<&str> {
    DIR_NAME_RE.find(dir_name).map(|m| m.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bare_name() {
        let spec: PackageSpec = "requests".parse().unwrap();
        assert_eq!(spec.name(), "requests");
        assert_eq!(spec.version(), None);
        assert_eq!(spec.to_string(), "requests");
    }

    #[test]
    fn test_parse_pinned() {
        let spec: PackageSpec = "requests==2.28.1".parse().unwrap();
        assert_eq!(spec.name(), "requests");
        assert_eq!(spec.version(), Some("2.28.1"));
        assert_eq!(spec.to_string(), "requests==2.28.1");
    }

    #[test]
    fn test_parse_trims_whitespace() {
        let spec: PackageSpec = "  numpy==1.23.0\n".parse().unwrap();
        assert_eq!(spec.to_string(), "numpy==1.23.0");
        assert!("   ".parse::<PackageSpec>().is_err());
    }

    #[test]
    fn test_set_deduplicates() {
        let mut set = PackageSet::new();
        set.insert(PackageSpec::versioned("requests", "2.28.1"));
        set.insert(PackageSpec::versioned("requests", "2.28.1"));
        set.insert(PackageSpec::bare("numpy"));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_dir_name_extraction() {
        assert_eq!(package_name_from_dir("requests-2.28.1"), Some("requests"));
        assert_eq!(package_name_from_dir("numpy"), Some("numpy"));
        assert_eq!(
            package_name_from_dir("typing_extensions-4.4.0.dist-info"),
            Some("typing_extensions")
        );
        assert_eq!(package_name_from_dir(".hidden"), None);
    }
}
