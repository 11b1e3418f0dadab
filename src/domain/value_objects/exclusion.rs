//! Exclusion rules
//!
//! Decides which local files and directories never become part of a deploy.
//! Rules come from the `exclude` list in configuration.

use serde::Deserialize;
use std::fmt;

/// A single exclusion rule
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExclusionRule {
    /// File name ends with the given text (`"*.map"` → `Suffix(".map")`)
    Suffix(String),
    /// File name equals the given text (`".DS_Store"`)
    ExactName(String),
    /// Relative path contains the given text (`"drafts/"`)
    Substring(String),
}

impl ExclusionRule {
    /// Parse the short string form used in configuration.
    ///
    /// - leading `*` → suffix match on the file name
    /// - contains `/` → substring match on the relative path
    /// - anything else → exact file name match
    ///
    /// Returns `None` for blank patterns, which would otherwise match everything.
    pub fn parse(pattern: &str) -> Option<Self> {
        let pattern = pattern.trim();
        if let Some(suffix) = pattern.strip_prefix('*') {
            if suffix.is_empty() {
                return None;
            }
            return Some(Self::Suffix(suffix.to_string()));
        }
        if pattern.is_empty() {
            return None;
        }
        if pattern.contains('/') {
            Some(Self::Substring(pattern.to_string()))
        } else {
            Some(Self::ExactName(pattern.to_string()))
        }
    }

    /// Check the rule against a file or directory.
    ///
    /// `rel_path` uses `/` separators and has no leading slash. Substring
    /// rules see it with a leading `/` (and a trailing one for directories),
    /// so `"/drafts/"` anchors at the root while `"drafts/"` matches at any depth.
    pub fn matches(&self, name: &str, rel_path: &str, is_dir: bool) -> bool {
        match self {
            Self::Suffix(suffix) => name.ends_with(suffix.as_str()),
            Self::ExactName(exact) => name == exact,
            Self::Substring(needle) => {
                let mut haystack = String::with_capacity(rel_path.len() + 2);
                haystack.push('/');
                haystack.push_str(rel_path);
                if is_dir {
                    haystack.push('/');
                }
                haystack.contains(needle.as_str())
            }
        }
    }
}

impl fmt::Display for ExclusionRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Suffix(s) => write!(f, "*{}", s),
            Self::ExactName(s) => write!(f, "{}", s),
            Self::Substring(s) => write!(f, "{}", s),
        }
    }
}

/// Configuration form of a rule: either the short string or an explicit table
#[derive(Deserialize)]
#[serde(untagged)]
enum RuleSpec {
    Short(String),
    Suffix { suffix: String },
    Name { name: String },
    Contains { contains: String },
}

impl<'de> Deserialize<'de> for ExclusionRule {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use serde::de::Error;

        let (rule, raw) = match RuleSpec::deserialize(deserializer)? {
            RuleSpec::Short(s) => (Self::parse(&s), s),
            RuleSpec::Suffix { suffix } => (
                Some(Self::Suffix(suffix.clone())).filter(|_| !suffix.is_empty()),
                suffix,
            ),
            RuleSpec::Name { name } => (
                Some(Self::ExactName(name.clone())).filter(|_| !name.is_empty()),
                name,
            ),
            RuleSpec::Contains { contains } => (
                Some(Self::Substring(contains.clone())).filter(|_| !contains.is_empty()),
                contains,
            ),
        };
        rule.ok_or_else(|| D::Error::custom(format!("empty exclusion pattern '{}'", raw)))
    }
}

/// An ordered collection of exclusion rules
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExclusionSet {
    rules: Vec<ExclusionRule>,
}

impl ExclusionSet {
    pub fn new(rules: Vec<ExclusionRule>) -> Self {
        Self { rules }
    }

    /// Build from short string patterns, dropping blank ones
    pub fn from_patterns<I, S>(patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            rules: patterns
                .into_iter()
                .filter_map(|p| ExclusionRule::parse(p.as_ref()))
                .collect(),
        }
    }

    /// Whether any rule excludes this entry
    pub fn is_excluded(&self, name: &str, rel_path: &str, is_dir: bool) -> bool {
        self.rules
            .iter()
            .any(|rule| rule.matches(name, rel_path, is_dir))
    }

    pub fn rules(&self) -> &[ExclusionRule] {
        &self.rules
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
