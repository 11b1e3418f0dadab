//! Remote path value object
//!
//! Destination paths are POSIX-style regardless of the host OS. A backslash
//! is an ordinary filename character there, never a separator.

use std::fmt;

/// An absolute or root-relative path on the destination, always `/`-separated
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RemotePath(String);

impl RemotePath {
    /// Create a remote path, collapsing repeated and trailing slashes.
    ///
    /// `"/"` stays `"/"`; empty input becomes `"."`.
    pub fn new(path: impl AsRef<str>) -> Self {
        let raw = path.as_ref();
        let absolute = raw.starts_with('/');
        let joined = raw
            .split('/')
            .filter(|seg| !seg.is_empty() && *seg != ".")
            .collect::<Vec<_>>()
            .join("/");

        let normalized = match (absolute, joined.is_empty()) {
            (true, true) => "/".to_string(),
            (true, false) => format!("/{}", joined),
            (false, true) => ".".to_string(),
            (false, false) => joined,
        };
        Self(normalized)
    }

    /// Join a forward-slash relative path onto this one.
    ///
    /// Empty, `.` and `..` segments are dropped, so the result always stays
    /// at or below `self`.
    pub fn join(&self, relative: &str) -> Self {
        let segments: Vec<&str> = relative
            .split('/')
            .filter(|seg| !seg.is_empty() && *seg != "." && *seg != "..")
            .collect();
        if segments.is_empty() {
            return self.clone();
        }
        self.append(&segments.join("/"))
    }

    /// Append one directory entry name exactly as the destination reported it
    pub fn child(&self, name: &str) -> Self {
        if name.is_empty() {
            return self.clone();
        }
        self.append(name)
    }

    fn append(&self, tail: &str) -> Self {
        match self.0.as_str() {
            "/" => Self(format!("/{}", tail)),
            "." => Self(tail.to_string()),
            base => Self(format!("{}/{}", base, tail)),
        }
    }

    /// Parent directory, or `None` at the root
    pub fn parent(&self) -> Option<Self> {
        if self.is_root() {
            return None;
        }
        match self.0.rfind('/') {
            Some(0) => Some(Self("/".to_string())),
            Some(idx) => Some(Self(self.0[..idx].to_string())),
            None => Some(Self(".".to_string())),
        }
    }

    /// Whether this is `/` or `.`
    pub fn is_root(&self) -> bool {
        self.0 == "/" || self.0 == "."
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RemotePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for RemotePath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
