//! Region spec tokens: `path` or `[=]LABEL:path`.

use crate::error::RegionError;
use crate::labels::FileLabel;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// One region file to load and the label its intervals go under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionSpec {
    pub label: FileLabel,
    pub path: PathBuf,
}

impl RegionSpec {
    /// Spec with an explicit label. `CONF` is always fixed.
    pub fn new(label: impl Into<String>, path: impl Into<PathBuf>, fixed: bool) -> Self {
        Self {
            label: FileLabel::new(label, fixed),
            path: path.into(),
        }
    }

    /// Spec labeled by the file name without its last extension.
    pub fn from_path(path: impl Into<PathBuf>) -> Option<Self> {
        let path = path.into();
        let stem = path.file_stem()?.to_string_lossy().into_owned();
        (!stem.is_empty()).then(|| Self::new(stem, path, false))
    }

    pub fn label(&self) -> &str {
        &self.label.name
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Parse every token, failing on the first invalid one.
    pub fn parse_all<S: AsRef<str>>(tokens: &[S]) -> Result<Vec<Self>, RegionError> {
        tokens.iter().map(|t| t.as_ref().parse()).collect()
    }
}

impl FromStr for RegionSpec {
    type Err = RegionError;

    /// Labels given before the first `:`; a leading `=` keeps the file from
    /// splitting into sub-labels.
    fn from_str(token: &str) -> Result<Self, Self::Err> {
        let Some((label, path)) = token.split_once(':') else {
            if token.is_empty() {
                return Err(RegionError::EmptyPath(token.to_string()));
            }
            return RegionSpec::from_path(token)
                .ok_or_else(|| RegionError::EmptyLabel(token.to_string()));
        };

        let (label, fixed) = match label.strip_prefix('=') {
            Some(label) => (label, true),
            None => (label, false),
        };
        if label.is_empty() {
            return Err(RegionError::EmptyLabel(token.to_string()));
        }
        if path.is_empty() {
            return Err(RegionError::EmptyPath(token.to_string()));
        }
        Ok(RegionSpec::new(label, path, fixed))
    }
}

impl fmt::Display for RegionSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let marker = if self.label.fixed && self.label.name != crate::labels::CONF_LABEL {
            "="
        } else {
            ""
        };
        write!(f, "{}{}:{}", marker, self.label.name, self.path.display())
    }
}
