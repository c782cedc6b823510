use std::{
    fmt, io,
    path::{Component, Path, PathBuf},
    str::FromStr,
    sync::Arc,
};

use serde::{Deserialize, Serialize};

use crate::{AnswerValue, FsProbe, OsProbe, PathnameChecker, ValidationError, pathname};

/// What a path answer must point at.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PathType {
    #[default]
    Any,
    File,
    Directory,
}

impl PathType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Any => "any",
            Self::File => "file",
            Self::Directory => "directory",
        }
    }
}

impl fmt::Display for PathType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PathType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "any" => Ok(Self::Any),
            "file" => Ok(Self::File),
            "directory" => Ok(Self::Directory),
            other => Err(format!("unknown path type '{other}'")),
        }
    }
}

/// Rules a Path question applies on top of the regular validator.
///
/// `exists` is tri-state: `Some(true)` requires the target to exist,
/// `Some(false)` requires it not to, and `None` only checks the shape of the
/// path (a file path must not end in a separator, a directory path must).
#[derive(Debug, Clone)]
pub struct PathPolicy {
    pub path_type: PathType,
    pub exists: Option<bool>,
    pub normalize_to_absolute: bool,
    probe: Arc<dyn FsProbe>,
    checker: Arc<dyn PathnameChecker>,
}

impl Default for PathPolicy {
    fn default() -> Self {
        Self {
            path_type: PathType::Any,
            exists: None,
            normalize_to_absolute: false,
            probe: Arc::new(OsProbe),
            checker: pathname::platform(),
        }
    }
}

impl PathPolicy {
    /// Create a policy for the given path type with no existence constraint.
    pub fn new(path_type: PathType) -> Self {
        Self {
            path_type,
            ..Self::default()
        }
    }

    /// Require the target to exist (`true`) or to be absent (`false`).
    pub fn with_exists(mut self, exists: bool) -> Self {
        self.exists = Some(exists);
        self
    }

    /// Resolve answers to absolute paths before checking them.
    pub fn absolute(mut self) -> Self {
        self.normalize_to_absolute = true;
        self
    }

    /// Replace the filesystem probe.
    pub fn with_probe(mut self, probe: impl FsProbe + 'static) -> Self {
        self.probe = Arc::new(probe);
        self
    }

    /// Replace the pathname rules.
    pub fn with_checker(mut self, checker: impl PathnameChecker + 'static) -> Self {
        self.checker = Arc::new(checker);
        self
    }

    /// Expand a leading `~` and, if configured, make the path absolute.
    pub fn normalize(&self, raw: &str) -> io::Result<String> {
        let expanded = self.expand_home(raw);
        if !self.normalize_to_absolute {
            return Ok(expanded);
        }

        let path = Path::new(&expanded);
        let absolute = if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.probe.current_dir()?.join(path)
        };
        Ok(clean(&absolute).to_string_lossy().into_owned())
    }

    fn expand_home(&self, raw: &str) -> String {
        let Some(rest) = raw.strip_prefix('~') else {
            return raw.to_string();
        };
        if !(rest.is_empty() || rest.starts_with(|c: char| self.checker.is_separator(c))) {
            // ~user forms are left alone
            return raw.to_string();
        }
        match self.probe.home_dir() {
            Some(home) => {
                let home = home.to_string_lossy();
                let home = home.trim_end_matches(|c: char| self.checker.is_separator(c));
                if rest.is_empty() && home.is_empty() {
                    self.checker.separator().to_string()
                } else {
                    format!("{home}{rest}")
                }
            }
            None => raw.to_string(),
        }
    }

    /// Check a candidate against the pathname rules and the existence policy.
    pub fn validate(&self, candidate: &AnswerValue) -> Result<(), ValidationError> {
        let raw = match candidate {
            AnswerValue::Null => {
                return Err(ValidationError::with_reason(AnswerValue::Null, "no path given"));
            }
            AnswerValue::String(raw) => raw,
            other => {
                return Err(ValidationError::with_reason(
                    other.clone(),
                    format!("expected a path, got {}", other.type_name()),
                ));
            }
        };

        let normalized = self
            .normalize(raw)
            .map_err(|err| ValidationError::caused_by(candidate.clone(), err.into()))?;
        let reject = |reason: &str| Err(ValidationError::with_reason(normalized.as_str(), reason));

        if !self.checker.is_valid(&normalized, self.probe.as_ref()) {
            return reject("not a valid path name");
        }

        let path = Path::new(&normalized);
        let names_directory = normalized.ends_with(|c: char| self.checker.is_separator(c));

        match (self.path_type, self.exists) {
            (PathType::File, None) if names_directory => reject("expected a file, not a directory"),
            (PathType::File, Some(true)) if !self.probe.is_file(path) => {
                reject("file does not exist")
            }
            (PathType::File, Some(false)) if self.probe.is_file(path) => {
                reject("file already exists")
            }
            (PathType::Directory, None) if !names_directory => {
                reject("expected a directory ending in a separator")
            }
            (PathType::Directory, Some(true)) if !self.probe.is_dir(path) => {
                reject("directory does not exist")
            }
            (PathType::Directory, Some(false)) if self.probe.is_dir(path) => {
                reject("directory already exists")
            }
            (PathType::Any, Some(true)) if !self.probe.exists(path) => {
                reject("path does not exist")
            }
            (PathType::Any, Some(false)) if self.probe.exists(path) => {
                reject("path already exists")
            }
            _ => Ok(()),
        }
    }
}

/// Lexically collapse `.` and `..` components.
fn clean(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !matches!(
                    out.components().next_back(),
                    None | Some(Component::RootDir | Component::Prefix(_))
                ) {
                    out.pop();
                }
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}
