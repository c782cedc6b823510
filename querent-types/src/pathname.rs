//! Syntactic pathname checks, independent of whether the path exists.
//!
//! A pathname is valid when the operating system accepts every one of its
//! segments as a name. Each segment is probed under the filesystem root with
//! `lstat`; segments that do not exist are fine, but a segment the OS reports
//! as too long or malformed makes the whole pathname invalid.

use std::{fmt, io, path::PathBuf, sync::Arc};

use crate::{AnswerValue, FsProbe, OsProbe};

/// Platform rules for telling well-formed pathnames from malformed ones.
pub trait PathnameChecker: fmt::Debug + Send + Sync {
    /// The separator segments are split on.
    fn separator(&self) -> char;

    /// Whether `c` ends a path segment. Used for the final-segment check.
    fn is_separator(&self, c: char) -> bool {
        c == self.separator()
    }

    /// Split a pathname into its drive or volume prefix and the rest.
    fn split_drive<'a>(&self, pathname: &'a str) -> (&'a str, &'a str);

    /// The directory every segment is probed under.
    fn root(&self) -> PathBuf;

    /// Whether a probe error means the OS rejected the name itself.
    fn is_name_fault(&self, err: &io::Error) -> bool;

    /// Check `pathname` for well-formedness.
    fn is_valid(&self, pathname: &str, probe: &dyn FsProbe) -> bool {
        if pathname.is_empty() {
            return false;
        }

        let (_, rest) = self.split_drive(pathname);

        let root = self.root();
        if !probe.is_dir(&root) {
            tracing::warn!(root = %root.display(), "filesystem root is missing, rejecting pathname");
            return false;
        }
        let sep = self.separator();
        let mut prefix = root.to_string_lossy().trim_end_matches(sep).to_string();
        prefix.push(sep);

        for segment in rest.split(sep) {
            let candidate = PathBuf::from(format!("{prefix}{segment}"));
            match probe.symlink_metadata(&candidate) {
                // Interior NUL bytes and similar never reach the OS.
                Err(err) if err.kind() == io::ErrorKind::InvalidInput => return false,
                Err(err) if self.is_name_fault(&err) => {
                    tracing::trace!(segment, error = %err, "pathname segment rejected");
                    return false;
                }
                _ => {}
            }
        }

        true
    }
}

pub const ERROR_INVALID_NAME: i32 = 123;

pub const ERROR_FILENAME_EXCED_RANGE: i32 = 206;

/// Unix-like systems: `/` root, no drives.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnixPathnames;

impl PathnameChecker for UnixPathnames {
    fn separator(&self) -> char {
        '/'
    }

    fn split_drive<'a>(&self, pathname: &'a str) -> (&'a str, &'a str) {
        ("", pathname)
    }

    fn root(&self) -> PathBuf {
        PathBuf::from("/")
    }

    #[cfg(unix)]
    fn is_name_fault(&self, err: &io::Error) -> bool {
        matches!(err.raw_os_error(), Some(libc::ENAMETOOLONG | libc::ERANGE))
    }

    // Unix errno values mean nothing to a non-Unix OS.
    #[cfg(not(unix))]
    fn is_name_fault(&self, _err: &io::Error) -> bool {
        false
    }
}

/// Windows: drive letters and UNC shares, segments probed under the system drive.
#[derive(Debug, Clone)]
pub struct WindowsPathnames {
    system_drive: String,
}

impl WindowsPathnames {
    pub fn new(system_drive: impl Into<String>) -> Self {
        Self {
            system_drive: system_drive.into(),
        }
    }

    /// Use `%HOMEDRIVE%`, falling back to `C:`.
    pub fn from_env() -> Self {
        Self::new(std::env::var("HOMEDRIVE").unwrap_or_else(|_| "C:".to_string()))
    }
}

impl Default for WindowsPathnames {
    fn default() -> Self {
        Self::new("C:")
    }
}

impl PathnameChecker for WindowsPathnames {
    fn separator(&self) -> char {
        '\\'
    }

    fn is_separator(&self, c: char) -> bool {
        c == '\\' || c == '/'
    }

    fn split_drive<'a>(&self, pathname: &'a str) -> (&'a str, &'a str) {
        let is_sep = |b: u8| b == b'\\' || b == b'/';
        let bytes = pathname.as_bytes();

        // \\server\share\rest
        if bytes.len() > 2 && is_sep(bytes[0]) && is_sep(bytes[1]) && !is_sep(bytes[2]) {
            let Some(server_len) = pathname[2..].find(['\\', '/']) else {
                return ("", pathname);
            };
            let share_start = 2 + server_len + 1;
            let share_end = pathname[share_start..]
                .find(['\\', '/'])
                .map_or(pathname.len(), |i| share_start + i);
            if share_end == share_start {
                return ("", pathname);
            }
            return pathname.split_at(share_end);
        }

        if bytes.len() >= 2 && bytes[1] == b':' && bytes[0].is_ascii_alphabetic() {
            return pathname.split_at(2);
        }

        ("", pathname)
    }

    fn root(&self) -> PathBuf {
        let mut root = self.system_drive.trim_end_matches('\\').to_string();
        root.push('\\');
        PathBuf::from(root)
    }

    fn is_name_fault(&self, err: &io::Error) -> bool {
        matches!(
            err.raw_os_error(),
            Some(ERROR_INVALID_NAME | ERROR_FILENAME_EXCED_RANGE)
        )
    }
}

/// The checker for the platform this binary was built for.
pub fn platform() -> Arc<dyn PathnameChecker> {
    #[cfg(windows)]
    {
        Arc::new(WindowsPathnames::from_env())
    }
    #[cfg(not(windows))]
    {
        Arc::new(UnixPathnames)
    }
}

/// `true` if `value` is a string the current OS accepts as a pathname.
///
/// Non-strings and the empty string are never valid.
pub fn is_pathname_valid(value: &AnswerValue) -> bool {
    match value.as_str() {
        Some(pathname) => platform().is_valid(pathname, &OsProbe),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::probe::fake::FakeProbe;

    #[test]
    fn empty_and_non_strings_are_invalid() {
        assert!(!is_pathname_valid(&AnswerValue::from("")));
        assert!(!is_pathname_valid(&AnswerValue::Null));
        assert!(!is_pathname_valid(&AnswerValue::from(12)));
    }

    #[test]
    fn missing_segments_are_fine() {
        let probe = FakeProbe::new();
        assert!(UnixPathnames.is_valid("no/such/place", &probe));
    }

    #[cfg(unix)]
    #[test]
    fn name_faults_use_platform_errno() {
        let fault = |code| io::Error::from_raw_os_error(code);
        assert!(UnixPathnames.is_name_fault(&fault(libc::ENAMETOOLONG)));
        assert!(UnixPathnames.is_name_fault(&fault(libc::ERANGE)));
        assert!(!UnixPathnames.is_name_fault(&fault(libc::EACCES)));
        assert!(!UnixPathnames.is_name_fault(&fault(libc::ENOENT)));
    }

    #[cfg(unix)]
    #[test]
    fn name_too_long_is_invalid() {
        let probe = FakeProbe::new().with_fault("/bad", libc::ENAMETOOLONG);
        assert!(!UnixPathnames.is_valid("ok/bad/ok", &probe));
        assert!(UnixPathnames.is_valid("ok/good/ok", &probe));
    }

    #[cfg(unix)]
    #[test]
    fn range_error_is_invalid() {
        let probe = FakeProbe::new().with_fault("/weird", libc::ERANGE);
        assert!(!UnixPathnames.is_valid("/weird", &probe));
    }

    #[cfg(unix)]
    #[test]
    fn other_probe_errors_are_ignored() {
        let probe = FakeProbe::new().with_fault("/locked", libc::EACCES);
        assert!(UnixPathnames.is_valid("/locked/inner", &probe));
    }

    #[test]
    fn missing_root_is_invalid() {
        let probe = FakeProbe::new().without_root();
        assert!(!UnixPathnames.is_valid("a", &probe));
    }

    #[test]
    fn windows_drive_split() {
        let checker = WindowsPathnames::default();
        assert_eq!(checker.split_drive("C:\\dir\\f"), ("C:", "\\dir\\f"));
        assert_eq!(checker.split_drive("d:rel"), ("d:", "rel"));
        assert_eq!(
            checker.split_drive("\\\\server\\share\\dir"),
            ("\\\\server\\share", "\\dir")
        );
        assert_eq!(checker.split_drive("\\\\server"), ("", "\\\\server"));
        assert_eq!(checker.split_drive("relative\\x"), ("", "relative\\x"));
    }

    #[test]
    fn windows_invalid_name() {
        let probe = FakeProbe::new()
            .with_dir("C:\\")
            .with_fault("C:\\a?b", ERROR_INVALID_NAME);
        let checker = WindowsPathnames::default();
        assert!(!checker.is_valid("C:\\x\\a?b", &probe));
        assert!(checker.is_valid("C:\\x\\ab", &probe));
    }

    #[cfg(unix)]
    #[test]
    fn real_filesystem() {
        assert!(is_pathname_valid(&AnswerValue::from("some/short/path")));
        assert!(!is_pathname_valid(&AnswerValue::from("x".repeat(300))));
        assert!(!is_pathname_valid(&AnswerValue::from("nul\0byte")));
    }
}
