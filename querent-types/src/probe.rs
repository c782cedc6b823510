use std::{
    fmt, io,
    path::{Path, PathBuf},
};

/// Read-only filesystem queries made while validating path answers.
///
/// Path validation goes through this trait so tests can substitute a fake
/// filesystem for the real one.
pub trait FsProbe: fmt::Debug + Send + Sync {
    /// Query metadata for `path` without following a trailing symlink.
    fn symlink_metadata(&self, path: &Path) -> io::Result<()>;

    /// Whether `path` resolves to a regular file.
    fn is_file(&self, path: &Path) -> bool;

    /// Whether `path` resolves to a directory.
    fn is_dir(&self, path: &Path) -> bool;

    /// Whether `path` resolves to anything at all.
    fn exists(&self, path: &Path) -> bool;

    /// The current user's home directory, for `~` expansion.
    fn home_dir(&self) -> Option<PathBuf>;

    /// The working directory relative paths are resolved against.
    fn current_dir(&self) -> io::Result<PathBuf>;
}

/// The real filesystem.
#[derive(Debug, Default, Clone, Copy)]
pub struct OsProbe;

impl FsProbe for OsProbe {
    fn symlink_metadata(&self, path: &Path) -> io::Result<()> {
        std::fs::symlink_metadata(path).map(|_| ())
    }

    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn home_dir(&self) -> Option<PathBuf> {
        dirs::home_dir()
    }

    fn current_dir(&self) -> io::Result<PathBuf> {
        std::env::current_dir()
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn os_probe_sees_real_entries() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("a.txt");
        std::fs::write(&file, "x").unwrap();

        assert!(OsProbe.is_dir(dir.path()));
        assert!(OsProbe.is_file(&file));
        assert!(OsProbe.exists(&file));
        assert!(!OsProbe.exists(&dir.path().join("missing")));
        assert!(OsProbe.symlink_metadata(&file).is_ok());
        assert!(OsProbe.symlink_metadata(&dir.path().join("missing")).is_err());
    }
}
