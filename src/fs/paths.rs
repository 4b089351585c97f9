//! Path probing and directory management.

use std::io::ErrorKind;
use std::path::Path;

use crate::error::{Error, Result};

/// What currently lives at a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileStatus {
    NotExists,
    IsFile,
    IsDirectory,
    /// Something else, e.g. a socket or a broken special file.
    Other,
}

/// Probe a path without following it into an error on absence.
pub async fn file_status(path: &Path) -> Result<FileStatus> {
    match tokio::fs::metadata(path).await {
        Ok(meta) if meta.is_file() => Ok(FileStatus::IsFile),
        Ok(meta) if meta.is_dir() => Ok(FileStatus::IsDirectory),
        Ok(_) => Ok(FileStatus::Other),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(FileStatus::NotExists),
        Err(e) => Err(Error::Io(e)),
    }
}

/// Check that `path` is either absent or a regular file.
///
/// Returns `true` when a regular file exists.
pub async fn expect_regular_file(path: &Path) -> Result<bool> {
    match file_status(path).await? {
        FileStatus::IsFile => Ok(true),
        FileStatus::NotExists => Ok(false),
        FileStatus::IsDirectory => Err(Error::FileSystem {
            path: path.display().to_string(),
            message: "expected a file, found a directory".to_string(),
        }),
        FileStatus::Other => Err(Error::FileSystem {
            path: path.display().to_string(),
            message: "expected a regular file".to_string(),
        }),
    }
}

/// Ensure a directory exists, creating it (and parents) if necessary.
pub async fn ensure_dir(path: &Path) -> Result<()> {
    match file_status(path).await? {
        FileStatus::IsDirectory => Ok(()),
        FileStatus::NotExists => {
            tokio::fs::create_dir_all(path).await?;
            tracing::debug!("Created directory {}", path.display());
            Ok(())
        }
        FileStatus::IsFile | FileStatus::Other => Err(Error::FileSystem {
            path: path.display().to_string(),
            message: "expected a directory".to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_file_status() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("a.txt");
        std::fs::write(&file, b"x").unwrap();

        assert_eq!(file_status(dir.path()).await.unwrap(), FileStatus::IsDirectory);
        assert_eq!(file_status(&file).await.unwrap(), FileStatus::IsFile);
        assert_eq!(
            file_status(&dir.path().join("missing")).await.unwrap(),
            FileStatus::NotExists
        );
    }

    #[tokio::test]
    async fn test_expect_regular_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(!expect_regular_file(&dir.path().join("none")).await.unwrap());

        let err = expect_regular_file(dir.path()).await.unwrap_err();
        assert!(matches!(err, Error::FileSystem { .. }));
    }

    #[test]
    fn test_ensure_dir() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("img").join("nested");
        tokio_test::block_on(ensure_dir(&nested)).unwrap();
        assert!(nested.is_dir());
        tokio_test::block_on(ensure_dir(&nested)).unwrap();

        let file = dir.path().join("plain");
        std::fs::write(&file, b"x").unwrap();
        assert!(tokio_test::block_on(ensure_dir(&file)).is_err());
    }
}
