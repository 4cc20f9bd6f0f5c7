use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tokio::fs::{self, OpenOptions};
use tokio::io::AsyncWriteExt;

pub const DEFAULT_MAX_BYTES: u64 = 1024 * 1024;
pub const DEFAULT_BACKUPS: usize = 5;

/// Append-only text log rotated by size: `log.txt` → `log.txt.1` → … →
/// `log.txt.{backups}`, the oldest being discarded.
#[derive(Clone, Debug)]
pub struct RotatingLog {
    path: PathBuf,
    max_bytes: u64,
    backups: usize,
}

impl RotatingLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::with_limits(path, DEFAULT_MAX_BYTES, DEFAULT_BACKUPS)
    }

    pub fn with_limits(path: impl Into<PathBuf>, max_bytes: u64, backups: usize) -> Self {
        Self {
            path: path.into(),
            max_bytes: max_bytes.max(1),
            backups,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn append_line(&self, line: &str) -> Result<()> {
        let incoming = line.len() as u64 + 1;
        let current = match fs::metadata(&self.path).await {
            Ok(meta) => meta.len(),
            Err(err) if err.kind() == io::ErrorKind::NotFound => 0,
            Err(err) => {
                return Err(err).with_context(|| {
                    format!("failed to inspect log file {}", self.path.display())
                });
            }
        };
        if current > 0 && current + incoming > self.max_bytes {
            self.rotate().await?;
        }

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await.with_context(|| {
                format!("failed to create log directory {}", parent.display())
            })?;
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await
            .with_context(|| format!("failed to open log file {}", self.path.display()))?;
        let mut buf = Vec::with_capacity(incoming as usize);
        buf.extend_from_slice(line.as_bytes());
        buf.push(b'\n');
        file.write_all(&buf)
            .await
            .with_context(|| format!("failed to append to log file {}", self.path.display()))
    }

    async fn rotate(&self) -> Result<()> {
        if self.backups == 0 {
            return fs::remove_file(&self.path)
                .await
                .with_context(|| format!("failed to truncate log file {}", self.path.display()));
        }

        let oldest = self.backup_path(self.backups);
        if fs::try_exists(&oldest).await.unwrap_or(false) {
            fs::remove_file(&oldest)
                .await
                .with_context(|| format!("failed to drop old log {}", oldest.display()))?;
        }
        for index in (1..self.backups).rev() {
            let from = self.backup_path(index);
            if fs::try_exists(&from).await.unwrap_or(false) {
                let to = self.backup_path(index + 1);
                fs::rename(&from, &to)
                    .await
                    .with_context(|| format!("failed to rotate log {}", from.display()))?;
            }
        }
        fs::rename(&self.path, self.backup_path(1))
            .await
            .with_context(|| format!("failed to rotate log {}", self.path.display()))
    }

    fn backup_path(&self, index: usize) -> PathBuf {
        let mut name = self.path.as_os_str().to_owned();
        name.push(format!(".{index}"));
        PathBuf::from(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn appends_lines_in_order() {
        let dir = tempdir().unwrap();
        let log = RotatingLog::new(dir.path().join("log.txt"));
        log.append_line("first").await.unwrap();
        log.append_line("second").await.unwrap();
        let contents = fs::read_to_string(log.path()).await.unwrap();
        assert_eq!(contents, "first\nsecond\n");
    }

    #[tokio::test]
    async fn rotates_at_size_limit_and_keeps_backup_count() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("log.txt");
        // Each line is 10 bytes with its newline; two fit under the limit.
        let log = RotatingLog::with_limits(&path, 20, 2);
        for index in 0..8 {
            log.append_line(&format!("line-{index:04}")).await.unwrap();
        }

        assert_eq!(fs::read_to_string(&path).await.unwrap(), "line-0006\nline-0007\n");
        assert_eq!(
            fs::read_to_string(dir.path().join("log.txt.1")).await.unwrap(),
            "line-0004\nline-0005\n"
        );
        assert_eq!(
            fs::read_to_string(dir.path().join("log.txt.2")).await.unwrap(),
            "line-0002\nline-0003\n"
        );
        assert!(!dir.path().join("log.txt.3").exists());
    }

    #[tokio::test]
    async fn oversized_line_still_lands_in_fresh_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested/log.txt");
        let log = RotatingLog::with_limits(&path, 4, 1);
        log.append_line("much longer than four bytes").await.unwrap();
        log.append_line("again").await.unwrap();
        assert_eq!(fs::read_to_string(&path).await.unwrap(), "again\n");
        assert_eq!(
            fs::read_to_string(dir.path().join("nested/log.txt.1")).await.unwrap(),
            "much longer than four bytes\n"
        );
    }
}
