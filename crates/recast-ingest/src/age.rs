//! Source file age checks.

use std::path::Path;
use std::time::{Duration, SystemTime};

use chrono::{DateTime, Local};

use crate::error::{IngestError, Result};

/// Day limit used when an age check is requested without a value.
pub const DEFAULT_AGE_LIMIT_DAYS: u64 = 5;

const SECONDS_PER_DAY: u64 = 24 * 60 * 60;

/// Modification time of a file relative to now.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileAge {
    pub modified: SystemTime,
    pub age: Duration,
}

impl FileAge {
    /// Age in whole days, rounded down.
    pub fn days(&self) -> u64 {
        self.age.as_secs() / SECONDS_PER_DAY
    }

    pub fn is_older_than_days(&self, days: u64) -> bool {
        self.age > Duration::from_secs(days.saturating_mul(SECONDS_PER_DAY))
    }

    /// Local modification time formatted for messages.
    pub fn modified_display(&self) -> String {
        DateTime::<Local>::from(self.modified)
            .format("%Y-%m-%d %H:%M")
            .to_string()
    }
}

/// Reads the modification time of `path`. Files dated in the future have age zero.
pub fn file_age(path: &Path) -> Result<FileAge> {
    let metadata = std::fs::metadata(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            IngestError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            IngestError::Metadata {
                path: path.to_path_buf(),
                source: e,
            }
        }
    })?;
    let modified = metadata.modified().map_err(|e| IngestError::Metadata {
        path: path.to_path_buf(),
        source: e,
    })?;
    let age = SystemTime::now()
        .duration_since(modified)
        .unwrap_or_default();
    Ok(FileAge { modified, age })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_fresh_file_is_not_old() {
        let file = NamedTempFile::new().unwrap();
        let age = file_age(file.path()).unwrap();
        assert_eq!(age.days(), 0);
        assert!(!age.is_older_than_days(DEFAULT_AGE_LIMIT_DAYS));
    }

    #[test]
    fn test_age_comparison() {
        let age = FileAge {
            modified: SystemTime::UNIX_EPOCH,
            age: Duration::from_secs(6 * SECONDS_PER_DAY),
        };
        assert_eq!(age.days(), 6);
        assert!(age.is_older_than_days(5));
        assert!(!age.is_older_than_days(6));
    }

    #[test]
    fn test_missing_file() {
        let result = file_age(Path::new("/definitely/not/here.csv"));
        assert!(matches!(result, Err(IngestError::FileNotFound { .. })));
    }
}
