//! Audit trail for cleaned records
//!
//! Original values are never written anywhere in plaintext: log events and
//! audit entries carry a SHA-256 fingerprint instead.

use crate::config::AuditConfig;
use crate::domain::{CleanerError, Result, Value};
use chrono::Utc;
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Hex SHA-256 of the value's string form
pub fn fingerprint(value: &Value) -> String {
    let mut hasher = Sha256::new();
    hasher.update(value.to_string().as_bytes());
    format!("{:x}", hasher.finalize())
}

/// One replaced attribute
#[derive(Debug, Clone, Serialize)]
pub struct AuditReplacement {
    pub attribute: String,
    /// Recipe variant that produced the new value
    pub recipe: &'static str,
    /// Fingerprint of the original value
    pub value_hash: String,
}

impl AuditReplacement {
    pub fn new(attribute: impl Into<String>, recipe: &'static str, original: &Value) -> Self {
        Self {
            attribute: attribute.into(),
            recipe,
            value_hash: fingerprint(original),
        }
    }
}

#[derive(Debug, Serialize)]
struct AuditLogEntry<'a> {
    timestamp: String,
    type_name: &'a str,
    replacements: &'a [AuditReplacement],
}

/// Appends one line per cleaned record to an audit log file
#[derive(Debug, Clone)]
pub struct AuditLogger {
    log_path: PathBuf,
    json_format: bool,
    enabled: bool,
}

impl AuditLogger {
    /// Create a new audit logger, creating the log directory when enabled
    pub fn new(log_path: impl Into<PathBuf>, json_format: bool, enabled: bool) -> Result<Self> {
        let log_path = log_path.into();
        if enabled {
            if let Some(parent) = log_path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent).map_err(|e| {
                    CleanerError::Io(format!(
                        "Failed to create audit log directory {}: {e}",
                        parent.display()
                    ))
                })?;
            }
        }

        Ok(Self {
            log_path,
            json_format,
            enabled,
        })
    }

    pub fn from_config(config: &AuditConfig) -> Result<Self> {
        Self::new(config.log_path.clone(), config.json_format, config.enabled)
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn path(&self) -> &Path {
        &self.log_path
    }

    /// Record the replacements applied to one record
    pub fn log_record(&self, type_name: &str, replacements: &[AuditReplacement]) -> Result<()> {
        if !self.enabled {
            return Ok(());
        }

        let entry = AuditLogEntry {
            timestamp: Utc::now().to_rfc3339(),
            type_name,
            replacements,
        };

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)
            .map_err(|e| {
                CleanerError::Io(format!(
                    "Failed to open audit log {}: {e}",
                    self.log_path.display()
                ))
            })?;

        if self.json_format {
            let line = serde_json::to_string(&entry)?;
            writeln!(file, "{line}")?;
        } else {
            let attributes: Vec<&str> = replacements.iter().map(|r| r.attribute.as_str()).collect();
            writeln!(
                file,
                "[{}] Type: {} | Replaced: {} | Attributes: {}",
                entry.timestamp,
                type_name,
                replacements.len(),
                attributes.join(", ")
            )?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_fingerprint_is_stable() {
        let first = fingerprint(&Value::from("ford@betelgeuse.net"));
        let second = fingerprint(&Value::from("ford@betelgeuse.net"));
        let other = fingerprint(&Value::from("arthur@earth.net"));

        assert_eq!(first, second);
        assert_ne!(first, other);
        assert_eq!(first.len(), 64);
    }

    #[test]
    fn test_disabled_logger_writes_nothing() {
        let dir = tempdir().unwrap();
        let log_path = dir.path().join("audit").join("cleaner.log");
        let logger = AuditLogger::new(&log_path, true, false).unwrap();

        logger.log_record("TopSecret", &[]).unwrap();
        assert!(!log_path.exists());
        assert!(!logger.is_enabled());
    }

    #[test]
    fn test_json_entry_hides_plaintext() {
        let dir = tempdir().unwrap();
        let log_path = dir.path().join("audit").join("cleaner.log");
        let logger = AuditLogger::new(&log_path, true, true).unwrap();

        let replacements = [AuditReplacement::new(
            "email",
            "generator",
            &Value::from("ford@betelgeuse.net"),
        )];
        logger.log_record("TopSecret", &replacements).unwrap();

        let content = std::fs::read_to_string(&log_path).unwrap();
        let entry: serde_json::Value = serde_json::from_str(content.trim()).unwrap();
        assert_eq!(entry["type_name"], "TopSecret");
        assert_eq!(entry["replacements"][0]["attribute"], "email");
        assert!(!content.contains("ford@betelgeuse.net"));
    }

    #[test]
    fn test_plain_entry() {
        let dir = tempdir().unwrap();
        let log_path = dir.path().join("cleaner.log");
        let logger = AuditLogger::new(&log_path, false, true).unwrap();

        let replacements = [
            AuditReplacement::new("name", "sequence", &Value::from("Ford Prefect")),
            AuditReplacement::new("email", "generator", &Value::Null),
        ];
        logger.log_record("TopSecret", &replacements).unwrap();
        logger.log_record("TopSecret", &replacements).unwrap();

        let content = std::fs::read_to_string(&log_path).unwrap();
        assert_eq!(content.lines().count(), 2);
        assert!(content.contains("Attributes: name, email"));
        assert!(!content.contains("Ford Prefect"));
    }
}
