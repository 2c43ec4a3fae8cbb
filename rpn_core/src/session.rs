//! # Session Files
//!
//! A session is a calculator snapshot (registers, entry buffer, variables
//! and settings) plus header metadata, stored as human-readable JSON so the
//! stack survives between runs.
//!
//! ## Structure
//!
//! ```text
//! Session
//! ├── meta: SessionMetadata (schema version, id, timestamps)
//! └── calculator: Calculator (stack, entry, variables, settings)
//! ```
//!
//! Saves are atomic: the JSON is written to a `.tmp` sibling, synced, then
//! renamed over the target.
//!
//! ## Example
//!
//! ```rust,no_run
//! use rpn_core::session::{load_session, save_session, Session};
//! use rpn_core::Calculator;
//! use std::path::Path;
//!
//! let mut calc = Calculator::new();
//! calc.set_x(42.0);
//!
//! let session = Session::new(calc);
//! save_session(&session, Path::new("rpn-session.json"))?;
//!
//! let restored = load_session(Path::new("rpn-session.json"))?;
//! assert_eq!(restored.calculator.x(), 42.0);
//! # Ok::<(), rpn_core::RpnError>(())
//! ```

use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::engine::Calculator;
use crate::errors::{RpnError, RpnResult};

/// Current schema version for session files
pub const SCHEMA_VERSION: &str = "0.1.0";

/// Session metadata stored in the file header.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionMetadata {
    /// Schema version (for migration compatibility)
    pub version: String,

    /// Identifier that stays stable across saves of the same session
    pub session_id: Uuid,

    /// When the session was created
    pub created: DateTime<Utc>,

    /// When the session was last saved
    pub modified: DateTime<Utc>,
}

/// Root container written to disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub meta: SessionMetadata,
    pub calculator: Calculator,
}

impl Session {
    /// Wrap a calculator in a fresh session
    pub fn new(calculator: Calculator) -> Self {
        let now = Utc::now();
        Session {
            meta: SessionMetadata {
                version: SCHEMA_VERSION.to_string(),
                session_id: Uuid::new_v4(),
                created: now,
                modified: now,
            },
            calculator,
        }
    }

    /// Replace the snapshot and bump the modified timestamp
    pub fn update(&mut self, calculator: Calculator) {
        self.calculator = calculator;
        self.touch();
    }

    /// Update the modified timestamp.
    pub fn touch(&mut self) {
        self.meta.modified = Utc::now();
    }
}

impl Default for Session {
    fn default() -> Self {
        Session::new(Calculator::new())
    }
}

/// Save a session with atomic write semantics.
///
/// 1. Serialize to pretty JSON
/// 2. Write to `<path>.tmp` and fsync
/// 3. Rename over `path`
pub fn save_session(session: &Session, path: &Path) -> RpnResult<()> {
    let json = serde_json::to_string_pretty(session)?;

    let tmp_path = tmp_path_for(path);

    let mut tmp_file = File::create(&tmp_path).map_err(|e| {
        RpnError::file_error("create temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    tmp_file.write_all(json.as_bytes()).map_err(|e| {
        RpnError::file_error("write temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    tmp_file.sync_all().map_err(|e| {
        RpnError::file_error("sync temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    fs::rename(&tmp_path, path).map_err(|e| {
        let _ = fs::remove_file(&tmp_path);
        RpnError::file_error("rename to final", path.display().to_string(), e.to_string())
    })?;

    info!(path = %path.display(), session_id = %session.meta.session_id, "session saved");
    Ok(())
}

/// Load a session from a file.
///
/// # Returns
///
/// * `Ok(Session)` - Successfully loaded session
/// * `Err(RpnError::VersionMismatch)` - File version is incompatible
/// * `Err(RpnError::SerializationError)` - Invalid JSON or a malformed entry buffer
/// * `Err(RpnError::FileError)` - I/O error
/// * `Err(RpnError::InvalidSetting)` - Stored settings are out of range
pub fn load_session(path: &Path) -> RpnResult<Session> {
    let mut file = File::open(path).map_err(|e| {
        RpnError::file_error("open", path.display().to_string(), e.to_string())
    })?;

    let mut contents = String::new();
    file.read_to_string(&mut contents).map_err(|e| {
        RpnError::file_error("read", path.display().to_string(), e.to_string())
    })?;

    let session: Session =
        serde_json::from_str(&contents).map_err(|e| RpnError::SerializationError {
            reason: format!("Invalid JSON in {}: {}", path.display(), e),
        })?;

    validate_version(&session.meta.version)?;
    session.calculator.validate()?;

    info!(path = %path.display(), session_id = %session.meta.session_id, "session loaded");
    Ok(session)
}

/// Load a session if the file exists, otherwise start a new one.
pub fn load_or_new(path: &Path, fallback: Calculator) -> RpnResult<Session> {
    if path.exists() {
        load_session(path)
    } else {
        Ok(Session::new(fallback))
    }
}

fn tmp_path_for(path: &Path) -> std::path::PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

/// Validate that a file version is compatible with the current schema.
///
/// Major versions must match; within 0.x a newer minor version is rejected.
fn validate_version(file_version: &str) -> RpnResult<()> {
    let mismatch = || RpnError::VersionMismatch {
        file_version: file_version.to_string(),
        expected_version: SCHEMA_VERSION.to_string(),
    };

    let file_parts: Vec<u32> = file_version
        .split('.')
        .map(|p| p.parse::<u32>())
        .collect::<Result<Vec<u32>, _>>()
        .map_err(|_| mismatch())?;
    let current_parts: Vec<u32> = SCHEMA_VERSION
        .split('.')
        .filter_map(|p| p.parse().ok())
        .collect();

    if file_parts.is_empty() || file_parts[0] != current_parts[0] {
        return Err(mismatch());
    }

    if current_parts[0] == 0 && file_parts.len() > 1 && file_parts[1] > current_parts[1] {
        return Err(mismatch());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::{CalculatorSettings, DecimalSeparator};
    use crate::variables::VariableSlot;
    use std::env::temp_dir;
    use std::path::PathBuf;

    fn temp_session_path(name: &str) -> PathBuf {
        temp_dir().join(format!("rpn_core_test_{}_{}.json", name, std::process::id()))
    }

    fn sample_calculator() -> Calculator {
        let settings = CalculatorSettings::default().with_separator(DecimalSeparator::Comma);
        let mut calc = Calculator::with_settings(settings).unwrap();
        calc.set_x(3.5);
        calc.apply_constant("pi");
        calc.store(VariableSlot::A);
        calc.apply_binary("divide");
        calc.append_digit("7");
        calc
    }

    #[test]
    fn test_tmp_path() {
        assert_eq!(
            tmp_path_for(Path::new("/data/session.json")),
            Path::new("/data/session.json.tmp")
        );
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let path = temp_session_path("roundtrip");
        let session = Session::new(sample_calculator());
        save_session(&session, &path).unwrap();

        let loaded = load_session(&path).unwrap();
        assert_eq!(loaded, session);
        assert_eq!(loaded.calculator.entry(), "7");
        assert_eq!(
            loaded.calculator.settings().decimal_separator,
            DecimalSeparator::Comma
        );

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_atomic_save_creates_no_tmp_file() {
        let path = temp_session_path("atomic");
        save_session(&Session::default(), &path).unwrap();

        assert!(path.exists());
        assert!(!tmp_path_for(&path).exists());

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_non_finite_registers_survive() {
        let path = temp_session_path("nan");
        let mut calc = Calculator::new();
        calc.set_x(-1.0);
        calc.apply_unary("square-root");
        calc.apply_constant("e");
        calc.set_x(f64::INFINITY);

        save_session(&Session::new(calc), &path).unwrap();
        let loaded = load_session(&path).unwrap();
        assert_eq!(loaded.calculator.x(), f64::INFINITY);
        assert!(loaded.calculator.registers()[1].is_nan());

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_session(&temp_session_path("missing")).unwrap_err();
        assert_eq!(err.error_code(), "FILE_ERROR");
    }

    #[test]
    fn test_load_invalid_json() {
        let path = temp_session_path("garbage");
        fs::write(&path, "{ not json").unwrap();
        let err = load_session(&path).unwrap_err();
        assert_eq!(err.error_code(), "SERIALIZATION_ERROR");
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_load_rejects_malformed_entry() {
        let path = temp_session_path("bad_entry");
        for bad in ["1.2.3", "abc"] {
            let mut value = serde_json::to_value(Session::default()).unwrap();
            value["calculator"]["entry"] = serde_json::json!(bad);
            fs::write(&path, value.to_string()).unwrap();

            let err = load_session(&path).unwrap_err();
            assert_eq!(err.error_code(), "SERIALIZATION_ERROR", "entry {:?}", bad);
        }
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_load_or_new() {
        let path = temp_session_path("fresh");
        let mut fallback = Calculator::new();
        fallback.set_x(9.0);
        let session = load_or_new(&path, fallback).unwrap();
        assert_eq!(session.calculator.x(), 9.0);
        assert_eq!(session.meta.version, SCHEMA_VERSION);
    }

    #[test]
    fn test_update_touches_modified() {
        let mut session = Session::default();
        let created = session.meta.created;
        let mut calc = Calculator::new();
        calc.set_x(1.0);
        session.update(calc);
        assert_eq!(session.calculator.x(), 1.0);
        assert!(session.meta.modified >= created);
    }

    #[test]
    fn test_version_validation() {
        assert!(validate_version(SCHEMA_VERSION).is_ok());
        assert!(validate_version("0.1.7").is_ok());
        assert!(validate_version("0.0.9").is_ok());

        assert!(validate_version("1.0.0").is_err());
        assert!(validate_version("0.2.0").is_err());
        assert!(validate_version("abc").is_err());
    }
}
