//! File I/O utilities with atomic writes
//!
//! Provides safe file operations that won't corrupt data on failure. JSON is
//! written pretty-printed with two-space indentation, every non-ASCII
//! character escaped as `\uXXXX`, and a trailing newline.

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;

use serde::Serialize;
use serde_json::ser::{Formatter, PrettyFormatter};
use serde_json::Value;

use crate::error::TrackerError;

/// Read a file and parse it as untyped JSON
///
/// Unreadable files are `Io` errors; unparsable content is `Corrupted`.
pub fn read_json_value<P: AsRef<Path>>(path: P) -> Result<Value, TrackerError> {
    let path = path.as_ref();

    let contents = fs::read_to_string(path)
        .map_err(|e| TrackerError::Io(format!("Failed to read {}: {}", path.display(), e)))?;

    serde_json::from_str(&contents)
        .map_err(|e| TrackerError::Corrupted(format!("{}: {}", path.display(), e)))
}

/// Serialize to pretty, ASCII-only JSON text with a trailing newline
pub fn to_json_string<T: Serialize>(data: &T) -> Result<String, TrackerError> {
    let mut buf = Vec::new();
    write_json_to(&mut buf, data)?;
    String::from_utf8(buf).map_err(|e| TrackerError::Json(e.to_string()))
}

fn write_json_to<W: Write, T: Serialize>(writer: &mut W, data: &T) -> Result<(), TrackerError> {
    let mut ser = serde_json::Serializer::with_formatter(&mut *writer, AsciiPrettyFormatter::new());
    data.serialize(&mut ser)
        .map_err(|e| TrackerError::Json(format!("Failed to serialize data: {}", e)))?;
    writer
        .write_all(b"\n")
        .map_err(|e| TrackerError::Io(format!("Failed to write data: {}", e)))
}

/// Write JSON to a file atomically (write to temp, then rename)
///
/// The target is either completely replaced or left untouched.
pub fn write_json_atomic<T, P>(path: P, data: &T) -> Result<(), TrackerError>
where
    T: Serialize,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| {
            TrackerError::Io(format!(
                "Failed to create directory {}: {}",
                parent.display(),
                e
            ))
        })?;
    }

    // Same directory as the target so the rename stays on one filesystem
    let temp_path = path.with_extension("json.tmp");

    let file = File::create(&temp_path)
        .map_err(|e| TrackerError::Io(format!("Failed to create temp file: {}", e)))?;

    let written = write_and_sync(BufWriter::new(file), data);
    if let Err(e) = written {
        let _ = fs::remove_file(&temp_path);
        return Err(e);
    }

    fs::rename(&temp_path, path).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        TrackerError::Io(format!("Failed to rename temp file: {}", e))
    })?;

    Ok(())
}

fn write_and_sync<T: Serialize>(mut writer: BufWriter<File>, data: &T) -> Result<(), TrackerError> {
    write_json_to(&mut writer, data)?;

    let file = writer
        .into_inner()
        .map_err(|e| TrackerError::Io(format!("Failed to flush data: {}", e.error())))?;

    file.sync_all()
        .map_err(|e| TrackerError::Io(format!("Failed to sync data: {}", e)))
}

/// Pretty printer that escapes everything outside ASCII
struct AsciiPrettyFormatter<'a> {
    inner: PrettyFormatter<'a>,
}

impl AsciiPrettyFormatter<'_> {
    fn new() -> Self {
        Self {
            inner: PrettyFormatter::with_indent(b"  "),
        }
    }
}

impl Formatter for AsciiPrettyFormatter<'_> {
    fn begin_array<W: ?Sized + Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.inner.begin_array(writer)
    }

    fn end_array<W: ?Sized + Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.inner.end_array(writer)
    }

    fn begin_array_value<W: ?Sized + Write>(&mut self, writer: &mut W, first: bool) -> io::Result<()> {
        self.inner.begin_array_value(writer, first)
    }

    fn end_array_value<W: ?Sized + Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.inner.end_array_value(writer)
    }

    fn begin_object<W: ?Sized + Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.inner.begin_object(writer)
    }

    fn end_object<W: ?Sized + Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.inner.end_object(writer)
    }

    fn begin_object_key<W: ?Sized + Write>(&mut self, writer: &mut W, first: bool) -> io::Result<()> {
        self.inner.begin_object_key(writer, first)
    }

    fn begin_object_value<W: ?Sized + Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.inner.begin_object_value(writer)
    }

    fn end_object_value<W: ?Sized + Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.inner.end_object_value(writer)
    }

    fn write_string_fragment<W: ?Sized + Write>(&mut self, writer: &mut W, fragment: &str) -> io::Result<()> {
        let mut start = 0;
        for (i, ch) in fragment.char_indices() {
            if ch.is_ascii() {
                continue;
            }
            writer.write_all(&fragment.as_bytes()[start..i])?;
            let mut units = [0u16; 2];
            for unit in ch.encode_utf16(&mut units) {
                write!(writer, "\\u{:04x}", unit)?;
            }
            start = i + ch.len_utf8();
        }
        writer.write_all(&fragment.as_bytes()[start..])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};
    use serde_json::json;
    use tempfile::TempDir;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
    struct TestData {
        name: String,
        value: i32,
    }

    #[test]
    fn test_write_and_read() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("test.json");

        let data = TestData {
            name: "test".to_string(),
            value: 42,
        };

        write_json_atomic(&path, &data).unwrap();
        assert!(path.exists());

        let loaded: TestData = serde_json::from_value(read_json_value(&path).unwrap()).unwrap();
        assert_eq!(data, loaded);
    }

    #[test]
    fn test_atomic_write_no_temp_file_left() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("test.json");
        let temp_path = temp_dir.path().join("test.json.tmp");

        write_json_atomic(&path, &TestData::default()).unwrap();

        assert!(path.exists());
        assert!(!temp_path.exists());
    }

    struct Unserializable;

    impl Serialize for Unserializable {
        fn serialize<S: serde::Serializer>(&self, _serializer: S) -> Result<S::Ok, S::Error> {
            Err(serde::ser::Error::custom("cannot serialize"))
        }
    }

    #[test]
    fn test_failed_write_cleans_up_and_keeps_target() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("test.json");
        let temp_path = temp_dir.path().join("test.json.tmp");
        write_json_atomic(&path, &TestData::default()).unwrap();
        let before = fs::read_to_string(&path).unwrap();

        let err = write_json_atomic(&path, &Unserializable).unwrap_err();

        assert!(matches!(err, TrackerError::Json(_)));
        assert!(!temp_path.exists());
        assert_eq!(fs::read_to_string(&path).unwrap(), before);
    }

    #[test]
    fn test_write_creates_parent_directories() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("dir").join("test.json");

        write_json_atomic(&path, &TestData::default()).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_output_is_indented_and_newline_terminated() {
        let data = TestData {
            name: "x".to_string(),
            value: 1,
        };
        let text = to_json_string(&data).unwrap();
        assert_eq!(text, "{\n  \"name\": \"x\",\n  \"value\": 1\n}\n");

        let empty = to_json_string(&json!({"expenses": []})).unwrap();
        assert_eq!(empty, "{\n  \"expenses\": []\n}\n");
    }

    #[test]
    fn test_non_ascii_is_escaped() {
        let text = to_json_string(&json!({"note": "café ☕ 😀"})).unwrap();
        assert!(text.is_ascii());
        assert!(text.contains(r"caf\u00e9 \u2615 \ud83d\ude00"));

        let back: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(back["note"], "café ☕ 😀");
    }

    #[test]
    fn test_read_missing_file_is_io_error() {
        let temp_dir = TempDir::new().unwrap();
        let err = read_json_value(temp_dir.path().join("missing.json")).unwrap_err();
        assert!(matches!(err, TrackerError::Io(_)));
    }

    #[test]
    fn test_read_garbage_is_corrupted() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("bad.json");
        fs::write(&path, "not json at all").unwrap();

        let err = read_json_value(&path).unwrap_err();
        assert!(matches!(err, TrackerError::Corrupted(_)));
    }
}
