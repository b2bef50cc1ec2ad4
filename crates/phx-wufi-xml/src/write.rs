//! Writing XML text to disk.
//!
//! The primary file is replaced atomically. A sibling copy with a
//! `_YYYYmmdd_HHMMSS` suffix is written next to it, and stands in for the
//! primary when the simulator holds the primary file open.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use atomicwrites::{AtomicFile, OverwriteBehavior};
use chrono::{Local, NaiveDateTime};
use log::{debug, warn};

use crate::error::{Result, XmlError};

const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WriteOptions {
    /// Also write the timestamped copy when the primary write succeeds.
    pub timestamped_copy: bool,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            timestamped_copy: true,
        }
    }
}

/// Files actually written.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WriteReport {
    /// `None` when the target was locked.
    pub primary: Option<PathBuf>,
    pub copy: Option<PathBuf>,
}

impl WriteReport {
    pub fn target_was_locked(&self) -> bool {
        self.primary.is_none()
    }
}

pub fn write_xml_file(path: &Path, xml: &str, options: &WriteOptions) -> Result<WriteReport> {
    write_xml_file_at(path, xml, options, Local::now().naive_local(), write_atomic)
}

fn write_xml_file_at(
    path: &Path,
    xml: &str,
    options: &WriteOptions,
    now: NaiveDateTime,
    write: impl Fn(&Path, &str) -> io::Result<()>,
) -> Result<WriteReport> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }
    let copy_path = timestamped_path(path, now)?;
    let mut report = WriteReport::default();

    match write(path, xml) {
        Ok(()) => {
            debug!("Wrote {}", path.display());
            report.primary = Some(path.to_path_buf());
            if options.timestamped_copy {
                write(&copy_path, xml)?;
                report.copy = Some(copy_path);
            }
        }
        Err(e) if is_locked(&e) => {
            warn!(
                "{} is in use by another program; wrote {} instead",
                path.display(),
                copy_path.display()
            );
            write(&copy_path, xml)?;
            report.copy = Some(copy_path);
        }
        Err(e) => return Err(XmlError::Io(e)),
    }
    Ok(report)
}

fn write_atomic(path: &Path, text: &str) -> io::Result<()> {
    AtomicFile::new(path, OverwriteBehavior::AllowOverwrite)
        .write(|f| {
            f.write_all(text.as_bytes())?;
            f.flush()
        })
        .map_err(|e| match e {
            atomicwrites::Error::Internal(e) | atomicwrites::Error::User(e) => e,
        })
}

/// Sharing and lock violations on Windows surface as raw codes 32 and 33.
fn is_locked(e: &io::Error) -> bool {
    e.kind() == io::ErrorKind::PermissionDenied || matches!(e.raw_os_error(), Some(32 | 33))
}

/// `dir/name.xml` becomes `dir/name_20240131_154500.xml`.
pub fn timestamped_path(path: &Path, now: NaiveDateTime) -> Result<PathBuf> {
    let Some(stem) = path.file_stem() else {
        return Err(XmlError::InvalidTarget(path.to_path_buf()));
    };
    let mut name = stem.to_os_string();
    name.push(format!("_{}", now.format(TIMESTAMP_FORMAT)));
    if let Some(ext) = path.extension() {
        name.push(".");
        name.push(ext);
    }
    Ok(path.with_file_name(name))
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use tempfile::TempDir;

    use super::*;

    fn noon() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 31)
            .unwrap()
            .and_hms_opt(15, 45, 0)
            .unwrap()
    }

    #[test]
    fn copy_name_carries_timestamp() {
        let path = timestamped_path(Path::new("out/house.xml"), noon()).unwrap();
        assert_eq!(path, Path::new("out/house_20240131_154500.xml"));
        let bare = timestamped_path(Path::new("house"), noon()).unwrap();
        assert_eq!(bare, Path::new("house_20240131_154500"));
    }

    #[test]
    fn path_without_file_name_is_rejected() {
        let err = timestamped_path(Path::new("/"), noon()).unwrap_err();
        assert!(matches!(err, XmlError::InvalidTarget(_)));
    }

    #[test]
    fn writes_primary_and_copy_into_new_directory() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("house.xml");
        let report =
            write_xml_file_at(&path, "<a/>", &WriteOptions::default(), noon(), write_atomic).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "<a/>");
        let copy = report.copy.unwrap();
        assert_eq!(copy.file_name().unwrap(), "house_20240131_154500.xml");
        assert_eq!(fs::read_to_string(copy).unwrap(), "<a/>");
        assert_eq!(report.primary.as_deref(), Some(path.as_path()));
    }

    #[test]
    fn copy_can_be_suppressed() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("house.xml");
        let options = WriteOptions {
            timestamped_copy: false,
        };
        let report = write_xml_file_at(&path, "<a/>", &options, noon(), write_atomic).unwrap();
        assert!(report.copy.is_none());
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn locked_target_falls_back_to_copy() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("house.xml");
        let locked = path.clone();
        let write = |p: &Path, text: &str| {
            if p == locked.as_path() {
                Err(io::Error::from_raw_os_error(32))
            } else {
                write_atomic(p, text)
            }
        };
        let options = WriteOptions {
            timestamped_copy: false,
        };
        let report = write_xml_file_at(&path, "<a/>", &options, noon(), write).unwrap();

        assert!(report.target_was_locked());
        assert!(!path.exists());
        assert_eq!(fs::read_to_string(report.copy.unwrap()).unwrap(), "<a/>");
    }

    #[test]
    fn permission_denied_counts_as_locked() {
        assert!(is_locked(&io::Error::from(io::ErrorKind::PermissionDenied)));
        assert!(!is_locked(&io::Error::from(io::ErrorKind::NotFound)));
    }

    #[test]
    fn other_failures_propagate() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("house.xml");
        let write = |_: &Path, _: &str| -> io::Result<()> { Err(io::Error::other("disk full")) };
        let err = write_xml_file_at(&path, "<a/>", &WriteOptions::default(), noon(), write)
            .unwrap_err();
        assert!(err.to_string().contains("disk full"));
    }
}
