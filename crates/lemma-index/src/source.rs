//! Input files backed by a memory map or an owned buffer.

use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{Context, Result};
use memmap2::Mmap;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Strategy for loading input files.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum LoadMode {
    /// Memory-map the file (fast, zero-copy).
    #[default]
    Mmap,
    /// Read the file into an owned buffer (portable fallback).
    Owned,
}

impl FromStr for LoadMode {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.to_ascii_lowercase().as_str() {
            "mmap" => Ok(LoadMode::Mmap),
            "owned" => Ok(LoadMode::Owned),
            other => Err(format!("unknown load mode `{other}` (expected mmap or owned)")),
        }
    }
}

impl fmt::Display for LoadMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            LoadMode::Mmap => "mmap",
            LoadMode::Owned => "owned",
        })
    }
}

enum Buffer {
    Mmap(Mmap),
    Owned(Vec<u8>),
}

impl Buffer {
    fn as_slice(&self) -> &[u8] {
        match self {
            Buffer::Mmap(m) => m.as_ref(),
            Buffer::Owned(v) => v.as_slice(),
        }
    }
}

/// A whole input file held in memory for the duration of a run.
pub struct SourceFile {
    path: PathBuf,
    buffer: Buffer,
}

impl SourceFile {
    pub fn open(path: impl AsRef<Path>, mode: LoadMode) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let buffer = load_file(&path, mode)?;
        Ok(Self { path, buffer })
    }

    /// File contents with a leading UTF-8 byte order mark removed.
    pub fn bytes(&self) -> &[u8] {
        let bytes = self.buffer.as_slice();
        bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes)
    }

    /// Iterate over lines as UTF-8 text, with `\r\n` endings normalised.
    ///
    /// A trailing newline does not produce an extra empty line.
    pub fn lines(&self) -> impl Iterator<Item = Result<&str>> + '_ {
        let bytes = self.bytes();
        let body = bytes.strip_suffix(b"\n").unwrap_or(bytes);
        let raw_lines = if body.is_empty() {
            None
        } else {
            Some(body.split(|b| *b == b'\n'))
        };
        raw_lines
            .into_iter()
            .flatten()
            .enumerate()
            .map(move |(lineno, raw)| {
                std::str::from_utf8(strip_cr(raw)).with_context(|| {
                    format!("line {} of {} is not valid UTF-8", lineno + 1, self.path.display())
                })
            })
    }
}

fn load_file(path: &Path, mode: LoadMode) -> Result<Buffer> {
    let mut file = File::open(path).with_context(|| format!("open {}", path.display()))?;
    let len = file
        .metadata()
        .with_context(|| format!("stat {}", path.display()))?
        .len();
    if len == 0 {
        return Ok(Buffer::Owned(Vec::new()));
    }
    match mode {
        LoadMode::Mmap => unsafe { Mmap::map(&file) }
            .map(Buffer::Mmap)
            .with_context(|| format!("mmap {}", path.display())),
        LoadMode::Owned => {
            let mut buf = Vec::with_capacity(len as usize);
            file.read_to_end(&mut buf)
                .with_context(|| format!("read {}", path.display()))?;
            Ok(Buffer::Owned(buf))
        }
    }
}

fn strip_cr(line: &[u8]) -> &[u8] {
    line.strip_suffix(b"\r").unwrap_or(line)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_temp(contents: &[u8]) -> (tempfile::TempDir, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("input.txt");
        std::fs::write(&path, contents).unwrap();
        (dir, path)
    }

    #[test]
    fn both_modes_see_the_same_lines() {
        let (_dir, path) = write_temp(b"\xEF\xBB\xBFkello 100\r\naika 50\n\nmuu 30\n");
        for mode in [LoadMode::Mmap, LoadMode::Owned] {
            let source = SourceFile::open(&path, mode).unwrap();
            let lines: Vec<&str> = source.lines().collect::<Result<_>>().unwrap();
            assert_eq!(lines, ["kello 100", "aika 50", "", "muu 30"]);
        }
    }

    #[test]
    fn empty_file_has_no_lines() {
        let (_dir, path) = write_temp(b"");
        let source = SourceFile::open(&path, LoadMode::Mmap).unwrap();
        assert_eq!(source.lines().count(), 0);
    }

    #[test]
    fn invalid_utf8_reports_line_number() {
        let (_dir, path) = write_temp(b"ok 1\n\xff\xfe 2\n");
        let source = SourceFile::open(&path, LoadMode::Owned).unwrap();
        let err = source.lines().collect::<Result<Vec<_>>>().unwrap_err();
        assert!(err.to_string().contains("line 2"));
        assert!(err.to_string().contains(&path.display().to_string()));
    }

    #[test]
    fn missing_file_names_the_path() {
        let err = SourceFile::open("/definitely/not/here.csv", LoadMode::Mmap)
            .err()
            .unwrap();
        assert!(err.to_string().contains("/definitely/not/here.csv"));
    }

    #[test]
    fn parses_load_mode() {
        assert_eq!("MMAP".parse::<LoadMode>().unwrap(), LoadMode::Mmap);
        assert_eq!("owned".parse::<LoadMode>().unwrap(), LoadMode::Owned);
        assert!("heap".parse::<LoadMode>().is_err());
    }
}
