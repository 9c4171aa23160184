//! Asset-bundle providers that resolve pack paths to byte streams.

use std::collections::HashMap;
use std::fs::File;
use std::io::{self, Cursor, Read};
use std::path::{Path, PathBuf};

/// Pack directory holding one sub-directory per tilesheet.
pub const TILESHEETS_DIR: &str = "/tilesheets";

/// Source of named assets.
pub trait ResourcePack {
    /// Join `base` and `segments` into a pack path using `/` separators.
    fn join(&self, base: &str, segments: &[&str]) -> String {
        let mut out = base.trim_end_matches('/').to_owned();
        for seg in segments {
            let seg = seg.trim_matches('/');
            if seg.is_empty() {
                continue;
            }
            out.push('/');
            out.push_str(seg);
        }
        out
    }

    /// Open the asset at `path` for reading.
    fn open(&self, path: &str) -> io::Result<Box<dyn Read + '_>>;
}

/// Resource pack backed by a directory on disk.
#[derive(Debug, Clone)]
pub struct DirResourcePack {
    root: PathBuf,
}

impl DirResourcePack {
    /// Serve pack paths from below `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Directory this pack reads from.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Map a pack path below the root. `..` is refused so lookups can't
    /// escape the pack directory.
    fn resolve(&self, path: &str) -> io::Result<PathBuf> {
        let mut full = self.root.clone();
        for seg in path.split('/').filter(|s| !s.is_empty() && *s != ".") {
            if seg == ".." {
                return Err(io::Error::new(
                    io::ErrorKind::InvalidInput,
                    format!("pack path leaves the pack root: {path}"),
                ));
            }
            full.push(seg);
        }
        Ok(full)
    }
}

impl ResourcePack for DirResourcePack {
    fn open(&self, path: &str) -> io::Result<Box<dyn Read + '_>> {
        let full = self.resolve(path)?;
        tracing::trace!(path, file = %full.display(), "opening pack asset");
        Ok(Box::new(File::open(full)?))
    }
}

/// Resource pack holding its assets in memory.
#[derive(Debug, Default, Clone)]
pub struct MemoryResourcePack {
    files: HashMap<String, Vec<u8>>,
}

impl MemoryResourcePack {
    /// Empty pack.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `bytes` under `path`, replacing anything already there.
    pub fn insert(&mut self, path: impl Into<String>, bytes: impl Into<Vec<u8>>) {
        self.files.insert(path.into(), bytes.into());
    }
}

impl ResourcePack for MemoryResourcePack {
    fn open(&self, path: &str) -> io::Result<Box<dyn Read + '_>> {
        match self.files.get(path) {
            Some(bytes) => Ok(Box::new(Cursor::new(bytes.as_slice()))),
            None => Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("no asset at {path}"),
            )),
        }
    }
}
