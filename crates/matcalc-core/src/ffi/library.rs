use super::symbols::SymbolResolver;
use crate::engine::error::EngineError;
use libloading::Library;
use std::env::consts::{DLL_PREFIX, DLL_SUFFIX};
use std::ffi::c_void;
use std::fs;
use std::path::{Path, PathBuf};
use std::ptr::NonNull;
use tracing::{debug, trace};

/// Base name of the engine library, without platform prefix or suffix.
pub const LIBRARY_STEM: &str = "mc_core";

/// The `mc_core` shared library, loaded into this process.
///
/// The library stays mapped for as long as this value lives and is unloaded exactly
/// once when it is dropped.
#[derive(Debug)]
pub struct McCoreLibrary {
    library: Library,
    path: PathBuf,
}

impl McCoreLibrary {
    /// Finds the engine library inside `directory`.
    ///
    /// Candidates are regular files named `mc_core{suffix}` or `{prefix}mc_core{suffix}`,
    /// where prefix and suffix are the platform's shared-library conventions. Anything
    /// after the suffix is accepted, so versioned names such as `libmc_core.so.6` match.
    /// When several files match, the largest one is chosen.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::DirectoryAccess`] if the directory cannot be listed and
    /// [`EngineError::LibraryNotFound`] if no candidate exists.
    pub fn locate(directory: &Path) -> Result<PathBuf, EngineError> {
        let access_error = |source| EngineError::DirectoryAccess {
            path: directory.to_path_buf(),
            source,
        };

        let mut candidates = Vec::new();
        for entry in fs::read_dir(directory).map_err(access_error)? {
            let entry = entry.map_err(access_error)?;
            let file_name = entry.file_name();
            let Some(file_name) = file_name.to_str() else {
                continue;
            };
            if !is_library_file_name(file_name) {
                continue;
            }
            let metadata = entry.metadata().map_err(access_error)?;
            if !metadata.is_file() {
                continue;
            }
            trace!("Library candidate {:?} ({} bytes)", entry.path(), metadata.len());
            candidates.push((metadata.len(), entry.path()));
        }

        let (_, path) = candidates
            .into_iter()
            .max()
            .ok_or_else(|| EngineError::LibraryNotFound {
                directory: directory.to_path_buf(),
            })?;
        debug!("Located engine library at {:?}", path);
        Ok(path)
    }

    /// Loads the library at `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, EngineError> {
        let path = path.as_ref();
        debug!("Loading engine library from {:?}", path);

        // SAFETY: loading runs the library's initialisers. `mc_core` is a vendor engine
        // build and is trusted to have sound ones.
        let library = unsafe { Library::new(path) }.map_err(|source| EngineError::Load {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(Self {
            library,
            path: path.to_path_buf(),
        })
    }

    /// Locates and loads the library in one step.
    pub fn open_in(directory: &Path) -> Result<Self, EngineError> {
        Self::load(Self::locate(directory)?)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

// SAFETY: addresses come straight from the loaded image and are valid while `library`
// is mapped. Their signatures are those `mc_core` exports under these names.
unsafe impl SymbolResolver for McCoreLibrary {
    fn resolve(&self, symbol: &str) -> Option<NonNull<c_void>> {
        // The symbol is read as a bare address; it is given a type by the caller.
        match unsafe { self.library.get::<*mut c_void>(symbol.as_bytes()) } {
            Ok(address) => NonNull::new(*address),
            Err(e) => {
                debug!("Symbol '{}' not found in {:?}: {}", symbol, self.path, e);
                None
            }
        }
    }
}

impl Drop for McCoreLibrary {
    fn drop(&mut self) {
        debug!("Unloading engine library {:?}", self.path);
    }
}

fn is_library_file_name(file_name: &str) -> bool {
    ["", DLL_PREFIX].iter().any(|prefix| {
        file_name.starts_with(&format!("{}{}{}", prefix, LIBRARY_STEM, DLL_SUFFIX))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;

    fn write_file(dir: &Path, name: &str, size: usize) -> PathBuf {
        let path = dir.join(name);
        let mut file = File::create(&path).unwrap();
        file.write_all(&vec![0u8; size]).unwrap();
        path
    }

    fn library_name(prefix: &str, trailer: &str) -> String {
        format!("{}{}{}{}", prefix, LIBRARY_STEM, DLL_SUFFIX, trailer)
    }

    #[test]
    fn locate_finds_a_plain_library_file() {
        let dir = tempfile::tempdir().unwrap();
        let expected = write_file(dir.path(), &library_name("", ""), 16);

        assert_eq!(McCoreLibrary::locate(dir.path()).unwrap(), expected);
    }

    #[test]
    fn locate_accepts_platform_prefix_and_version_trailer() {
        let dir = tempfile::tempdir().unwrap();
        let expected = write_file(dir.path(), &library_name(DLL_PREFIX, ".6"), 16);

        assert_eq!(McCoreLibrary::locate(dir.path()).unwrap(), expected);
    }

    #[test]
    fn locate_prefers_the_largest_candidate() {
        let dir = tempfile::tempdir().unwrap();
        write_file(dir.path(), &library_name("", ".1"), 8);
        let largest = write_file(dir.path(), &library_name("", ".2"), 64);
        write_file(dir.path(), &library_name("", ".3"), 32);

        assert_eq!(McCoreLibrary::locate(dir.path()).unwrap(), largest);
    }

    #[test]
    fn locate_ignores_unrelated_files_and_directories() {
        let dir = tempfile::tempdir().unwrap();
        write_file(dir.path(), "mc_fe.tdb", 1024);
        write_file(dir.path(), &format!("not_{}{}", LIBRARY_STEM, DLL_SUFFIX), 1024);
        fs::create_dir(dir.path().join(library_name("", ".d"))).unwrap();

        let result = McCoreLibrary::locate(dir.path());

        assert!(matches!(result, Err(EngineError::LibraryNotFound { .. })));
    }

    #[test]
    fn locate_reports_an_unreadable_directory() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("does-not-exist");

        let result = McCoreLibrary::locate(&missing);

        assert!(matches!(result, Err(EngineError::DirectoryAccess { path, .. }) if path == missing));
    }

    #[test]
    fn load_rejects_a_file_that_is_not_a_shared_library() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(dir.path(), &library_name("", ""), 128);

        let result = McCoreLibrary::load(&path);

        assert!(matches!(result, Err(EngineError::Load { path: p, .. }) if p == path));
    }

    #[test]
    fn open_in_fails_before_loading_when_nothing_is_found() {
        let dir = tempfile::tempdir().unwrap();

        let result = McCoreLibrary::open_in(dir.path());

        assert!(matches!(result, Err(EngineError::LibraryNotFound { directory }) if directory == dir.path()));
    }
}
