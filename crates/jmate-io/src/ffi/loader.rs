//! Native routine resolution
//!
//! Resolves the formatting routine symbol either from the current process
//! image or from a shared library, using `libloading`. Handles
//! platform-specific library naming conventions and search paths.

use crate::ffi::caller::{NativeRoutine, SnprintfFn};
use libloading::{Library, Symbol};
use log::debug;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Library loading errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LoadError {
    /// Library file not found in search paths
    #[error("library not found: {0}")]
    LibraryNotFound(String),
    /// Symbol not found in library
    #[error("symbol '{symbol}' not found in {library}")]
    SymbolNotFound { library: String, symbol: String },
    /// Failed to load library
    #[error("failed to load library: {0}")]
    LoadFailed(String),
}

const PROCESS_IMAGE: &str = "the process image";

/// Symbol loader with library caching and platform-specific path resolution
///
/// Libraries stay loaded for as long as the loader lives, so any routine it
/// resolved must not outlive it.
pub struct SymbolLoader {
    /// Cache of loaded libraries by resolved path
    loaded: HashMap<PathBuf, Library>,
    /// Handle to the running executable and everything it links
    process: Option<Library>,
    /// Platform-specific library search paths
    search_paths: Vec<PathBuf>,
}

impl SymbolLoader {
    /// Create a new loader with default search paths
    pub fn new() -> Self {
        Self {
            loaded: HashMap::new(),
            process: None,
            search_paths: Self::default_search_paths(),
        }
    }

    /// Platform-specific default library search paths
    fn default_search_paths() -> Vec<PathBuf> {
        let mut paths = Vec::new();

        #[cfg(target_os = "linux")]
        {
            paths.push(PathBuf::from("/usr/lib"));
            paths.push(PathBuf::from("/usr/local/lib"));
            paths.push(PathBuf::from("/lib"));

            // Debian-style multiarch directories, where libc.so.6 lives
            let multiarch = format!("{}-linux-gnu", std::env::consts::ARCH);
            paths.push(Path::new("/usr/lib").join(&multiarch));
            paths.push(Path::new("/lib").join(&multiarch));

            if cfg!(target_pointer_width = "64") {
                paths.push(PathBuf::from("/usr/lib64"));
                paths.push(PathBuf::from("/lib64"));
            }
        }

        #[cfg(target_os = "macos")]
        {
            paths.push(PathBuf::from("/usr/lib"));
            paths.push(PathBuf::from("/usr/local/lib"));
            paths.push(PathBuf::from("/opt/homebrew/lib"));
        }

        #[cfg(target_os = "windows")]
        {
            if let Ok(system_root) = std::env::var("SystemRoot") {
                paths.push(PathBuf::from(format!("{}\\System32", system_root)));
            }
            paths.push(PathBuf::from("C:\\Windows\\System32"));
        }

        // Current working directory (highest priority)
        if let Ok(cwd) = std::env::current_dir() {
            paths.insert(0, cwd);
        }

        paths
    }

    /// Resolve a library name to a path
    ///
    /// Accepts an existing path, a file name found in a search path, or a
    /// short name expanded with the platform's prefix and extension.
    fn resolve_library_path(&self, name: &str) -> Option<PathBuf> {
        let path = Path::new(name);
        if path.is_absolute() {
            return path.exists().then(|| path.to_path_buf());
        }

        let extensions = if cfg!(target_os = "windows") {
            vec!["dll"]
        } else if cfg!(target_os = "macos") {
            vec!["dylib", "so"]
        } else {
            vec!["so"]
        };

        let prefixes = if cfg!(target_os = "windows") {
            vec!["", "lib"]
        } else {
            vec!["lib", ""]
        };

        for search_path in &self.search_paths {
            let exact = search_path.join(name);
            if exact.is_file() {
                return Some(exact);
            }

            for prefix in &prefixes {
                for ext in &extensions {
                    let full_path = search_path.join(format!("{}{}.{}", prefix, name, ext));
                    if full_path.is_file() {
                        return Some(full_path);
                    }
                }
            }
        }

        None
    }

    /// Load a library by name or path, reusing a cached handle
    pub fn load(&mut self, name: &str) -> Result<&Library, LoadError> {
        let path = self
            .resolve_library_path(name)
            .ok_or_else(|| LoadError::LibraryNotFound(name.to_string()))?;

        if !self.loaded.contains_key(&path) {
            debug!("loading native library {}", path.display());
            // Loading runs the library's initialisers; the configured
            // library is trusted.
            let library =
                unsafe { Library::new(&path).map_err(|e| LoadError::LoadFailed(e.to_string()))? };
            self.loaded.insert(path.clone(), library);
        }

        Ok(&self.loaded[&path])
    }

    fn process_image(&mut self) -> Result<&Library, LoadError> {
        if self.process.is_none() {
            self.process = Some(open_process_image()?);
        }
        self.process
            .as_ref()
            .ok_or_else(|| LoadError::LoadFailed(PROCESS_IMAGE.to_string()))
    }

    /// Resolve the formatting routine `symbol`, from `library` or, when
    /// `None`, from the process image.
    ///
    /// # Safety
    ///
    /// The symbol must have the `snprintf` signature. The returned routine
    /// must not be used after this loader is dropped.
    pub unsafe fn resolve(
        &mut self,
        library: Option<&str>,
        symbol: &str,
    ) -> Result<NativeRoutine, LoadError> {
        let (origin, lib) = match library {
            Some(name) => (name.to_string(), self.load(name)?),
            None => (PROCESS_IMAGE.to_string(), self.process_image()?),
        };

        let func: Symbol<'_, SnprintfFn> =
            lib.get(symbol.as_bytes())
                .map_err(|_| LoadError::SymbolNotFound {
                    library: origin.clone(),
                    symbol: symbol.to_string(),
                })?;

        debug!("resolved native routine '{}' from {}", symbol, origin);
        Ok(NativeRoutine::new(*func))
    }
}

impl Default for SymbolLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for SymbolLoader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SymbolLoader")
            .field("loaded", &self.loaded.keys().collect::<Vec<_>>())
            .field("process", &self.process.is_some())
            .field("search_paths", &self.search_paths)
            .finish()
    }
}

#[cfg(unix)]
fn open_process_image() -> Result<Library, LoadError> {
    Ok(libloading::os::unix::Library::this().into())
}

#[cfg(windows)]
fn open_process_image() -> Result<Library, LoadError> {
    libloading::os::windows::Library::this()
        .map(Into::into)
        .map_err(|e| LoadError::LoadFailed(e.to_string()))
}

#[cfg(not(any(unix, windows)))]
fn open_process_image() -> Result<Library, LoadError> {
    Err(LoadError::LoadFailed(format!(
        "{} is not available on this platform",
        PROCESS_IMAGE
    )))
}
