// crates/fmu-rs-loader/src/platform.rs

use std::path::{Path, PathBuf};

/// Platform folder under `binaries/` for the host OS.
pub const PLATFORM_FOLDER: &str = if cfg!(target_os = "windows") {
    "win64"
} else if cfg!(target_os = "macos") {
    "darwin64"
} else {
    "linux64"
};

/// Shared library extension for the host OS.
pub const LIBRARY_EXTENSION: &str = if cfg!(target_os = "windows") {
    "dll"
} else if cfg!(target_os = "macos") {
    "dylib"
} else {
    "so"
};

/// Location of the co-simulation library inside an unpacked FMU directory.
pub fn platform_library_path(dir: &Path, model_identifier: &str) -> PathBuf {
    dir.join("binaries")
        .join(PLATFORM_FOLDER)
        .join(format!("{}.{}", model_identifier, LIBRARY_EXTENSION))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[cfg(target_os = "linux")]
    fn test_linux_library_path() {
        let path = platform_library_path(Path::new("/tmp/pendulum"), "Pendulum");
        assert_eq!(path, PathBuf::from("/tmp/pendulum/binaries/linux64/Pendulum.so"));
    }

    #[test]
    fn test_library_path_layout() {
        let path = platform_library_path(Path::new("fmu"), "Cart");
        let parts: Vec<_> = path.iter().map(|p| p.to_string_lossy().into_owned()).collect();
        assert_eq!(parts[0], "fmu");
        assert_eq!(parts[1], "binaries");
        assert_eq!(parts[2], PLATFORM_FOLDER);
        assert_eq!(parts[3], format!("Cart.{}", LIBRARY_EXTENSION));
    }
}
