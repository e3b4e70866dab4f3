use std::io;
use std::path::Path;

/// File-system operations the artifact reader depends on.
pub trait ArtifactSource {
    fn exists(&self, path: &Path) -> bool;
    fn read_to_string(&self, path: &Path) -> io::Result<String>;
}

/// Reads artifacts straight from disk.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsSource;

impl ArtifactSource for FsSource {
    fn exists(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        std::fs::read_to_string(path)
    }
}
