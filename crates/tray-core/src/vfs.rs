use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Abstract interface for file system operations.
pub trait FileSystem {
    /// Read the entire contents of a file into a string.
    fn read_to_string(&self, path: &Path) -> std::io::Result<String>;

    /// Replace the contents of a file.
    fn write(&self, path: &Path, contents: &str) -> std::io::Result<()>;

    fn remove_file(&self, path: &Path) -> std::io::Result<()>;

    /// List the files directly under `root` with the given extension, sorted
    /// by file name. Dot-files are skipped. Fails if `root` cannot be read.
    fn list_files(&self, root: &Path, extension: &str) -> std::io::Result<Vec<PathBuf>>;
}

/// Standard implementation of FileSystem using std::fs and walkdir.
pub struct PhysicalFileSystem;

impl FileSystem for PhysicalFileSystem {
    fn read_to_string(&self, path: &Path) -> std::io::Result<String> {
        std::fs::read_to_string(path)
    }

    fn write(&self, path: &Path, contents: &str) -> std::io::Result<()> {
        std::fs::write(path, contents)
    }

    fn remove_file(&self, path: &Path) -> std::io::Result<()> {
        std::fs::remove_file(path)
    }

    fn list_files(&self, root: &Path, extension: &str) -> std::io::Result<Vec<PathBuf>> {
        // walkdir swallows a missing root into its iterator; surface it instead.
        std::fs::read_dir(root)?;

        let mut files = Vec::new();

        for entry in WalkDir::new(root)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();

            if entry.file_name().to_string_lossy().starts_with('.') {
                continue;
            }

            if path.is_file() {
                if let Some(ext) = path.extension() {
                    if ext == extension {
                        files.push(path.to_path_buf());
                    }
                }
            }
        }

        Ok(files)
    }
}
