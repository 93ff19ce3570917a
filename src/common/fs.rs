//! Directory primitives used when materializing skills

use std::fs;
use std::io;
use std::path::Path;

#[derive(Debug, Default, Clone)]
pub struct CopyOptions {
    pub exclude: Vec<String>,
}

impl CopyOptions {
    pub fn exclude_git() -> Self {
        Self {
            exclude: vec![".git".to_string()],
        }
    }

    fn is_excluded(&self, name: &std::ffi::OsStr) -> bool {
        self.exclude
            .iter()
            .any(|excluded| name.to_str() == Some(excluded.as_str()))
    }
}

/// Copy a directory recursively with options
pub fn copy_dir_recursive<P1, P2>(src: P1, dst: P2, options: &CopyOptions) -> io::Result<()>
where
    P1: AsRef<Path>,
    P2: AsRef<Path>,
{
    let src_ref = src.as_ref();
    let dst_ref = dst.as_ref();

    fs::create_dir_all(dst_ref)?;

    for entry in fs::read_dir(src_ref)? {
        let entry = entry?;
        let file_name = entry.file_name();
        if options.is_excluded(&file_name) {
            continue;
        }

        let entry_path = entry.path();
        let dst_path = dst_ref.join(&file_name);

        if entry_path.is_dir() {
            copy_dir_recursive(&entry_path, &dst_path, options)?;
        } else {
            fs::copy(&entry_path, &dst_path)?;
        }
    }

    Ok(())
}

/// Remove whatever is at `path` (symlink, file or directory) without
/// following symlinks. A missing path is not an error.
pub fn remove_entry(path: &Path) -> io::Result<()> {
    let metadata = match fs::symlink_metadata(path) {
        Ok(metadata) => metadata,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(()),
        Err(err) => return Err(err),
    };

    if metadata.is_dir() {
        fs::remove_dir_all(path)
    } else {
        fs::remove_file(path)
    }
}
