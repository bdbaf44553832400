use std::os::unix::prelude::PermissionsExt;
use std::path::Path;

/// Restricts a config or database file to its owner
pub fn secure_file<P: AsRef<Path>>(path: P) -> std::io::Result<()> {
    std::fs::set_permissions(path.as_ref(), std::fs::Permissions::from_mode(0o600))
}

/// Creates the parent directory of `path` (owner-only) if it is missing
pub fn ensure_parent_directory<P: AsRef<Path>>(path: P) -> std::io::Result<()> {
    let Some(parent) = path.as_ref().parent() else {
        return Ok(());
    };
    if parent.as_os_str().is_empty() || parent.exists() {
        return Ok(());
    }
    std::fs::create_dir_all(parent)?;
    std::fs::set_permissions(parent, std::fs::Permissions::from_mode(0o700))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_secure_file_and_parent() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("nested").join("db.sqlite3");

        ensure_parent_directory(&file).unwrap();
        std::fs::write(&file, b"").unwrap();
        secure_file(&file).unwrap();

        let mode = std::fs::metadata(&file).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
        let dir_mode = std::fs::metadata(file.parent().unwrap())
            .unwrap()
            .permissions()
            .mode();
        assert_eq!(dir_mode & 0o777, 0o700);
    }
}
