use crate::core::converter::{files_with_extension, JPEG_EXTENSION};
use crate::utils::error::Result;
use std::path::Path;

/// Names of the `.JPG` files directly inside `folder`, ascending.
pub fn list_images(folder: &Path) -> Result<Vec<String>> {
    let names = files_with_extension(folder, JPEG_EXTENSION)?
        .iter()
        .filter_map(|path| path.file_name())
        .map(|name| name.to_string_lossy().into_owned())
        .collect();
    Ok(names)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_lists_only_direct_jpegs_sorted() {
        let temp_dir = TempDir::new().unwrap();
        let folder = temp_dir.path();
        for name in ["c.JPG", "a.JPG", "b.JPG", "a.CR3", "d.jpg", "notes.txt"] {
            fs::write(folder.join(name), b"x").unwrap();
        }
        fs::create_dir(folder.join("nested")).unwrap();
        fs::write(folder.join("nested").join("e.JPG"), b"x").unwrap();
        fs::create_dir(folder.join("dir.JPG")).unwrap();

        let images = list_images(folder).unwrap();

        assert_eq!(images, vec!["a.JPG", "b.JPG", "c.JPG"]);
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinked_jpeg_is_listed() {
        let temp_dir = TempDir::new().unwrap();
        let folder = temp_dir.path().join("hor");
        fs::create_dir_all(&folder).unwrap();
        fs::write(folder.join("a.JPG"), b"x").unwrap();
        fs::write(temp_dir.path().join("original.JPG"), b"x").unwrap();
        std::os::unix::fs::symlink(temp_dir.path().join("original.JPG"), folder.join("b.JPG"))
            .unwrap();
        std::os::unix::fs::symlink(temp_dir.path().join("missing.JPG"), folder.join("c.JPG"))
            .unwrap();

        let images = list_images(&folder).unwrap();

        assert_eq!(images, vec!["a.JPG", "b.JPG"]);
    }

    #[test]
    fn test_empty_folder() {
        let temp_dir = TempDir::new().unwrap();
        assert!(list_images(temp_dir.path()).unwrap().is_empty());
    }
}
