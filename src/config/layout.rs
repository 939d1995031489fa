use std::path::{Component, Path, PathBuf};

pub const IMAGES_DIR: &str = "images";
pub const CONFIG_FILE: &str = "portfolio.config.json";
pub const HTML_FILE: &str = "index.html";

/// Where everything lives, resolved once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectLayout {
    pub root: PathBuf,
    pub images_dir: PathBuf,
    pub config_path: PathBuf,
    pub html_path: PathBuf,
}

impl ProjectLayout {
    pub fn from_root<P: AsRef<Path>>(root: P) -> Self {
        let root = root.as_ref().to_path_buf();
        Self {
            images_dir: root.join(IMAGES_DIR),
            config_path: root.join(CONFIG_FILE),
            html_path: root.join(HTML_FILE),
            root,
        }
    }

    /// Series dirs in the config are relative to the project root. A leading
    /// `images` component stands for `images_dir`, wherever that was moved.
    pub fn resolve_dir(&self, dir: &str) -> PathBuf {
        let path = Path::new(dir);
        if path.is_absolute() {
            return path.to_path_buf();
        }

        let mut components = path.components();
        match components.next() {
            Some(Component::Normal(first)) if first == IMAGES_DIR => {
                let rest = components.as_path();
                if rest.as_os_str().is_empty() {
                    self.images_dir.clone()
                } else {
                    self.images_dir.join(rest)
                }
            }
            _ => self.root.join(path),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(unix)]
    #[test]
    fn test_resolve_dir() {
        let layout = ProjectLayout::from_root("/site");
        assert_eq!(layout.resolve_dir("images/serie2"), PathBuf::from("/site/images/serie2"));
        assert_eq!(layout.resolve_dir("/photos"), PathBuf::from("/photos"));
        assert_eq!(layout.resolve_dir("drafts/a"), PathBuf::from("/site/drafts/a"));
    }

    #[test]
    fn test_images_prefix_follows_moved_images_dir() {
        let mut layout = ProjectLayout::from_root("site");
        layout.images_dir = PathBuf::from("site/public/photos");

        assert_eq!(layout.resolve_dir("images"), PathBuf::from("site/public/photos"));
        assert_eq!(
            layout.resolve_dir("images/serie2"),
            PathBuf::from("site/public/photos/serie2")
        );
        assert_eq!(layout.resolve_dir("imagesets/x"), PathBuf::from("site/imagesets/x"));
    }
}
