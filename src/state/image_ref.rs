use std::path::{Path, PathBuf};

use crate::utils::local_file_uri;

/// A locally selected image. Nothing about the file is validated.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ImageRef {
    pub path: PathBuf,
    pub uri: String,
}

impl ImageRef {
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let uri = local_file_uri(&path);
        Self { path, uri }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// File name for display, falling back to the full URI.
    pub fn display_name(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.uri.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_ref_builds_file_uri() {
        let image = ImageRef::from_path("/tmp/my flat.png");
        assert_eq!(image.uri, "file:///tmp/my%20flat.png");
        assert_eq!(image.display_name(), "my flat.png");
    }
}
