use serde::Serialize;
use std::path::{Path, PathBuf};

/// Whether a card image can be shown
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ImageStatus {
    Present { path: PathBuf },
    Missing { path: PathBuf },
}

/// Answers image existence questions for the renderer
pub trait ImageStore {
    fn status(&self, image: &Path) -> ImageStatus;
}

/// Images on the local filesystem; relative paths resolve against `root`
#[derive(Debug, Clone)]
pub struct FsImageStore {
    root: PathBuf,
}

impl FsImageStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl ImageStore for FsImageStore {
    fn status(&self, image: &Path) -> ImageStatus {
        let path = if image.is_absolute() {
            image.to_path_buf()
        } else {
            self.root.join(image)
        };
        if path.is_file() {
            ImageStatus::Present { path }
        } else {
            ImageStatus::Missing { path }
        }
    }
}

/// Treats every image as present; used when image checks are not wanted
#[derive(Debug, Default, Clone, Copy)]
pub struct AssumePresent;

impl ImageStore for AssumePresent {
    fn status(&self, image: &Path) -> ImageStatus {
        ImageStatus::Present {
            path: image.to_path_buf(),
        }
    }
}
