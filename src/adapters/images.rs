use std::path::PathBuf;

/// Finds card artwork named `<card name with underscores>.jpg`.
#[derive(Debug, Clone)]
pub struct ImageLocator {
    dir: PathBuf,
}

impl ImageLocator {
    pub fn new<P: Into<PathBuf>>(dir: P) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path_for(&self, card_name: &str) -> PathBuf {
        self.dir.join(format!("{}.jpg", card_name.replace(' ', "_")))
    }

    /// The image path if the file exists. A missing image is not an error.
    pub fn locate(&self, card_name: &str) -> Option<PathBuf> {
        let path = self.path_for(card_name);
        if path.is_file() {
            Some(path)
        } else {
            tracing::debug!("No image for '{}' at {}", card_name, path.display());
            None
        }
    }
}
