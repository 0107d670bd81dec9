//! A small JSON-file-backed library of reusable promotional segments
//!
//! Authors keep a handful of recurring plugs (a newsletter link, a product
//! pitch) and append one to a composed thread before publishing.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::types::Segment;

/// One stored promotional segment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Promo {
    /// Tweet text
    pub text: String,

    /// Optional image reference
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_path: Option<String>,
}

impl Promo {
    /// Create a text-only promo
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            image_path: None,
        }
    }

    /// Attach an image reference
    #[must_use]
    pub fn with_image(mut self, image_path: impl Into<String>) -> Self {
        self.image_path = Some(image_path.into());
        self
    }

    /// Convert into a segment at `index`, carrying the image over
    #[must_use]
    pub fn into_segment(self, index: usize) -> Segment {
        Segment {
            index,
            text: self.text,
            image_ref: self.image_path,
        }
    }
}

/// Promo storage bound to a JSON file
pub struct PromoLibrary {
    path: PathBuf,
}

impl PromoLibrary {
    /// Bind a library to `path`. The file is created on first write.
    #[must_use]
    pub fn open(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Load every stored promo. A missing file is an empty library.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn all(&self) -> Result<Vec<Promo>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let contents = std::fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&contents)?)
    }

    /// Append a promo to the library.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Config`] for empty text, or an I/O error if
    /// the file cannot be written.
    pub fn add(&self, promo: Promo) -> Result<()> {
        if promo.text.trim().is_empty() {
            return Err(crate::Error::Config(
                "promotional text cannot be empty".to_string(),
            ));
        }
        let mut promos = self.all()?;
        promos.push(promo);
        self.save(&promos)
    }

    /// Remove every promo matching `promo` on both text and image.
    /// Returns whether anything was removed.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or written.
    pub fn remove(&self, promo: &Promo) -> Result<bool> {
        let promos = self.all()?;
        let remaining: Vec<Promo> = promos.iter().filter(|p| *p != promo).cloned().collect();
        let removed = remaining.len() < promos.len();
        if removed {
            self.save(&remaining)?;
        }
        Ok(removed)
    }

    fn save(&self, promos: &[Promo]) -> Result<()> {
        let contents = serde_json::to_string_pretty(promos)?;
        std::fs::write(&self.path, contents)?;
        Ok(())
    }
}
