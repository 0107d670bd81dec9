//! A directory-backed workspace of saved thread drafts
//!
//! Drafts are serialized to JSON files in a workspace directory so a
//! composition session can be saved, reopened later, and archived once
//! the thread has been published. Archived drafts move to a `sent/`
//! subdirectory rather than being deleted.

use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::types::ThreadDraft;

/// Subdirectory that holds drafts of already-published threads
const ARCHIVE_DIR: &str = "sent";

/// Draft storage bound to a workspace directory
pub struct DraftWorkspace {
    root: PathBuf,
}

impl DraftWorkspace {
    /// Bind a workspace to `root`. The directory is created on first write.
    #[must_use]
    pub fn open(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Save `draft` under `name`, overwriting any existing draft of the
    /// same name. A `.json` extension is appended when missing.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] for an empty name, or an I/O error if the
    /// workspace directory or file cannot be written.
    pub fn save(&self, name: &str, draft: &ThreadDraft) -> Result<()> {
        let path = self.draft_path(name)?;
        std::fs::create_dir_all(&self.root)?;
        let contents = serde_json::to_string_pretty(draft)?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Load the draft saved under `name`.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the draft does not exist, or a JSON error
    /// if the file is not a valid draft.
    pub fn load(&self, name: &str) -> Result<ThreadDraft> {
        let path = self.draft_path(name)?;
        let contents = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }

    /// Names of every saved draft, sorted, without the `.json` extension.
    /// Archived drafts are not listed. A missing workspace is empty.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the workspace directory cannot be read.
    pub fn list(&self) -> Result<Vec<String>> {
        if !self.root.exists() {
            return Ok(Vec::new());
        }
        let mut names = Vec::new();
        for entry in std::fs::read_dir(&self.root)? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) == Some("json") {
                if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                    names.push(stem.to_string());
                }
            }
        }
        names.sort();
        Ok(names)
    }

    /// Move the draft saved under `name` into the archive subdirectory,
    /// marking its thread as published.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if no draft is saved under `name`, or an
    /// I/O error if the file cannot be moved.
    pub fn archive(&self, name: &str) -> Result<()> {
        let source = self.draft_path(name)?;
        if !source.exists() {
            return Err(Error::Config(format!("no saved draft named \"{name}\"")));
        }
        let archive_dir = self.root.join(ARCHIVE_DIR);
        std::fs::create_dir_all(&archive_dir)?;
        let file_name = source
            .file_name()
            .ok_or_else(|| Error::Config(format!("invalid draft name \"{name}\"")))?;
        std::fs::rename(&source, archive_dir.join(file_name))?;
        Ok(())
    }

    fn draft_path(&self, name: &str) -> Result<PathBuf> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(Error::Config("draft name cannot be empty".to_string()));
        }
        let file_name = if trimmed.to_lowercase().ends_with(".json") {
            trimmed.to_string()
        } else {
            format!("{trimmed}.json")
        };
        Ok(self.root.join(file_name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SourceMode;

    fn temp_workspace(name: &str) -> DraftWorkspace {
        let root = std::env::temp_dir().join(format!("threadweave-workspace-{name}"));
        let _ = std::fs::remove_dir_all(&root);
        DraftWorkspace::open(root)
    }

    fn sample_draft() -> ThreadDraft {
        ThreadDraft::from_bodies(["First", "Second"], SourceMode::Delimiter)
    }

    #[test]
    fn save_then_load_round_trips_the_draft() {
        let workspace = temp_workspace("roundtrip");
        let draft = sample_draft();
        workspace.save("rust-thread", &draft).unwrap();
        assert_eq!(workspace.load("rust-thread").unwrap(), draft);
    }

    #[test]
    fn extension_is_appended_once() {
        let workspace = temp_workspace("extension");
        workspace.save("named.json", &sample_draft()).unwrap();
        assert_eq!(workspace.list().unwrap(), vec!["named"]);
        assert!(workspace.load("named").is_ok());
    }

    #[test]
    fn list_is_sorted_and_skips_missing_workspace() {
        let workspace = temp_workspace("listing");
        assert!(workspace.list().unwrap().is_empty());

        workspace.save("zebra", &sample_draft()).unwrap();
        workspace.save("alpha", &sample_draft()).unwrap();
        assert_eq!(workspace.list().unwrap(), vec!["alpha", "zebra"]);
    }

    #[test]
    fn archive_moves_the_draft_out_of_the_listing() {
        let workspace = temp_workspace("archive");
        workspace.save("published", &sample_draft()).unwrap();
        workspace.archive("published").unwrap();

        assert!(workspace.list().unwrap().is_empty());
        assert!(workspace.load("published").is_err());

        // Still present under the archive subdirectory.
        let archived = DraftWorkspace::open(
            std::env::temp_dir()
                .join("threadweave-workspace-archive")
                .join(ARCHIVE_DIR),
        );
        assert_eq!(archived.load("published").unwrap(), sample_draft());
    }

    #[test]
    fn archiving_an_unknown_draft_fails() {
        let workspace = temp_workspace("unknown");
        assert!(workspace.archive("never-saved").is_err());
    }

    #[test]
    fn empty_name_is_rejected() {
        let workspace = temp_workspace("name");
        assert!(workspace.save("  ", &sample_draft()).is_err());
        assert!(workspace.load("").is_err());
    }

    #[test]
    fn image_refs_survive_persistence() {
        let workspace = temp_workspace("images");
        let mut draft = sample_draft();
        draft.segments[0].image_ref = Some("media-7".to_string());
        workspace.save("with-media", &draft).unwrap();
        assert_eq!(
            workspace.load("with-media").unwrap().segments[0]
                .image_ref
                .as_deref(),
            Some("media-7")
        );
    }
}
