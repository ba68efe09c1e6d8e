//! Per-request artifact namespaces.
//!
//! Every composition gets its own uuid-keyed directory under the
//! configured work dir. Concurrent compositions never share paths,
//! and the whole namespace is swept when the session drops unless the
//! final artifact was detached first.

use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::error::MediaResult;

/// An isolated working directory for one composition request.
#[derive(Debug)]
pub struct ComposeSession {
    id: Uuid,
    dir: PathBuf,
    /// Paths the caller took ownership of; spared from the sweep.
    detached: Vec<PathBuf>,
}

impl ComposeSession {
    /// Create a fresh session directory under `work_dir`.
    pub async fn create(work_dir: impl AsRef<Path>) -> MediaResult<Self> {
        let id = Uuid::new_v4();
        let dir = work_dir.as_ref().join(id.to_string());
        tokio::fs::create_dir_all(&dir).await?;
        debug!(session = %id, dir = %dir.display(), "Created compose session");
        Ok(Self {
            id,
            dir,
            detached: Vec::new(),
        })
    }

    /// Session identifier.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Session directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path for the adjusted clip of segment `index`.
    pub fn adjusted_path(&self, index: usize) -> PathBuf {
        self.dir.join(format!("adjusted_{:04}.wav", index))
    }

    /// Path for the combined audio track.
    pub fn combined_audio_path(&self) -> PathBuf {
        self.dir.join("combined.wav")
    }

    /// Path for the muxed output video.
    pub fn output_video_path(&self) -> PathBuf {
        self.dir.join("output.mp4")
    }

    /// Move an artifact out of the sweep path so it survives the
    /// session. Returns the same path for convenience.
    pub fn detach(&mut self, path: impl Into<PathBuf>) -> PathBuf {
        let path = path.into();
        self.detached.push(path.clone());
        path
    }
}

impl Drop for ComposeSession {
    fn drop(&mut self) {
        if self.detached.is_empty() {
            if let Err(e) = std::fs::remove_dir_all(&self.dir) {
                if self.dir.exists() {
                    warn!(
                        session = %self.id,
                        dir = %self.dir.display(),
                        error = %e,
                        "Failed to sweep session directory"
                    );
                }
            }
            return;
        }

        // Detached artifacts stay; sweep everything else best effort.
        let detached = std::mem::take(&mut self.detached);
        if let Ok(entries) = std::fs::read_dir(&self.dir) {
            for entry in entries.flatten() {
                let path = entry.path();
                if !detached.contains(&path) {
                    let _ = std::fs::remove_file(&path);
                }
            }
        }
        let _ = std::fs::remove_dir(&self.dir);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_session_directory_created_and_swept() {
        let root = TempDir::new().unwrap();
        let dir;
        {
            let session = ComposeSession::create(root.path()).await.unwrap();
            dir = session.dir().to_path_buf();
            assert!(dir.exists());
            tokio::fs::write(session.adjusted_path(0), b"x").await.unwrap();
        }
        assert!(!dir.exists(), "Session directory should be swept on drop");
    }

    #[tokio::test]
    async fn test_detached_artifact_survives_sweep() {
        let root = TempDir::new().unwrap();
        let output;
        {
            let mut session = ComposeSession::create(root.path()).await.unwrap();
            output = session.output_video_path();
            tokio::fs::write(&output, b"video").await.unwrap();
            tokio::fs::write(session.combined_audio_path(), b"audio")
                .await
                .unwrap();
            session.detach(&output);
        }
        assert!(output.exists(), "Detached artifact should survive");
        assert!(
            !output.parent().unwrap().join("combined.wav").exists(),
            "Undetached artifacts should be swept"
        );
    }

    #[tokio::test]
    async fn test_sessions_are_isolated() {
        let root = TempDir::new().unwrap();
        let a = ComposeSession::create(root.path()).await.unwrap();
        let b = ComposeSession::create(root.path()).await.unwrap();
        assert_ne!(a.dir(), b.dir());
        assert_ne!(a.adjusted_path(0), b.adjusted_path(0));
    }
}
