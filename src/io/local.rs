use super::{TranscriptSource, stem_of};
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::path::PathBuf;
use tokio::io::AsyncReadExt;

/// Transcript stored in a local file
pub struct LocalTranscript {
    path: PathBuf,
}

impl LocalTranscript {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl TranscriptSource for LocalTranscript {
    async fn read_bytes(&self) -> Result<Vec<u8>> {
        tokio::fs::read(&self.path)
            .await
            .with_context(|| format!("Failed to read {}", self.path.display()))
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    fn base_name(&self) -> Option<String> {
        stem_of(&self.path.to_string_lossy())
    }
}

/// Transcript piped through standard input
pub struct StdinTranscript;

#[async_trait]
impl TranscriptSource for StdinTranscript {
    async fn read_bytes(&self) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        tokio::io::stdin()
            .read_to_end(&mut buf)
            .await
            .context("Failed to read standard input")?;
        Ok(buf)
    }

    fn describe(&self) -> String {
        "<stdin>".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[tokio::test]
    async fn test_read_local_file() {
        let mut file = tempfile::Builder::new().suffix(".txt").tempfile().unwrap();
        file.write_all(b"Hello\n\nWorld").unwrap();

        let source = LocalTranscript::new(file.path());
        assert_eq!(source.read_text().await.unwrap(), "Hello\n\nWorld");

        let stem = file.path().file_stem().unwrap().to_string_lossy().to_string();
        assert_eq!(source.base_name(), Some(stem));
    }

    #[tokio::test]
    async fn test_lossy_decoding() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"caf\xe9").unwrap();

        let source = LocalTranscript::new(file.path());
        assert_eq!(source.read_text().await.unwrap(), "caf\u{FFFD}");
    }

    #[tokio::test]
    async fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let source = LocalTranscript::new(dir.path().join("absent.txt"));
        let err = source.read_bytes().await.unwrap_err();
        assert!(err.to_string().contains("absent.txt"));
    }
}
