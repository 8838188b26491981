//! Transcript sources for the command-line front end.
//!
//! A transcript can come from a local file, standard input, or an HTTP(S)
//! URL. All three implement [`TranscriptSource`] so the CLI handles them
//! the same way.

mod http;
mod local;

pub use http::HttpTranscript;
pub use local::{LocalTranscript, StdinTranscript};

use anyhow::Result;
use async_trait::async_trait;
use tracing::warn;

/// Trait for reading a whole transcript from some origin
#[async_trait]
pub trait TranscriptSource: Send + Sync {
    /// Read the raw transcript bytes
    async fn read_bytes(&self) -> Result<Vec<u8>>;

    /// Human-readable origin, used in log messages
    fn describe(&self) -> String;

    /// Suggested document base name, if the origin has one
    fn base_name(&self) -> Option<String> {
        None
    }

    /// Read the transcript as text.
    ///
    /// Invalid UTF-8 is replaced with U+FFFD rather than rejected.
    async fn read_text(&self) -> Result<String> {
        let bytes = self.read_bytes().await?;
        Ok(match String::from_utf8(bytes) {
            Ok(text) => text,
            Err(e) => {
                warn!(source = %self.describe(), "transcript is not valid UTF-8, decoding lossily");
                String::from_utf8_lossy(e.as_bytes()).into_owned()
            }
        })
    }
}

/// Stem of the last path segment, e.g. `meeting` for `/tmp/meeting.txt`.
pub(crate) fn stem_of(path: &str) -> Option<String> {
    let last = path.rsplit(['/', '\\']).next()?;
    let stem = match last.rsplit_once('.') {
        Some((stem, _)) if !stem.is_empty() => stem,
        _ => last,
    };
    (!stem.is_empty()).then(|| stem.to_string())
}
