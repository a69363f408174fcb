use std::path::Path;
use tempfile::TempPath;

/// The two on-disk WAV files one two-stage synthesis passes between backend calls.
///
/// Both paths are unique per request and are removed when this value is dropped,
/// whether the pipeline finished, failed, or its future was cancelled.
pub struct ScratchArtifacts {
    neutral: TempPath,
    converted: TempPath,
}

impl ScratchArtifacts {
    pub fn acquire(dir: &Path) -> std::io::Result<Self> {
        Ok(Self {
            neutral: scratch_wav(dir, "tts-neutral-")?,
            converted: scratch_wav(dir, "tts-converted-")?,
        })
    }

    pub fn neutral(&self) -> &Path {
        &self.neutral
    }

    pub fn converted(&self) -> &Path {
        &self.converted
    }
}

fn scratch_wav(dir: &Path, prefix: &str) -> std::io::Result<TempPath> {
    Ok(tempfile::Builder::new()
        .prefix(prefix)
        .suffix(".wav")
        .tempfile_in(dir)?
        .into_temp_path())
}
