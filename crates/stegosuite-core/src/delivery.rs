use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use log::info;
use tempfile::Builder;

use crate::error::StegoSuiteError;
use crate::outcome::{DecodedMessage, EncodedArtifact};
use crate::result::Result;

/// File name used when a decoded message is saved into a folder
pub const MESSAGE_FILE_NAME: &str = "secret-message.txt";

/// Hands a stego image over to the user as a file.
///
/// The bytes are staged next to the destination and moved into place at the end,
/// so an interrupted delivery never leaves a truncated image behind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactDelivery {
    destination: PathBuf,
}

impl ArtifactDelivery {
    pub fn to_file(path: impl AsRef<Path>) -> Self {
        Self {
            destination: path.as_ref().to_path_buf(),
        }
    }

    /// Delivers into `folder` under the fixed download name
    pub fn into_folder(folder: impl AsRef<Path>, name: &str) -> Self {
        Self::to_file(folder.as_ref().join(name))
    }

    pub fn destination(&self) -> &Path {
        &self.destination
    }

    /// Writes the artifact bytes unchanged, replacing an existing file
    pub fn deliver(&self, artifact: &EncodedArtifact) -> Result<PathBuf> {
        let folder = match self.destination.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let mut staged = Builder::new()
            .prefix(".stegosuite-")
            .suffix(".part")
            .tempfile_in(folder)
            .map_err(|source| StegoSuiteError::WriteError { source })?;
        staged
            .write_all(artifact.bytes())
            .and_then(|_| staged.as_file().sync_all())
            .map_err(|source| StegoSuiteError::WriteError { source })?;
        staged
            .persist(&self.destination)
            .map_err(|e| StegoSuiteError::WriteError { source: e.error })?;

        info!(
            "Saved {} bytes to {}",
            artifact.bytes().len(),
            self.destination.display()
        );
        Ok(self.destination.clone())
    }
}

/// Writes the decoded message exactly as it was returned
pub fn render_text(message: &DecodedMessage, mut out: impl Write) -> Result<()> {
    out.write_all(message.text().as_bytes())
        .map_err(|source| StegoSuiteError::WriteError { source })
}

/// Saves the decoded message as `secret-message.txt` into the given folder
pub fn save_text(message: &DecodedMessage, folder: impl AsRef<Path>) -> Result<PathBuf> {
    let target = folder.as_ref().join(MESSAGE_FILE_NAME);
    fs::write(&target, message.text()).map_err(|source| StegoSuiteError::WriteError { source })?;
    info!("Saved decoded message to {}", target.display());

    Ok(target)
}
