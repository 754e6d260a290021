use std::fmt::{self, Display, Formatter};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::StegoSuiteError;
use crate::result::Result;

/// Which way a transformation goes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// cover image + message → stego image
    Encode,
    /// stego image → message
    Decode,
}

impl Display for Direction {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Encode => f.write_str("Encoding"),
            Direction::Decode => f.write_str("Decoding"),
        }
    }
}

/// A local file picked by the user, together with the name shown for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    name: String,
    path: PathBuf,
}

impl SelectedFile {
    /// Selects an existing regular file, its display name is the file name component
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let metadata = path
            .metadata()
            .map_err(|_| StegoSuiteError::FileNotSelectable(path.to_path_buf()))?;
        if !metadata.is_file() {
            return Err(StegoSuiteError::FileNotSelectable(path.to_path_buf()));
        }

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .ok_or_else(|| StegoSuiteError::FileNotSelectable(path.to_path_buf()))?;

        Ok(Self {
            name,
            path: path.to_path_buf(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// False once the file was removed or replaced by something that is not a regular file
    pub fn is_available(&self) -> bool {
        self.path.is_file()
    }
}

/// What happens to a selection once a terminal outcome was acknowledged
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectionRetention {
    /// the file stays selected so the same file can be retried
    #[default]
    Keep,
    Clear,
}

/// Holds at most one selected file per direction.
#[derive(Debug, Default, Clone)]
pub struct FileSelection {
    cover: Option<SelectedFile>,
    stego: Option<SelectedFile>,
}

impl FileSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces whatever was selected for that direction before
    pub fn select(&mut self, direction: Direction, file: SelectedFile) -> &mut Self {
        *self.slot_mut(direction) = Some(file);
        self
    }

    pub fn clear(&mut self, direction: Direction) -> Option<SelectedFile> {
        self.slot_mut(direction).take()
    }

    pub fn get(&self, direction: Direction) -> Option<&SelectedFile> {
        match direction {
            Direction::Encode => self.cover.as_ref(),
            Direction::Decode => self.stego.as_ref(),
        }
    }

    /// The cover image used for encoding
    pub fn cover(&self) -> Option<&SelectedFile> {
        self.get(Direction::Encode)
    }

    /// The stego image used for decoding
    pub fn stego(&self) -> Option<&SelectedFile> {
        self.get(Direction::Decode)
    }

    fn slot_mut(&mut self, direction: Direction) -> &mut Option<SelectedFile> {
        match direction {
            Direction::Encode => &mut self.cover,
            Direction::Decode => &mut self.stego,
        }
    }
}
