use std::path::{Path, PathBuf};

use crate::config::ServiceConfig;
use crate::delivery::save_text;
use crate::outcome::TransformationOutcome;
use crate::scheme::Scheme;
use crate::selection::{Direction, SelectedFile};
use crate::transport::{HttpTransport, Transport};
use crate::Result;

#[derive(Debug)]
pub struct DecodeReport {
    pub outcome: TransformationOutcome,
    pub saved_to: Option<PathBuf>,
}

/// Recovers the message hidden in `secret_image`, optionally saving it into `output_folder`
pub fn decode(
    config: &ServiceConfig,
    secret_image: &Path,
    scheme: Scheme,
    output_folder: Option<&Path>,
) -> Result<DecodeReport> {
    let transport = HttpTransport::new(config)?;
    decode_with(&transport, config, secret_image, scheme, output_folder)
}

pub fn decode_with<T: Transport + ?Sized>(
    transport: &T,
    config: &ServiceConfig,
    secret_image: &Path,
    scheme: Scheme,
    output_folder: Option<&Path>,
) -> Result<DecodeReport> {
    let mut orchestrator = super::orchestrator_for(config);
    orchestrator.select_file(Direction::Decode, SelectedFile::from_path(secret_image)?);

    let outcome = orchestrator.submit_decode(transport, scheme)?.clone();

    let saved_to = match (outcome.decoded(), output_folder) {
        (Some(message), Some(folder)) => Some(save_text(message, folder)?),
        _ => None,
    };

    Ok(DecodeReport { outcome, saved_to })
}
