use std::path::{Path, PathBuf};

use crate::config::ServiceConfig;
use crate::delivery::ArtifactDelivery;
use crate::outcome::TransformationOutcome;
use crate::scheme::Scheme;
use crate::selection::{Direction, SelectedFile};
use crate::transport::{HttpTransport, Transport};
use crate::Result;

#[derive(Debug)]
pub struct EncodeReport {
    pub outcome: TransformationOutcome,
    /// where the stego image was saved, only set on success
    pub saved_to: Option<PathBuf>,
}

/// Hides `message` in the cover `image` using the configured service.
///
/// Without `output` the stego image lands in the working directory under the
/// configured download name, a folder as `output` gets the same treatment.
pub fn encode(
    config: &ServiceConfig,
    image: &Path,
    message: &str,
    scheme: Scheme,
    output: Option<&Path>,
) -> Result<EncodeReport> {
    let transport = HttpTransport::new(config)?;
    encode_with(&transport, config, image, message, scheme, output)
}

pub fn encode_with<T: Transport + ?Sized>(
    transport: &T,
    config: &ServiceConfig,
    image: &Path,
    message: &str,
    scheme: Scheme,
    output: Option<&Path>,
) -> Result<EncodeReport> {
    let mut orchestrator = super::orchestrator_for(config);
    orchestrator.select_file(Direction::Encode, SelectedFile::from_path(image)?);

    let outcome = orchestrator
        .submit_encode(transport, message, scheme)?
        .clone();

    let saved_to = match outcome.artifact() {
        Some(artifact) => {
            let delivery = match output {
                Some(path) if path.is_dir() => {
                    ArtifactDelivery::into_folder(path, &config.download_name)
                }
                Some(path) => ArtifactDelivery::to_file(path),
                None => ArtifactDelivery::into_folder(".", &config.download_name),
            };
            Some(delivery.deliver(artifact)?)
        }
        None => None,
    };

    Ok(EncodeReport { outcome, saved_to })
}
