use std::io;
use std::path::PathBuf;

use clap::Args;
use stegosuite_core::delivery::render_text;
use stegosuite_core::{Scheme, ServiceConfig, TransformationOutcome};

use crate::CliResult;

/// Unveils a text message from an image using the StegoSuite service
#[derive(Args, Debug)]
pub struct DecodeArgs {
    /// Source image that contains the secret message
    #[arg(short = 'i', long = "in", value_name = "stego image", required = true)]
    pub image: PathBuf,

    /// Embedding scheme that was used for encoding
    #[arg(short, long, value_name = "scheme")]
    pub scheme: Option<Scheme>,

    /// The message will additionally be stored as secret-message.txt in that folder
    #[arg(short = 'o', long = "out", value_name = "output folder")]
    pub output_folder: Option<PathBuf>,
}

impl DecodeArgs {
    pub fn run(self, config: &ServiceConfig) -> CliResult<bool> {
        let scheme = self.scheme.unwrap_or(config.default_scheme);
        let report = stegosuite_core::commands::decode(
            config,
            &self.image,
            scheme,
            self.output_folder.as_deref(),
        )?;

        match &report.outcome {
            TransformationOutcome::Decoded(message) => {
                render_text(message, io::stdout())?;
                println!();
                if let Some(saved_to) = &report.saved_to {
                    eprintln!("Message saved to {}", saved_to.display());
                }
                Ok(true)
            }
            TransformationOutcome::Failed(failure) => Ok(super::report_failure(failure)),
            TransformationOutcome::Encoded(_) => Ok(false),
        }
    }
}
