use std::io;
use std::path::PathBuf;

use clap::Args;
use dialoguer::Input;
use stegosuite_core::{MetricsReport, Scheme, ServiceConfig, StegoSuiteError, TransformationOutcome};

use crate::CliResult;

/// Hides a text message in an image using the StegoSuite service
#[derive(Args, Debug)]
pub struct EncodeArgs {
    /// Cover image the message gets hidden in, used readonly
    #[arg(short = 'i', long = "in", value_name = "cover image", required = true)]
    pub image: PathBuf,

    /// A text message that will be hidden, prompted for when missing
    #[arg(short, long, value_name = "text message")]
    pub message: Option<String>,

    /// Embedding scheme: lsbm, erde, dct or pvd
    #[arg(short, long, value_name = "scheme")]
    pub scheme: Option<Scheme>,

    /// Final image will be stored as file, or under the download name inside a folder
    #[arg(short = 'o', long = "out", value_name = "output image file")]
    pub output: Option<PathBuf>,
}

impl EncodeArgs {
    pub fn run(self, config: &ServiceConfig) -> CliResult<bool> {
        let message = match self.message {
            Some(message) => message,
            None => prompt_message()?,
        };
        let scheme = self.scheme.unwrap_or(config.default_scheme);

        let report = stegosuite_core::commands::encode(
            config,
            &self.image,
            &message,
            scheme,
            self.output.as_deref(),
        )?;

        match &report.outcome {
            TransformationOutcome::Encoded(artifact) => {
                if let Some(saved_to) = &report.saved_to {
                    println!("Stego image saved to {}", saved_to.display());
                }
                if let Some(line) = metrics_line(artifact.metrics_report()) {
                    println!("{line}");
                }
                Ok(true)
            }
            TransformationOutcome::Failed(failure) => Ok(super::report_failure(failure)),
            TransformationOutcome::Decoded(_) => Ok(false),
        }
    }
}

fn prompt_message() -> CliResult<String> {
    Input::<String>::new()
        .with_prompt("Secret message")
        .allow_empty(true)
        .interact_text()
        .map_err(|e| StegoSuiteError::ReadError {
            source: io::Error::other(e),
        })
}

fn metrics_line(report: &MetricsReport) -> Option<String> {
    match report {
        MetricsReport::Reported(m) => Some(format!(
            "PSNR: {:.2} dB, SSIM: {:.3}, BER: {:.4}",
            m.psnr, m.ssim, m.ber
        )),
        MetricsReport::Unavailable { .. } => report.notice().map(str::to_string),
        MetricsReport::NotReported => None,
    }
}
