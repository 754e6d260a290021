use log::warn;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Notice attached to an encode outcome when metrics were sent but unusable
pub const METRICS_UNAVAILABLE_NOTICE: &str = "Metrics data received but could not be parsed.";

/// Fidelity of a stego image compared to its cover image, as reported by the service.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QualityMetrics {
    /// peak signal-to-noise ratio in dB
    pub psnr: f64,
    /// structural similarity, typically within `0..=1`
    pub ssim: f64,
    /// bit error rate within `0..=1`
    pub ber: f64,
}

/// The metrics side-channel of an encode response
#[derive(Debug, Clone, PartialEq, Default)]
pub enum MetricsReport {
    /// the service did not send any metrics
    #[default]
    NotReported,
    Reported(QualityMetrics),
    /// metrics were sent but are not the expected numeric triple
    Unavailable { raw: String },
}

impl MetricsReport {
    /// Parses the raw header value. Never fails, metrics are diagnostic only.
    /// An empty header counts as not sent.
    pub fn parse(raw: Option<&str>) -> Self {
        let Some(raw) = raw.filter(|r| !r.trim().is_empty()) else {
            return MetricsReport::NotReported;
        };

        // only an object qualifies, serde would also accept a plain array
        let parsed = serde_json::from_str::<Map<String, Value>>(raw)
            .and_then(|object| serde_json::from_value::<QualityMetrics>(object.into()));

        match parsed {
            Ok(metrics) => MetricsReport::Reported(metrics),
            Err(e) => {
                warn!("Failed to parse metrics header `{raw}`: {e}");
                MetricsReport::Unavailable {
                    raw: raw.to_string(),
                }
            }
        }
    }

    pub fn metrics(&self) -> Option<&QualityMetrics> {
        match self {
            MetricsReport::Reported(metrics) => Some(metrics),
            _ => None,
        }
    }

    pub fn is_unavailable(&self) -> bool {
        matches!(self, MetricsReport::Unavailable { .. })
    }

    /// The informational notice for unusable metrics
    pub fn notice(&self) -> Option<&'static str> {
        self.is_unavailable().then_some(METRICS_UNAVAILABLE_NOTICE)
    }
}
