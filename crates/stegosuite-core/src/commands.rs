mod decode;
mod encode;

pub use decode::{decode, decode_with, DecodeReport};
pub use encode::{encode, encode_with, EncodeReport};

use log::info;

use crate::config::ServiceConfig;
use crate::orchestrator::{Phase, RequestOrchestrator};

fn orchestrator_for(config: &ServiceConfig) -> RequestOrchestrator {
    let mut orchestrator = RequestOrchestrator::with_retention(config.retention());
    orchestrator.on_transition(|_, to| {
        if to == Phase::AwaitingResponse {
            info!("Waiting for the service to respond");
        }
    });
    orchestrator
}
