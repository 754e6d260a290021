use clap::Args;
use stegosuite_core::{Scheme, ServiceConfig};

use crate::CliResult;

/// Lists the embedding schemes offered by the service
#[derive(Args, Debug)]
pub struct SchemesArgs {}

impl SchemesArgs {
    pub fn run(self, config: &ServiceConfig) -> CliResult<bool> {
        for line in listing(config.default_scheme) {
            println!("{line}");
        }
        Ok(true)
    }
}

fn listing(default: Scheme) -> Vec<String> {
    Scheme::ALL
        .iter()
        .map(|scheme| {
            let marker = if *scheme == default { " (default)" } else { "" };
            format!("{:<5} {}{marker}", scheme.code(), scheme.label())
        })
        .collect()
}
