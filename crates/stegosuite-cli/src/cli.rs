use std::path::PathBuf;

use clap::{Parser, Subcommand};
use stegosuite_core::ServiceConfig;

use crate::commands::*;
use crate::CliResult;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct CliArgs {
    /// Base URL of the StegoSuite service, overrides config file and STEGOSUITE_SERVER
    #[arg(long, global = true, value_name = "url")]
    pub server: Option<String>,

    /// Configuration file, defaults to the per-user config.toml when present
    #[arg(long, global = true, value_name = "config file")]
    pub config: Option<PathBuf>,

    /// Give up on the service after that many seconds
    #[arg(long, global = true, value_name = "seconds")]
    pub timeout: Option<u64>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    Encode(encode::EncodeArgs),
    Decode(decode::DecodeArgs),
    Schemes(schemes::SchemesArgs),
}

impl CliArgs {
    /// Layers the command line flags on top of file and environment configuration
    pub fn service_config(&self) -> CliResult<ServiceConfig> {
        ServiceConfig::load(self.config.as_deref())?
            .with_server_override(self.server.clone())
            .with_timeout_secs(self.timeout)
            .validated()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use std::fs;
    use stegosuite_core::config::SERVER_ENV;
    use tempfile::TempDir;

    #[test]
    fn verify_cli() {
        CliArgs::command().debug_assert();
    }

    #[test]
    fn global_flags_work_after_the_subcommand() {
        let args = CliArgs::try_parse_from([
            "stegosuite",
            "decode",
            "-i",
            "stego.png",
            "--server",
            "http://10.0.0.1:5000",
            "--timeout",
            "30",
        ])
        .unwrap();

        assert_eq!(args.server.as_deref(), Some("http://10.0.0.1:5000"));
        assert_eq!(args.timeout, Some(30));
        assert!(matches!(args.command, Commands::Decode(_)));
    }

    #[test]
    fn server_flag_wins_over_a_broken_config_file() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("config.toml");
        fs::write(&file, "server = \"not a url\"\n").unwrap();
        let config = file.to_str().unwrap();

        // a set environment variable would replace the broken file value as well
        if std::env::var_os(SERVER_ENV).is_none() {
            let args =
                CliArgs::try_parse_from(["stegosuite", "schemes", "--config", config]).unwrap();
            assert!(args.service_config().is_err());
        }

        let args = CliArgs::try_parse_from([
            "stegosuite",
            "schemes",
            "--config",
            config,
            "--server",
            "http://127.0.0.1:8000",
        ])
        .unwrap();
        assert_eq!(args.service_config().unwrap().server, "http://127.0.0.1:8000");
    }

    #[test]
    fn encode_requires_a_cover_image() {
        assert!(CliArgs::try_parse_from(["stegosuite", "encode", "-m", "hi"]).is_err());
    }
}
