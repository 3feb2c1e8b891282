use anyhow::Result;
use clap::Parser;
use plant_identifier::ai::build_identifier;
use plant_identifier::config::Config;
use plant_identifier::logging;
use plant_identifier::server::{self, AppState};
use tracing::{error, info};

#[derive(Debug, Parser)]
#[command(name = "plant-identifier")]
#[command(about = "Identify plants from photos with a vision-language model")]
struct CliArgs {
    /// Address to bind (overrides PLANT_ID_BIND_ADDR).
    #[arg(long)]
    bind: Option<String>,

    /// Port to listen on (overrides PLANT_ID_PORT).
    #[arg(long)]
    port: Option<u16>,

    /// Emit structured JSON logs.
    #[arg(long)]
    json_logs: bool,

    /// Enable debug logging.
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = CliArgs::parse();
    logging::init(args.verbose, args.json_logs);

    info!("Starting plant-identifier");

    let mut config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };
    if let Some(bind) = args.bind {
        config.bind_addr = bind;
    }
    if let Some(port) = args.port {
        config.port = port;
    }

    let identifier = match build_identifier(&config) {
        Ok(identifier) => identifier,
        Err(e) => {
            error!("Failed to initialize identifier: {}", e);
            std::process::exit(1);
        }
    };

    server::serve(&config, AppState::new(identifier)).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::CliArgs;
    use clap::Parser;

    #[test]
    fn test_cli_overrides() {
        let args = CliArgs::parse_from(["plant-identifier", "--port", "8080", "--json-logs"]);
        assert_eq!(args.port, Some(8080));
        assert!(args.json_logs);
        assert!(args.bind.is_none());
    }

    #[test]
    fn test_cli_rejects_bad_port() {
        assert!(CliArgs::try_parse_from(["plant-identifier", "--port", "http"]).is_err());
    }
}
