use crate::demo::{run_catalog, run_demo, run_enrich, CatalogArgs, DemoArgs, EnrichArgs};
use crate::server;
use civic_triage::config::AppConfig;
use civic_triage::error::AppError;
use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "Civic Triage",
    about = "Route, score and assign municipal issue reports from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Enrich a CSV export of issue reports and print the dashboard view
    Enrich(EnrichArgs),
    /// Enrich the bundled sample issues and print the dashboard view
    Demo(DemoArgs),
    /// Print the active rule catalog as JSON
    Catalog(CatalogArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));
    let config = AppConfig::load()?;

    match command {
        Command::Serve(args) => server::run(config, args).await,
        Command::Enrich(args) => run_enrich(args, &config.triage),
        Command::Demo(args) => run_demo(args, &config.triage),
        Command::Catalog(args) => run_catalog(args, &config.triage),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_subcommand_defaults_to_serve() {
        let cli = Cli::try_parse_from(["civic-triage-api"]).expect("parses");
        assert!(cli.command.is_none());
    }

    #[test]
    fn enrich_accepts_filters() {
        let cli = Cli::try_parse_from([
            "civic-triage-api",
            "enrich",
            "--input",
            "issues.csv",
            "--ward",
            "ward-1",
            "--status",
            "in-progress",
            "--json",
        ])
        .expect("parses");

        match cli.command {
            Some(Command::Enrich(args)) => {
                assert_eq!(args.input.to_str(), Some("issues.csv"));
                assert_eq!(args.ward.as_deref(), Some("ward-1"));
                assert_eq!(args.status.as_deref(), Some("in-progress"));
                assert!(args.category.is_none());
                assert!(args.json);
            }
            other => panic!("expected enrich command, got {other:?}"),
        }
    }

    #[test]
    fn enrich_requires_an_input() {
        assert!(Cli::try_parse_from(["civic-triage-api", "enrich"]).is_err());
    }
}
