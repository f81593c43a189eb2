use crate::demo::{
    run_dashboard_report, run_demo, run_strategy, DashboardReportArgs, DemoArgs, StrategyArgs,
};
use crate::server;
use clap::{Args, Parser, Subcommand};
use market_scope::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Market Scope",
    about = "Serve and explore the competitor intelligence dashboard from the command line",
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
    /// Resolve dashboard views for a competitor and time range
    Dashboard {
        #[command(subcommand)]
        command: DashboardCommand,
    },
    /// Walk through the aggregate view, a single competitor and the strategy
    Demo(DemoArgs),
}

#[derive(Subcommand, Debug)]
enum DashboardCommand {
    /// Print every tab, or a single tab, of the dashboard
    Report(DashboardReportArgs),
    /// Print the full strategy document
    Strategy(StrategyArgs),
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

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Dashboard {
            command: DashboardCommand::Report(args),
        } => run_dashboard_report(args),
        Command::Dashboard {
            command: DashboardCommand::Strategy(args),
        } => run_strategy(args),
        Command::Demo(args) => run_demo(args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use market_scope::dashboard::{CompetitorSelection, DashboardTab};

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_dashboard_report_flags() {
        let cli = Cli::try_parse_from([
            "market-scope",
            "dashboard",
            "report",
            "--competitor",
            "2",
            "--time-range",
            "90d",
            "--tab",
            "pricing",
            "--json",
        ])
        .expect("report flags parse");

        let Some(Command::Dashboard {
            command: DashboardCommand::Report(args),
        }) = cli.command
        else {
            panic!("expected dashboard report command");
        };
        assert_eq!(args.competitor, CompetitorSelection::Competitor("2".to_string()));
        assert_eq!(args.time_range.as_deref(), Some("90d"));
        assert_eq!(args.tab, Some(DashboardTab::Pricing));
        assert!(args.json);
    }

    #[test]
    fn missing_command_defaults_to_serve() {
        let cli = Cli::try_parse_from(["market-scope"]).expect("bare invocation parses");
        assert!(cli.command.is_none());
    }
}
