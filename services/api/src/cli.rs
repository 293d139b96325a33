use crate::report::{run_bulk, run_score, BulkArgs, ScoreArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use nutri::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Nutri-Score Calculator",
    about = "Serve and run Nutri-Score calculations from the command line",
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
    /// Score a single product described by command-line flags
    Score(ScoreArgs),
    /// Score every row of a CSV product listing
    Bulk(BulkArgs),
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
        Command::Score(args) => run_score(args),
        Command::Bulk(args) => run_bulk(args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn command_tree_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn defaults_to_serve_without_subcommand() {
        let cli = Cli::try_parse_from(["nutri-api"]).expect("parses");
        assert!(cli.command.is_none());
    }

    #[test]
    fn score_flags_parse_into_arguments() {
        let cli = Cli::try_parse_from([
            "nutri-api",
            "score",
            "--energy-kj",
            "180",
            "--sugar-g",
            "8.9",
            "--fruit-veg-pct",
            "100",
            "--has-sweeteners",
            "--category",
            "Beverage",
        ])
        .expect("parses");

        match cli.command {
            Some(Command::Score(args)) => {
                assert_eq!(args.energy_kj, 180.0);
                assert_eq!(args.fruit_veg_pct, 100.0);
                assert!(args.has_sweeteners);
                assert!(!args.is_water);
                assert_eq!(args.category, nutri::nutriscore::ProductCategory::Beverage);
            }
            other => panic!("expected score command, got {other:?}"),
        }
    }

    #[test]
    fn unknown_category_is_rejected_at_parse_time() {
        let parsed = Cli::try_parse_from([
            "nutri-api",
            "score",
            "--energy-kj",
            "1",
            "--sugar-g",
            "1",
            "--category",
            "snacks",
        ]);
        assert!(parsed.is_err());
    }
}
