use crate::demo::{
    run_demo, run_recommend, run_roster, run_rules, DemoArgs, RecommendArgs, RosterArgs,
    RulesArgs,
};
use crate::server;
use clap::{Args, Parser, Subcommand};
use contract_advisor::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Contract Advisor",
    about = "Contract recommendations and cohort comparisons for front-office decisions",
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
    /// Recommend a contract action for one rostered player
    Recommend(RecommendArgs),
    /// List the scored roster, optionally for one position
    Roster(RosterArgs),
    /// Print the rule table and its audit result
    Rules(RulesArgs),
    /// Run the built-in sample roster through every decision context
    Demo(DemoArgs),
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
        Command::Recommend(args) => run_recommend(args),
        Command::Roster(args) => run_roster(args),
        Command::Rules(args) => run_rules(args),
        Command::Demo(args) => run_demo(args),
    }
}
