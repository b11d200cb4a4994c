use crate::demo::{
    run_check, run_demo, run_eligible, run_policies, CheckArgs, DemoArgs, EligibleArgs,
    PoliciesArgs,
};
use crate::server;
use clap::{Args, Parser, Subcommand};
use placement_policy::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Placement Policy Service",
    about = "Serve and query post-placement application eligibility from the command line",
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
    /// Decide whether one student may apply to one company
    Check(CheckArgs),
    /// List every student allowed to apply to a company
    Eligible(EligibleArgs),
    /// Print the active policy configuration
    Policies(PoliciesArgs),
    /// Walk through the documented eligibility scenarios on the sample roster
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
        Command::Check(args) => run_check(args),
        Command::Eligible(args) => run_eligible(args),
        Command::Policies(args) => run_policies(args),
        Command::Demo(args) => run_demo(args),
    }
}
