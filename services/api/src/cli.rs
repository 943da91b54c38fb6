use crate::demo::{
    run_demo, run_lease_terms, run_stacking_plan, DemoArgs, LeaseTermsArgs, StackingPlanArgs,
};
use crate::server;
use clap::{Args, Parser, Subcommand};
use portfolio_analytics::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Portfolio Analytics",
    about = "Serve and explore lease term distributions and stacking plans",
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
    /// Print the remaining lease term distribution for a scope
    LeaseTerms(LeaseTermsArgs),
    /// Generate a stacking plan for a building or an ad-hoc envelope
    StackingPlan(StackingPlanArgs),
    /// Run both analytics against the sample portfolio
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
        Command::LeaseTerms(args) => run_lease_terms(args),
        Command::StackingPlan(args) => run_stacking_plan(args),
        Command::Demo(args) => run_demo(args),
    }
}
