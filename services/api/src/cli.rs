use crate::demo::{run_demo, run_fee_quote, run_step_listing, DemoArgs, FormFileArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use dfsa_wizard::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "DFSA Application Wizard",
    about = "Serve and inspect the DFSA financial services application wizard",
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
    /// Quote application, annual, and endorsement fees for a saved form
    Fees(FormFileArgs),
    /// List the wizard steps a saved form would show
    Steps(FormFileArgs),
    /// Walk a sample broker-dealer application from draft to submission
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
        Command::Fees(args) => run_fee_quote(args),
        Command::Steps(args) => run_step_listing(args),
        Command::Demo(args) => run_demo(args),
    }
}
