use std::io;
use clap::Parser;
use tracing::info;
use lms::catalog::factory::create_catalog_service;
use lms::core::domain::Configuration;
use lms::core::library::LibraryError;
use lms::gateway::GatewayPublisherVia;
use lms::shell::Shell;
use lms::utils::logs::setup_tracing;

#[derive(Parser, Debug)]
#[command(name = "library", version, about = "Console lending catalog for a small library")]
struct Cli {
    #[arg(long, default_value = "main", help = "Branch label attached to catalog events and logs")]
    branch: String,
    #[arg(long, help = "Reject returns of books that are not marked as issued instead of warning")]
    strict_returns: bool,
    #[arg(short, long, help = "Log catalog activity at info level")]
    verbose: bool,
    #[arg(long, help = "Write logs to stderr as json")]
    json_logs: bool,
}

fn main() -> Result<(), LibraryError> {
    let cli = Cli::parse();
    setup_tracing(cli.verbose, cli.json_logs);

    let config = Configuration::new(cli.branch.as_str()).with_strict_returns(cli.strict_returns);
    info!(branch = %config.branch_id, strict_returns = config.reject_inconsistent_returns, "starting library console");
    let catalog = create_catalog_service(&config, GatewayPublisherVia::Logs);

    let stdin = io::stdin();
    let mut shell = Shell::new(catalog, stdin.lock(), io::stdout());
    shell.run()
}
