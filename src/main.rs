use anyhow::Result;
use clap::Parser;
use healthhive::cli::{Cli, Commands};
use healthhive::commands::{self, ReportRequest};
use healthhive::observability;

fn main() -> Result<()> {
    let cli = Cli::parse();
    observability::install_panic_hook();
    observability::set_command(cli.command.name());

    let args = cli.command.report_args();
    observability::init_tracing(args.map_or(0, |a| a.verbosity));
    if args.is_some_and(|a| a.plain) {
        colored::control::set_override(false);
    }

    if let Commands::Init { force } = cli.command {
        return commands::init_config(force);
    }

    match (ReportRequest::from_command(&cli.command), args) {
        (Some(request), Some(args)) => commands::run_report(&request, args),
        _ => anyhow::bail!("{} does not produce a report", cli.command.name()),
    }
}
