use clap::ArgAction;
use clap::{Args, Parser, Subcommand};
use dotenvy::dotenv;
use log::{error, warn};

fn main() {
    let args = CliArgs::parse();
    let dotenv_result = dotenv();

    let env = env_logger::Env::new().filter_or(
        "RUST_LOG",
        match args.global_opts.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        },
    );
    env_logger::Builder::from_env(env).init();
    if let Err(e) = dotenv_result {
        warn!("Could not read .env file: {}", e);
    }

    let result = match args.command {
        Command::Serve => campus_report_server::web::serve(),
        Command::MigrateDatabase => {
            campus_report_server::cli::database_migration::run_migrations()
        }
        Command::Report { event_id } => {
            campus_report_server::cli::print_report::print_event_report(event_id)
        }
    };
    if let Err(e) = result {
        error!("{}", e);
        std::process::exit(e.exit_code());
    }
}

/// Backend for recording campus events, student registrations, attendance and feedback, and for
/// reporting on them.
#[derive(Debug, Parser)]
#[clap(name = "campus-report", version)]
pub struct CliArgs {
    #[clap(flatten)]
    global_opts: GlobalOpts,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Serve the HTTP/JSON API. Pending database migrations are applied on startup.
    Serve,
    /// Apply pending database schema migrations
    MigrateDatabase,
    /// Print the attendance, feedback and registration figures of an event
    Report {
        /// The id of the event
        event_id: i64,
    },
}

#[derive(Debug, Args)]
struct GlobalOpts {
    /// Verbosity level (can be specified multiple times)
    #[clap(long, short, global = true, action = ArgAction::Count)]
    verbose: u8,
}
