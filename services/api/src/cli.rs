use crate::admin::{run_admin, run_assess, AdminCommand, AssessArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use genai_maturity::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "GenAI Maturity Assessment",
    about = "Serve, take, and administer the GenAI maturity assessment",
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
    /// Score a set of answers and print the maturity level with recommendations
    Assess(AssessArgs),
    /// Inspect stored submissions and the simulated email log
    Admin {
        #[command(subcommand)]
        command: AdminCommand,
    },
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
        Command::Assess(args) => run_assess(args),
        Command::Admin { command } => run_admin(command),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn defaults_to_serve() {
        let cli = Cli::try_parse_from(["genai-maturity"]).expect("parses");
        assert!(cli.command.is_none());
    }

    #[test]
    fn parses_assess_answers() {
        let cli = Cli::try_parse_from([
            "genai-maturity",
            "assess",
            "--answer",
            "q1=2",
            "--answer",
            "q2=3",
            "--email",
            "me@example.com",
            "--save",
        ])
        .expect("parses");
        match cli.command {
            Some(Command::Assess(args)) => {
                assert_eq!(args.answers.len(), 2);
                assert_eq!(args.answers[1], ("q2".to_string(), 3));
                assert!(args.save);
            }
            other => panic!("expected assess command, got {other:?}"),
        }
    }

    #[test]
    fn rejects_malformed_answers() {
        assert!(Cli::try_parse_from(["genai-maturity", "assess", "--answer", "q1"]).is_err());
    }
}
