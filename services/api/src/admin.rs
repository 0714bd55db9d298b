use crate::infra::{answers_to_map, parse_answer, ConfiguredStore};
use clap::{Args, Subcommand};
use genai_maturity::assessment::{
    AssessmentResult, AssessmentService, AssessmentSubmission, SubmissionSummary,
};
use genai_maturity::config::AppConfig;
use genai_maturity::error::AppError;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct AssessArgs {
    /// Answer as QUESTION=RATING (rating 1-4); repeat for every question
    #[arg(long = "answer", value_parser = parse_answer, required = true)]
    pub(crate) answers: Vec<(String, i64)>,
    /// Address that should receive the (simulated) results email
    #[arg(long)]
    pub(crate) email: Option<String>,
    /// Persist the submission through the configured record store
    #[arg(long)]
    pub(crate) save: bool,
}

#[derive(Subcommand, Debug)]
pub(crate) enum AdminCommand {
    /// Print aggregate statistics over every stored submission
    Summary(SummaryArgs),
    /// Print the simulated email log, newest first
    Emails,
    /// Write every submission as CSV
    Export(ExportArgs),
}

#[derive(Args, Debug)]
pub(crate) struct SummaryArgs {
    /// Also list each submission
    #[arg(long)]
    pub(crate) list: bool,
}

#[derive(Args, Debug)]
pub(crate) struct ExportArgs {
    /// Destination file; prints to stdout when omitted
    #[arg(long)]
    pub(crate) output: Option<PathBuf>,
}

fn configured_service() -> Result<AssessmentService<ConfiguredStore>, AppError> {
    let config = AppConfig::load()?;
    let store = Arc::new(ConfiguredStore::from_config(&config.storage));
    Ok(AssessmentService::new(store))
}

pub(crate) fn run_assess(args: AssessArgs) -> Result<(), AppError> {
    let AssessArgs {
        answers,
        email,
        save,
    } = args;
    let responses = answers_to_map(answers);
    let service = configured_service()?;

    if save {
        let receipt = service.submit(AssessmentSubmission { responses, email }, None)?;
        render_result(&receipt.result);
        println!("\n{} (id {})", receipt.message, receipt.id);
    } else {
        let result = service.preview(&responses)?;
        render_result(&result);
        if email.is_some() {
            println!("\nNot saved: pass --save to store the result and log the email.");
        }
    }

    Ok(())
}

pub(crate) fn run_admin(command: AdminCommand) -> Result<(), AppError> {
    let service = configured_service()?;

    match command {
        AdminCommand::Summary(args) => {
            let listing = service.list_submissions()?;
            render_summary(&listing.summary);
            if args.list {
                println!("\nSubmissions (newest first)");
                for record in &listing.assessments {
                    println!(
                        "- {} | {} | {:.2} {} | {}",
                        record.timestamp.format("%Y-%m-%d %H:%M:%S"),
                        record.id,
                        record.score,
                        record.maturity_level,
                        record.email.as_deref().unwrap_or("no email")
                    );
                }
            }
        }
        AdminCommand::Emails => {
            let emails = service.list_email_log()?;
            if emails.is_empty() {
                println!("Email log: none sent");
            }
            for email in emails {
                println!(
                    "[{}] to {}: {}",
                    email.timestamp.format("%Y-%m-%d %H:%M:%S"),
                    email.to,
                    email.subject
                );
                println!("{}", email.message.trim_end());
                println!();
            }
        }
        AdminCommand::Export(args) => {
            let csv = service.export_csv()?;
            match args.output {
                Some(path) => {
                    std::fs::write(&path, csv)?;
                    println!("Exported submissions to {}", path.display());
                }
                None => print!("{csv}"),
            }
        }
    }

    Ok(())
}

fn render_result(result: &AssessmentResult) {
    println!("GenAI maturity assessment");
    println!(
        "Score: {:.2}/4.0 -> {}",
        result.score, result.maturity_level
    );
    println!("\nRecommended next steps");
    for item in &result.recommendations {
        println!("- {}", item);
    }
}

fn render_summary(summary: &SubmissionSummary) {
    if summary.total == 0 {
        println!("Submissions: none recorded yet");
        return;
    }

    println!("Submissions: {}", summary.total);
    println!("Average score: {:.2}", summary.average_score);
    println!("Emails collected: {}", summary.emails_collected);
    println!("\nMaturity breakdown");
    for (level, count) in &summary.maturity_breakdown {
        println!("- {}: {}", level, count);
    }
}
