use std::fs::File;
use std::io::{self, BufReader, Write};
use std::path::PathBuf;

use clap::error::ErrorKind;
use clap::{Args, CommandFactory, Parser, Subcommand};
use riskwise::assessment::{score_csv, LifestyleChange, RiskAssessmentService, RiskDomain};
use riskwise::error::AppError;

use crate::demo::{run_demo, DemoArgs};
use crate::infra::{bootstrap, read_answers};
use crate::render;

#[derive(Parser, Debug)]
#[command(
    name = "riskwise",
    about = "Educational heart, diabetes and thyroid risk screening from the command line",
    version
)]
struct Cli {
    /// Directory holding the model artifacts (overrides RISK_MODEL_DIR)
    #[arg(long, global = true)]
    models: Option<PathBuf>,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Score one JSON answer file
    Assess(AssessArgs),
    /// Score every row of a CSV file whose header names the answers
    Batch(BatchArgs),
    /// Print a domain's feature schema as JSON for the offline trainer
    Schema(SchemaArgs),
    /// Run scripted assessments for every loaded model (default command)
    Demo(DemoArgs),
}

#[derive(Args, Debug)]
struct AssessArgs {
    /// heart-questionnaire, heart-clinical, diabetes or thyroid
    domain: RiskDomain,
    /// JSON object mapping answer names to values
    #[arg(long)]
    answers: PathBuf,
    /// Lifestyle change to explore (heart-questionnaire only; repeatable)
    #[arg(long = "change")]
    changes: Vec<LifestyleChange>,
    /// Print the result as JSON instead of text
    #[arg(long)]
    json: bool,
}

#[derive(Args, Debug)]
struct BatchArgs {
    domain: RiskDomain,
    /// CSV input with one respondent per row
    #[arg(long)]
    input: PathBuf,
    /// Write scores here instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct SchemaArgs {
    domain: RiskDomain,
}

pub(crate) fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Demo(DemoArgs::default()));

    match command {
        Command::Schema(args) => render::schema(args.domain),
        Command::Assess(args) => {
            if !args.changes.is_empty() && args.domain != RiskDomain::HeartQuestionnaire {
                Cli::command()
                    .error(
                        ErrorKind::ArgumentConflict,
                        "--change is only available for heart-questionnaire",
                    )
                    .exit();
            }
            let service = bootstrap(cli.models)?;
            run_assess(&service, args)
        }
        Command::Batch(args) => {
            let service = bootstrap(cli.models)?;
            run_batch(&service, args)
        }
        Command::Demo(args) => {
            let service = bootstrap(cli.models)?;
            run_demo(&service, args)
        }
    }
}

fn run_assess(service: &RiskAssessmentService, args: AssessArgs) -> Result<(), AppError> {
    let AssessArgs {
        domain,
        answers,
        changes,
        json,
    } = args;
    let answers = read_answers(&answers)?;

    match domain {
        RiskDomain::HeartQuestionnaire => {
            let assessment = service.assess_heart_questionnaire(&answers)?;
            let what_if = service.what_if(&answers, &changes)?;
            if json {
                render::json(&serde_json::json!({
                    "assessment": assessment,
                    "what_if": what_if,
                }))
            } else {
                render::heart_questionnaire(&assessment);
                if !changes.is_empty() {
                    render::what_if(what_if.as_ref());
                }
                Ok(())
            }
        }
        RiskDomain::HeartClinical => {
            let prediction = service.assess_heart_clinical(&answers)?;
            if json {
                render::json(&prediction)
            } else {
                render::prediction(domain, &prediction);
                Ok(())
            }
        }
        RiskDomain::Diabetes => {
            let assessment = service.assess_diabetes(&answers)?;
            if json {
                render::json(&assessment)
            } else {
                render::diabetes(&assessment);
                Ok(())
            }
        }
        RiskDomain::Thyroid => {
            let assessment = service.assess_thyroid(&answers)?;
            if json {
                render::json(&assessment)
            } else {
                render::thyroid(&assessment);
                Ok(())
            }
        }
    }
}

fn run_batch(service: &RiskAssessmentService, args: BatchArgs) -> Result<(), AppError> {
    let input = BufReader::new(File::open(&args.input)?);
    let output: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(File::create(path)?),
        None => Box::new(io::stdout().lock()),
    };

    let summary = score_csv(service, args.domain, input, output)?;
    eprintln!(
        "Scored {} rows for {} ({} failed)",
        summary.scored + summary.failed,
        args.domain.label(),
        summary.failed
    );
    Ok(())
}
