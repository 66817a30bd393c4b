use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use hedgecal::{
    dataset,
    llm::openai::{resolve_api_key, GeneratorConfig, OpenAiGenerator},
    report::render_report,
    sentiment::{LexiconSentiment, SentimentScorer},
    server::{run_server, Engine},
    summarize, EvaluationPipeline, HedgeScorer, HedgeStrategy,
};
use std::sync::Arc;
use std::time::Duration;

#[derive(Parser)]
#[command(name = "hedgecal", version, about = "Does the model hedge more when it is wrong?")]
struct Cli {
    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand)]
enum Cmd {
    /// Ask every question, judge the answers, print the calibration report
    Run {
        /// JSON array or JSON Lines of {question, ground_truth?}
        #[arg(long)] input_file: String,
        /// Also write per-question results as JSON Lines
        #[arg(long)] output_file: Option<String>,
        #[command(flatten)] model_args: GeneratorArgs,
    },
    /// Re-score results saved by `run --output-file`
    Score { #[arg(long)] input_file: String },
    /// Serve the evaluation over HTTP
    Serve {
        #[arg(long, env = "HEDGECAL_ADDR", default_value = "127.0.0.1:8080")] addr: String,
        #[command(flatten)] model_args: GeneratorArgs,
    },
}

#[derive(Args)]
struct GeneratorArgs {
    #[arg(long, env = "HEDGECAL_MODEL")] model: String,
    /// OpenAI-compatible base URL, e.g. https://generativelanguage.googleapis.com/v1beta/openai
    #[arg(long, env = "HEDGECAL_API_BASE")] api_base: Option<String>,
    /// Falls back to HEDGECAL_API_KEY, GOOGLE_API_KEY, OPENAI_API_KEY
    #[arg(long)] api_key: Option<String>,
    #[arg(long)] system_prompt: Option<String>,
    /// Which estimate feeds the calibration score
    #[arg(long, default_value = "lexical")] strategy: HedgeStrategy,
    #[arg(long, default_value_t = 1)] concurrency: usize,
    /// Requests per second to the model endpoint
    #[arg(long)] qps: Option<u32>,
    #[arg(long, default_value_t = 60_000)] timeout_ms: u64,
}

impl GeneratorArgs {
    fn generator(&self) -> Result<OpenAiGenerator> {
        let api_key = resolve_api_key(self.api_key.clone())?;
        let cfg = GeneratorConfig {
            model: self.model.clone(),
            api_base: self.api_base.clone(),
            api_key,
            timeout: Duration::from_millis(self.timeout_ms),
            qps: self.qps,
            system_prompt: self.system_prompt.clone(),
        };
        Ok(OpenAiGenerator::new(cfg)?)
    }
}

fn sentiment() -> Option<Arc<dyn SentimentScorer>> {
    Some(Arc::new(LexiconSentiment::new()))
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Cmd::Run { input_file, output_file, model_args } => {
            let questions = dataset::load_questions(&input_file)?;
            let scorer = HedgeScorer::new(Default::default(), sentiment(), model_args.strategy)?;
            let pipeline = EvaluationPipeline::new(Arc::new(model_args.generator()?), scorer).with_concurrency(model_args.concurrency);
            let results = pipeline.run(&questions).await.with_context(|| format!("evaluating {input_file}"))?;
            if let Some(path) = output_file {
                dataset::write_results(&path, &results)?;
            }
            render_report(&results, &summarize(&results), &mut std::io::stdout().lock())?;
        }
        Cmd::Score { input_file } => {
            let results = dataset::read_results(&input_file)?;
            render_report(&results, &summarize(&results), &mut std::io::stdout().lock())?;
        }
        Cmd::Serve { addr, model_args } => {
            let engine = Engine {
                generator: Arc::new(model_args.generator()?),
                sentiment: sentiment(),
                default_strategy: model_args.strategy,
                concurrency: model_args.concurrency,
            };
            run_server(engine, &addr).await?;
        }
    }
    Ok(())
}
