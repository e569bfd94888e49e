//! eco-advisor command line
//!
//! Sends one prompt to the recommendation service and prints the results list
//! and the cost/carbon chart, as text or JSON.

use std::io::{self, Read};
use std::time::Duration;

use anyhow::{bail, Context};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use eco_advisor::config::DEFAULT_PROVIDER;
use eco_advisor::pipeline::policy::parse_policy_value;
use eco_advisor::render::{self, ChartRenderer, JsonRenderer, TextRenderer};
use eco_advisor::util::parse_duration;
use eco_advisor::{ChartPolicy, Phase, RecommenderClient, RequestController};

#[derive(Debug, Parser)]
#[command(name = "eco-advisor", version, about = "Recommend LLMs by cost, carbon and quality")]
struct Cli {
    /// Prompt to analyze. Read from stdin when omitted.
    prompt: Vec<String>,

    /// Recommendation service base URL
    #[arg(long)]
    base_url: Option<String>,

    /// Request timeout, e.g. `30s` or `500ms`
    #[arg(long)]
    timeout: Option<String>,

    /// Bubble palette
    #[arg(long, value_parser = ["traffic-light", "eco"])]
    color_scheme: Option<String>,

    /// Display unit for carbon footprint
    #[arg(long, value_parser = ["g", "kg"])]
    carbon_unit: Option<String>,

    /// What drives bubble size
    #[arg(long, value_parser = ["arena", "performance"])]
    size_basis: Option<String>,

    /// Axis bounds
    #[arg(long, value_parser = ["fixed", "adaptive"])]
    axis_mode: Option<String>,

    /// Print the view as JSON
    #[arg(long)]
    json: bool,
}

impl Cli {
    fn policy(&self) -> anyhow::Result<ChartPolicy> {
        let mut policy = ChartPolicy::from_provider(&**DEFAULT_PROVIDER)?;

        if let Some(value) = &self.color_scheme {
            policy = policy.with_color_scheme(parse_policy_value(value)?);
        }
        if let Some(value) = &self.carbon_unit {
            policy = policy.with_carbon_unit(parse_policy_value(value)?);
        }
        if let Some(value) = &self.size_basis {
            policy = policy.with_size_basis(parse_policy_value(value)?);
        }
        if let Some(value) = &self.axis_mode {
            policy = policy.with_axis_mode(parse_policy_value(value)?);
        }

        Ok(policy)
    }

    fn client(&self) -> anyhow::Result<RecommenderClient> {
        let mut builder = RecommenderClient::builder();

        if let Some(base_url) = &self.base_url {
            builder = builder.base_url(base_url.clone());
        }
        if let Some(timeout) = &self.timeout {
            let timeout: Duration =
                parse_duration(timeout).with_context(|| format!("Invalid timeout '{}'", timeout))?;
            builder = builder.timeout(timeout);
        }

        Ok(builder.build()?)
    }

    fn prompt_text(&self) -> anyhow::Result<String> {
        if !self.prompt.is_empty() {
            return Ok(self.prompt.join(" "));
        }

        let mut text = String::new();
        io::stdin()
            .read_to_string(&mut text)
            .context("Failed to read prompt from stdin")?;
        Ok(text)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let render_context = render::initialize();

    let policy = cli.policy()?;
    let client = cli.client()?;
    log::info!("Using recommendation service at {}", client.config().base_url);

    let mut controller = RequestController::new(client, policy);
    controller.set_prompt(cli.prompt_text()?);

    let outcome = controller.submit().await;

    let view = controller.view();
    let renderer: Box<dyn ChartRenderer> = if cli.json {
        Box::new(JsonRenderer { pretty: true })
    } else {
        Box::new(TextRenderer)
    };
    renderer.render(&render_context, &view, &mut io::stdout().lock())?;

    match outcome {
        Ok(Phase::Success) => Ok(()),
        Ok(phase) => bail!("Analysis ended in {} state", phase),
        Err(err) => bail!(err.user_message()),
    }
}
