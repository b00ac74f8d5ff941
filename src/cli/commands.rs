use std::sync::Arc;

use anyhow::{Result, bail};
use colored::*;

use crate::agent::AgentRoster;
use crate::client::{AIClient, DynCompletionClient};
use crate::config::Config;
use crate::pipeline::{
    BuildEvent, BuildOrchestrator, BuildOutcome, BuildRequest, DEFAULT_LEAD_COUNT, Pipeline,
};
use crate::server::{self, AppState};
use crate::store::{BusinessState, BusinessStore};
use crate::structured::scalar_text;

use super::args::{BuildArgs, Cli, Command, DataFileArgs, ServeArgs};
use super::config_cmd;

pub(crate) async fn run(cli: Cli) -> Result<()> {
    let config = Config::load()?;

    match cli.command.unwrap_or(Command::Serve(ServeArgs::default())) {
        Command::Serve(args) => serve(args, config).await,
        Command::Build(args) => build(args, config).await,
        Command::Stats(args) => stats(args, config).await,
        Command::Config(args) => config_cmd::handle_config(args, config),
    }
}

fn pipeline(config: &Config) -> Result<Arc<Pipeline>> {
    config.validate()?;
    let client: Arc<DynCompletionClient> = Arc::new(AIClient::new(&config.llm, &config.models)?);
    tracing::debug!(
        provider = %config.llm.provider,
        model = %config.models.model,
        "completion client ready"
    );
    Ok(Arc::new(Pipeline::new(AgentRoster::new(client))))
}

async fn serve(args: ServeArgs, mut config: Config) -> Result<()> {
    args.apply(&mut config.server);
    let pipeline = pipeline(&config)?;
    let store = Arc::new(BusinessStore::open(&config.server.data_file));

    let addr = config.server.bind_addr();
    println!("{} http://{}", "🚀 bizforge listening on".bold(), addr.cyan());
    println!(
        "   {} {} ({})",
        "Model:".dimmed(),
        config.models.model,
        config.llm.provider.display_name()
    );
    println!(
        "   {} {}",
        "Data:".dimmed(),
        config.server.data_file.display()
    );

    server::serve(AppState::new(pipeline, store), &addr).await
}

async fn build(args: BuildArgs, mut config: Config) -> Result<()> {
    args.data.apply(&mut config.server);
    let orchestrator = BuildOrchestrator::standard(pipeline(&config)?);
    let store = BusinessStore::open(&config.server.data_file);

    let request = BuildRequest::new(&args.niche)
        .with_lead_count(args.count.unwrap_or(DEFAULT_LEAD_COUNT));
    println!("{} {}", "🏗️  Building:".bold(), args.niche.cyan());

    let run = orchestrator.run_observed(request, &store).await;
    print_events(&run.events, orchestrator.stage_count());

    let completed = run.outcome.is_completed();
    let summary = store
        .update(|business| {
            business.apply_build(&args.niche, &run.outputs, completed);
            business.stats()
        })
        .await?;

    if let BuildOutcome::Failed { stage, error } = run.outcome {
        bail!("Build failed at the {stage} stage: {error}");
    }

    println!();
    println!("{}", "✅ Build complete".bold().green());
    println!("   Product: {}", summary.product.bold());
    println!("   Launch price: ${}", scalar_text(Some(&summary.price), "?"));
    println!(
        "   Leads found: {}",
        store.read(BusinessState::initial_lead_count).await
    );
    println!("   Saved to: {}", config.server.data_file.display());
    Ok(())
}

fn print_events(events: &[BuildEvent], total: usize) {
    let mut step = 0;
    for event in events {
        match event {
            BuildEvent::StageStarted(_) => step += 1,
            BuildEvent::StageCompleted(stage) => {
                println!("   {} [{step}/{total}] {stage}", "✓".green());
            }
            BuildEvent::StageFailed { stage, error } => {
                println!(
                    "   {} [{step}/{total}] {stage}: {}",
                    "✗".red(),
                    error.red()
                );
            }
        }
    }
}

async fn stats(args: DataFileArgs, mut config: Config) -> Result<()> {
    args.apply(&mut config.server);
    let store = BusinessStore::open(&config.server.data_file);
    let stats = store.read(BusinessState::stats).await;

    println!("{}", "📊 Business statistics".bold());
    println!("   Product:   {}", stats.product);
    println!("   Price:     {}", scalar_text(Some(&stats.price), "0"));
    println!("   Leads:     {}", stats.leads);
    println!("   Customers: {}", stats.customers);
    println!(
        "   Revenue:   {}",
        format!("${:.2}", stats.revenue).green()
    );
    println!("   Created:   {}", stats.created);
    Ok(())
}
