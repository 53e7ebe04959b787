//! ruletask - run a business-rule task scenario from JSON
//!
//! シナリオファイルに決定定義・固定の評価結果・タスク設定・初期変数を
//! 書いておき、1 回だけ実行して結果の変数と履歴イベントを JSON で出力します。

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Deserialize;
use serde_json::json;
use tracing::info;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use ruletask_core::app::{DecisionEngine, EngineBuilder};
use ruletask_core::domain::{
    DecisionDefinition, DecisionTaskSpec, EngineConfig, EvaluationContext, EvaluationResult,
    ExecutionContext, TypedValue,
};
use ruletask_core::impls::{
    ExecutionFrame, FixtureEvaluator, InMemoryDecisionRepository, InMemoryHistorySink,
    TracingInterceptor,
};

/// Business-rule task runner.
#[derive(Parser)]
#[command(name = "ruletask", version, about = "Run business-rule task scenarios")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Deploy the scenario's task and execute it once inside a process frame
    Run {
        /// Path to the scenario JSON file
        scenario: PathBuf,
    },
    /// Evaluate the task's decision standalone, outside any process
    Evaluate {
        /// Path to the scenario JSON file
        scenario: PathBuf,
    },
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Scenario {
    #[serde(default)]
    config: EngineConfig,
    decisions: Vec<DecisionFixture>,
    task: DecisionTaskSpec,
    execution: ExecutionContext,
    /// Plain JSON values; kinds are inferred.
    #[serde(default)]
    variables: BTreeMap<String, serde_json::Value>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DecisionFixture {
    #[serde(flatten)]
    definition: DecisionDefinition,
    #[serde(default)]
    result: Option<EvaluationResult>,
    #[serde(default)]
    failure: Option<String>,
}

fn main() -> Result<()> {
    init_tracing()?;

    let cli = Cli::parse();
    let output = match cli.command {
        Commands::Run { scenario } => run(&load(&scenario)?)?,
        Commands::Evaluate { scenario } => evaluate(&load(&scenario)?)?,
    };
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn init_tracing() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize tracing: {}", e))
}

fn load(path: &Path) -> Result<Scenario> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading scenario {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("parsing scenario {}", path.display()))
}

fn engine(scenario: &Scenario, sink: Arc<InMemoryHistorySink>) -> Result<DecisionEngine> {
    let repository = InMemoryDecisionRepository::new();
    let mut evaluator = FixtureEvaluator::new();
    for fixture in &scenario.decisions {
        let id = fixture.definition.id.clone();
        evaluator = match (&fixture.result, &fixture.failure) {
            (_, Some(message)) => evaluator.with_failure(id, message.clone()),
            (Some(result), None) => evaluator.with_result(id, result.clone().reindexed()),
            (None, None) => evaluator.with_result(id, EvaluationResult::new()),
        };
        repository.deploy(fixture.definition.clone())?;
    }

    let engine = EngineBuilder::new()
        .evaluator(Arc::new(evaluator))
        .resolver(Arc::new(repository))
        .history_sink(sink)
        .interceptor(Arc::new(TracingInterceptor))
        .config(scenario.config.clone())
        .build()?;
    Ok(engine)
}

fn initial_variables(scenario: &Scenario) -> impl Iterator<Item = (String, TypedValue)> + '_ {
    scenario
        .variables
        .iter()
        .map(|(name, value)| (name.clone(), TypedValue::untyped(value.clone())))
}

fn run(scenario: &Scenario) -> Result<serde_json::Value> {
    let sink = Arc::new(InMemoryHistorySink::new());
    let engine = engine(scenario, sink.clone())?;
    let task = engine.deploy(scenario.task.clone())?;

    let mut frame = ExecutionFrame::from_variables(initial_variables(scenario));
    let completion = engine
        .execute(&task, &mut frame, &scenario.execution)
        .with_context(|| format!("executing activity '{}'", task.activity_id()))?;
    let outcome = frame.end();
    info!(activity_id = %completion.activity_id, "scenario finished");

    Ok(json!({
        "completion": completion,
        "variables": outcome.variables,
        "variableHistory": outcome.history,
        "historyEvents": sink.events(),
    }))
}

fn evaluate(scenario: &Scenario) -> Result<serde_json::Value> {
    let sink = Arc::new(InMemoryHistorySink::new());
    let engine = engine(scenario, sink.clone())?;
    let variables: EvaluationContext = initial_variables(scenario).collect();

    let result = engine
        .decision_service()
        .evaluate_decision(&scenario.task.decision_ref, variables)
        .with_context(|| format!("evaluating decision '{}'", scenario.task.decision_ref))?;

    Ok(json!({
        "result": result,
        "historyEvents": sink.events(),
    }))
}
