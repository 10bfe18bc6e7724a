use {
    anyhow::{Context, Result},
    base::log_info,
    infer::{ModelConfig, TractGraph},
    std::{env, future::Future, path::PathBuf, sync::Arc, time::Duration},
};

const TOP_K: usize = 10;
const TIMEOUT: Duration = Duration::from_secs(10);

/// One label per line; the empty entry after a trailing newline is dropped.
fn parse_labels(text: &str) -> Vec<String> {
    let mut labels: Vec<String> = text
        .split('\n')
        .map(|line| line.trim_end_matches('\r').to_string())
        .collect();
    if labels.last().is_some_and(|label| label.is_empty()) {
        labels.pop();
    }
    labels
}

/// Drives `future` on a fresh runtime, then shuts it down without waiting for
/// blocking workers still running a cancelled graph.
fn block_on_detached<F: Future>(future: F) -> Result<F::Output> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    let output = runtime.block_on(future);
    runtime.shutdown_background();
    Ok(output)
}

fn main() -> Result<()> {
    block_on_detached(run())?
}

async fn run() -> Result<()> {
    match env::var_os("LOG_DIR") {
        Some(dir) => base::init_file_logger(PathBuf::from(dir))?,
        None => base::init_stdout_logger(),
    }

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        eprintln!("Usage: {} <image>", args[0]);
        eprintln!(
            "  MODEL=<graph.pb> MODEL_CONFIG=<model.json> [LABELS=<labels.txt>] [LOG_DIR=<dir>]"
        );
        std::process::exit(1);
    }

    let model_path: PathBuf = env::var("MODEL")
        .unwrap_or_else(|_| "models/model.pb".to_string())
        .into();
    let config_path: PathBuf = env::var("MODEL_CONFIG")
        .unwrap_or_else(|_| "models/model.json".to_string())
        .into();

    let config = ModelConfig::load(&config_path)?;
    let input_shape = config
        .input_shape()
        .context("the input layer needs spatial dimensions to type a TensorFlow graph")?;
    let graph = TractGraph::load_tensorflow(&model_path, &config.input.key, &input_shape)?;

    let mut builder = config.builder(Arc::new(graph));
    if let Some(path) = env::var_os("LABELS")
        .map(PathBuf::from)
        .or_else(|| config.labels.clone())
    {
        let text = std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read labels from {}", path.display()))?;
        let labels = parse_labels(&text);
        log_info!("Loaded {} labels from {}", labels.len(), path.display());
        builder = builder.with_classes(labels);
    }
    let model = builder.build()?;

    let file = tokio::fs::File::open(&args[1])
        .await
        .with_context(|| format!("failed to open {}", args[1]))?;
    let predictions = model
        .evaluate_with_timeout(file, config.options, TIMEOUT)
        .await?;

    println!("{}", serde_json::to_string_pretty(predictions.top(TOP_K))?);
    Ok(())
}
