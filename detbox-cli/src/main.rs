use clap::Parser;
use detbox::{
    DetectionResult, Pipeline, PipelineConfig, ScoreActivation, Size, SuppressionMode, TensorView,
};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

const SCHEMA_JSON: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/config.schema.json"));
const EXAMPLE_JSON: &str =
    include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/config.example.json"));

#[derive(Parser, Debug)]
#[command(author, version, about = "Detbox CLI (JSON config driven)")]
struct Cli {
    /// Path to the JSON configuration file.
    #[arg(short, long, value_name = "FILE", default_value = "config.json")]
    config: PathBuf,
    /// Print the JSON schema and exit.
    #[arg(long)]
    print_schema: bool,
    /// Print an example config and exit.
    #[arg(long)]
    print_example: bool,
    /// Enable tracing output for pipeline stage timings.
    #[arg(long)]
    trace: bool,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "snake_case")]
enum ActivationConfig {
    Identity,
    Sigmoid,
}

impl From<ActivationConfig> for ScoreActivation {
    fn from(value: ActivationConfig) -> Self {
        match value {
            ActivationConfig::Identity => ScoreActivation::Identity,
            ActivationConfig::Sigmoid => ScoreActivation::Sigmoid,
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "snake_case")]
enum SuppressionConfig {
    Global,
    PerClass,
}

impl From<SuppressionConfig> for SuppressionMode {
    fn from(value: SuppressionConfig) -> Self {
        match value {
            SuppressionConfig::Global => SuppressionMode::Global,
            SuppressionConfig::PerClass => SuppressionMode::PerClass,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct PipelineConfigJson {
    confidence_threshold: f32,
    iou_threshold: f32,
    suppression: SuppressionConfig,
    input_width: f32,
    input_height: f32,
}

impl Default for PipelineConfigJson {
    fn default() -> Self {
        let cfg = PipelineConfig::default();
        Self {
            confidence_threshold: cfg.confidence_threshold,
            iou_threshold: cfg.iou_threshold,
            suppression: SuppressionConfig::Global,
            input_width: cfg.input_size.width,
            input_height: cfg.input_size.height,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct Config {
    tensor_path: String,
    channels: usize,
    candidates: usize,
    labels: Vec<String>,
    labels_path: Option<String>,
    original_width: f32,
    original_height: f32,
    output_path: Option<String>,
    activation: Option<ActivationConfig>,
    pipeline: PipelineConfigJson,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tensor_path: String::new(),
            channels: 24,
            candidates: 8400,
            labels: Vec::new(),
            labels_path: None,
            original_width: 640.0,
            original_height: 640.0,
            output_path: None,
            activation: None,
            pipeline: PipelineConfigJson::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
struct DetectionRecord {
    label: String,
    class: usize,
    confidence: f32,
    x1: f32,
    y1: f32,
    x2: f32,
    y2: f32,
}

impl From<DetectionResult<'_>> for DetectionRecord {
    fn from(value: DetectionResult<'_>) -> Self {
        Self {
            label: value.label.to_string(),
            class: value.class,
            confidence: value.confidence,
            x1: value.bbox.x1,
            y1: value.bbox.y1,
            x2: value.bbox.x2,
            y2: value.bbox.y2,
        }
    }
}

#[derive(Debug, Serialize)]
struct Output {
    best: Option<DetectionRecord>,
    detections: Vec<DetectionRecord>,
}

/// Loads a tensor buffer from a flat JSON array (`.json`) or raw
/// little-endian f32 bytes (any other extension).
fn load_tensor(path: &str) -> Result<Vec<f32>, Box<dyn std::error::Error>> {
    if path.ends_with(".json") {
        let text = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    } else {
        let bytes = fs::read(path)?;
        if bytes.len() % 4 != 0 {
            return Err(format!("{path}: byte length {} is not a multiple of 4", bytes.len()).into());
        }
        Ok(bytes
            .chunks_exact(4)
            .map(|b| f32::from_le_bytes([b[0], b[1], b[2], b[3]]))
            .collect())
    }
}

fn load_labels(config: &Config) -> Result<Vec<String>, Box<dyn std::error::Error>> {
    if !config.labels.is_empty() {
        return Ok(config.labels.clone());
    }
    let Some(path) = &config.labels_path else {
        return Err("either labels or labels_path must be set in the config".into());
    };
    let text = fs::read_to_string(path)?;
    Ok(text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if cli.trace {
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env().add_directive("detbox=info".parse()?))
            .with_target(false)
            .init();
    }

    if cli.print_schema {
        println!("{SCHEMA_JSON}");
        return Ok(());
    }
    if cli.print_example {
        println!("{EXAMPLE_JSON}");
        return Ok(());
    }

    let config_text = fs::read_to_string(&cli.config)?;
    let config: Config = serde_json::from_str(&config_text)?;
    if config.tensor_path.is_empty() {
        return Err("tensor_path must be set in the config".into());
    }
    let Some(activation) = config.activation else {
        return Err("activation must be set to \"identity\" or \"sigmoid\" in the config".into());
    };

    let data = load_tensor(&config.tensor_path)?;
    let labels = load_labels(&config)?;
    let label_refs: Vec<&str> = labels.iter().map(String::as_str).collect();

    let tensor = TensorView::new(&data, config.channels, config.candidates)?;
    let pipeline = Pipeline::new(activation.into()).with_config(PipelineConfig {
        confidence_threshold: config.pipeline.confidence_threshold,
        iou_threshold: config.pipeline.iou_threshold,
        suppression: config.pipeline.suppression.into(),
        input_size: Size::new(config.pipeline.input_width, config.pipeline.input_height),
    });

    let original = Size::new(config.original_width, config.original_height);
    let detections = pipeline.run(tensor, &label_refs, original)?;
    tracing::info!(count = detections.len(), "pipeline finished");

    let records: Vec<DetectionRecord> = detections.into_iter().map(DetectionRecord::from).collect();
    let output = Output {
        best: records.first().cloned(),
        detections: records,
    };
    let json = serde_json::to_string_pretty(&output)?;

    match config.output_path {
        Some(path) => fs::write(path, json)?,
        None => println!("{json}"),
    }

    Ok(())
}
