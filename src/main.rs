use clap::{Parser, Subcommand};
use modelfit::analysis::evaluator::USABLE_RAM_FRACTION;
use modelfit::analysis::memory::ACTIVATION_MULTIPLIER;
use modelfit::format::{format_bytes, format_parameter_count, format_size};
use modelfit::storage::huggingface::load_model_records;
use modelfit::storage::settings::{load_settings, save_settings};
use modelfit::types::hardware::HardwareProfile;
use modelfit::{profiles, AnalyzedModel, CompatibilityReport, Error, Session};
use std::collections::BTreeSet;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "modelfit")]
#[command(about = "Check whether published models will run on your hardware", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the built-in hardware profiles
    Profiles,

    /// Check model records (registry JSON files) against a hardware profile
    Check {
        /// JSON files holding one model record or an array of records
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Hardware profile to use instead of the saved one
        #[arg(short, long)]
        profile: Option<String>,

        /// Total system RAM in GB (switches to a custom profile)
        #[arg(long, value_name = "GB")]
        ram: Option<f64>,

        /// Memory per GPU in GB (switches to a custom profile)
        #[arg(long, value_name = "GB")]
        gpu_memory: Option<f64>,

        /// Number of GPUs (switches to a custom profile)
        #[arg(long)]
        gpus: Option<u32>,

        /// Add a supported format, e.g. GGUF (repeatable)
        #[arg(long = "format", value_name = "FORMAT")]
        formats: Vec<String>,

        /// Add a supported quantization, e.g. Q4_K (repeatable)
        #[arg(long = "quant", value_name = "QUANT")]
        quants: Vec<String>,

        /// Only list compatible models
        #[arg(short, long)]
        compatible_only: bool,

        /// List every model, clearing a saved --compatible-only
        #[arg(short, long, conflicts_with = "compatible_only")]
        all: bool,

        /// Show the memory calculation for each model
        #[arg(long)]
        explain: bool,

        /// Output results as JSON
        #[arg(long)]
        json: bool,

        /// Remember the resulting profile and filter for next time
        #[arg(long)]
        save: bool,
    },

    /// Describe how compatibility is calculated
    Explain,
}

struct CheckOptions {
    files: Vec<PathBuf>,
    profile: Option<String>,
    ram: Option<f64>,
    gpu_memory: Option<f64>,
    gpus: Option<u32>,
    formats: Vec<String>,
    quants: Vec<String>,
    compatible_only: bool,
    all: bool,
    explain: bool,
    json: bool,
    save: bool,
}

/// Filter state requested on the command line, if any
fn filter_override(compatible_only: bool, all: bool) -> Option<bool> {
    match (compatible_only, all) {
        (true, _) => Some(true),
        (false, true) => Some(false),
        (false, false) => None,
    }
}

fn join_set(set: &BTreeSet<String>) -> String {
    if set.is_empty() {
        "-".to_string()
    } else {
        set.iter().cloned().collect::<Vec<_>>().join(", ")
    }
}

fn display_profile(profile: &HardwareProfile) {
    println!("{}", profile.name);
    println!(
        "  RAM: {} GB   GPU: {} x {} GB",
        profile.total_ram_gb, profile.gpu_count, profile.gpu_memory_gb
    );
    println!("  Formats: {}", join_set(&profile.supported_formats));
    println!("  Quantizations: {}", join_set(&profile.supported_quantizations));
}

fn display_model(model: &AnalyzedModel, report: &CompatibilityReport, explain: bool) {
    let c = &model.characteristics;
    println!();
    println!("{}", model.info.id);
    if let Some(author) = &model.info.author {
        println!("  Author: {}", author);
    }
    println!("  Downloads: {}", model.info.downloads);
    println!("  Total size: {}", format_size(c.total_size_bytes));
    if c.has_parameter_count() {
        println!("  Parameters: {}", format_parameter_count(c.parameter_count));
    }
    println!("  Formats: {}", join_set(&c.formats));
    println!("  Quantizations: {}", join_set(&c.quantizations));

    match report.failed_gate {
        None => println!("  Compatible with your hardware"),
        Some(gate) => println!("  Not compatible with your hardware ({})", gate.label()),
    }

    if explain {
        if let Some(memory) = &report.memory {
            println!(
                "  Memory: {} params x {} bytes = {}, x {} = {} required, {} available",
                format_parameter_count(memory.num_params),
                memory.bytes_per_param,
                format_bytes(memory.model_memory),
                ACTIVATION_MULTIPLIER,
                format_bytes(memory.required_memory),
                format_bytes(report.available_memory),
            );
        }
    }
}

fn render_json(session: &Session) -> Result<String, Error> {
    let results: Vec<_> = session
        .visible_models()
        .iter()
        .map(|(model, report)| {
            serde_json::json!({
                "model": model.info,
                "characteristics": model.characteristics,
                "compatible": report.is_compatible(),
                "report": report,
            })
        })
        .collect();
    let output = serde_json::json!({
        "profile": session.profile(),
        "models": results,
    });
    Ok(serde_json::to_string_pretty(&output)?)
}

fn run_check(options: CheckOptions) -> Result<(), Error> {
    let settings = load_settings();
    let mut session = Session::from_settings(&settings);

    if let Some(name) = &options.profile {
        session.select_profile(name)?;
    }
    if let Some(gb) = options.ram {
        session.set_total_ram_gb(gb);
    }
    if let Some(gb) = options.gpu_memory {
        session.set_gpu_memory_gb(gb);
    }
    if let Some(count) = options.gpus {
        session.set_gpu_count(count);
    }
    for format in &options.formats {
        session.add_supported_format(format);
    }
    for quant in &options.quants {
        session.add_supported_quantization(quant);
    }
    if let Some(filter) = filter_override(options.compatible_only, options.all) {
        session.set_filter_compatible(filter);
    }

    let mut models = Vec::new();
    for path in &options.files {
        models.extend(load_model_records(path)?);
    }
    session.load_models(models);

    if options.json {
        println!("{}", render_json(&session)?);
    } else {
        let visible = session.visible_models();
        display_profile(session.profile());
        if visible.is_empty() {
            println!("\nNo models to show");
        }
        for (model, report) in &visible {
            display_model(model, report, options.explain);
        }
    }

    if options.save {
        save_settings(&session.to_settings())?;
        tracing::info!("Saved settings");
    }

    Ok(())
}

fn run_explain() {
    println!("A model is compatible when it passes three checks, in order:");
    println!();
    println!("1. Format: one of the model's formats (GGUF, safetensors) is supported.");
    println!("   Models with no recognized format are never compatible.");
    println!("2. Quantization: one of the model's quantizations is supported.");
    println!("   Models without quantization tags are treated as FP32.");
    println!("3. Memory: the estimated requirement fits in the available memory.");
    println!();
    println!("Bytes per parameter: FP16 = 2, INT8/Q8 = 1, Q2_K..Q6_K/Q4/Q5 = 0.5, otherwise 4.");
    println!("Parameters come from a params_<n>.txt file, or total size / bytes per parameter.");
    println!(
        "Required memory = parameters x bytes per parameter x {}.",
        ACTIVATION_MULTIPLIER
    );
    println!(
        "Available memory = GPU memory x GPU count + {}% of system RAM.",
        USABLE_RAM_FRACTION * 100.0
    );
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("modelfit=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Profiles => {
            for profile in profiles() {
                display_profile(profile);
            }
            Ok(())
        }

        Commands::Check {
            files,
            profile,
            ram,
            gpu_memory,
            gpus,
            formats,
            quants,
            compatible_only,
            all,
            explain,
            json,
            save,
        } => run_check(CheckOptions {
            files,
            profile,
            ram,
            gpu_memory,
            gpus,
            formats,
            quants,
            compatible_only,
            all,
            explain,
            json,
            save,
        }),

        Commands::Explain => {
            run_explain();
            Ok(())
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use modelfit::storage::settings::Settings;
    use modelfit::{ModelFile, ModelInfo};

    fn session_with_models(settings: &Settings) -> Session {
        let mut session = Session::from_settings(settings);
        session.load_models(vec![
            ModelInfo {
                id: "small-fp16".to_string(),
                files: vec![ModelFile::new("model-fp16.gguf", 1024)],
                ..Default::default()
            },
            ModelInfo {
                id: "weights-only".to_string(),
                files: vec![ModelFile::new("pytorch_model.bin", 1024)],
                ..Default::default()
            },
        ]);
        session
    }

    #[test]
    fn test_filter_flags() {
        assert_eq!(filter_override(false, false), None);
        assert_eq!(filter_override(true, false), Some(true));
        assert_eq!(filter_override(false, true), Some(false));
    }

    #[test]
    fn test_all_clears_saved_filter() {
        let saved = Settings {
            filter_compatible: true,
            ..Default::default()
        };
        let mut session = session_with_models(&saved);
        assert_eq!(session.visible_models().len(), 1);

        if let Some(filter) = filter_override(false, true) {
            session.set_filter_compatible(filter);
        }
        assert!(!session.filter_compatible());
        assert_eq!(session.visible_models().len(), 2);
        assert!(!session.to_settings().filter_compatible);
    }

    #[test]
    fn test_all_conflicts_with_compatible_only() {
        let parsed = Cli::try_parse_from(["modelfit", "check", "--all", "-c", "models.json"]);
        assert!(parsed.is_err());

        let parsed = Cli::try_parse_from(["modelfit", "check", "--all", "models.json"]);
        assert!(matches!(
            parsed.map(|cli| cli.command),
            Ok(Commands::Check { all: true, compatible_only: false, .. })
        ));
    }

    #[test]
    fn test_render_json() {
        let session = session_with_models(&Settings::default());
        let rendered = render_json(&session).unwrap();
        let value: serde_json::Value = serde_json::from_str(&rendered).unwrap();

        assert_eq!(value["profile"]["name"], "Custom");
        let models = value["models"].as_array().unwrap();
        assert_eq!(models.len(), 2);
        assert_eq!(models[0]["model"]["id"], "small-fp16");
        assert_eq!(models[0]["compatible"], true);
        assert_eq!(models[1]["compatible"], false);
    }
}
