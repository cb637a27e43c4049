use clap::Parser;
use std::fs;
use std::time::Instant;
use tsumiki::prelude::*;

/// Generates a Java class from a block workspace JSON file
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to the workspace (or single block) JSON file
    workspace_path: String,

    /// Path to a generator config JSON file
    #[arg(short, long)]
    config: Option<String>,

    /// Write the generated class here instead of stdout
    #[arg(short, long)]
    output: Option<String>,

    /// Print the block tree to stderr before generating
    #[arg(long)]
    dump_tree: bool,
}

fn main() {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Warn)
        .parse_default_env()
        .init();

    let cli = Cli::parse();
    let total_start = Instant::now();

    // --- 1. Loading ---
    let config = match &cli.config {
        Some(path) => GeneratorConfig::from_file(path)
            .unwrap_or_else(|e| exit_with_error(&format!("Failed to load config: {}", e))),
        None => GeneratorConfig::default(),
    };
    let workspace_json = fs::read_to_string(&cli.workspace_path).unwrap_or_else(|e| {
        exit_with_error(&format!(
            "Failed to read workspace file '{}': {}",
            &cli.workspace_path, e
        ))
    });
    let root: serde_json::Value = serde_json::from_str(&workspace_json)
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to parse workspace JSON: {}", e)));

    if cli.dump_tree {
        match workspace_from_json(&root) {
            Ok(workspace) => eprintln!("{}", DisplayWorkspace(&workspace)),
            Err(e) => eprintln!("Cannot display block tree: {}", e),
        }
    }

    // --- 2. Generation ---
    let generator = Generator::new(config);
    let java = generator
        .generate_json(&root)
        .unwrap_or_else(|e| exit_with_error(&format!("Generation failed: {}", e)));

    // --- 3. Output ---
    match &cli.output {
        Some(path) => {
            fs::write(path, &java).unwrap_or_else(|e| {
                exit_with_error(&format!("Failed to write '{}': {}", path, e))
            });
            eprintln!(
                "Wrote {} ({} lines) in {:?}",
                path,
                java.lines().count(),
                total_start.elapsed()
            );
        }
        None => print!("{}", java),
    }
}

fn exit_with_error(message: &str) -> ! {
    eprintln!("\nError: {}", message);
    std::process::exit(1);
}
