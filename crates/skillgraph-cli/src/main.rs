//! CLI binary for skillgraph: infer explicit and implicit skills from plain-text documents.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use skillgraph_core::config::{ScoreBasis, SkillConfig};
use skillgraph_core::hierarchy::HierarchyGraph;
use skillgraph_core::storage;
use skillgraph_infer::{InferenceEngine, InferenceResult};
use std::collections::BTreeSet;
use std::io::Read;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "skillgraph", about = "Infer skills from text using a skill implication graph")]
struct Cli {
    /// Project root directory (defaults to current directory)
    #[arg(short, long, global = true)]
    project: Option<PathBuf>,

    /// Skill hierarchy JSON file (overrides config)
    #[arg(long, global = true)]
    hierarchy: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Detect explicit skills and infer implicit ones from text files
    Infer {
        /// Plain-text files to analyze ("-" reads stdin)
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Print JSON instead of lists
        #[arg(long)]
        json: bool,
    },

    /// Score inferred skills against a set of required skills
    Score {
        /// Plain-text files to analyze ("-" reads stdin)
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Required skill (repeatable or comma-separated)
        #[arg(short, long = "require", value_delimiter = ',', required = true)]
        required: Vec<String>,

        /// Candidate set to score: all, explicit
        #[arg(short, long)]
        basis: Option<ScoreBasis>,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Show skill hierarchy statistics
    Info,

    /// Validate the skill hierarchy definition (shape, cycles, self-loops)
    Validate,

    /// Print the normalized hierarchy definition (lowercased, merged keys)
    Normalize {
        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn get_project_root(cli: &Cli) -> Result<PathBuf> {
    match &cli.project {
        Some(p) => Ok(p.clone()),
        None => std::env::current_dir().context("failed to get current directory"),
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let project_root = get_project_root(&cli)?;
    let config = SkillConfig::load(&project_root)?;
    let hierarchy_path = match &cli.hierarchy {
        Some(path) => path.clone(),
        None => config.hierarchy_path(&project_root),
    };

    match cli.command {
        Commands::Infer { files, json } => {
            let engine = load_engine(&hierarchy_path);
            cmd_infer(&engine, &files, json || config.output.json)
        }
        Commands::Score {
            files,
            required,
            basis,
            json,
        } => {
            let engine = load_engine(&hierarchy_path);
            cmd_score(
                &engine,
                &files,
                &required,
                basis.unwrap_or(config.scoring.basis),
                json || config.output.json,
            )
        }
        Commands::Info => cmd_info(&hierarchy_path),
        Commands::Validate => cmd_validate(&hierarchy_path),
        Commands::Normalize { output } => cmd_normalize(&hierarchy_path, output.as_deref()),
    }
}

/// Build the one engine used for this run. A bad hierarchy degrades to an empty graph.
fn load_engine(hierarchy_path: &Path) -> InferenceEngine {
    let outcome = storage::load_graph_or_empty(hierarchy_path);
    if outcome.is_degraded() {
        eprintln!("No skills can be detected: the skill hierarchy could not be loaded.");
    } else {
        tracing::info!(
            "loaded {} skills from {}",
            outcome.graph.skill_count(),
            hierarchy_path.display()
        );
    }
    InferenceEngine::new(outcome.graph)
}

/// Read documents as plain text. Converting other formats is left to the caller.
fn read_documents(files: &[PathBuf]) -> Result<Vec<String>> {
    read_documents_from(files, std::io::stdin().lock())
}

/// Stdin is consumed on its first `-`; later `-` entries reuse that text.
fn read_documents_from(files: &[PathBuf], mut stdin: impl Read) -> Result<Vec<String>> {
    let mut stdin_text: Option<String> = None;
    files
        .iter()
        .map(|path| {
            if path.as_os_str() == "-" {
                if let Some(text) = &stdin_text {
                    return Ok(text.clone());
                }
                let mut text = String::new();
                stdin
                    .read_to_string(&mut text)
                    .context("failed to read text from stdin")?;
                stdin_text = Some(text.clone());
                Ok(text)
            } else {
                std::fs::read_to_string(path)
                    .with_context(|| format!("failed to read {}", path.display()))
            }
        })
        .collect()
}

fn print_skill_list(title: &str, skills: &BTreeSet<String>, empty_message: &str) {
    if skills.is_empty() {
        println!("{}: {}", title, empty_message);
        return;
    }
    println!("{} ({}):", title, skills.len());
    for skill in skills {
        println!("  - {}", skill);
    }
}

fn print_result(result: &InferenceResult) {
    print_skill_list(
        "Explicit skills",
        &result.explicit,
        "none found matching the hierarchy",
    );
    print_skill_list(
        "Implicit skills",
        &result.implicit,
        "nothing new inferred from the explicit skills",
    );
    if result.all.is_empty() {
        println!("All skills: none detected or inferred");
    } else {
        let all: Vec<&str> = result.all.iter().map(String::as_str).collect();
        println!("All skills ({}): {}", all.len(), all.join(", "));
    }
}

fn cmd_infer(engine: &InferenceEngine, files: &[PathBuf], json: bool) -> Result<()> {
    let texts = read_documents(files)?;
    let results = engine.infer_many(&texts);

    if json {
        let entries: Vec<serde_json::Value> = files
            .iter()
            .zip(&results)
            .map(|(path, result)| {
                serde_json::json!({
                    "source": path.display().to_string(),
                    "explicit": result.explicit,
                    "implicit": result.implicit,
                    "all": result.all,
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    for (i, (path, result)) in files.iter().zip(&results).enumerate() {
        if files.len() > 1 {
            if i > 0 {
                println!();
            }
            println!("== {} ==", path.display());
        }
        print_result(result);
    }
    Ok(())
}

fn cmd_score(
    engine: &InferenceEngine,
    files: &[PathBuf],
    required: &[String],
    basis: ScoreBasis,
    json: bool,
) -> Result<()> {
    let texts = read_documents(files)?;
    let results = engine.infer_many(&texts);

    if json {
        let entries: Vec<serde_json::Value> = files
            .iter()
            .zip(&results)
            .map(|(path, result)| {
                let report = result.score_against(required, basis);
                serde_json::json!({
                    "source": path.display().to_string(),
                    "basis": basis.to_string(),
                    "score": report.score,
                    "matched": report.matched,
                    "missing": report.missing,
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    for (i, (path, result)) in files.iter().zip(&results).enumerate() {
        if i > 0 {
            println!();
        }
        let report = result.score_against(required, basis);
        println!("== {} ==", path.display());
        println!("Match score ({} skills): {:.2}%", basis, report.score);
        print_skill_list("Matched", &report.matched, "none");
        print_skill_list("Missing", &report.missing, "none");
    }
    Ok(())
}

fn cmd_info(hierarchy_path: &Path) -> Result<()> {
    let outcome = storage::load_graph_or_empty(hierarchy_path);

    println!("Hierarchy: {}", hierarchy_path.display());
    if let Some(err) = &outcome.error {
        println!("Status: unavailable ({})", err);
        return Ok(());
    }

    let graph = &outcome.graph;
    let with_implications = graph.edges().filter(|(_, t)| !t.is_empty()).count();
    println!("Skills: {}", graph.skill_count());
    println!("Implications: {}", graph.edge_count());
    println!("Skills with implications: {}", with_implications);
    println!("Self-loops: {}", graph.self_loops().len());
    println!("Cycles: {}", if graph.has_cycle() { "yes" } else { "no" });
    Ok(())
}

fn cmd_validate(hierarchy_path: &Path) -> Result<()> {
    let definition = storage::load_definition(hierarchy_path)?;
    let graph = HierarchyGraph::build(&definition);
    let mut issues = 0;

    let merged = definition.merged_key_count();
    if merged > 0 {
        println!(
            "WARN: {} key(s) collapse onto an existing skill after lowercasing; their implications are merged",
            merged
        );
        issues += 1;
    }

    for skill in graph.self_loops() {
        println!("WARN: skill implies itself: {}", skill);
        issues += 1;
    }

    if graph.has_cycle() {
        println!("WARN: implication cycle detected (inference still terminates)");
        issues += 1;
    }

    if issues == 0 {
        eprintln!("Hierarchy is valid. No issues found.");
    } else {
        eprintln!("\nFound {} warning(s).", issues);
    }
    eprintln!(
        "  {} skills, {} implications",
        graph.skill_count(),
        graph.edge_count()
    );

    Ok(())
}

fn cmd_normalize(hierarchy_path: &Path, output: Option<&Path>) -> Result<()> {
    let graph = storage::load_graph(hierarchy_path)?;
    let normalized = graph.to_definition();

    match output {
        Some(path) => {
            storage::save_definition(path, &normalized)?;
            eprintln!(
                "Wrote {} skills to {}",
                graph.skill_count(),
                path.display()
            );
        }
        None => println!("{}", normalized.to_json()?),
    }
    Ok(())
}
