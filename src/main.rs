//! quill - CLI entry point.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use quill::branch::generate_branch_name;
use quill::commit::generate_commit_message;
use quill::config::GeneratorConfig;
use quill::error::{ChangesError, GeneratorError};
use quill::git::{
    GitExecutor, check_git_installed, current_branch, open_repository, stage_all, staged_diff,
    working_diff,
};
use quill::llm::OpenAiGenerator;
use quill::ui;

/// Generate commit messages and branch names from git diffs.
#[derive(Parser, Debug)]
#[command(name = "quill")]
#[command(about = "Generate commit messages and branch names from git diffs")]
#[command(version)]
struct Cli {
    /// Model to use (overrides QUILL_MODEL)
    #[arg(long, global = true)]
    model: Option<String>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate a commit message for staged changes and commit
    Commit {
        /// Stage all changes before generating
        #[arg(short, long)]
        all: bool,

        /// Commit without asking for confirmation
        #[arg(short, long)]
        yes: bool,

        /// Print the message without committing
        #[arg(long)]
        dry_run: bool,
    },

    /// Generate a branch name for pending changes and switch to it
    Branch {
        /// Create the branch without asking for confirmation
        #[arg(short, long)]
        yes: bool,

        /// Print the name without creating the branch
        #[arg(long)]
        dry_run: bool,
    },

    /// Print setup instructions
    Init,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(cli).await {
        eprintln!("Error: {}", e);
        for cause in e.chain().skip(1) {
            eprintln!("  caused by: {}", cause);
        }
        if let Some(hint) = hint_for(&e) {
            eprintln!("\n{}", hint);
        }
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Commit { all, yes, dry_run } => run_commit(cli.model, all, yes, dry_run).await,
        Commands::Branch { yes, dry_run } => run_branch(cli.model, yes, dry_run).await,
        Commands::Init => {
            println!("{}", ui::init_instructions());
            Ok(())
        }
    }
}

async fn run_commit(model: Option<String>, all: bool, yes: bool, dry_run: bool) -> Result<()> {
    // Step 1: Check prerequisites
    check_git_installed()?;
    let generator = build_generator(model)?;

    // Step 2: Collect staged changes
    let repo = open_repository(".")?;
    if all {
        stage_all(&repo)?;
    }

    let Some(diff) = staged_diff(&repo)? else {
        println!("No staged changes found.");
        println!("Use \"git add <files>\" to stage your changes first.");
        return Ok(());
    };

    // Step 3: Generate
    println!("Analyzing changes...");
    let (message, representation) = generate_commit_message(&generator, &diff)
        .await
        .context("Failed to generate commit message")?;

    if let Some(notice) = ui::representation_notice(&representation) {
        println!("{}", notice);
    }
    println!("{}", ui::format_commit_preview(&message));

    if dry_run {
        println!("Dry run complete. No commit made.");
        return Ok(());
    }

    // Step 4: Confirm and commit
    if !yes && !ui::confirm_commit().context("Failed to read confirmation")? {
        println!("Commit cancelled.");
        return Ok(());
    }

    let workdir = repo.workdir().context("Repository has no working directory")?;
    GitExecutor::new(workdir).commit(&message.text)?;
    println!("✓ Committed: {}", message);

    Ok(())
}

async fn run_branch(model: Option<String>, yes: bool, dry_run: bool) -> Result<()> {
    // Step 1: Check prerequisites
    check_git_installed()?;
    let generator = build_generator(model)?;

    // Step 2: Collect changes, staged first
    let repo = open_repository(".")?;
    let diff = match staged_diff(&repo)? {
        Some(diff) => diff,
        None => match working_diff(&repo)? {
            Some(diff) => diff,
            None => {
                println!("No changes found.");
                println!("Make some changes first, then run quill branch again.");
                return Ok(());
            }
        },
    };

    // Step 3: Generate
    println!("Analyzing changes...");
    let (name, representation) = generate_branch_name(&generator, &diff)
        .await
        .context("Failed to generate branch name")?;

    if let Some(notice) = ui::representation_notice(&representation) {
        println!("{}", notice);
    }
    if let Some(current) = current_branch(&repo) {
        println!("Current branch: {}", current);
    }
    println!("{}", ui::format_branch_preview(&name));

    if dry_run {
        println!("Dry run complete. No branch created.");
        return Ok(());
    }

    // Step 4: Confirm and create
    if !yes && !ui::confirm_branch().context("Failed to read confirmation")? {
        println!("Branch creation cancelled.");
        return Ok(());
    }

    let workdir = repo.workdir().context("Repository has no working directory")?;
    GitExecutor::new(workdir).create_branch(&name.to_string())?;
    println!("✓ Switched to new branch: {}", name);

    Ok(())
}

fn build_generator(model: Option<String>) -> Result<OpenAiGenerator> {
    let config = GeneratorConfig::from_env().with_model(model);
    config.validate().context("Invalid configuration")?;
    Ok(OpenAiGenerator::new(&config)?)
}

/// Find a user-facing suggestion anywhere in the error chain.
fn hint_for(error: &anyhow::Error) -> Option<&'static str> {
    error.chain().find_map(|cause| {
        if let Some(e) = cause.downcast_ref::<GeneratorError>() {
            return e.hint();
        }
        if let Some(ChangesError::NotARepository(_)) = cause.downcast_ref::<ChangesError>() {
            return Some("Make sure you are inside a git repository.");
        }
        None
    })
}
