use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use cover_letter_generator::app::{App, GenerateOutcome};
use cover_letter_generator::models::{Config, LetterLength, LetterStyle, ProfileFields};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "cover-letter")]
#[command(about = "Generate tailored cover letters from your background and a job description")]
struct CliArgs {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Generate a cover letter and print it to stdout.
    Generate(GenerateArgs),
    /// Manage the saved profile (name, recent position, background).
    Profile {
        #[command(subcommand)]
        action: ProfileAction,
    },
}

#[derive(Debug, Args)]
struct ProfileArgs {
    /// Full name. Falls back to the saved profile.
    #[arg(long)]
    name: Option<String>,
    /// Most recent position. Falls back to the saved profile.
    #[arg(long)]
    recent_position: Option<String>,
    /// Experience and skills summary. Falls back to the saved profile.
    #[arg(long, value_name = "TEXT", conflicts_with = "background_file")]
    background: Option<String>,
    /// Read the experience and skills summary from a file.
    #[arg(long, value_name = "PATH")]
    background_file: Option<PathBuf>,
}

#[derive(Debug, Args)]
struct GenerateArgs {
    #[command(flatten)]
    profile: ProfileArgs,
    /// Company or recipient, e.g. "Google" or "Dr. Jane Smith".
    #[arg(long)]
    company: Option<String>,
    /// Position applied for.
    #[arg(long)]
    position: Option<String>,
    /// Job description text.
    #[arg(long, value_name = "TEXT", conflicts_with = "job_description_file")]
    job_description: Option<String>,
    /// Read the job description from a file.
    #[arg(long, value_name = "PATH")]
    job_description_file: Option<PathBuf>,
    /// Approximate word count: 50, 100, 200, or 500.
    #[arg(long, default_value = "200", value_parser = parse_length_arg)]
    length: LetterLength,
    /// Tone: professional, impact, storytelling, passionate, or creative.
    #[arg(long, default_value = "professional", value_parser = parse_style_arg)]
    style: LetterStyle,
    /// Copy the letter to the system clipboard. On X11 the copied text only
    /// outlives this command if a clipboard manager is running.
    #[arg(long)]
    copy: bool,
    /// Also save the letter as cover-letter.pdf in the output directory.
    #[arg(long)]
    pdf: bool,
    /// Save name, recent position, and background as the profile first.
    #[arg(long)]
    save_profile: bool,
}

#[derive(Debug, Subcommand)]
enum ProfileAction {
    /// Print the saved profile as JSON.
    Show,
    /// Save the given values (merged over the saved profile).
    Save(ProfileArgs),
    /// Delete the saved profile.
    Clear {
        /// Skip the confirmation prompt.
        #[arg(long)]
        yes: bool,
    },
}

fn parse_length_arg(input: &str) -> std::result::Result<LetterLength, String> {
    input.parse()
}

fn parse_style_arg(input: &str) -> std::result::Result<LetterStyle, String> {
    input.parse()
}

fn read_text(inline: Option<String>, file: Option<&PathBuf>) -> Result<Option<String>> {
    match (inline, file) {
        (Some(text), _) => Ok(Some(text)),
        (None, Some(path)) => std::fs::read_to_string(path)
            .map(Some)
            .with_context(|| format!("Failed to read {}", path.display())),
        (None, None) => Ok(None),
    }
}

fn apply_profile_args(app: &App, args: ProfileArgs) -> Result<()> {
    if let Some(name) = args.name {
        app.set_name(name);
    }
    if let Some(position) = args.recent_position {
        app.set_recent_position(position);
    }
    if let Some(background) = read_text(args.background, args.background_file.as_ref())? {
        app.set_background(background);
    }
    Ok(())
}

fn confirm_on_stdin(prompt: &str) -> bool {
    eprint!("{} [y/N] ", prompt);
    if io::stderr().flush().is_err() {
        return false;
    }

    let mut answer = String::new();
    if io::stdin().lock().read_line(&mut answer).is_err() {
        return false;
    }
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

async fn run_generate(app: &App, args: GenerateArgs) -> Result<()> {
    apply_profile_args(app, args.profile)?;
    if let Some(company) = args.company {
        app.set_company_name(company);
    }
    if let Some(position) = args.position {
        app.set_target_position(position);
    }
    if let Some(jd) = read_text(args.job_description, args.job_description_file.as_ref())? {
        app.set_job_description(jd);
    }
    app.set_length(args.length);
    app.set_style(args.style);

    if args.save_profile {
        app.save_profile()?;
    }

    if !app.api_key_present() {
        warn!("API_KEY is not set; generation will fail");
    }

    let letter = match app.generate().await {
        GenerateOutcome::Completed(text) => text,
        GenerateOutcome::Failed(message) | GenerateOutcome::Rejected(message) => {
            anyhow::bail!(message)
        }
        GenerateOutcome::Superseded | GenerateOutcome::Ignored => {
            anyhow::bail!("Generation was superseded by another request")
        }
    };

    println!("{}", letter);

    if args.copy && app.copy_result()? {
        info!("Copied cover letter to clipboard");
    }
    if args.pdf {
        if let Some(path) = app.export_pdf()? {
            info!("Saved PDF to {}", path.display());
        }
    }
    Ok(())
}

fn run_profile(app: &App, action: ProfileAction) -> Result<()> {
    match action {
        ProfileAction::Show => {
            let profile: ProfileFields = app.view().profile;
            println!("{}", serde_json::to_string_pretty(&profile)?);
        }
        ProfileAction::Save(args) => {
            apply_profile_args(app, args)?;
            app.save_profile()?;
            info!("Profile saved");
        }
        ProfileAction::Clear { yes } => {
            let cleared = app.clear_profile(|prompt| yes || confirm_on_stdin(prompt))?;
            if cleared {
                info!("Profile cleared");
            } else {
                info!("Profile left unchanged");
            }
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cover_letter_generator=info,cover_letter=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let args = CliArgs::parse();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };
    let app = App::new(&config);

    let outcome = match args.command {
        Command::Generate(generate_args) => run_generate(&app, generate_args).await,
        Command::Profile { action } => run_profile(&app, action),
    };

    if let Err(e) = outcome {
        error!("{:#}", e);
        std::process::exit(1);
    }
    Ok(())
}
