//! wikimedia - import a page from Wikipedia or a sister project as clean HTML

use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use wikimedia::core::print_error_message;
use wikimedia::env::{generate_env_docs, EnvConfig};
use wikimedia::{
    process_content, GarbageRules, MemoryStore, PageStore, ProjectRegistry, Session,
    SisterProjectLink, UpdateRequest, WikimediaError, WikipageManager,
};

#[derive(Parser)]
#[command(name = "wikimedia")]
#[command(version, about = "Import a wiki page as clean HTML", long_about = None)]
#[command(after_help = "EXAMPLES:
    wikimedia -l ru Большой_Лебовски         Article body from ru.wikipedia.org
    wikimedia -p wikiquote The_Big_Lebowski   Same page on English Wikiquote
    wikimedia -l ru -f saved.html             Clean a page saved earlier")]
struct Cli {
    /// Page title as it appears in the wiki URL
    #[arg(value_name = "TITLE", required_unless_present_any = ["file", "list_projects", "env_docs"])]
    title: Option<String>,

    /// Two-letter language code (default: WIKIMEDIA_DEFAULT_LANGUAGE)
    #[arg(short, long)]
    lang: Option<String>,

    /// Project code from the registry
    #[arg(short, long, default_value = "wikipedia")]
    project: String,

    /// Also import the pages linked from the sister project box
    #[arg(short, long)]
    sister_projects: bool,

    /// Write the cleaned HTML here instead of stdout
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// User-Agent header sent to the wikis
    #[arg(short, long)]
    user_agent: Option<String>,

    /// Request timeout in seconds
    #[arg(short, long)]
    timeout: Option<u64>,

    /// Clean a local rendered page instead of downloading TITLE
    #[arg(short, long, value_name = "PATH")]
    file: Option<PathBuf>,

    /// Only print errors
    #[arg(short, long)]
    quiet: bool,

    /// Print the known projects and exit
    #[arg(long)]
    list_projects: bool,

    /// Print the environment variable reference and exit
    #[arg(long)]
    env_docs: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if cli.env_docs {
        print!("{}", generate_env_docs());
        return ExitCode::SUCCESS;
    }

    let config = match EnvConfig::from_env().and_then(|config| config.validate().map(|_| config)) {
        Ok(config) => config,
        Err(err) => {
            print_error_message(&err.to_string(), atty::is(atty::Stream::Stderr));
            return ExitCode::FAILURE;
        }
    };
    let color = !config.no_color && atty::is(atty::Stream::Stderr);

    let level = if cli.quiet { "error" } else { config.log_level.as_str() };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(format!("wikimedia={level}")))
        .with_writer(io::stderr)
        .with_ansi(color)
        .init();

    match run(&cli, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            print_error_message(&format!("Error: {err}"), color);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli, config: &EnvConfig) -> Result<(), WikimediaError> {
    let mut registry = ProjectRegistry::with_defaults();
    if let Some(path) = &config.projects_file {
        for project in ProjectRegistry::load(path)?.iter() {
            registry.register(project.clone());
        }
    }

    if cli.list_projects {
        for project in registry.iter() {
            let scope = if project.subdomain_lang { "per language" } else { "shared" };
            println!("{}\t{}\t{}", project.code, project.domain, scope);
        }
        return Ok(());
    }

    let lang = cli
        .lang
        .clone()
        .unwrap_or_else(|| config.default_language().to_string());

    // A language named on the command line is allowed for this run
    let mut languages = config.languages.clone();
    if !languages.contains(&lang) {
        languages.push(lang.clone());
    }

    let (content, sister_projects) = match &cli.file {
        Some(path) => {
            if lang.chars().count() != 2 {
                return Err(WikimediaError::InvalidLanguage(lang));
            }
            let raw = fs::read(path)?;
            let processed =
                process_content(&raw, &lang, &registry, &GarbageRules::for_language(&lang))?;
            (processed.content, processed.sister_projects)
        }
        None => {
            let title = cli.title.as_deref().unwrap_or_default();
            let timeout = cli.timeout.map(Duration::from_secs).unwrap_or(config.timeout);
            let user_agent = cli.user_agent.as_deref().or(config.user_agent.as_deref());

            let mut manager = WikipageManager::new(
                Session::new(user_agent, timeout)?,
                MemoryStore::new(),
                registry,
                languages,
            )
            .with_sister_depth(config.sister_depth);
            if let Some(user_agent) = user_agent {
                manager = manager.with_user_agent(user_agent);
            }

            let page = manager.update(
                UpdateRequest::new(&cli.project, title, &lang).sister_projects(cli.sister_projects),
            )?;

            if cli.sister_projects && !cli.quiet {
                let imported = manager.store().count().saturating_sub(1);
                eprintln!("Imported {imported} sister page(s)");
            }

            (page.content, page.sister_projects)
        }
    };

    if !cli.quiet {
        report_sister_projects(&sister_projects);
    }

    match &cli.output {
        Some(path) => fs::write(path, content + "\n")?,
        None => {
            let mut stdout = io::stdout().lock();
            writeln!(stdout, "{content}")?;
        }
    }

    Ok(())
}

fn report_sister_projects(links: &[SisterProjectLink]) {
    for link in links {
        eprintln!("{}: {}", link.project_code, link.title);
    }
}
