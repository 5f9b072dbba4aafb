//! CLI entry point for godocgen.
//!
//! `godocgen [PATH]` documents a Go project into a static site. Subcommands
//! cover configuration and single-package inspection.

use clap::{
    Args, Parser, Subcommand,
    builder::styling::{AnsiColor, Effects, Styles},
};
use godocgen::config::{DiscoveryMode, FormatterKind};
use godocgen::display::{
    THEME, create_help_text, create_package_table, create_progress_bar, with_spinner,
};
use godocgen::io::{ExitCode, OutputFormat, OutputManager};
use godocgen::{DocError, DocPipeline, DocResult, Settings, SiteBuilder, SiteReport, logging};
use std::path::{Path, PathBuf};
use std::time::Instant;

fn clap_cargo_style() -> Styles {
    Styles::styled()
        .header(AnsiColor::Cyan.on_default() | Effects::BOLD)
        .usage(AnsiColor::Cyan.on_default() | Effects::BOLD)
        .literal(AnsiColor::Green.on_default())
        .placeholder(AnsiColor::Green.on_default())
}

/// Static documentation for Go projects
#[derive(Parser)]
#[command(
    name = "godocgen",
    version = env!("CARGO_PKG_VERSION"),
    about = "Generate static HTML documentation for a Go project",
    long_about = "Parse every package of a Go project and write one HTML page per package plus an index.",
    styles = clap_cargo_style(),
    after_long_help = create_help_text(),
    args_conflicts_with_subcommands = true
)]
struct Cli {
    /// Path to a custom settings.toml file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Debug logging for this run
    #[arg(long, global = true)]
    debug: bool,

    /// Only print errors
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(flatten)]
    generate: GenerateArgs,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the site (same as running without a subcommand)
    Generate(GenerateArgs),

    /// Write a default .godocgen/settings.toml
    #[command(about = "Set up .godocgen directory with default configuration")]
    Init {
        /// Overwrite an existing settings file
        #[arg(short, long)]
        force: bool,
    },

    /// Print the effective configuration
    #[command(about = "Display active settings as TOML")]
    Config,

    /// Parse one package and print its entities as JSON
    #[command(
        after_help = "Examples:\n  godocgen inspect pkg/shapes\n  godocgen inspect . | jq '.data.entities[] | select(.kind == \"struct\") | .name'"
    )]
    Inspect {
        /// Directory of the package
        package_dir: PathBuf,
    },
}

#[derive(Args, Clone, Default)]
struct GenerateArgs {
    /// Project directory
    #[arg(default_value = ".")]
    path: PathBuf,

    /// Output directory (default: ./dist)
    #[arg(long)]
    dest: Option<PathBuf>,

    /// Site title (default: project directory name)
    #[arg(long)]
    title: Option<String>,

    /// Markdown file for the index page (default: <PATH>/README.md)
    #[arg(long)]
    readme: Option<PathBuf>,

    /// Print the run summary as JSON
    #[arg(long)]
    json: bool,

    /// Example snippet formatter
    #[arg(long, value_enum)]
    formatter: Option<FormatterKind>,

    /// How package directories are found
    #[arg(long, value_enum)]
    discovery: Option<DiscoveryMode>,

    /// Also parse *_test.go files
    #[arg(long)]
    include_tests: bool,
}

impl GenerateArgs {
    /// CLI flags take precedence over file and environment settings.
    fn apply_to(&self, settings: &mut Settings) {
        if let Some(dest) = &self.dest {
            settings.output_dir = dest.clone();
        }
        if let Some(title) = &self.title {
            settings.title = Some(title.clone());
        }
        if let Some(readme) = &self.readme {
            settings.readme = Some(readme.clone());
        }
        if let Some(formatter) = self.formatter {
            settings.parsing.formatter = formatter;
        }
        if let Some(mode) = self.discovery {
            settings.discovery.mode = mode;
        }
        if self.include_tests {
            settings.parsing.include_tests = true;
        }
    }
}

fn main() {
    let cli = Cli::parse();
    let code = run(cli);
    std::process::exit(code.into());
}

fn run(cli: Cli) -> ExitCode {
    let settings = match load_settings(cli.config.as_deref()) {
        Ok(settings) => settings,
        Err(e) => {
            logging::init_logger(cli.debug, cli.quiet);
            return report_error(OutputFormat::Text, &e);
        }
    };
    logging::init_logger(cli.debug || settings.debug, cli.quiet);

    match cli.command {
        Some(Commands::Init { force }) => init(force),
        Some(Commands::Config) => show_config(&settings),
        Some(Commands::Inspect { package_dir }) => inspect(&settings, &package_dir),
        Some(Commands::Generate(args)) => generate(&args, settings, cli.quiet),
        None => generate(&cli.generate, settings, cli.quiet),
    }
}

fn load_settings(config: Option<&Path>) -> DocResult<Settings> {
    let loaded = match config {
        Some(path) => {
            if !path.exists() {
                return Err(DocError::ConfigError {
                    reason: format!("settings file {} not found", path.display()),
                });
            }
            Settings::load_from(path)
        }
        None => Settings::load(),
    };
    loaded.map_err(|e| DocError::ConfigError {
        reason: e.to_string(),
    })
}

fn report_error(format: OutputFormat, error: &DocError) -> ExitCode {
    OutputManager::new(format)
        .error(error)
        .unwrap_or_else(|_| ExitCode::from_error(error))
}

fn init(force: bool) -> ExitCode {
    match Settings::init_config_file(force) {
        Ok(path) => {
            let message = format!("Created configuration file at {}", path.display());
            println!("{}", THEME.success_with_icon(&message));
            println!("Edit this file to customize your settings.");
            ExitCode::Success
        }
        Err(e) => {
            eprintln!("{}", THEME.error_with_icon(&e.to_string()));
            ExitCode::ConfigError
        }
    }
}

fn show_config(settings: &Settings) -> ExitCode {
    match settings.to_toml() {
        Ok(toml) => {
            println!("{toml}");
            ExitCode::Success
        }
        Err(e) => report_error(
            OutputFormat::Text,
            &DocError::ConfigError {
                reason: e.to_string(),
            },
        ),
    }
}

fn inspect(settings: &Settings, package_dir: &Path) -> ExitCode {
    let start = Instant::now();
    let result = std::env::current_dir()
        .map_err(|source| DocError::FileRead {
            path: PathBuf::from("."),
            source,
        })
        .and_then(|cwd| {
            let dir = std::fs::canonicalize(package_dir).map_err(|source| DocError::FileRead {
                path: package_dir.to_path_buf(),
                source,
            })?;
            let root = std::fs::canonicalize(&cwd).unwrap_or(cwd);
            DocPipeline::new(settings)?.parse_package(&root, &dir)
        });

    let mut output = OutputManager::new(OutputFormat::Json);
    match result {
        Ok(docs) => {
            let message = format!("{} entities in package {}", docs.entities.len(), docs.info.name);
            let elapsed = start.elapsed().as_millis() as u64;
            output
                .json(&docs, &message, Some(elapsed))
                .unwrap_or(ExitCode::GeneralError)
        }
        Err(e) => report_error(OutputFormat::Json, &e),
    }
}

fn generate(args: &GenerateArgs, mut settings: Settings, quiet: bool) -> ExitCode {
    args.apply_to(&mut settings);
    let format = OutputFormat::from_json_flag(args.json);
    let show_progress = !quiet && !format.is_json();
    let start = Instant::now();

    let report = match build_site(&settings, &args.path, show_progress) {
        Ok(report) => report,
        Err(e) => return report_error(format, &e),
    };

    let code = ExitCode::from_page_count(report.stats.packages_documented);
    let mut output = OutputManager::new(format);

    if format.is_json() {
        let message = format!(
            "Documented {} packages into {}",
            report.stats.packages_documented,
            report.output_dir.display()
        );
        let elapsed = start.elapsed().as_millis() as u64;
        return match output.json(&report, &message, Some(elapsed)) {
            Ok(_) => code,
            Err(_) => ExitCode::GeneralError,
        };
    }

    if !quiet {
        if code.is_success() {
            println!(
                "{}",
                THEME.success_with_icon(&format!(
                    "Documentation generated in {}",
                    THEME.apply(&THEME.path, report.output_dir.display())
                ))
            );
            println!("{}", create_package_table(&report.stats.packages));
        } else {
            eprintln!(
                "{}",
                THEME.warning_with_icon(&format!(
                    "No Go packages found under {}",
                    report.project_root.display()
                ))
            );
        }
        report.stats.display();
        let _ = output.info(&format!("Open {} in a browser.", report.index.display()));
    }

    code
}

fn build_site(settings: &Settings, path: &Path, show_progress: bool) -> DocResult<SiteReport> {
    let builder = SiteBuilder::new(settings, path)?;

    let packages = if show_progress {
        with_spinner("Discovering packages...", || builder.discover())?
    } else {
        builder.discover()?
    };

    let progress = show_progress.then(|| create_progress_bar(packages.len() as u64, "packages"));
    let report = builder.build(&packages, |summary| {
        if let Some(pb) = &progress {
            pb.set_message(summary.path.clone());
            pb.inc(1);
        }
    });
    if let Some(pb) = &progress {
        pb.finish_and_clear();
    }
    report
}
