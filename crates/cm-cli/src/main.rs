//! CLI entry point for classmcp.
//!
//! With no subcommand the binary runs the JSON-RPC server on stdin/stdout,
//! which is how MCP clients launch it. The other subcommands expose the same
//! catalog from a shell.
//!
//! # Usage
//!
//! ```bash
//! classmcp [OPTIONS] [COMMAND]
//!
//! # Serve over stdio (the default)
//! classmcp --project ./my-app
//!
//! # Generate minified CSS for two categories
//! classmcp --framework tailwind css -c buttons -c cards --minified
//!
//! # Extend a stored minification map
//! classmcp minify --resume classes.map.json --output classes.map.json
//! ```

#![deny(clippy::all)]
#![warn(missing_docs)]

use std::io::Write;

use camino::{Utf8Path, Utf8PathBuf};
use clap::{Parser, Subcommand};
use cm_catalog::{CssOptions, PatternRegistry, ResolveOptions, resolve_classes};
use cm_config::{LoadedConfig, load_config};
use cm_core::FrameworkId;
use cm_minify::{ExportedMap, MinificationMap, RenderOptions, render_css};
use cm_server::{Dispatcher, serve_stdio};
use color_eyre::eyre::eyre;
use serde_json::json;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

// =============================================================================
// CLI ARGUMENT TYPES
// =============================================================================

/// Serves framework-specific CSS class patterns to AI coding assistants.
///
/// Speaks the Model Context Protocol over stdio when run without a command.
#[derive(Parser)]
#[command(name = "classmcp", version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Command to execute. Defaults to `serve`.
    #[command(subcommand)]
    command: Option<Commands>,

    /// Project directory to read configuration from and detect the framework in.
    ///
    /// Defaults to the current directory.
    #[arg(short, long, global = true, env = "CLASSMCP_PROJECT")]
    project: Option<Utf8PathBuf>,

    /// Framework to use, overriding detection and the config default.
    #[arg(short, long, global = true, env = "CLASSMCP_FRAMEWORK")]
    framework: Option<FrameworkId>,

    /// Enable verbose logging (debug level).
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Disable colored output.
    #[arg(long, global = true)]
    no_color: bool,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Run the JSON-RPC server on stdin/stdout.
    Serve,

    /// Generate CSS for the framework's patterns.
    Css {
        /// Only include these categories (repeatable).
        #[arg(short, long = "category")]
        categories: Vec<String>,

        /// Emit rules under short minified names.
        #[arg(short, long)]
        minified: bool,

        /// Leave out state variants such as `hover:`.
        #[arg(long)]
        no_states: bool,

        /// Output file (defaults to stdout).
        #[arg(short, long)]
        output: Option<Utf8PathBuf>,
    },

    /// Build a minification map and print it as JSON.
    Minify {
        /// Only include these categories (repeatable).
        #[arg(short, long = "category")]
        categories: Vec<String>,

        /// Leave out state variants such as `hover:`.
        #[arg(long)]
        no_states: bool,

        /// Existing map to extend. Names already in it are kept.
        #[arg(long)]
        resume: Option<Utf8PathBuf>,

        /// Output file (defaults to stdout).
        #[arg(short, long)]
        output: Option<Utf8PathBuf>,
    },

    /// Show the classes for one pattern.
    Inspect {
        /// Pattern id, e.g. `btn-primary`.
        name: String,

        /// Also show the minified name.
        #[arg(short, long)]
        minified: bool,

        /// Drop client-only classes.
        #[arg(long)]
        ssr_safe: bool,
    },

    /// List patterns, or the supported frameworks.
    List {
        /// Only list this category.
        #[arg(short, long)]
        category: Option<String>,

        /// Only list SSR-safe patterns.
        #[arg(long)]
        ssr_safe_only: bool,

        /// List frameworks instead of patterns.
        #[arg(long, conflicts_with_all = ["category", "ssr_safe_only"])]
        frameworks: bool,
    },

    /// Validate the project configuration and report what was found.
    CheckConfig,
}

// =============================================================================
// INITIALIZATION FUNCTIONS
// =============================================================================

/// Initializes the tracing subscriber for logging.
///
/// Respects the `RUST_LOG` environment variable if set. Otherwise, uses
/// `debug` level if `--verbose` is set, or `info` level by default. Logs go
/// to stderr since stdout carries protocol messages.
fn init_tracing(verbose: bool, no_color: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = if verbose { "debug" } else { "info" };
        EnvFilter::new(level)
    });

    // Check if colors should be disabled (flag or NO_COLOR env var)
    let use_ansi = !no_color && std::env::var("NO_COLOR").is_err();

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .with_ansi(use_ansi)
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}

/// Resolves the project directory from CLI arguments.
///
/// # Errors
///
/// Returns an error if the directory doesn't exist or the working directory
/// is not valid UTF-8.
fn project_dir(cli: &Cli) -> color_eyre::Result<Utf8PathBuf> {
    let path = match &cli.project {
        Some(path) => path.clone(),
        None => Utf8PathBuf::try_from(std::env::current_dir()?)
            .map_err(|e| eyre!("Working directory is not valid UTF-8: {}", e))?,
    };

    if !path.is_dir() {
        return Err(eyre!("Project path is not a directory: {}", path));
    }
    Ok(path)
}

/// Builds a [`Dispatcher`] with the project config applied.
///
/// An explicit `--framework` wins over both the config default and
/// detection.
async fn build_dispatcher(cli: &Cli) -> color_eyre::Result<Dispatcher> {
    let project = project_dir(cli)?;
    let registry = PatternRegistry::builtin()?;
    let mut dispatcher = Dispatcher::new(registry, project);

    let _ = dispatcher.load_config().await;
    if let Some(framework) = cli.framework {
        dispatcher.set_framework(framework);
    }
    Ok(dispatcher)
}

// =============================================================================
// COMMAND IMPLEMENTATIONS
// =============================================================================

/// Runs the stdio server until stdin closes.
async fn run_serve(cli: &Cli) -> color_eyre::Result<()> {
    let mut dispatcher = build_dispatcher(cli).await?;
    info!(
        framework = %dispatcher.framework(),
        project = %dispatcher.project_dir(),
        "classmcp server started"
    );
    serve_stdio(&mut dispatcher).await?;
    info!("classmcp server stopped");
    Ok(())
}

/// Renders CSS for the current framework.
async fn run_css(
    cli: &Cli,
    categories: &[String],
    minified: bool,
    include_states: bool,
    output: Option<&Utf8Path>,
) -> color_eyre::Result<()> {
    let dispatcher = build_dispatcher(cli).await?;
    let framework = dispatcher.framework();
    let registry = dispatcher.registry();

    let content = if minified {
        let map = registry.minify_patterns(framework, Some(categories), include_states);
        let savings = map.savings();
        info!(
            classes = map.len(),
            savings_percent = format_args!("{:.1}", savings.savings_percent),
            "minified patterns"
        );
        render_css(&map, RenderOptions::new(framework))
    } else {
        let options = CssOptions {
            categories: (!categories.is_empty()).then(|| categories.to_vec()),
            include_states,
            minified: false,
        };
        registry.generate_css(framework, &options)
    };

    write_output(output, &content, "CSS")
}

/// Builds (or extends) a minification map and writes it as JSON.
async fn run_minify(
    cli: &Cli,
    categories: &[String],
    include_states: bool,
    resume: Option<&Utf8Path>,
    output: Option<&Utf8Path>,
) -> color_eyre::Result<()> {
    let dispatcher = build_dispatcher(cli).await?;
    let framework = dispatcher.framework();

    let mut map = match resume {
        Some(path) => read_map(path).await?,
        None => MinificationMap::new(),
    };
    let before = map.len();

    let options = ResolveOptions::default().include_states(include_states);
    for pattern in dispatcher.registry().patterns(framework) {
        if categories.is_empty() || categories.contains(&pattern.category) {
            map.minify(&pattern.id, &resolve_classes(pattern, &options));
        }
    }

    let savings = map.savings();
    info!(
        %framework,
        added = map.len() - before,
        total = map.len(),
        savings_percent = format_args!("{:.1}", savings.savings_percent),
        shared_content = savings.shared_content,
        "minification map built"
    );

    let json = map
        .export()
        .to_json_pretty()
        .map_err(|e| eyre!("Failed to serialize map: {}", e))?;
    write_output(output, &format!("{json}\n"), "Map")
}

/// Reads a stored map, logging every inconsistency that was repaired.
async fn read_map(path: &Utf8Path) -> color_eyre::Result<MinificationMap> {
    let json = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| eyre!("Failed to read map {}: {}", path, e))?;
    let data = ExportedMap::from_json(&json).map_err(|e| eyre!("Invalid map {}: {}", path, e))?;

    let (map, issues) = MinificationMap::import_checked(data);
    if !issues.is_empty() {
        warn!(path = %path, issues = issues.len(), "map imported with issues");
    }
    Ok(map)
}

/// Prints one pattern through the `get_class` tool.
async fn run_inspect(
    cli: &Cli,
    name: &str,
    minified: bool,
    ssr_safe: bool,
) -> color_eyre::Result<()> {
    let mut dispatcher = build_dispatcher(cli).await?;
    let result = dispatcher
        .call_tool(
            "get_class",
            json!({ "name": name, "minified": minified, "ssr_safe": ssr_safe }),
        )
        .await?;
    print_text(&result.joined_text())
}

/// Prints patterns or frameworks through the listing tools.
async fn run_list(
    cli: &Cli,
    category: Option<&str>,
    ssr_safe_only: bool,
    frameworks: bool,
) -> color_eyre::Result<()> {
    let mut dispatcher = build_dispatcher(cli).await?;
    let result = if frameworks {
        dispatcher.call_tool("list_frameworks", json!({})).await?
    } else {
        dispatcher
            .call_tool(
                "list_classes",
                json!({ "category": category, "ssr_safe_only": ssr_safe_only }),
            )
            .await?
    };
    print_text(&result.joined_text())
}

/// Reports the outcome of config discovery.
///
/// # Errors
///
/// Returns an error if a config was found but failed validation.
async fn run_check_config(cli: &Cli) -> color_eyre::Result<()> {
    let project = project_dir(cli)?;
    let loaded = load_config(&project).await;
    print_config_report(&project, &loaded);

    match loaded.validation_error() {
        Some(error) => Err(error.into()),
        None => Ok(()),
    }
}

// =============================================================================
// OUTPUT HELPERS
// =============================================================================

/// Writes `content` to `output`, or to stdout if none was given.
fn write_output(output: Option<&Utf8Path>, content: &str, what: &str) -> color_eyre::Result<()> {
    if let Some(output_path) = output {
        std::fs::write(output_path.as_std_path(), content)?;
        info!(path = %output_path, "{what} written");
    } else {
        let stdout = std::io::stdout();
        let mut handle = stdout.lock();
        write!(handle, "{content}")?;
    }
    Ok(())
}

fn print_text(text: &str) -> color_eyre::Result<()> {
    let stdout = std::io::stdout();
    let mut handle = stdout.lock();
    writeln!(handle, "{text}")?;
    Ok(())
}

/// Prints a summary of a config load.
fn print_config_report(project: &Utf8Path, loaded: &LoadedConfig) {
    let stdout = std::io::stdout();
    let mut handle = stdout.lock();

    let _ = writeln!(handle, "Project: {project}");
    match &loaded.source {
        Some(source) => {
            let _ = writeln!(handle, "Config: {source}");
        }
        None => {
            let _ = writeln!(handle, "Config: none found, using defaults");
        }
    }

    for skipped in &loaded.skipped {
        let _ = writeln!(handle, "  skipped: {skipped}");
    }

    if !loaded.found() {
        return;
    }

    if loaded.is_valid() {
        let config = &loaded.config;
        let _ = writeln!(handle, "Status: valid");
        match config.default_framework {
            Some(framework) => {
                let _ = writeln!(handle, "Default framework: {framework}");
            }
            None => {
                let _ = writeln!(handle, "Default framework: not set (detected)");
            }
        }
        let _ = writeln!(handle, "Custom patterns: {}", config.custom_patterns.len());
        let _ = writeln!(handle, "Override built-ins: {}", config.override_builtins);
    } else {
        let _ = writeln!(handle, "Status: invalid ({} error(s))", loaded.errors.len());
        for error in &loaded.errors {
            let _ = writeln!(handle, "  error: {error}");
        }
    }

    for warning in &loaded.warnings {
        let _ = writeln!(handle, "  warning: {warning}");
    }
}

// =============================================================================
// MAIN ENTRY POINT
// =============================================================================

/// Application entry point.
#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    init_tracing(cli.verbose, cli.no_color);

    match &cli.command {
        None | Some(Commands::Serve) => run_serve(&cli).await,
        Some(Commands::Css {
            categories,
            minified,
            no_states,
            output,
        }) => run_css(&cli, categories, *minified, !*no_states, output.as_deref()).await,
        Some(Commands::Minify {
            categories,
            no_states,
            resume,
            output,
        }) => {
            run_minify(
                &cli,
                categories,
                !*no_states,
                resume.as_deref(),
                output.as_deref(),
            )
            .await
        }
        Some(Commands::Inspect {
            name,
            minified,
            ssr_safe,
        }) => run_inspect(&cli, name, *minified, *ssr_safe).await,
        Some(Commands::List {
            category,
            ssr_safe_only,
            frameworks,
        }) => run_list(&cli, category.as_deref(), *ssr_safe_only, *frameworks).await,
        Some(Commands::CheckConfig) => run_check_config(&cli).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_no_command_means_serve() {
        let cli = Cli::try_parse_from(["classmcp"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_framework_flag_parses() {
        let cli = Cli::try_parse_from(["classmcp", "--framework", "bootstrap", "list"]).unwrap();
        assert_eq!(cli.framework, Some(FrameworkId::Bootstrap));
        assert!(Cli::try_parse_from(["classmcp", "--framework", "bulma"]).is_err());
    }

    #[test]
    fn test_repeated_categories() {
        let cli =
            Cli::try_parse_from(["classmcp", "css", "-c", "buttons", "-c", "cards", "--minified"])
                .unwrap();
        match cli.command {
            Some(Commands::Css {
                categories,
                minified,
                ..
            }) => {
                assert_eq!(categories, ["buttons", "cards"]);
                assert!(minified);
            }
            _ => panic!("expected css command"),
        }
    }

    #[test]
    fn test_frameworks_conflicts_with_filters() {
        assert!(Cli::try_parse_from(["classmcp", "list", "--frameworks", "--category", "cards"]).is_err());
    }
}
