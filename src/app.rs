use std::collections::HashSet;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::{error::ErrorKind, CommandFactory, Parser};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use tokio::fs::OpenOptions;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing_subscriber::EnvFilter;

use crate::cli::args::CliArgs;
use crate::cli::command::{self, Command};
use crate::cli::validation;
use crate::config::{self, ConfigFile};
use crate::fetch;
use crate::output::{self, OutputFormat, PageSnapshot};
use crate::runner::{Options, Runner};
use crate::view::{CatalogView, ViewState};

fn print_banner() {
    const BANNER: &str = r#"
                __            __
    ____  ____ / /_____  ____/ /__  _  __
   / __ \/ __ \/ //_/ _ \/ __  / _ \| |/_/
  / /_/ / /_/ / ,< /  __/ /_/ /  __/>  <
 / .___/\____/_/|_|\___/\__,_/\___/_/|_|
/_/
       v0.1.0 - search, filter and page through the Pokémon catalog
    "#;
    print!("{}", BANNER.bold().red());
    println!();
}

fn format_kv_line(label: &str, value: &str) {
    println!(":: {:<10}: {}", label, value);
}

fn format_opt_value<'a>(v: &'a str, default: &'a str) -> &'a str {
    if v.trim().is_empty() {
        default
    } else {
        v
    }
}

#[derive(Clone, Debug)]
struct RunConfig {
    endpoint: String,
    timeout: Option<u64>,
    output: Option<String>,
    output_format: OutputFormat,
    no_color: bool,
    no_banner: bool,
    interactive: bool,
    verbose: u8,
    initial_state: ViewState,
}

fn build_run_config(args: CliArgs, cfg: ConfigFile) -> Result<RunConfig, String> {
    validation::validate(&args)?;

    let no_color = if args.color {
        false
    } else {
        args.no_color || cfg.no_color.unwrap_or(false)
    };
    let no_banner = args.no_banner || cfg.no_banner.unwrap_or(false);

    let endpoint = args
        .endpoint
        .or(cfg.endpoint)
        .unwrap_or_else(|| fetch::CATALOG_ENDPOINT.to_string());
    let timeout = args.timeout.or(cfg.timeout);

    let output = args
        .output
        .or(cfg.output)
        .map(|p| config::expand_tilde_string(&p));
    let output_format = match args.output_format.or(cfg.output_format) {
        Some(raw) => OutputFormat::parse(&raw)
            .ok_or_else(|| format!("invalid output format '{raw}', expected text, json or html"))?,
        None => output
            .as_deref()
            .and_then(output::infer_format_from_path)
            .unwrap_or(OutputFormat::Text),
    };
    let page = args.page.or(cfg.page).unwrap_or(1);
    validation::validate_merged(page, timeout, args.interactive, output.as_deref())?;

    let types = if args.types.is_empty() {
        cfg.types.unwrap_or_default()
    } else {
        args.types
    };
    let selected_categories: HashSet<String> = types
        .into_iter()
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .collect();
    let initial_state = ViewState {
        search_text: args.search.or(cfg.search).unwrap_or_default(),
        selected_categories,
        current_page: page,
    };

    Ok(RunConfig {
        endpoint,
        timeout,
        output,
        output_format,
        no_color,
        no_banner,
        interactive: args.interactive,
        verbose: args.verbose,
        initial_state,
    })
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("pokedex={default_level}")));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn fetch_spinner() -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_draw_target(ProgressDrawTarget::stderr());
    pb.enable_steady_tick(Duration::from_millis(120));
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.blue} {elapsed} {msg}") {
        pb.set_style(style);
    }
    pb.set_message("fetching catalog...");
    pb
}

fn print_page(view: &CatalogView) {
    let rendered = output::render_text(&PageSnapshot::capture(view));
    print!("{}", String::from_utf8_lossy(&rendered));
}

fn print_types(view: &CatalogView) {
    for option in view.available_categories() {
        let mark = if option.selected { "[x]" } else { "[ ]" };
        let name = if option.selected {
            option.name.bold().green().to_string()
        } else {
            option.name.clone()
        };
        println!("  {mark} {name}");
    }
}

/// JSON and HTML written to stdout must be the only thing on stdout.
fn document_on_stdout(run: &RunConfig) -> bool {
    !run.interactive && run.output.is_none() && run.output_format != OutputFormat::Text
}

fn render_document(view: &CatalogView, format: OutputFormat) -> Result<Vec<u8>, String> {
    output::render(&PageSnapshot::capture(view), format)
        .map_err(|e| format!("failed to render output: {e}"))
}

fn write_document<W: Write>(out: &mut W, view: &CatalogView, format: OutputFormat) -> Result<(), String> {
    let rendered = render_document(view, format)?;
    out.write_all(&rendered)
        .and_then(|_| out.flush())
        .map_err(|e| format!("failed to write output: {e}"))
}

async fn write_output(path: &str, format: OutputFormat, view: &CatalogView) -> Result<(), String> {
    let rendered = render_document(view, format)?;
    let mut outfile = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(path)
        .await
        .map_err(|e| format!("failed to open output file: {e}"))?;
    outfile
        .write_all(&rendered)
        .await
        .map_err(|_| "failed to write output file".to_string())?;

    if format == OutputFormat::Html {
        let dir = Path::new(path).parent().unwrap_or_else(|| Path::new("."));
        output::write_assets(dir)
            .await
            .map_err(|e| format!("failed to write page assets: {e}"))?;
    }
    Ok(())
}

async fn run_interactive(mut view: CatalogView) -> Result<(), String> {
    println!("{}", "type 'help' for commands".dimmed());
    print_page(&view);

    let stdin = BufReader::new(tokio::io::stdin());
    let mut lines = stdin.lines();
    loop {
        print!("{} ", ">".bold().green());
        std::io::Write::flush(&mut std::io::stdout())
            .map_err(|e| format!("failed to flush stdout: {e}"))?;
        let line = match lines
            .next_line()
            .await
            .map_err(|e| format!("failed to read stdin: {e}"))?
        {
            Some(line) => line,
            None => break,
        };
        if line.trim().is_empty() {
            continue;
        }
        match Command::parse(&line) {
            Ok(Command::Quit) => break,
            Ok(Command::Help) => println!("{}", command::HELP),
            Ok(Command::ListTypes) => print_types(&view),
            Ok(cmd) => {
                if cmd.apply(&mut view) {
                    print_page(&view);
                }
            }
            Err(e) => println!("{}", e.yellow()),
        }
    }
    Ok(())
}

async fn run_async(run: RunConfig) -> Result<(), String> {
    if run.no_color {
        colored::control::set_override(false);
    }
    if !run.no_banner && !document_on_stdout(&run) {
        print_banner();
        format_kv_line("Endpoint", &run.endpoint);
        format_kv_line(
            "Search",
            format_opt_value(&run.initial_state.search_text, "(none)"),
        );
        let mut types: Vec<&str> = run
            .initial_state
            .selected_categories
            .iter()
            .map(|s| s.as_str())
            .collect();
        types.sort_unstable();
        format_kv_line("Types", format_opt_value(&types.join(","), "(all)"));
        if let Some(out) = run.output.as_deref() {
            format_kv_line("Output", out);
        }
        println!();
    }

    let runner = Runner::new(Options {
        endpoint: run.endpoint.clone(),
        timeout_seconds: run.timeout,
        initial_state: run.initial_state.clone(),
    })
    .map_err(|e| e.to_string())?;

    let pb = fetch_spinner();
    let loaded = runner.run().await;
    pb.finish_and_clear();
    let loaded = loaded.map_err(|e| e.to_string())?;

    if !loaded.rejected.is_empty() {
        eprintln!(
            "{} {} malformed entries skipped (use -v for details)",
            "[WRN]".bold().yellow(),
            loaded.rejected.len()
        );
    }
    tracing::info!(
        entities = loaded.view.catalog().len(),
        elapsed_ms = loaded.elapsed.as_millis() as u64,
        "catalog ready"
    );

    if run.interactive {
        return run_interactive(loaded.view).await;
    }
    match run.output.as_deref() {
        Some(path) => {
            write_output(path, run.output_format, &loaded.view).await?;
            println!(":: Written :: {} ::", path);
        }
        None => write_document(&mut std::io::stdout().lock(), &loaded.view, run.output_format)?,
    }
    Ok(())
}

/// An explicit `--config` must exist. Otherwise the default file is created
/// with commented settings on first run and then read.
fn resolve_config(explicit: Option<&str>, default_path: Option<PathBuf>) -> Result<ConfigFile, String> {
    if let Some(path) = explicit {
        return config::load_config(&config::expand_tilde(path), false);
    }
    let Some(path) = default_path else {
        return Ok(ConfigFile::default());
    };
    if let Err(e) = config::ensure_default_config_file(&path) {
        eprintln!("{} {e}", "[WRN]".bold().yellow());
    }
    config::load_config(&path, true)
}

pub fn run_cli() -> Result<(), String> {
    let args = match CliArgs::try_parse() {
        Ok(args) => args,
        Err(e) => match e.kind() {
            ErrorKind::DisplayHelp => {
                print!("{e}");
                return Ok(());
            }
            ErrorKind::DisplayVersion => {
                let cmd = CliArgs::command();
                print!("{}", cmd.render_version());
                return Ok(());
            }
            _ => return Err(e.to_string()),
        },
    };

    let cfg = resolve_config(args.config.as_deref(), config::default_config_path())?;

    let run = build_run_config(args, cfg)?;
    init_logging(run.verbose);

    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| format!("failed to build runtime: {e}"))?;

    rt.block_on(run_async(run))?;
    Ok(())
}
