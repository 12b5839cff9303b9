//! sassb: compile a stylesheet, resolving every `@import` through the
//! sass-bridge host configured for the project.

use std::io::Write;
use std::process::ExitCode;

use camino::{Utf8Path, Utf8PathBuf};
use eyre::{Result, eyre};
use facet::Facet;
use facet_args as args;
use owo_colors::OwoColorize;
use sass_bridge::OutputStyle;
use sass_bridge_config::ResolvedConfig;
use tracing_subscriber::prelude::*;

/// Compile SCSS to CSS
#[derive(Facet, Debug)]
struct Args {
    /// Stylesheet to compile, relative to the import root
    #[facet(args::positional)]
    input: String,

    /// Write CSS to this file instead of stdout
    #[facet(args::named, args::short = 'o', default)]
    output: Option<String>,

    /// Emit compressed CSS
    #[facet(args::named, args::short = 'c')]
    compressed: bool,

    /// Directory imports are served from (overrides the configuration file)
    #[facet(args::named, default)]
    root: Option<String>,
}

fn parse_args() -> Result<Args, String> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let args_refs: Vec<&str> = args.iter().map(|s| s.as_str()).collect();

    facet_args::from_slice(&args_refs).map_err(|e| {
        eprintln!("{:?}", miette::Report::new(e));
        "Failed to parse arguments".to_string()
    })
}

fn init_tracing() {
    let filter = tracing_subscriber::filter::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::filter::EnvFilter::new("warn"));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .compact();
    tracing_subscriber::registry()
        .with(fmt_layer.with_filter(filter))
        .init();
}

fn main() -> ExitCode {
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .build(),
        )
    }))
    .ok();
    color_eyre::install().ok();
    init_tracing();

    let args = match parse_args() {
        Ok(args) => args,
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            return ExitCode::FAILURE;
        }
    };

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}: {e:?}", "error".red().bold());
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<()> {
    let cwd = Utf8PathBuf::try_from(std::env::current_dir()?)
        .map_err(|e| eyre!("Current directory is not valid UTF-8: {}", e.as_path().display()))?;
    let (config, url) = plan(&args, ResolvedConfig::discover()?, &cwd)?;

    tracing::debug!(root = %config.root, url = %url, "compiling");
    let rendered = config.renderer().render_url(&url, &config.host())?;

    match &args.output {
        Some(path) => fs_err::write(cwd.join(path), &rendered.css)?,
        None => std::io::stdout().write_all(rendered.css.as_bytes())?,
    }
    Ok(())
}

/// Settle the import root, style and entry URL from the arguments and the
/// discovered configuration, if any.
fn plan(
    args: &Args,
    discovered: Option<ResolvedConfig>,
    cwd: &Utf8Path,
) -> Result<(ResolvedConfig, String)> {
    let (mut config, url) = match discovered {
        Some(mut config) => {
            if let Some(root) = &args.root {
                config.root = cwd.join(root);
            }
            (config, args.input.clone())
        }
        None => standalone(args, cwd)?,
    };
    if args.compressed {
        config.style = OutputStyle::Compressed;
    }
    Ok((config, url))
}

/// No configuration file: serve imports from `--root`, or from the input's
/// own directory.
fn standalone(args: &Args, cwd: &Utf8Path) -> Result<(ResolvedConfig, String)> {
    let (root, url) = match &args.root {
        Some(root) => (cwd.join(root), args.input.clone()),
        None => {
            let input = Utf8Path::new(&args.input);
            let name = input
                .file_name()
                .ok_or_else(|| eyre!("Input is not a file: {}", input))?;
            let dir = input.parent().unwrap_or(Utf8Path::new(""));
            (cwd.join(dir), name.to_string())
        }
    };

    let config = ResolvedConfig {
        project_root: cwd.to_owned(),
        root,
        style: OutputStyle::default(),
        load_paths: Vec::new(),
        mounts: Vec::new(),
    };
    Ok((config, url))
}
