//! Renders one calendar template from the command line.
//!
//! ```text
//! daybook-preview event --input standup.yaml --output term
//! daybook-preview popupDetailDate --input range.json --sheet de.yaml
//! daybook-preview --list
//! ```
//!
//! Input files are YAML unless the extension is `.json`. Set `DAYBOOK_LOG`
//! (e.g. `DAYBOOK_LOG=debug`) to see sheet loading and override fallbacks.

use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use clap::{ArgAction, Parser, ValueEnum};
use daybook::{OutputMode, TemplateName, TemplateSheet, Templates, Theme};
use daybook_markup::UnknownTagBehavior;
use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "DAYBOOK_LOG";

/// Render a calendar template to HTML, text, bracket markup or the terminal.
#[derive(Parser, Debug)]
#[command(name = "daybook-preview", version)]
struct Cli {
    /// Template name, e.g. `event` or `popupDetailDate`
    #[arg(required_unless_present = "list")]
    template: Option<String>,

    /// YAML or JSON file holding the template input
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Template sheet with labels, templates and theme
    #[arg(short, long)]
    sheet: Option<PathBuf>,

    /// Output format: html, text, markup or term
    #[arg(short, long, default_value = "html")]
    output: OutputMode,

    /// Style terminal output even when stdout is not a terminal
    #[arg(long)]
    force_color: bool,

    /// Terminal handling of classes without a theme style
    #[arg(long, value_enum, default_value_t = Unstyled::Strip)]
    unstyled: Unstyled,

    /// List template names and their input kinds
    #[arg(long)]
    list: bool,

    /// More log output (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

/// What `--output term` does with a class the theme has no style for.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum Unstyled {
    /// Drop the tags, keep the text
    Strip,
    /// Keep `[class]...[/class]` in the output
    Keep,
    /// Prefix the text with `(!?)`
    Mark,
}

impl Unstyled {
    fn behavior(self) -> UnknownTagBehavior {
        match self {
            Unstyled::Strip => UnknownTagBehavior::Strip,
            Unstyled::Keep => UnknownTagBehavior::Passthrough,
            Unstyled::Mark => UnknownTagBehavior::Indicate("(!?)".to_string()),
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose)?;
    println!("{}", run(&cli)?);
    Ok(())
}

fn init_tracing(verbose: u8) -> Result<()> {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_new(default_level))
        .map_err(|e| anyhow!("invalid {} filter: {}", LOG_ENV, e))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow!("failed to initialize logging: {}", e))
}

fn run(cli: &Cli) -> Result<String> {
    if cli.list {
        return Ok(list_templates());
    }

    let name: TemplateName = cli
        .template
        .as_deref()
        .ok_or_else(|| anyhow!("missing template name"))?
        .parse()?;

    let (templates, theme) = match &cli.sheet {
        Some(path) => {
            let sheet = TemplateSheet::from_path(path)
                .with_context(|| format!("failed to load sheet {}", path.display()))?;
            (sheet.templates(), sheet.theme().clone())
        }
        None => (Templates::default(), Theme::new()),
    };

    let theme = theme
        .force_styling(cli.force_color)
        .with_unknown(cli.unstyled.behavior());

    let input = match &cli.input {
        Some(path) => read_input(path)?,
        None => serde_json::Value::Null,
    };
    tracing::info!(template = %name, mode = %cli.output, "rendering");

    let output = templates
        .render_value(name, input)
        .with_context(|| format!("failed to render {}", name))?;
    Ok(output.render(cli.output, &theme))
}

fn list_templates() -> String {
    let width = TemplateName::ALL
        .iter()
        .map(|name| name.as_str().len())
        .max()
        .unwrap_or(0);
    TemplateName::ALL
        .iter()
        .map(|name| format!("{:width$}  {}", name.as_str(), name.input_kind(), width = width))
        .collect::<Vec<_>>()
        .join("\n")
}

fn read_input(path: &Path) -> Result<serde_json::Value> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read input {}", path.display()))?;
    let is_json = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    if is_json {
        serde_json::from_str(&text).with_context(|| format!("invalid JSON in {}", path.display()))
    } else {
        serde_yaml::from_str(&text).with_context(|| format!("invalid YAML in {}", path.display()))
    }
}
