use std::{
    fs::File,
    io::BufWriter,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "sceneweave", version, about)]
struct Cli {
    /// Log verbosity when `RUST_LOG` is unset.
    #[arg(long, value_enum, default_value_t = LogLevel::Warn, global = true)]
    log_level: LogLevel,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print a summary of a document and the repairs hydration applied.
    Inspect(InspectArgs),
    /// Print the resolved motion plan of one layer as JSON.
    Motion(MotionArgs),
    /// Hydrate a document and write it back in canonical form.
    Normalize(NormalizeArgs),
}

#[derive(Parser, Debug)]
struct InspectArgs {
    /// Input document JSON.
    #[arg(long = "in")]
    in_path: PathBuf,
}

#[derive(Parser, Debug)]
struct MotionArgs {
    /// Input document JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Layer id.
    #[arg(long)]
    layer: String,

    /// Also sample the plan at these elapsed times (milliseconds).
    #[arg(long = "at", value_delimiter = ',')]
    at_ms: Vec<f64>,
}

#[derive(Parser, Debug)]
struct NormalizeArgs {
    /// Input document JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output path for the normalized document.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    fn as_str(self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
            Self::Trace => "trace",
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(cli.log_level.as_str()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.cmd {
        Command::Inspect(args) => cmd_inspect(args),
        Command::Motion(args) => cmd_motion(args),
        Command::Normalize(args) => cmd_normalize(args),
    }
}

fn read_document(path: &Path) -> anyhow::Result<(sceneweave::Document, sceneweave::HydrateReport)> {
    sceneweave::Document::from_path(path)
        .with_context(|| format!("load document '{}'", path.display()))
}

fn cmd_inspect(args: InspectArgs) -> anyhow::Result<()> {
    let (doc, report) = read_document(&args.in_path)?;

    println!(
        "document '{}' slug='{}' canvas={}x{}",
        doc.name, doc.slug, doc.canvas_size.width, doc.canvas_size.height
    );
    for (i, section) in doc.sections.iter().enumerate() {
        let hidden = if section.is_visible { "" } else { " (hidden)" };
        println!(
            "  [{i}] section {} '{}' layers={}{hidden}",
            section.id,
            section.title,
            section.elements.len()
        );
        for layer in section.paint_order() {
            let trigger = layer
                .animation
                .as_ref()
                .map_or("static", |a| trigger_name(a.trigger));
            println!(
                "      {} {} z={} trigger={trigger}",
                layer.id,
                layer.kind().as_str(),
                layer.z_index
            );
        }
    }

    if report.is_clean() {
        println!("hydrate: clean");
    } else {
        println!(
            "hydrate: {}",
            serde_json::to_string(&report).context("encode hydrate report")?
        );
    }
    Ok(())
}

fn trigger_name(trigger: sceneweave::Trigger) -> &'static str {
    match trigger {
        sceneweave::Trigger::Load => "load",
        sceneweave::Trigger::Scroll => "scroll",
        sceneweave::Trigger::Click => "click",
        sceneweave::Trigger::OpenBtn => "open_btn",
    }
}

fn cmd_motion(args: MotionArgs) -> anyhow::Result<()> {
    let (doc, _) = read_document(&args.in_path)?;
    let id = sceneweave::LayerId::from(args.layer.as_str());
    let (_, layer) = doc
        .find_layer(&id)
        .with_context(|| format!("no layer with id '{id}'"))?;

    let plan = sceneweave::resolve_motion(layer, sceneweave::DEFAULT_LOOP_BASE_MS)?;
    let Some(plan) = plan else {
        println!("null");
        return Ok(());
    };

    let samples = args
        .at_ms
        .iter()
        .map(|&t| serde_json::json!({ "atMs": t, "sample": plan.schedule().sample(t) }))
        .collect::<Vec<_>>();
    let out = serde_json::json!({ "plan": plan, "samples": samples });
    println!(
        "{}",
        serde_json::to_string_pretty(&out).context("encode motion plan")?
    );
    Ok(())
}

fn cmd_normalize(args: NormalizeArgs) -> anyhow::Result<()> {
    let (doc, report) = read_document(&args.in_path)?;
    doc.validate()?;
    if !report.is_clean() {
        tracing::info!(?report, "applied repairs");
    }

    if let Some(parent) = args.out.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }

    let value = doc.to_json_value()?;
    let f = File::create(&args.out)
        .with_context(|| format!("create '{}'", args.out.display()))?;
    serde_json::to_writer_pretty(BufWriter::new(f), &value)
        .with_context(|| format!("write '{}'", args.out.display()))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}
