//! Lumen CLI
//!
//! Resolve JSON scenes, replay interaction events against them, and check
//! their styles for problems.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use tracing::{debug, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod config;
mod scene;

use config::LumenConfig;
use lumen_core::events::{event_type_from_name, EventType};
use lumen_core::{MouseUpListener, Owner, ResolveConfig};
use lumen_style::diagnostics::{CollectingSink, Diagnostic};
use lumen_style::element::{Element, Node};
use lumen_style::resolver::Resolver;

#[derive(Parser)]
#[command(name = "lumen")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Lumen style resolver CLI", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file (defaults to ./lumen.toml if present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Run in production mode (no style diagnostics)
    #[arg(long, global = true)]
    production: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve a scene and print the resolved tree as JSON
    Resolve {
        /// Scene file
        scene: PathBuf,

        /// Event to dispatch after resolving, as <key-or-ref>:<event prop>
        /// (e.g. `button:onMouseEnter`); may be repeated
        #[arg(short, long = "event")]
        events: Vec<String>,

        /// Fire a global mouse-up after the events
        #[arg(long)]
        mouse_up: bool,
    },

    /// Resolve a scene once and report style diagnostics
    Check {
        /// Scene file
        scene: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let mut config = LumenConfig::discover(cli.config.as_deref())?.resolve;
    if cli.production {
        config.production = true;
    }
    debug!(?config, "configuration loaded");

    match cli.command {
        Commands::Resolve {
            scene,
            events,
            mouse_up,
        } => cmd_resolve(&scene, config, &events, mouse_up),

        Commands::Check { scene } => cmd_check(&scene, config),
    }
}

fn cmd_resolve(path: &Path, config: ResolveConfig, events: &[String], mouse_up: bool) -> Result<()> {
    let scene = load_scene(path)?;
    let events = events
        .iter()
        .map(String::as_str)
        .map(parse_event)
        .collect::<Result<Vec<_>>>()?;

    let output = resolve_scene(&scene_owner(path), &scene, config, &events, mouse_up)?;
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn cmd_check(path: &Path, config: ResolveConfig) -> Result<()> {
    let scene = load_scene(path)?;
    let diagnostics = check_scene(&scene_owner(path), &scene, config)
        .with_context(|| format!("Failed to resolve {}", path.display()))?;

    if diagnostics.is_empty() {
        info!("No style problems found in {}", path.display());
        println!("✓ {}: no diagnostics", path.display());
        return Ok(());
    }

    for diagnostic in &diagnostics {
        println!("⚠️  {diagnostic}");
    }
    println!("{}: {} diagnostic(s)", path.display(), diagnostics.len());
    Ok(())
}

fn load_scene(path: &Path) -> Result<Node> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let value: serde_json::Value = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))?;
    scene::parse_node(&value).with_context(|| format!("Invalid scene in {}", path.display()))
}

fn scene_owner(path: &Path) -> Owner {
    let name = path
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or("scene");
    Owner::new(name)
}

/// An event to dispatch on the element with a given key or ref
#[derive(Debug, Clone, PartialEq, Eq)]
struct EventSpec {
    target: String,
    event_type: EventType,
}

fn parse_event(spec: &str) -> Result<EventSpec> {
    let (target, name) = spec
        .rsplit_once(':')
        .with_context(|| format!("Invalid event '{spec}': expected <key-or-ref>:<event>"))?;
    let event_type = event_type_from_name(name)
        .with_context(|| format!("Unknown event '{name}' (expected e.g. onMouseEnter, onFocus)"))?;
    Ok(EventSpec {
        target: target.to_string(),
        event_type,
    })
}

fn find_target<'a>(tree: &'a Node, target: &str) -> Option<&'a Element> {
    tree.find_by_key(target).or_else(|| tree.find_by_ref(target))
}

/// Resolve, replay events (re-resolving after each), and return the final tree
fn resolve_scene(
    owner: &Owner,
    scene: &Node,
    config: ResolveConfig,
    events: &[EventSpec],
    mouse_up: bool,
) -> Result<serde_json::Value> {
    let listener = MouseUpListener::new();
    let resolver = Resolver::new()
        .with_config(config)
        .with_mouse_up_listener(listener.clone());

    let mut resolved = resolver.resolve(owner, scene)?;
    for event in events {
        let element = find_target(&resolved, &event.target)
            .with_context(|| format!("No element with key or ref '{}'", event.target))?;
        if !element.dispatch(event.event_type) {
            debug!(element = %event.target, event = event.event_type, "no handler for event");
        }
        resolved = resolver.resolve(owner, scene)?;
    }

    if mouse_up {
        listener.notify();
        resolved = resolver.resolve(owner, scene)?;
    }

    let stats = resolver.stats();
    debug!(
        visited = stats.elements_visited,
        constructed = stats.elements_constructed,
        "final pass"
    );
    scene::node_to_json(&resolved)
}

/// Resolve once and collect diagnostics
fn check_scene(owner: &Owner, scene: &Node, config: ResolveConfig) -> Result<Vec<Diagnostic>> {
    let sink = Rc::new(CollectingSink::new());
    let resolver = Resolver::new()
        .with_config(config)
        .with_mouse_up_listener(MouseUpListener::new())
        .with_diagnostics(sink.clone());
    resolver.resolve(owner, scene)?;
    Ok(sink.take())
}
