use std::fs::{self, File};
use std::path::Path;
use std::process;
use std::sync::Mutex;

use anyhow::{Context, Result, bail};
use tracing_subscriber::EnvFilter;

use typedtext::{
    config::load_script,
    engine::Engine,
    player::Player,
    types::{RevealConfig, Script, ScriptSource},
};

fn main() {
    if let Err(e) = init_logging() {
        eprintln!("Warning: logging disabled ({e:#})");
    }
    if let Err(e) = run() {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

const PLAY_USAGE: &str = "typedtext play [script.json]";
const COMPILE_USAGE: &str = "typedtext compile <script.json> <timeline.json>";
const SHOW_CONFIG_USAGE: &str = "typedtext show-config";

fn run() -> Result<()> {
    let mut args = std::env::args().skip(1);

    match args.next().as_deref() {
        Some("play") => play(args.next().as_deref()),
        Some("compile") => {
            let script_path = args.next().context(COMPILE_USAGE)?;
            let output_path = args.next().context(COMPILE_USAGE)?;
            compile(&script_path, &output_path)
        }
        Some("show-config") => show_config(),
        _ => bail!(
            "typedtext — line-by-line typed terminal text\n\nUsage:\n  {PLAY_USAGE}\n  {COMPILE_USAGE}\n  {SHOW_CONFIG_USAGE}"
        ),
    }
}

/// Logs go to `TYPEDTEXT_LOG_FILE` when set, otherwise to stderr.
/// The filter comes from `TYPEDTEXT_LOG` (default `warn`).
fn init_logging() -> Result<()> {
    let filter = EnvFilter::try_from_env("TYPEDTEXT_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    match std::env::var_os("TYPEDTEXT_LOG_FILE") {
        Some(path) => {
            let file = File::create(&path)
                .with_context(|| format!("Failed to create {}", Path::new(&path).display()))?;
            builder.with_ansi(false).with_writer(Mutex::new(file)).init();
        }
        None => builder.with_writer(std::io::stderr).init(),
    }
    Ok(())
}

fn load(script_path: Option<&str>) -> Result<(Script, RevealConfig)> {
    let defaults = RevealConfig::load_user();
    match script_path {
        Some(path) => load_script(Path::new(path), defaults)
            .with_context(|| format!("Failed to load {path}")),
        None => Ok((ScriptSource::default().lines, defaults)),
    }
}

fn play(script_path: Option<&str>) -> Result<()> {
    let (script, config) = load(script_path)?;
    Player::new(script, config).play()?;
    Ok(())
}

fn compile(script_path: &str, output_path: &str) -> Result<()> {
    let (script, config) = load(Some(script_path))?;
    let timeline = Engine::compile(&script, &config);

    let output_json = serde_json::to_string_pretty(&timeline)?;
    fs::write(output_path, &output_json).with_context(|| format!("Failed to write {output_path}"))?;

    eprintln!(
        "Compiled {} frames ({} ms) from {} -> {}",
        timeline.frames.len(),
        timeline.duration().as_millis(),
        script_path,
        output_path,
    );

    Ok(())
}

fn show_config() -> Result<()> {
    let config = RevealConfig::load_user();
    println!("{}", serde_json::to_string_pretty(&config)?);
    Ok(())
}
