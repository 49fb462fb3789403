//! Minimal boilerplate example — builds a script programmatically and plays
//! it directly in the terminal.
//!
//! Run with: cargo run --example hello

use typedtext::{
    player::Player,
    types::{RevealConfig, Script},
};

fn main() -> anyhow::Result<()> {
    let script = Script::new([
        "whoami",
        "cat ~/notes/idempotence.md",
        "terraform plan -out=tfplan",
        "echo 'no changes. your infrastructure matches the configuration.'",
    ]);

    // Slower than the default so each keystroke is visible.
    let config = RevealConfig {
        typing_delay_ms: 40,
        line_delay_ms: 600,
        scroll_window: 3,
        ..RevealConfig::default()
    };

    let outcome = Player::new(script, config).play()?;
    eprintln!("{outcome:?}");

    Ok(())
}
