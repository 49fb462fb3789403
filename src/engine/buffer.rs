//! Display buffer composition.
//!
//! Builds the full text a surface shows for one tick: the visible window of
//! completed lines followed by the partially typed active line and the cursor.

use crate::types::{Markup, RevealConfig, Script};

impl Markup {
    pub fn newline(self) -> &'static str {
        match self {
            Markup::Plain => "\n",
            Markup::Html => "<br />",
        }
    }
}

/// Compose the buffer for `line_index`/`char_pos`.
///
/// `line_index` must be a valid index into `script`.
pub fn compose(script: &Script, line_index: usize, char_pos: usize, config: &RevealConfig) -> String {
    let markup = config.markup;
    let window_start = line_index.saturating_sub(config.scroll_window);
    let mut out = String::new();

    for line in &script.lines()[window_start..line_index] {
        out.push_str(&config.prompt);
        push_text(&mut out, line, markup);
        out.push_str(markup.newline());
    }

    out.push_str(&config.prompt);
    push_text(&mut out, prefix(script.line(line_index), char_pos), markup);
    out.push_str(&config.cursor);
    out
}

/// The first `chars` characters of `line`, or all of it.
fn prefix(line: &str, chars: usize) -> &str {
    match line.char_indices().nth(chars) {
        Some((end, _)) => &line[..end],
        None => line,
    }
}

fn push_text(out: &mut String, text: &str, markup: Markup) {
    match markup {
        Markup::Plain => out.push_str(text),
        Markup::Html => {
            for ch in text.chars() {
                match ch {
                    '&' => out.push_str("&amp;"),
                    '<' => out.push_str("&lt;"),
                    '>' => out.push_str("&gt;"),
                    '"' => out.push_str("&quot;"),
                    c => out.push(c),
                }
            }
        }
    }
}
