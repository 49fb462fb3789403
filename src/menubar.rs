use std::io::Write;

use crossterm::{queue, style};

/// Print a menu item string, bolding any text inside `[...]` brackets.
/// Text outside brackets is printed dim.
pub fn print_menu_item<W: Write>(out: &mut W, item: &str) -> std::io::Result<()> {
    let mut rest = item;
    while !rest.is_empty() {
        let Some(open) = rest.find('[') else {
            print_dim(out, rest)?;
            break;
        };
        if open > 0 {
            print_dim(out, &rest[..open])?;
        }
        rest = &rest[open..];
        match rest.find(']') {
            Some(close) => {
                queue!(
                    out,
                    style::SetAttribute(style::Attribute::Bold),
                    style::Print(&rest[..=close]),
                    style::SetAttribute(style::Attribute::Reset),
                )?;
                rest = &rest[close + 1..];
            }
            None => {
                queue!(out, style::Print(rest))?;
                break;
            }
        }
    }
    Ok(())
}

fn print_dim<W: Write>(out: &mut W, text: &str) -> std::io::Result<()> {
    queue!(
        out,
        style::SetAttribute(style::Attribute::Dim),
        style::Print(text),
        style::SetAttribute(style::Attribute::Reset),
    )
}
