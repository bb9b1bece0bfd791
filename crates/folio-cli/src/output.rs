//! Output formatting helpers.

use anyhow::Result;
use colored::{ColoredString, Colorize};
use serde::Serialize;

use folio_core::{ContentItem, Product, Tag};

/// Print a success message.
pub fn success(msg: &str) {
    println!("{} {}", "✓".green(), msg);
}

/// Print a notice to stderr.
pub fn notice(msg: &str) {
    eprintln!("{}", msg.dimmed());
}

/// Print a warning to stderr.
pub fn warn(msg: &str) {
    eprintln!("{} {}", "!".yellow(), msg);
}

/// Print a labeled field.
pub fn field(label: &str, value: &str) {
    println!("{}: {}", label.dimmed(), value);
}

/// Print a value as compact JSON.
pub fn json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string(value)?;
    println!("{}", json);
    Ok(())
}

/// Print a value as pretty-printed JSON.
pub fn json_pretty<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{}", json);
    Ok(())
}

/// A tag name in the tag's colour.
pub fn tag_chip(tag: &Tag) -> ColoredString {
    match parse_hex(tag.color.as_str()) {
        Some((r, g, b)) => format!("#{}", tag.name).truecolor(r, g, b),
        None => format!("#{}", tag.name).normal(),
    }
}

fn parse_hex(color: &str) -> Option<(u8, u8, u8)> {
    let hex = color.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
    Some((channel(0)?, channel(2)?, channel(4)?))
}

/// Print one listing line for an article summary.
pub fn article_line(item: &ContentItem) {
    let date = item.published_at.format("%Y-%m-%d");
    let tags: Vec<String> = item.tags.iter().map(|t| tag_chip(t).to_string()).collect();

    println!("{} {}", date.to_string().dimmed(), item.title.bold());
    print!("  {}", item.slug.as_str().cyan());
    if !tags.is_empty() {
        print!("  {}", tags.join(" "));
    }
    println!();
    if let Some(brief) = &item.brief {
        println!("  {}", brief);
    }
}

/// Print one listing line for a product.
pub fn product_line(product: &Product) {
    println!("{}  {}", product.display_price().green(), product.name.bold());
    if let Some(url) = &product.url {
        println!("  {}", url.cyan());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hex_colours() {
        assert_eq!(parse_hex("#3b82f6"), Some((0x3b, 0x82, 0xf6)));
        assert_eq!(parse_hex("3b82f6"), None);
        assert_eq!(parse_hex("#3b82"), None);
        assert_eq!(parse_hex("#zzzzzz"), None);
    }
}
