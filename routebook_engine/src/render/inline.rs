//! Rendering of inline content nodes to styled text runs.
//!
//! Inline nodes are context-free: each renders to a styled string on its
//! own, and the caller coalesces consecutive runs into wrapped lines.

use std::collections::HashMap;

use colored::{ColoredString, Colorize};
use lazy_static::lazy_static;
use routebook_data::{
    CharacterCommand, CharacterReference, ContentNode, FormattedText, GameMacro,
};

use crate::settings::Settings;
use crate::style::GuideStyle;

lazy_static! {
    /// Default character colors, matched case-insensitively by name.
    static ref CHARACTER_COLORS: HashMap<&'static str, (u8, u8, u8)> = {
        let mut m = HashMap::new();
        m.insert("tidus", (0x00, 0x70, 0xD1));
        m.insert("yuna", (0xE8, 0x5D, 0x75));
        m.insert("auron", (0xC0, 0x2E, 0x21));
        m.insert("wakka", (0xF3, 0x7F, 0x00));
        m.insert("lulu", (0x78, 0x42, 0x83));
        m.insert("rikku", (0x64, 0xA8, 0x43));
        m.insert("kimahri", (0x3B, 0x59, 0x98));
        m.insert("seymour", (0x8A, 0x9A, 0xE0));
        m.insert("enemy", (0xE6, 0x1E, 0x1E));
        m
    };

    /// Display labels for known game macros.
    static ref MACRO_LABELS: HashMap<&'static str, &'static str> = {
        let mut m = HashMap::new();
        m.insert("sd", "SD");
        m.insert("cs", "CS");
        m.insert("fmv", "FMV");
        m.insert("skippableFmv", "FMV*");
        m.insert("save", "SAVE");
        m.insert("pickup", "PICKUP");
        m.insert("od", "OD");
        m
    };
}

/// LaTeX-style symbol substitutions, longest code first so `\leftarrow`
/// wins over any shorter prefix.
const MATH_SYMBOLS: &[(&str, &str)] = &[
    ("\\rightarrow", "→"),
    ("\\leftarrow", "←"),
    ("\\downarrow", "↓"),
    ("\\uparrow", "↑"),
    ("\\nearrow", "↗"),
    ("\\searrow", "↘"),
    ("\\swarrow", "↙"),
    ("\\nwarrow", "↖"),
    ("\\times", "×"),
];

/// Render one inline node to a styled run.
pub fn render(node: &ContentNode, settings: &Settings) -> String {
    match node {
        ContentNode::PlainText(text) => text.text.clone(),
        ContentNode::FormattedText(ft) => formatted(ft),
        ContentNode::CharacterReference(char_ref) => character(char_ref).to_string(),
        ContentNode::CharacterCommand(cmd) => character_command(cmd),
        ContentNode::GameMacro(mac) => game_macro(mac),
        ContentNode::Formation(formation) => {
            let names: Vec<String> = formation
                .characters
                .iter()
                .map(|ch| render(ch, settings))
                .collect();
            format!("Formation: {}", names.join(", "))
        },
        ContentNode::Link(link) => {
            let label: String = link.text.iter().map(|n| render(n, settings)).collect();
            format!("{} {}", label, format!("<{}>", link.url).dim_style())
        },
        ContentNode::Nth(nth) => nth.value.clone(),
        ContentNode::Num(num) => thousands(num.value),
        ContentNode::MathSymbol(sym) => math_symbol(&sym.symbol),
        other => {
            // Block nodes never reach here through the renderer; fall back
            // to the tag so misuse is at least visible.
            format!("[{}]", other.type_tag())
        },
    }
}

fn formatted(ft: &FormattedText) -> String {
    let mut styled: ColoredString = ft.text.as_str().normal();
    if let Some((r, g, b)) = ft.color.as_deref().and_then(parse_hex_color) {
        styled = styled.truecolor(r, g, b);
    }
    if ft.is_bold.unwrap_or(false) {
        styled = styled.bold();
    }
    if ft.is_italic.unwrap_or(false) {
        styled = styled.italic();
    }
    if ft.is_large.unwrap_or(false) {
        styled = styled.bold().underline();
    }
    if ft.text_decoration.as_deref() == Some("underline") {
        styled = styled.underline();
    }
    if ft.text_decoration.as_deref() == Some("line-through") {
        styled = styled.strikethrough();
    }
    styled.to_string()
}

fn character(char_ref: &CharacterReference) -> ColoredString {
    let (r, g, b) = char_ref
        .color
        .as_deref()
        .and_then(parse_hex_color)
        .or_else(|| character_color(&char_ref.character_name))
        .unwrap_or((0xC8, 0xC8, 0xC8));
    let styled = char_ref.character_name.as_str().truecolor(r, g, b);
    if char_ref.is_bold.unwrap_or(true) {
        styled.bold()
    } else {
        styled
    }
}

fn character_command(cmd: &CharacterCommand) -> String {
    let (r, g, b) = cmd
        .color
        .as_deref()
        .and_then(parse_hex_color)
        .or_else(|| character_color(&cmd.character_name))
        .unwrap_or((0xC8, 0xC8, 0xC8));
    let mut name = cmd.character_name.as_str().truecolor(r, g, b);
    if cmd.is_bold.unwrap_or(true) {
        name = name.bold();
    }
    format!("{name}: {}", cmd.action_text)
}

fn game_macro(mac: &GameMacro) -> String {
    let label = MACRO_LABELS.get(mac.macro_name.as_str()).copied();
    let head = match label {
        Some(label) => format!("[{label}]").macro_style().to_string(),
        // Unknown macro codes stay visible rather than disappearing.
        None => format!("[{}]", mac.macro_name).dim_style().to_string(),
    };
    match &mac.value {
        Some(value) if !value.is_empty() => format!("{head} {value}"),
        _ => head,
    }
}

/// Substitute LaTeX codes in `symbol`, longest match first; anything not in
/// the table passes through verbatim.
fn math_symbol(symbol: &str) -> String {
    let mut out = String::new();
    let mut rest = symbol;
    'outer: while !rest.is_empty() {
        for (code, glyph) in MATH_SYMBOLS {
            if let Some(tail) = rest.strip_prefix(code) {
                out.push_str(glyph);
                rest = tail;
                continue 'outer;
            }
        }
        let ch = rest.chars().next().unwrap_or_default();
        out.push(ch);
        rest = &rest[ch.len_utf8()..];
    }
    out
}

/// Format an integer with comma thousands separators.
pub fn thousands(value: i64) -> String {
    let negative = value < 0;
    let digits = value.unsigned_abs().to_string();
    let mut out = String::new();
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    if negative {
        format!("-{out}")
    } else {
        out
    }
}

fn character_color(name: &str) -> Option<(u8, u8, u8)> {
    CHARACTER_COLORS.get(name.to_ascii_lowercase().as_str()).copied()
}

fn parse_hex_color(raw: &str) -> Option<(u8, u8, u8)> {
    let hex = raw.strip_prefix('#')?;
    // Only ASCII hex digits may follow; anything else (including multi-byte
    // text) is a malformed value, not a reason to stop rendering.
    if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some((r, g, b))
}
