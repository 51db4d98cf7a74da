//! Command module
//!
//! Describes the commands available while reading a guide.
use variantly;

/// Desired state for a boolean toggle argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggle {
    On,
    Off,
    Flip,
}

/// Commands that can be executed by the reader.
#[derive(Debug, PartialEq, variantly::Variantly)]
pub enum Command {
    /// Reveal the next section (the scroll-to-bottom analogue).
    Next,
    /// Jump straight to a section by id.
    Jump(String),
    /// Mark the current section as passed, applying its guaranteed updates.
    Passed,
    Toc,
    Tracker,
    AddResource {
        name: String,
        delta: i64,
    },
    SetResource {
        name: String,
        quantity: i64,
    },
    Flag {
        name: String,
        toggle: Toggle,
    },
    Csr(bool),
    Markers(bool),
    Refresh,
    Save,
    Help,
    Quit,
    Unknown,
}

/// Parses an input string and returns a corresponding `Command` if recognized.
pub fn parse_command(input: &str) -> Command {
    let words: Vec<&str> = input.split_whitespace().collect();
    match words.as_slice() {
        ["next" | "more" | "n"] => Command::Next,
        ["jump" | "goto" | "j", section] => Command::Jump((*section).to_string()),
        ["passed" | "done"] => Command::Passed,
        ["toc" | "contents" | "sections"] => Command::Toc,
        ["tracker" | "t"] => Command::Tracker,
        ["add", name, delta] => delta.parse().map_or(Command::Unknown, |delta| Command::AddResource {
            name: (*name).to_string(),
            delta,
        }),
        ["set", name, quantity] => {
            quantity.parse().map_or(Command::Unknown, |quantity| Command::SetResource {
                name: (*name).to_string(),
                quantity,
            })
        },
        ["flag", name, state] => parse_toggle(state).map_or(Command::Unknown, |toggle| Command::Flag {
            name: (*name).to_string(),
            toggle,
        }),
        ["flag", name] => Command::Flag {
            name: (*name).to_string(),
            toggle: Toggle::Flip,
        },
        ["csr", "on"] => Command::Csr(true),
        ["csr", "off"] => Command::Csr(false),
        ["markers", "on"] => Command::Markers(true),
        ["markers", "off"] => Command::Markers(false),
        ["refresh" | "redraw"] => Command::Refresh,
        ["save"] => Command::Save,
        ["help" | "?"] => Command::Help,
        ["quit" | "exit" | "q"] => Command::Quit,
        _ => Command::Unknown,
    }
}

fn parse_toggle(word: &str) -> Option<Toggle> {
    match word {
        "on" | "true" | "yes" => Some(Toggle::On),
        "off" | "false" | "no" => Some(Toggle::Off),
        "toggle" | "flip" => Some(Toggle::Flip),
        _ => None,
    }
}
