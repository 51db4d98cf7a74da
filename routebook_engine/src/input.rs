//! Terminal input handling for the viewer REPL.
//!
//! Wraps rustyline configuration, history, and command completion, with a
//! plain stdin fallback for non-interactive use (piped input, tests).

use std::fs;
use std::io::{self, IsTerminal, Write};
use std::path::{Path, PathBuf};

use log::{info, warn};
use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::history::DefaultHistory;
use rustyline::validate::{ValidationContext, ValidationResult, Validator};
use rustyline::{Context, Helper};

/// Outcome of reading a line from the REPL input.
pub enum InputEvent {
    Line(String),
    Eof,
    Interrupted,
}

const COMMAND_TERMS: &[&str] = &[
    "add", "csr", "flag", "help", "jump", "markers", "next", "passed", "quit", "refresh", "save",
    "set", "toc", "tracker",
];

type ReplEditor = rustyline::Editor<GuideHelper, DefaultHistory>;

#[derive(Default)]
struct GuideHelper;

impl Helper for GuideHelper {}

impl Completer for GuideHelper {
    type Candidate = Pair;

    fn complete(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> rustyline::Result<(usize, Vec<Self::Candidate>)> {
        let (start, prefix) = current_prefix(line, pos);
        if prefix.is_empty() {
            return Ok((start, Vec::new()));
        }
        let lower = prefix.to_lowercase();
        let mut pairs = Vec::new();
        for term in COMMAND_TERMS {
            if term.starts_with(&lower) {
                pairs.push(Pair {
                    display: (*term).to_string(),
                    replacement: (*term).to_string(),
                });
            }
        }
        Ok((start, pairs))
    }
}

impl Hinter for GuideHelper {
    type Hint = String;
}

impl Highlighter for GuideHelper {}

impl Validator for GuideHelper {
    fn validate(&self, ctx: &mut ValidationContext) -> rustyline::Result<ValidationResult> {
        let _ = ctx;
        Ok(ValidationResult::Valid(None))
    }
}

fn current_prefix(line: &str, pos: usize) -> (usize, String) {
    let slice = &line[..pos];
    let trimmed = slice.trim_start_matches(char::is_whitespace);
    let start = pos - trimmed.len();
    (start, trimmed.to_string())
}

/// Helper responsible for managing the interactive input backend.
///
/// Prefers `rustyline` when an interactive terminal is available, falling back to
/// a basic stdin reader otherwise.
pub struct InputManager {
    backend: Backend,
}

impl InputManager {
    pub fn new() -> Self {
        if !io::stdin().is_terminal() {
            info!("stdin is not a TTY; using basic input mode");
            return Self { backend: Backend::plain() };
        }
        let backend = match RustylineInput::new() {
            Ok(editor) => {
                info!("using rustyline-backed REPL input");
                Backend::Rustyline(editor)
            },
            Err(err) => {
                warn!("failed to initialize rustyline ({err}), falling back to basic stdin");
                Backend::plain()
            },
        };
        Self { backend }
    }

    /// Read a line from the current backend. If the interactive backend reports an
    /// unrecoverable error, switch to the plain stdin backend and retry once.
    pub fn read_line(&mut self, prompt: &str) -> io::Result<InputEvent> {
        match self.backend.read_line(prompt) {
            Err(err) if self.backend.is_rustyline() => {
                warn!("line editor failed ({err}), dropping to plain stdin");
                self.backend = Backend::plain();
                self.backend.read_line(prompt)
            },
            other => other,
        }
    }
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new()
    }
}

enum Backend {
    Rustyline(RustylineInput),
    Plain(StdinInput),
}

impl Backend {
    fn plain() -> Self {
        Backend::Plain(StdinInput::default())
    }

    fn is_rustyline(&self) -> bool {
        matches!(self, Backend::Rustyline(_))
    }

    fn read_line(&mut self, prompt: &str) -> io::Result<InputEvent> {
        match self {
            Backend::Rustyline(editor) => editor.read_line(prompt),
            Backend::Plain(stdin) => stdin.read_line(prompt),
        }
    }
}

struct RustylineInput {
    editor: ReplEditor,
    history_path: Option<PathBuf>,
}

impl RustylineInput {
    fn new() -> io::Result<Self> {
        let mut editor = rustyline::Editor::<GuideHelper, _>::new().map_err(readline_io_error)?;
        editor.set_helper(Some(GuideHelper));
        let history_path = history_file_path();

        if let Some(path) = history_path.as_ref() {
            if let Some(dir) = path.parent()
                && let Err(err) = fs::create_dir_all(dir)
            {
                warn!("failed to create history directory {}: {err}", dir.display());
            }

            match editor.load_history(path) {
                Ok(()) => {},
                Err(ReadlineError::Io(ref io_err)) if io_err.kind() == io::ErrorKind::NotFound => {
                    info!("no prior history found at {}, starting fresh", path.display());
                },
                Err(err) => warn!("failed to load history from {}: {err}", path.display()),
            }
        }

        Ok(Self { editor, history_path })
    }

    fn read_line(&mut self, prompt: &str) -> io::Result<InputEvent> {
        let line = match self.editor.readline(prompt) {
            Ok(line) => line,
            Err(err) => return convert_readline_error(err),
        };
        if !line.trim().is_empty() {
            if let Err(err) = self.editor.add_history_entry(line.as_str()) {
                warn!("failed to append to history: {err}");
            }
            if let Some(path) = self.history_path.as_ref()
                && let Err(err) = self.editor.save_history(path)
            {
                warn!("failed to persist history to {}: {err}", path.display());
            }
        }
        Ok(InputEvent::Line(line))
    }
}

#[derive(Default)]
struct StdinInput {
    buffer: String,
}

impl StdinInput {
    fn read_line(&mut self, prompt: &str) -> io::Result<InputEvent> {
        print!("{prompt}");
        io::stdout().flush()?;

        self.buffer.clear();
        if io::stdin().read_line(&mut self.buffer)? == 0 {
            return Ok(InputEvent::Eof);
        }
        let line = self.buffer.trim_end_matches(['\r', '\n']).to_string();
        Ok(InputEvent::Line(line))
    }
}

fn convert_readline_error(err: ReadlineError) -> io::Result<InputEvent> {
    Ok(match err {
        ReadlineError::Interrupted => InputEvent::Interrupted,
        ReadlineError::Eof => InputEvent::Eof,
        other => return Err(readline_io_error(other)),
    })
}

fn readline_io_error(err: ReadlineError) -> io::Error {
    if let ReadlineError::Io(io_err) = err {
        io_err
    } else {
        io::Error::other(err)
    }
}

fn history_file_path() -> Option<PathBuf> {
    dirs::data_dir()
        .or_else(dirs::data_local_dir)
        .map(|base| build_history_path(&base))
}

fn build_history_path(base: &Path) -> PathBuf {
    let mut path = base.to_path_buf();
    path.push("routebook");
    path.push("history.txt");
    path
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_readline_ctrl_c_to_interrupt() {
        let result = convert_readline_error(ReadlineError::Interrupted).unwrap();
        assert!(matches!(result, InputEvent::Interrupted));
    }

    #[test]
    fn history_path_appends_components() {
        let base = PathBuf::from("/tmp/routebook-test");
        let path = build_history_path(&base);
        assert!(path.ends_with(Path::new("routebook/history.txt")));
    }

    #[test]
    fn command_terms_cover_navigation() {
        assert!(COMMAND_TERMS.contains(&"jump"));
        assert!(COMMAND_TERMS.contains(&"next"));
    }
}
