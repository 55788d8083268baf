//! Console reporter - styled one-line messages, JSON dumps and prompts
//!
//! Every message is a single line prefixed by an emoji marker and colored with
//! crossterm. Output goes to any `Write` sink so the same code drives the real
//! terminal and in-memory buffers. Write errors are ignored: console output is
//! best effort and must never abort a session.

use std::fmt::Display;
use std::io::{self, BufRead, IsTerminal, Stdin, StdinLock, Stdout, Write};
use std::path::Path;
use std::thread;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::style::Stylize;
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use serde::Serialize;
use serde_json::Value;

use crate::error::Fatal;
use crate::storage::load_json;
use crate::verify::Tally;

/// Where prompts read their answers from
pub trait Input {
    /// One line of visible input, without the trailing newline
    fn read_line(&mut self) -> io::Result<String>;

    /// One line of input that is not echoed back
    fn read_hidden(&mut self) -> io::Result<String>;
}

/// Line input over any buffered reader (pipes, files, test fixtures).
///
/// Nothing is echoed by a reader, so hidden input is plain line input.
pub struct ReaderInput<R> {
    reader: R,
}

impl<R: BufRead> ReaderInput<R> {
    pub fn new(reader: R) -> Self {
        ReaderInput { reader }
    }
}

impl<R: BufRead> Input for ReaderInput<R> {
    fn read_line(&mut self) -> io::Result<String> {
        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "no more input"));
        }
        let trimmed = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(trimmed);
        Ok(line)
    }

    fn read_hidden(&mut self) -> io::Result<String> {
        self.read_line()
    }
}

/// The process's stdin; hidden input uses raw mode when stdin is a terminal
pub struct TerminalInput {
    stdin: Stdin,
}

impl TerminalInput {
    pub fn new() -> Self {
        TerminalInput { stdin: io::stdin() }
    }

    fn lines(&self) -> ReaderInput<StdinLock<'static>> {
        ReaderInput::new(self.stdin.lock())
    }
}

impl Default for TerminalInput {
    fn default() -> Self {
        Self::new()
    }
}

/// Restores cooked mode even when reading fails
struct RawModeGuard;

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
    }
}

/// What a keystroke does to a hidden line
#[derive(Debug, PartialEq, Eq)]
enum HiddenKey {
    Submit,
    Cancel,
    Edit,
}

/// Fold one key event into `secret`. Chords with Ctrl or Alt never add text.
fn apply_key(secret: &mut String, key: &KeyEvent) -> HiddenKey {
    if key.kind == KeyEventKind::Release {
        return HiddenKey::Edit;
    }
    let chord = key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT);
    match key.code {
        KeyCode::Enter => HiddenKey::Submit,
        KeyCode::Char('c') | KeyCode::Char('d') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            HiddenKey::Cancel
        }
        KeyCode::Char(c) if !chord => {
            secret.push(c);
            HiddenKey::Edit
        }
        KeyCode::Backspace => {
            secret.pop();
            HiddenKey::Edit
        }
        _ => HiddenKey::Edit,
    }
}

impl Input for TerminalInput {
    fn read_line(&mut self) -> io::Result<String> {
        self.lines().read_line()
    }

    fn read_hidden(&mut self) -> io::Result<String> {
        if !self.stdin.is_terminal() {
            return self.lines().read_line();
        }

        enable_raw_mode()?;
        let _guard = RawModeGuard;

        let mut secret = String::new();
        loop {
            let Event::Key(key) = event::read()? else {
                continue;
            };
            match apply_key(&mut secret, &key) {
                HiddenKey::Submit => break,
                HiddenKey::Cancel => {
                    return Err(io::Error::new(io::ErrorKind::Interrupted, "input cancelled"));
                }
                HiddenKey::Edit => {}
            }
        }
        Ok(secret)
    }
}

/// Styled console reporter. Owns the verification [`Tally`].
pub struct Console<W = Stdout, I = TerminalInput> {
    out: W,
    input: I,
    pub(crate) tally: Tally,
}

impl Console {
    /// Console on stdout reading from the real terminal
    pub fn stdio() -> Self {
        Console::new(io::stdout(), TerminalInput::new())
    }
}

impl<W: Write, I: Input> Console<W, I> {
    pub fn new(out: W, input: I) -> Self {
        Console {
            out,
            input,
            tally: Tally::default(),
        }
    }

    pub fn tally(&self) -> &Tally {
        &self.tally
    }

    /// Give back the output sink
    pub fn into_output(self) -> W {
        self.out
    }

    pub(crate) fn line(&mut self, text: impl Display) {
        let _ = writeln!(self.out, "{}", text);
        let _ = self.out.flush();
    }

    /// Prompt and read one visible line
    pub fn ask(&mut self, msg: &str) -> io::Result<String> {
        self.line(format!("🤖💬❔ {}", msg.to_string().white()));
        self.input.read_line()
    }

    /// Prompt and read one line without echo
    pub fn secret(&mut self, msg: &str) -> io::Result<String> {
        self.line(format!("🤖💬❓ {} (not shown)", msg.to_string().white()));
        self.input.read_hidden()
    }

    pub fn info(&mut self, msg: impl Display) {
        self.line(format!("🤖💭💡 {}", msg.to_string().cyan()));
    }

    pub fn warning(&mut self, msg: impl Display) {
        tracing::warn!("{}", msg);
        self.line(format!("🤖🗯❕ {}", msg.to_string().yellow().bold()));
    }

    /// Print the message and hand back a [`Fatal`] for the caller to return.
    ///
    /// ```no_run
    /// # fn run() -> Result<(), apy::Fatal> {
    /// let mut console = apy::Console::stdio();
    /// return Err(console.critical("Critical."));
    /// # }
    /// ```
    #[must_use = "the Fatal must be returned to the entry point to exit"]
    pub fn critical(&mut self, msg: impl Display) -> Fatal {
        let message = msg.to_string();
        tracing::error!("{}", message);
        self.line(format!("🤖🗯❗ {}", message.clone().red().bold()));
        Fatal::new(message)
    }

    pub fn section(&mut self, msg: impl Display) {
        self.line(format!("📂 {}", msg.to_string().white().bold().underlined()));
    }

    pub fn item(&mut self, msg: impl Display) {
        self.line(format!("📄 {}", msg.to_string().white()));
    }

    /// Pretty-print any serializable value as 2-space indented JSON
    pub fn content<T: Serialize + ?Sized>(&mut self, json: &T) {
        match serde_json::to_string_pretty(json) {
            Ok(text) => self.line(text.white()),
            Err(e) => self.warning(e),
        }
    }

    /// Announce, then block the thread for `seconds`
    pub fn wait(&mut self, seconds: u64) {
        self.line(format!("⏳ {}", format!("Waiting {} seconds...", seconds).yellow()));
        thread::sleep(Duration::from_secs(seconds));
    }

    /// Read a JSON file; any failure becomes one warning and `None`
    pub fn load(&mut self, path: impl AsRef<Path>) -> Option<Value> {
        match load_json(path.as_ref()) {
            Ok(data) => Some(data),
            Err(e) => {
                self.warning(format!("{:#}", e));
                None
            }
        }
    }

    /// Print the tally as one line: info when clean, warning otherwise
    pub fn summary(&mut self) {
        let text = format!("{} ok, {} error", self.tally.ok(), self.tally.error());
        if self.tally.all_ok() {
            self.info(text);
        } else {
            self.warning(text);
        }
    }
}
