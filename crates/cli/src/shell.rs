//! Menu state machine driving a [`Store`] from line-based input.
//!
//! Each input line is one transition. Nothing here exits the process: `"9"`
//! on any screen makes [`Shell::step`] return [`Control::Exit`] and the caller
//! decides what to do with it.

use std::io::{BufRead, Write};

use anyhow::Result;
use codec::Field;
use store::{Store, StoreError};
use tracing::{debug, error};

/// Input that leaves the shell from any screen.
pub const EXIT_CHOICE: &str = "9";

/// What the caller should do after a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Continue,
    Exit,
}

/// The screen the shell is waiting for input on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    Main,
    Add,
    SelectLine,
    SelectField { position: usize, line: String },
    EditField { line: String, field: Field },
}

/// Interactive front end over a [`Store`].
pub struct Shell {
    store: Store,
    screen: Screen,
}

impl Shell {
    pub fn new(store: Store) -> Self {
        Self {
            store,
            screen: Screen::Main,
        }
    }

    /// Current screen.
    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    /// Reads input lines until EOF or an exit request, rendering the current
    /// screen before each read.
    pub fn run<R: BufRead, W: Write>(&mut self, mut input: R, out: &mut W) -> Result<()> {
        loop {
            self.render(out)?;
            out.flush()?;

            let mut line = String::new();
            if input.read_line(&mut line)? == 0 {
                break;
            }
            if self.step(line.trim(), out)? == Control::Exit {
                break;
            }
        }
        writeln!(out, "bye")?;
        Ok(())
    }

    /// Prints the listing and the prompt for the current screen.
    pub fn render<W: Write>(&self, out: &mut W) -> Result<()> {
        match &self.screen {
            Screen::Main => {
                self.print_entries(out)?;
                writeln!(out)?;
                writeln!(out, "1: Add data to the file")?;
                writeln!(out, "2: Update existing data within file")?;
                writeln!(out, "9: Exit")?;
            }
            Screen::Add => {
                writeln!(
                    out,
                    "data format: (Color, Zipcode (00000-99999), State Abbreviation)"
                )?;
                writeln!(out, "9: Exit")?;
            }
            Screen::SelectLine => {
                self.print_entries(out)?;
                writeln!(out)?;
                writeln!(out, "Enter the line number you would like to update")?;
                writeln!(out, "9: Exit")?;
            }
            Screen::SelectField { position, line } => {
                self.print_entries(out)?;
                writeln!(out)?;
                writeln!(out, "You selected line #{}: {}", position, line)?;
                writeln!(out)?;
                writeln!(out, "1: Change color")?;
                writeln!(out, "2: Change zipcode")?;
                writeln!(out, "3: Change state abbreviation")?;
                writeln!(out, "9: Exit")?;
            }
            Screen::EditField { line, field } => {
                self.print_entries(out)?;
                writeln!(out)?;
                let current = codec::decode(line)
                    .map(|rec| rec.get(*field).to_string())
                    .unwrap_or_default();
                writeln!(out, "Current entry's {}: '{}'", field, current)?;
                let hint = match field {
                    Field::Color => "Enter the new color (up to 8 chars are kept)",
                    Field::Zipcode => "Enter the new zipcode (zero-padded to 5 digits)",
                    Field::State => "Enter the new 2-letter state abbreviation",
                };
                writeln!(out, "{}", hint)?;
                writeln!(out, "9: Exit")?;
            }
        }
        Ok(())
    }

    fn print_entries<W: Write>(&self, out: &mut W) -> Result<()> {
        match self.store.list() {
            Ok(entries) => {
                writeln!(out, "{} data:", self.store.path().display())?;
                for (idx, entry) in entries.iter().enumerate() {
                    writeln!(out, "{}: {}", idx + 1, entry)?;
                }
            }
            Err(e) => writeln!(out, "ERR list failed: {}", e)?,
        }
        Ok(())
    }

    /// Applies one line of input to the current screen.
    ///
    /// Errors are only returned when writing to `out` fails; store errors are
    /// reported to the user and the shell moves to a sensible screen.
    pub fn step<W: Write>(&mut self, input: &str, out: &mut W) -> Result<Control> {
        if input == EXIT_CHOICE {
            return Ok(Control::Exit);
        }

        let screen = std::mem::replace(&mut self.screen, Screen::Main);
        self.screen = match screen {
            Screen::Main => self.on_main(input, out)?,
            Screen::Add => self.on_add(input, out)?,
            Screen::SelectLine => self.on_select_line(input, out)?,
            Screen::SelectField { position, line } => {
                self.on_select_field(position, line, input, out)?
            }
            Screen::EditField { line, field } => self.on_edit_field(line, field, input, out)?,
        };
        debug!(screen = ?self.screen, "transition");
        Ok(Control::Continue)
    }

    fn on_main<W: Write>(&self, input: &str, out: &mut W) -> Result<Screen> {
        Ok(match input {
            "1" => Screen::Add,
            "2" => match self.store.list() {
                Ok(entries) if entries.is_empty() => {
                    writeln!(out, "No entries to update. Returning to main menu.")?;
                    Screen::Main
                }
                Ok(_) => Screen::SelectLine,
                Err(e) => {
                    error!(error = %e, "list failed");
                    writeln!(out, "ERR list failed: {}", e)?;
                    Screen::Main
                }
            },
            _ => {
                writeln!(out, "Invalid response! Please try again.")?;
                Screen::Main
            }
        })
    }

    fn on_add<W: Write>(&self, input: &str, out: &mut W) -> Result<Screen> {
        Ok(match self.store.insert(input) {
            Ok(line) => {
                writeln!(out, "OK {}", line)?;
                Screen::Main
            }
            Err(StoreError::InvalidFormat(_)) => {
                writeln!(out, "Invalid format! Please try again.")?;
                Screen::Add
            }
            Err(StoreError::DuplicateEntry(_)) => {
                writeln!(out, "Entry already exists! Please try again.")?;
                Screen::Add
            }
            Err(e) => {
                error!(error = %e, "insert failed");
                writeln!(out, "ERR add failed: {}", e)?;
                Screen::Main
            }
        })
    }

    fn on_select_line<W: Write>(&self, input: &str, out: &mut W) -> Result<Screen> {
        if input.is_empty() || !input.bytes().all(|b| b.is_ascii_digit()) {
            writeln!(out, "Invalid input! Please enter a line number.")?;
            return Ok(Screen::SelectLine);
        }

        let entry = match input.parse::<usize>() {
            Ok(position) => self.store.entry(position).map(|e| e.map(|l| (position, l))),
            Err(_) => Ok(None),
        };

        Ok(match entry {
            Ok(Some((position, line))) => Screen::SelectField { position, line },
            Ok(None) => {
                writeln!(out, "Invalid line number! Please try again.")?;
                Screen::SelectLine
            }
            Err(e) => {
                error!(error = %e, "lookup failed");
                writeln!(out, "ERR list failed: {}", e)?;
                Screen::Main
            }
        })
    }

    fn on_select_field<W: Write>(
        &self,
        position: usize,
        line: String,
        input: &str,
        out: &mut W,
    ) -> Result<Screen> {
        let field = match input {
            "1" => Field::Color,
            "2" => Field::Zipcode,
            "3" => Field::State,
            _ => {
                writeln!(out, "Invalid response! Please try again.")?;
                return Ok(Screen::SelectField { position, line });
            }
        };
        Ok(Screen::EditField { line, field })
    }

    fn on_edit_field<W: Write>(
        &self,
        line: String,
        field: Field,
        input: &str,
        out: &mut W,
    ) -> Result<Screen> {
        Ok(match self.store.update_field(&line, field, input) {
            Ok(patched) => {
                writeln!(out, "OK {}", patched)?;
                Screen::Main
            }
            Err(StoreError::InvalidFormat(e)) => {
                writeln!(out, "Invalid value ({}). Please try again.", e)?;
                Screen::EditField { line, field }
            }
            Err(StoreError::NotFound(_)) => {
                writeln!(out, "Entry no longer exists. Returning to main menu.")?;
                Screen::Main
            }
            Err(e) => {
                error!(error = %e, "update failed");
                writeln!(out, "ERR update failed: {}", e)?;
                Screen::Main
            }
        })
    }
}
