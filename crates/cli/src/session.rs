//! Interactive registration session.
//!
//! Reads one command per line, prompts for form fields, renders the user
//! table and asks for delete confirmation on the same terminal.

use std::cell::RefCell;
use std::io::{BufRead, Write};

use common::{AppError, AppResult};
use domain::{DomainError, Field, FilterCriteria, RegistrationCandidate, University, User};
use registration_service_lib::{
    ConfirmPrompt, Confirmation, DeleteOutcome, RegistrationManager, RegistrationService,
};
use serde::Serialize;
use tracing::{debug, warn};

use crate::args::{SessionCommand, SessionLine};

const PROMPT: &str = "registrar> ";

/// Table row as printed in JSON mode
#[derive(Debug, Serialize)]
struct Row<'a> {
    index: usize,
    #[serde(flatten)]
    user: &'a User,
}

/// Whether the session should keep reading commands
#[derive(Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Terminal session over any line reader and writer.
pub struct Session<R, W> {
    service: RegistrationManager,
    input: R,
    output: W,
    json: bool,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(service: RegistrationManager, input: R, output: W, json: bool) -> Self {
        Self {
            service,
            input,
            output,
            json,
        }
    }

    /// Read and execute commands until `quit` or end of input
    pub fn run(&mut self) -> AppResult<()> {
        loop {
            write!(self.output, "{}", PROMPT)?;
            self.output.flush()?;

            let Some(line) = self.read_line()? else {
                writeln!(self.output)?;
                return Ok(());
            };
            if line.is_empty() {
                continue;
            }

            match SessionLine::parse_line(&line) {
                Ok(command) => {
                    if self.execute(command)? == Flow::Quit {
                        return Ok(());
                    }
                }
                // clap renders help, usage and parse errors itself
                Err(e) => write!(self.output, "{}", e.render())?,
            }
        }
    }

    /// Execute a single command
    pub fn execute(&mut self, command: SessionCommand) -> AppResult<Flow> {
        debug!(?command, "Executing command");
        match command {
            SessionCommand::Add => self.add()?,
            SessionCommand::List(args) => self.list(&FilterCriteria::from(args))?,
            SessionCommand::Delete { index } => self.delete(index)?,
            SessionCommand::Universities => self.universities()?,
            SessionCommand::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }

    /// Access the underlying service
    #[cfg(test)]
    pub fn service(&self) -> &RegistrationManager {
        &self.service
    }

    /// Consume the session, returning the writer
    #[cfg(test)]
    pub fn into_output(self) -> W {
        self.output
    }

    fn add(&mut self) -> AppResult<()> {
        let Some(candidate) = self.read_candidate()? else {
            writeln!(self.output, "Registration cancelled")?;
            return Ok(());
        };

        match self.service.submit(candidate) {
            Ok(user) => {
                if self.json {
                    let body = serde_json::to_string_pretty(&user)?;
                    writeln!(self.output, "{}", body)?;
                } else {
                    writeln!(
                        self.output,
                        "Registered {} {} <{}> at {}",
                        user.first_name, user.last_name, user.email, user.university
                    )?;
                }
                Ok(())
            }
            Err(DomainError::Validation(report)) => {
                if self.json {
                    return self.print_error(&AppError::Validation(report));
                }
                for field in Field::ALL {
                    if let Some(message) = report.message_for(field) {
                        writeln!(self.output, "  {}: {}", field, message)?;
                    }
                }
                Ok(())
            }
            Err(e) => self.print_error(&AppError::from(e)),
        }
    }

    fn read_candidate(&mut self) -> AppResult<Option<RegistrationCandidate>> {
        let mut candidate = RegistrationCandidate::default();

        for field in [Field::FirstName, Field::LastName, Field::Email] {
            let Some(value) = self.ask(field.label())? else {
                return Ok(None);
            };
            match field {
                Field::FirstName => candidate.first_name = value,
                Field::LastName => candidate.last_name = value,
                _ => candidate.email = value,
            }
        }

        for (number, university) in University::ALL.iter().enumerate() {
            writeln!(self.output, "  {}) {}", number + 1, university)?;
        }
        let Some(choice) = self.ask("University (number or name)")? else {
            return Ok(None);
        };
        candidate.university = resolve_university_choice(&choice);

        Ok(Some(candidate))
    }

    fn list(&mut self, criteria: &FilterCriteria) -> AppResult<()> {
        let all = self.service.users();
        let rows: Vec<Row<'_>> = self
            .service
            .query(criteria)
            .filter_map(|user| {
                all.iter()
                    .position(|candidate| std::ptr::eq(candidate, user))
                    .map(|index| Row { index, user })
            })
            .collect();

        if self.json {
            let body = serde_json::to_string_pretty(&rows)?;
            writeln!(self.output, "{}", body)?;
            return Ok(());
        }

        if rows.is_empty() {
            writeln!(self.output, "No users found")?;
            return Ok(());
        }

        writeln!(
            self.output,
            "{:<4} {:<16} {:<16} {:<28} {}",
            "#", "First name", "Last name", "Email", "University"
        )?;
        for row in &rows {
            writeln!(
                self.output,
                "{:<4} {:<16} {:<16} {:<28} {}",
                row.index, row.user.first_name, row.user.last_name, row.user.email, row.user.university
            )?;
        }
        Ok(())
    }

    fn delete(&mut self, index: i64) -> AppResult<()> {
        let confirmation = TerminalConfirmation::new(&mut self.input, &mut self.output);
        let outcome = self.service.request_delete(index, &confirmation);
        drop(confirmation);

        match outcome {
            DeleteOutcome::Removed(user) => writeln!(self.output, "Deleted {}", user.email)?,
            DeleteOutcome::Declined => writeln!(self.output, "Delete cancelled")?,
            // out-of-range rows are ignored without a message
            DeleteOutcome::Ignored => {}
        }
        Ok(())
    }

    fn universities(&mut self) -> AppResult<()> {
        let options = self.service.university_options();
        if self.json {
            let body = serde_json::to_string_pretty(options)?;
            writeln!(self.output, "{}", body)?;
            return Ok(());
        }

        for option in options {
            match option.value {
                Some(university) => writeln!(self.output, "  {} ({})", option.label, university.slug())?,
                None => writeln!(self.output, "  {}", option.label)?,
            }
        }
        Ok(())
    }

    fn print_error(&mut self, error: &AppError) -> AppResult<()> {
        if self.json {
            let body = serde_json::to_string_pretty(&error.to_response())?;
            writeln!(self.output, "{}", body)?;
        } else {
            writeln!(self.output, "Error: {}", error.user_message())?;
        }
        Ok(())
    }

    fn ask(&mut self, label: &str) -> AppResult<Option<String>> {
        write!(self.output, "{}: ", label)?;
        self.output.flush()?;
        self.read_line()
    }

    fn read_line(&mut self) -> AppResult<Option<String>> {
        read_trimmed_line(&mut self.input).map_err(AppError::from)
    }
}

/// Map a numbered menu choice to the university value; anything else is
/// passed through for validation.
fn resolve_university_choice(choice: &str) -> String {
    choice
        .trim()
        .parse::<usize>()
        .ok()
        .and_then(|number| number.checked_sub(1))
        .and_then(|position| University::ALL.get(position))
        .map(|university| university.value().to_string())
        .unwrap_or_else(|| choice.trim().to_string())
}

/// Read one line without its line ending; `None` at end of input.
fn read_trimmed_line<R: BufRead>(input: &mut R) -> std::io::Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
}

/// Asks `y/N` on the session terminal.
struct TerminalConfirmation<'a, R, W> {
    input: RefCell<&'a mut R>,
    output: RefCell<&'a mut W>,
}

impl<'a, R: BufRead, W: Write> TerminalConfirmation<'a, R, W> {
    fn new(input: &'a mut R, output: &'a mut W) -> Self {
        Self {
            input: RefCell::new(input),
            output: RefCell::new(output),
        }
    }

    fn ask(&self, prompt: &ConfirmPrompt) -> std::io::Result<bool> {
        let mut output = self.output.borrow_mut();
        writeln!(output, "{}", prompt.header)?;
        write!(
            output,
            "{} ({} {} <{}>) [y/N]: ",
            prompt.message, prompt.user.first_name, prompt.user.last_name, prompt.user.email
        )?;
        output.flush()?;

        let answer = read_trimmed_line(&mut **self.input.borrow_mut())?.unwrap_or_default();
        Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
    }
}

impl<R: BufRead, W: Write> Confirmation for TerminalConfirmation<'_, R, W> {
    fn confirm(&self, prompt: &ConfirmPrompt) -> bool {
        self.ask(prompt).unwrap_or_else(|e| {
            warn!(error = %e, "Confirmation failed, treating as declined");
            false
        })
    }
}
