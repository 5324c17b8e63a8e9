use std::io::{BufRead, Write};

use dialoguer::Input;
use dialoguer::console::Term;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PromptError {
    #[error("prompt failed: {0}")]
    Terminal(#[from] dialoguer::Error),
    #[error("prompt failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Asks the operator for a title when the filename does not give one.
///
/// Receives the suggested title (the containing directory's name) and
/// returns the title to search for. Callers trim the answer and treat an
/// empty one as "no title".
pub trait TitlePrompt {
    fn resolve_title(&mut self, suggested: &str) -> Result<String, PromptError>;
}

impl<F> TitlePrompt for F
where
    F: FnMut(&str) -> Result<String, PromptError>,
{
    fn resolve_title(&mut self, suggested: &str) -> Result<String, PromptError> {
        self(suggested)
    }
}

const OVERRIDE_QUESTION: &str = "Please enter the correct title";

fn confirm_question(suggested: &str) -> String {
    format!(
        "Could not determine the title from the filename. Use directory name '{suggested}' as the title? (Y/n)"
    )
}

/// Only an explicit "n" rejects the suggestion; anything else accepts it.
pub fn is_rejection(answer: &str) -> bool {
    answer.trim().eq_ignore_ascii_case("n")
}

/// Blocking yes/no-or-override prompt on stdout/stdin.
///
/// Uses an interactive line editor on a terminal and plain line reads when
/// stdin is piped.
pub struct TerminalPrompt {
    term: Term,
}

impl TerminalPrompt {
    pub fn stdout() -> Self {
        Self {
            term: Term::stdout(),
        }
    }
}

impl TitlePrompt for TerminalPrompt {
    fn resolve_title(&mut self, suggested: &str) -> Result<String, PromptError> {
        if !self.term.is_term() {
            let stdin = std::io::stdin();
            let stdout = std::io::stdout();
            return LinePrompt::new(stdin.lock(), stdout.lock()).resolve_title(suggested);
        }

        let answer = Input::<String>::new()
            .with_prompt(confirm_question(suggested))
            .allow_empty(true)
            .interact_text_on(&self.term)?;

        if !is_rejection(&answer) {
            return Ok(suggested.trim().to_string());
        }

        let title = Input::<String>::new()
            .with_prompt(OVERRIDE_QUESTION)
            .allow_empty(true)
            .interact_text_on(&self.term)?;
        Ok(title.trim().to_string())
    }
}

/// Same prompt over any line reader and writer.
pub struct LinePrompt<R, W> {
    reader: R,
    writer: W,
}

impl<R: BufRead, W: Write> LinePrompt<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }

    fn ask(&mut self, question: &str) -> Result<String, PromptError> {
        write!(self.writer, "{question} ")?;
        self.writer.flush()?;

        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            return Err(std::io::Error::new(
                std::io::ErrorKind::UnexpectedEof,
                "input closed",
            )
            .into());
        }
        Ok(line)
    }
}

impl<R: BufRead, W: Write> TitlePrompt for LinePrompt<R, W> {
    fn resolve_title(&mut self, suggested: &str) -> Result<String, PromptError> {
        let answer = self.ask(&confirm_question(suggested))?;
        if !is_rejection(&answer) {
            return Ok(suggested.trim().to_string());
        }
        Ok(self.ask(OVERRIDE_QUESTION)?.trim().to_string())
    }
}
