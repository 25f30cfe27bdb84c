//! Operator prompts used when automated matching is inconclusive.

use std::io::{self, BufRead, BufReader, Stdin, Stdout, Write};
use std::sync::Mutex;

use tracing::{debug, warn};

use crate::searcher::Candidate;

/// Capability for asking a human operator.
///
/// Batch runs use [`DecliningPrompter`], which never blocks.
pub trait Prompter: Send + Sync {
    /// Offer `alternatives` and return the operator's selection.
    ///
    /// `0` means "none of these"; `n` in `1..=alternatives.len()` picks the
    /// n-th alternative.
    fn choose(&self, reason: &str, alternatives: &[Candidate]) -> usize;

    /// Ask a yes/no question.
    fn confirm(&self, question: &str) -> bool;
}

/// Offer alternatives to the operator and return the chosen one.
///
/// Returns `None` when the operator declines, when there is nothing to
/// offer, or when the prompter answers outside the offered range.
pub fn disambiguate(
    prompter: &dyn Prompter,
    alternatives: &[Candidate],
    reason: &str,
) -> Option<Candidate> {
    if alternatives.is_empty() {
        return None;
    }

    let selection = prompter.choose(reason, alternatives);
    match selection {
        0 => None,
        n => alternatives.get(n - 1).cloned(),
    }
}

/// Prompter that declines every offer without asking anyone.
#[derive(Debug, Clone, Copy, Default)]
pub struct DecliningPrompter;

impl Prompter for DecliningPrompter {
    fn choose(&self, reason: &str, alternatives: &[Candidate]) -> usize {
        debug!(
            reason = reason,
            alternatives = alternatives.len(),
            "Batch mode, declining alternatives"
        );
        0
    }

    fn confirm(&self, question: &str) -> bool {
        debug!(question = question, "Batch mode, declining confirmation");
        false
    }
}

/// Blocking console prompter.
///
/// Invalid selections are re-prompted until a valid number arrives. End of
/// input counts as declining, so a closed stdin cannot hang the run.
pub struct ConsolePrompter<R, W> {
    io: Mutex<(R, W)>,
}

impl ConsolePrompter<BufReader<Stdin>, Stdout> {
    /// Prompter bound to the process stdin/stdout.
    pub fn stdio() -> Self {
        Self::new(BufReader::new(io::stdin()), io::stdout())
    }
}

impl<R, W> ConsolePrompter<R, W>
where
    R: BufRead + Send,
    W: Write + Send,
{
    pub fn new(reader: R, writer: W) -> Self {
        Self {
            io: Mutex::new((reader, writer)),
        }
    }

    /// Consume the prompter, returning its reader and writer.
    pub fn into_inner(self) -> (R, W) {
        match self.io.into_inner() {
            Ok(io) => io,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

/// Read one line; `None` on end of input or read failure.
fn read_answer<R: BufRead>(reader: &mut R) -> Option<String> {
    let mut line = String::new();
    match reader.read_line(&mut line) {
        Ok(0) => None,
        Ok(_) => Some(line.trim().to_string()),
        Err(e) => {
            warn!(error = %e, "Failed to read operator input");
            None
        }
    }
}

impl<R, W> Prompter for ConsolePrompter<R, W>
where
    R: BufRead + Send,
    W: Write + Send,
{
    fn choose(&self, reason: &str, alternatives: &[Candidate]) -> usize {
        let mut guard = match self.io.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        let (reader, writer) = &mut *guard;

        let _ = writeln!(writer, "ERROR: {}", reason);
        let _ = writeln!(writer, "Would you like to take any of the following alternatives?");
        for (idx, candidate) in alternatives.iter().enumerate() {
            let _ = writeln!(
                writer,
                "{}: {} (format: {})",
                idx + 1,
                candidate.title,
                candidate.category
            );
        }
        let _ = write!(writer, "Choose alternative (0 for none): ");
        let _ = writer.flush();

        loop {
            let Some(answer) = read_answer(reader) else {
                let _ = writeln!(writer);
                return 0;
            };

            match answer.parse::<usize>() {
                Ok(choice) if choice <= alternatives.len() => return choice,
                _ => {
                    let _ = write!(writer, "Invalid choice. Choose alternative (0 for none): ");
                    let _ = writer.flush();
                }
            }
        }
    }

    fn confirm(&self, question: &str) -> bool {
        let mut guard = match self.io.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        let (reader, writer) = &mut *guard;

        let _ = writeln!(writer, "{} (y/n)", question);
        let _ = write!(writer, "> ");
        let _ = writer.flush();

        matches!(
            read_answer(reader).map(|a| a.to_lowercase()).as_deref(),
            Some("y") | Some("yes")
        )
    }
}
