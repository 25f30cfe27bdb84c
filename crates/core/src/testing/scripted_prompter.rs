//! Prompter that answers from a script.

use std::collections::VecDeque;
use std::sync::{Mutex, PoisonError};

use crate::matcher::Prompter;
use crate::searcher::Candidate;

/// One `choose` call as seen by the prompter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedOffer {
    pub reason: String,
    pub alternatives: Vec<Candidate>,
}

/// Answers selections and confirmations from pre-set queues.
///
/// Once a queue runs dry the prompter declines (`0` / `false`).
#[derive(Debug, Default)]
pub struct ScriptedPrompter {
    choices: Mutex<VecDeque<usize>>,
    confirmations: Mutex<VecDeque<bool>>,
    offers: Mutex<Vec<RecordedOffer>>,
    questions: Mutex<Vec<String>>,
}

impl ScriptedPrompter {
    pub fn new(choices: Vec<usize>) -> Self {
        Self {
            choices: Mutex::new(choices.into()),
            ..Self::default()
        }
    }

    pub fn with_confirmations(self, answers: Vec<bool>) -> Self {
        *self
            .confirmations
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = answers.into();
        self
    }

    /// Offers made so far.
    pub fn offers(&self) -> Vec<RecordedOffer> {
        self.offers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Yes/no questions asked so far.
    pub fn questions(&self) -> Vec<String> {
        self.questions
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Prompter for ScriptedPrompter {
    fn choose(&self, reason: &str, alternatives: &[Candidate]) -> usize {
        self.offers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(RecordedOffer {
                reason: reason.to_string(),
                alternatives: alternatives.to_vec(),
            });
        self.choices
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front()
            .unwrap_or(0)
    }

    fn confirm(&self, question: &str) -> bool {
        self.questions
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(question.to_string());
        self.confirmations
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front()
            .unwrap_or(false)
    }
}
