use std::path::Path;

use rfp_spec::{FieldKey, FieldKind, RenderQuestion, StepPayload, render_step_text};

/// Controls which bits of state the wizard prints.
#[derive(Copy, Clone, Eq, PartialEq)]
pub enum Verbosity {
    /// Clean output: question prompts only.
    Clean,
    /// Verbose output: step status, visible questions, error details, choice lists.
    Verbose,
}

impl Verbosity {
    pub fn from_verbose(verbose: bool) -> Self {
        if verbose {
            Verbosity::Verbose
        } else {
            Verbosity::Clean
        }
    }

    pub fn is_verbose(&self) -> bool {
        matches!(self, Verbosity::Verbose)
    }
}

/// Prints step headers, prompts and outcomes for the interactive wizard.
pub struct WizardPresenter {
    verbosity: Verbosity,
    last_header: Option<usize>,
}

impl WizardPresenter {
    pub fn new(verbosity: Verbosity) -> Self {
        Self {
            verbosity,
            last_header: None,
        }
    }

    pub fn show_commands(&self) {
        println!("At any prompt: 'back', 'step <n>', 'restart' or 'exit'.");
    }

    /// Makes the next [`show_header`](Self::show_header) print again after a jump.
    pub fn forget_header(&mut self) {
        self.last_header = None;
    }

    /// Prints the step banner once per visit.
    pub fn show_header(&mut self, payload: &StepPayload) {
        let position = payload.progress.position;
        if self.last_header == Some(position) {
            return;
        }
        println!();
        println!(
            "Step {}/{}: {} ({:.0}%)",
            position, payload.progress.total, payload.title, payload.progress.percent
        );
        println!("{}", payload.blurb);
        self.last_header = Some(position);
    }

    pub fn show_status(&self, payload: &StepPayload) {
        if self.verbosity.is_verbose() {
            println!("{}", render_step_text(payload));
        }
    }

    pub fn show_prompt(&self, prompt: &PromptContext) {
        let mut line = format!("{}/{} {}", prompt.index, prompt.total, prompt.title);
        if prompt.required {
            line.push_str(" *");
        }
        if let Some(hint) = &prompt.hint {
            line.push(' ');
            line.push_str(hint);
        }
        println!("{}", line);
        if let Some(description) = &prompt.description {
            println!("{}", description);
        }
        if let Some(current) = &prompt.current {
            println!("Current: {} (press enter to keep)", current);
        }
        if self.verbosity.is_verbose() && !prompt.choices.is_empty() {
            println!("Choices: {}", prompt.choices.join(", "));
        }
    }

    pub fn show_parse_error(&self, error: &AnswerParseError) {
        eprintln!("Invalid answer: {}", error.user_message);
        if self.verbosity.is_verbose()
            && let Some(debug) = &error.debug_message
        {
            eprintln!("  Expected: {}", debug);
        }
    }

    pub fn show_missing(&self, missing: &[FieldKey]) {
        let labels = missing
            .iter()
            .map(|key| key.spec().label)
            .collect::<Vec<_>>();
        println!("Still required before continuing: {}", labels.join(", "));
    }

    pub fn show_contact_required(&self) {
        println!("Your name and email are required to download the RFP.");
    }

    pub fn show_export_error(&self, error: &dyn std::fmt::Display) {
        eprintln!("Could not generate the document: {}", error);
    }

    pub fn show_completion(&self, path: &Path) {
        println!("Done ✅");
        println!("RFP written to {}", path.display());
    }
}

/// Context used to format a single prompt.
pub struct PromptContext {
    pub index: usize,
    pub total: usize,
    pub title: String,
    pub description: Option<String>,
    pub required: bool,
    pub hint: Option<String>,
    pub choices: Vec<String>,
    pub current: Option<String>,
}

impl PromptContext {
    pub fn new(question: &RenderQuestion, index: usize, total: usize) -> Self {
        let choices = question
            .kind
            .choices()
            .iter()
            .map(|choice| choice.to_string())
            .collect::<Vec<_>>();
        Self {
            index: index.max(1),
            total,
            title: question.prompt.to_string(),
            description: question.helper.map(String::from),
            required: question.required,
            hint: kind_hint(question.kind),
            choices,
            current: Some(question.current_value.clone()).filter(|value| !value.is_empty()),
        }
    }
}

fn kind_hint(kind: FieldKind) -> Option<String> {
    match kind {
        FieldKind::Choice(options) => Some(format!("({})", options.join("/"))),
        FieldKind::MultiChoice(options) => {
            Some(format!("(comma separated: {}; 'none' clears)", options.join(", ")))
        }
        FieldKind::Percent => Some("(0-100)".to_string()),
        FieldKind::Text | FieldKind::LongText => None,
    }
}

/// Error produced when parsing answers from the user.
#[derive(Debug)]
pub struct AnswerParseError {
    pub user_message: String,
    pub debug_message: Option<String>,
}

impl AnswerParseError {
    pub fn new(user_message: impl Into<String>, debug_message: Option<String>) -> Self {
        Self {
            user_message: user_message.into(),
            debug_message,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rfp_spec::{StepId, WizardSession, build_step_payload};

    #[test]
    fn prompt_context_carries_hint_and_current_value() {
        let mut session = WizardSession::new();
        session.go_to_step(StepId::Recommerce.index());
        let payload = build_step_payload(&session);
        let split = payload
            .questions
            .iter()
            .find(|question| question.key == FieldKey::SalesSplitDtc)
            .expect("split question");

        let prompt = PromptContext::new(split, 0, 4);
        assert_eq!(prompt.index, 1);
        assert_eq!(prompt.hint.as_deref(), Some("(0-100)"));
        assert_eq!(prompt.current.as_deref(), Some("50"));
    }

    #[test]
    fn choice_hint_lists_options() {
        assert_eq!(
            kind_hint(FieldKind::Choice(&["Yes", "No"])).as_deref(),
            Some("(Yes/No)")
        );
        assert!(kind_hint(FieldKind::LongText).is_none());
    }
}
