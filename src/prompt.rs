use crate::error::{prompt_error, AppResult};
use inquire::{InquireError, Select, Text};

/// Console input capability, injected so the workflow can run without a
/// terminal in tests
pub trait Prompter: Send + Sync {
    /// Pick an index from the rendered slot list; None when the user backs out
    fn select_slot(&self, slots: &[String]) -> AppResult<Option<usize>>;

    /// Free-text input, optionally pre-filled with a default
    fn input_text(&self, message: &str, default: Option<&str>) -> AppResult<String>;
}

/// Prompter backed by the interactive terminal
pub struct ConsolePrompter;

impl Prompter for ConsolePrompter {
    fn select_slot(&self, slots: &[String]) -> AppResult<Option<usize>> {
        match Select::new("Choose a slot:", slots.to_vec()).raw_prompt() {
            Ok(choice) => Ok(Some(choice.index)),
            Err(InquireError::OperationCanceled) | Err(InquireError::OperationInterrupted) => {
                Ok(None)
            }
            Err(e) => Err(prompt_error(&format!("Slot selection failed: {}", e))),
        }
    }

    fn input_text(&self, message: &str, default: Option<&str>) -> AppResult<String> {
        let mut prompt = Text::new(message);
        if let Some(default) = default {
            prompt = prompt.with_default(default);
        }

        prompt
            .prompt()
            .map_err(|e| prompt_error(&format!("Input failed: {}", e)))
    }
}
