//! The three-option menu.

/// Menu shown after the environment checks pass.
pub const MENU: &str = "\
========================================
  Branch diff tools
========================================

  1. Simple diff summary
  2. Advanced diff analysis
  3. Quit
";

pub const CHOICE_PROMPT: &str = "Choose an option (1-3): ";
pub const ARGS_PROMPT: &str =
    "Arguments for the advanced tool (leave empty to compare against the default branch): ";
pub const INVALID_CHOICE: &str = "Invalid option, nothing to do.";
pub const PAUSE_PROMPT: &str = "Press Enter to exit...";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuChoice {
    Simple,
    Advanced,
    Quit,
    /// Anything else, kept for logging.
    Invalid(String),
}

impl MenuChoice {
    /// Exact match against `1`, `2`, `3`; no trimming, no case folding.
    pub fn parse(input: &str) -> Self {
        match input {
            "1" => MenuChoice::Simple,
            "2" => MenuChoice::Advanced,
            "3" => MenuChoice::Quit,
            other => MenuChoice::Invalid(other.to_string()),
        }
    }
}
