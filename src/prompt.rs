//! Interactive prompt capability.
//!
//! Resolvers only ever talk to [`Prompter`]; the terminal backend lives here
//! and tests substitute a scripted double.
use anyhow::{anyhow, Context, Result};
use dialoguer::console::{style, Term};
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Confirm, Input, MultiSelect, Select};

/// Validates free-text input, returning a user-facing message on rejection.
pub type Validator = dyn Fn(&str) -> std::result::Result<(), String>;

/// Rendering hints for a single prompt call.
///
/// None of these affect which value a resolver returns.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PromptConfig {
    /// Pre-filled value for text input.
    pub default: Option<String>,
    /// Replaces the prompt line once the user has answered.
    pub final_message: Option<String>,
    /// Maximum number of options shown at once.
    pub page_size: Option<usize>,
}

impl PromptConfig {
    pub fn with_final_message(message: impl Into<String>) -> Self {
        Self {
            final_message: Some(message.into()),
            ..Self::default()
        }
    }
}

/// Blocking prompt primitives used by every resolver.
pub trait Prompter {
    fn select_one(
        &self,
        message: &str,
        help: &str,
        options: &[String],
        config: &PromptConfig,
    ) -> Result<String>;

    fn select_many(
        &self,
        message: &str,
        help: &str,
        options: &[String],
        preselected: &[String],
        config: &PromptConfig,
    ) -> Result<Vec<String>>;

    fn get_text(
        &self,
        message: &str,
        help: &str,
        validator: Option<&Validator>,
        config: &PromptConfig,
    ) -> Result<String>;

    fn confirm(&self, message: &str, help: &str, config: &PromptConfig) -> Result<bool>;
}

/// Terminal prompts rendered on stderr.
pub struct TerminalPrompter {
    theme: ColorfulTheme,
    term: Term,
    default_page_size: Option<usize>,
}

impl TerminalPrompter {
    pub fn new(default_page_size: Option<usize>) -> Self {
        Self {
            theme: ColorfulTheme::default(),
            term: Term::stderr(),
            default_page_size,
        }
    }

    fn show_help(&self, help: &str) -> Result<()> {
        if help.trim().is_empty() {
            return Ok(());
        }
        self.term
            .write_line(&style(help.trim()).dim().to_string())
            .context("write prompt help")
    }

    fn show_final(&self, config: &PromptConfig, answer: &str) -> Result<()> {
        if let Some(message) = config.final_message.as_deref() {
            self.term
                .write_line(&format!("{} {}", style(message).bold(), style(answer).cyan()))
                .context("write prompt result")?;
        }
        Ok(())
    }

    fn page_size(&self, config: &PromptConfig) -> Option<usize> {
        config.page_size.or(self.default_page_size)
    }
}

impl Prompter for TerminalPrompter {
    fn select_one(
        &self,
        message: &str,
        help: &str,
        options: &[String],
        config: &PromptConfig,
    ) -> Result<String> {
        if options.is_empty() {
            return Err(anyhow!("no options to select from"));
        }
        self.show_help(help)?;
        let mut select = Select::with_theme(&self.theme)
            .with_prompt(message)
            .items(options)
            .default(0)
            .report(config.final_message.is_none());
        if let Some(size) = self.page_size(config) {
            select = select.max_length(size);
        }
        let idx = select.interact_on(&self.term)?;
        let answer = options[idx].clone();
        self.show_final(config, &answer)?;
        Ok(answer)
    }

    fn select_many(
        &self,
        message: &str,
        help: &str,
        options: &[String],
        preselected: &[String],
        config: &PromptConfig,
    ) -> Result<Vec<String>> {
        if options.is_empty() {
            return Err(anyhow!("no options to select from"));
        }
        self.show_help(help)?;
        let defaults: Vec<bool> = options
            .iter()
            .map(|option| preselected.contains(option))
            .collect();
        let mut select = MultiSelect::with_theme(&self.theme)
            .with_prompt(message)
            .items(options)
            .defaults(&defaults)
            .report(config.final_message.is_none());
        if let Some(size) = self.page_size(config) {
            select = select.max_length(size);
        }
        let picked = select.interact_on(&self.term)?;
        let answers: Vec<String> = picked.into_iter().map(|idx| options[idx].clone()).collect();
        self.show_final(config, &answers.join(", "))?;
        Ok(answers)
    }

    fn get_text(
        &self,
        message: &str,
        help: &str,
        validator: Option<&Validator>,
        config: &PromptConfig,
    ) -> Result<String> {
        self.show_help(help)?;
        let mut input = Input::<String>::with_theme(&self.theme)
            .with_prompt(message)
            .allow_empty(true)
            .report(config.final_message.is_none());
        if let Some(default) = config.default.clone() {
            input = input.default(default);
        }
        if let Some(validator) = validator {
            input = input.validate_with(move |value: &String| validator(value.as_str()));
        }
        let answer = input.interact_text_on(&self.term)?;
        self.show_final(config, &answer)?;
        Ok(answer)
    }

    fn confirm(&self, message: &str, help: &str, config: &PromptConfig) -> Result<bool> {
        self.show_help(help)?;
        let default = config
            .default
            .as_deref()
            .map(|value| value.eq_ignore_ascii_case("y") || value.eq_ignore_ascii_case("yes"))
            .unwrap_or(false);
        let answer = Confirm::with_theme(&self.theme)
            .with_prompt(message)
            .default(default)
            .report(config.final_message.is_none())
            .interact_on(&self.term)?;
        self.show_final(config, if answer { "yes" } else { "no" })?;
        Ok(answer)
    }
}
