//! Job schedules: a fixed rate, a preset, or a cron expression.
use super::candidate::{Candidate, CandidateSet};
use super::error::{ResourceKind, SelectError, SelectResult};
use super::resolver::{SelectRequest, Selector};
use crate::prompt::{PromptConfig, Validator};
use regex::Regex;
use std::sync::OnceLock;

pub const RATE_OPTION: &str = "Rate";
pub const FIXED_OPTION: &str = "Fixed Schedule";
pub const CUSTOM_PRESET: &str = "Custom";

const DEFAULT_RATE: &str = "1h30m";
const DEFAULT_CRON: &str = "0 * * * *";
const RATE_PROMPT: &str = "How long would you like to wait between executions?";
const RATE_HELP: &str = "Durations such as 30m, 1h, or 2h45m.";
const PRESET_PROMPT: &str = "What schedule would you like to use?";
const CRON_PROMPT: &str = "What custom cron schedule would you like to use?";
const CRON_HELP: &str = "Five fields: minute hour day-of-month month day-of-week.";

/// Preset label and the expression it stands for.
const PRESETS: &[(&str, &str)] = &[
    ("Hourly", "@hourly"),
    ("Daily", "@daily"),
    ("Weekly", "@weekly"),
    ("Monthly", "@monthly"),
    ("Yearly", "@yearly"),
];

static DURATION: OnceLock<Regex> = OnceLock::new();
static CRON_FIELD: OnceLock<Regex> = OnceLock::new();

fn duration_regex() -> &'static Regex {
    DURATION.get_or_init(|| Regex::new(r"^(\d+h)?(\d+m)?(\d+s)?$").expect("regex for durations"))
}

fn cron_field_regex() -> &'static Regex {
    CRON_FIELD.get_or_init(|| Regex::new(r"^[0-9A-Za-z*?/,#\-]+$").expect("regex for cron fields"))
}

/// Accept Go-style durations of at least one second, such as `1h30m`.
pub fn validate_rate(value: &str) -> Result<(), String> {
    let value = value.trim();
    if value.is_empty() || !duration_regex().is_match(value) {
        return Err(format!("{value:?} is not a duration such as 1h30m"));
    }
    if value.chars().filter(|c| c.is_ascii_digit()).all(|c| c == '0') {
        return Err("duration must be longer than zero".to_string());
    }
    Ok(())
}

/// Accept five-field cron expressions.
pub fn validate_cron(value: &str) -> Result<(), String> {
    let fields: Vec<&str> = value.split_whitespace().collect();
    if fields.len() != 5 {
        return Err(format!(
            "cron expression must have 5 fields, found {}",
            fields.len()
        ));
    }
    if let Some(bad) = fields.iter().find(|field| !cron_field_regex().is_match(field)) {
        return Err(format!("invalid cron field {bad:?}"));
    }
    Ok(())
}

pub struct ScheduleSelector<'a> {
    base: &'a Selector<'a>,
}

impl<'a> ScheduleSelector<'a> {
    pub fn new(base: &'a Selector<'a>) -> Self {
        Self { base }
    }

    /// Return a schedule expression: `@every <duration>`, a preset such as
    /// `@daily`, or a cron expression.
    pub fn schedule(&self, message: &str, help: &str) -> SelectResult<String> {
        let kinds: CandidateSet<String> = [RATE_OPTION, FIXED_OPTION]
            .into_iter()
            .map(Candidate::named)
            .collect();
        let req = SelectRequest::new(ResourceKind::Schedule, "the schedule types", message)
            .help(help)
            .config(PromptConfig::with_final_message("Schedule type:"));
        let kind = self.base.select_one(&req, kinds)?.value;
        if kind == RATE_OPTION {
            return self.rate();
        }
        self.fixed()
    }

    fn rate(&self) -> SelectResult<String> {
        let config = PromptConfig {
            default: Some(DEFAULT_RATE.to_string()),
            final_message: Some("Rate:".to_string()),
            page_size: None,
        };
        let validator: &Validator = &validate_rate;
        let rate = self
            .base
            .prompter()
            .get_text(RATE_PROMPT, RATE_HELP, Some(validator), &config)
            .map_err(|source| SelectError::prompt("get schedule rate", source))?;
        Ok(format!("@every {}", rate.trim()))
    }

    fn fixed(&self) -> SelectResult<String> {
        let presets: CandidateSet<String> = std::iter::once(CUSTOM_PRESET)
            .chain(PRESETS.iter().map(|(label, _)| *label))
            .map(Candidate::named)
            .collect();
        let req = SelectRequest::new(ResourceKind::Schedule, "the fixed schedules", PRESET_PROMPT)
            .config(PromptConfig::with_final_message("Fixed schedule:"));
        let preset = self.base.select_one(&req, presets)?.value;
        if let Some((_, expr)) = PRESETS.iter().find(|(label, _)| *label == preset) {
            return Ok((*expr).to_string());
        }

        let config = PromptConfig {
            default: Some(DEFAULT_CRON.to_string()),
            final_message: Some("Cron schedule:".to_string()),
            page_size: None,
        };
        let validator: &Validator = &validate_cron;
        let cron = self
            .base
            .prompter()
            .get_text(CRON_PROMPT, CRON_HELP, Some(validator), &config)
            .map_err(|source| SelectError::prompt("get custom cron schedule", source))?;
        Ok(cron.split_whitespace().collect::<Vec<_>>().join(" "))
    }
}

#[cfg(test)]
#[path = "schedule_tests.rs"]
mod tests;
