//! Calendar configuration.
//!
//! Loaded from TOML; every field has a default, so an empty file is a
//! valid configuration.
//!
//! ```toml
//! disclaimer = "Activities subject to change."
//! include_holidays = false
//! fixed_rules = ["Film Night:Thu:18:00", "Quiz:Tue:14:30"]
//!
//! [layout]
//! wrap_width = 28
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{CalendarError, Result};
use crate::models::{WeeklyRule, YearMonth};
use crate::render::LayoutConfig;
use crate::scheduler::MonthRequest;
use crate::sources::{parse_rule_lines, DEFAULT_RULE_LINES};

/// Root configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarConfig {
    /// Page title; defaults to "<Month> <year>" when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Line printed under the title pill.
    #[serde(default = "default_disclaimer")]
    pub disclaimer: String,

    /// Whether holiday inputs are shown.
    #[serde(default = "default_true")]
    pub include_holidays: bool,

    /// Weekly rules as `Title:Day[:Time]` lines.
    #[serde(default = "default_fixed_rules")]
    pub fixed_rules: Vec<String>,

    /// Page geometry and type.
    #[serde(default)]
    pub layout: LayoutConfig,
}

fn default_disclaimer() -> String {
    "Activities subject to change. Please confirm with staff.".into()
}
fn default_true() -> bool {
    true
}
fn default_fixed_rules() -> Vec<String> {
    DEFAULT_RULE_LINES.iter().map(ToString::to_string).collect()
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self {
            title: None,
            disclaimer: default_disclaimer(),
            include_holidays: true,
            fixed_rules: default_fixed_rules(),
            layout: LayoutConfig::default(),
        }
    }
}

impl CalendarConfig {
    /// Parses a TOML document.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text)?;
        config.check()?;
        Ok(config)
    }

    /// Loads a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&text)?;
        debug!(path = %path.display(), rules = config.fixed_rules.len(), "Loaded calendar config");
        Ok(config)
    }

    /// Title for `month`, falling back to "<Month> <year>".
    pub fn title_for(&self, month: YearMonth) -> String {
        match &self.title {
            Some(title) if !title.trim().is_empty() => title.clone(),
            _ => format!("{} {}", month.name(), month.year()),
        }
    }

    /// Parsed weekly rules; malformed lines are skipped.
    pub fn rules(&self) -> Vec<WeeklyRule> {
        parse_rule_lines(&self.fixed_rules.join("\n"))
    }

    /// An aggregation request for `month` seeded with the configured
    /// rules and holiday switch.
    pub fn month_request(&self, month: YearMonth) -> MonthRequest {
        MonthRequest::new(month)
            .with_weekly_rules(self.rules())
            .with_include_holidays(self.include_holidays)
    }

    fn check(&self) -> Result<()> {
        let layout = &self.layout;
        if layout.wrap_width == 0 || layout.holiday_wrap_width == 0 {
            return Err(CalendarError::Config {
                message: "wrap widths must be at least 1".into(),
            });
        }
        if layout.line_spacing_mm <= 0.0 || layout.text_size <= 0.0 {
            return Err(CalendarError::Config {
                message: "line spacing and text size must be positive".into(),
            });
        }
        if layout.page_width <= 0.0 || layout.page_height <= 0.0 {
            return Err(CalendarError::Config {
                message: "page size must be positive".into(),
            });
        }
        Ok(())
    }
}
