//! Template expansion for site variables and date expressions in content.
//!
//! Content goes through two passes, in order:
//!
//! 1. `{expr}`: single-brace date/time expressions. Only names in a closed table
//!    are evaluated, matched exactly (`{date:year}`, `{new Date().getFullYear()}`);
//!    anything else inside braces is left untouched, so code such as
//!    `const { year } = parts;` survives.
//! 2. `{{namespace.key}}`: variables looked up in a table built from the site
//!    configuration. Unknown names stay literal and produce a warning.

use crate::config::{Config, CONFIG_VARIABLES};
use chrono::{DateTime, Local, SecondsFormat, Utc};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use std::collections::BTreeMap;

static EXPRESSION_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\{([^}]+)\}").unwrap());
static VARIABLE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\{\{([^}]+)\}\}").unwrap());

type DateFn = fn(&DateTime<Local>) -> String;

fn us_date(now: &DateTime<Local>) -> String {
    now.format("%-m/%-d/%Y").to_string()
}

fn year(now: &DateTime<Local>) -> String {
    now.format("%Y").to_string()
}

fn month_name(now: &DateTime<Local>) -> String {
    now.format("%B").to_string()
}

fn day_of_month(now: &DateTime<Local>) -> String {
    now.format("%-d").to_string()
}

fn iso_timestamp(now: &DateTime<Local>) -> String {
    now.with_timezone(&Utc)
        .to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// The only expressions `{...}` may evaluate
const EXPRESSIONS: &[(&str, DateFn)] = &[
    ("date:now", us_date),
    ("date:today", us_date),
    ("date:year", year),
    ("date:month", month_name),
    ("date:day", day_of_month),
    ("date:timestamp", iso_timestamp),
    ("new Date().toLocaleDateString('en-US')", us_date),
    ("new Date().toLocaleDateString()", us_date),
    ("new Date().getFullYear()", year),
    ("new Date().getDate()", day_of_month),
    ("new Date().toISOString()", iso_timestamp),
];

fn lookup_expression(expr: &str) -> Option<DateFn> {
    EXPRESSIONS
        .iter()
        .find(|(name, _)| *name == expr)
        .map(|(_, f)| *f)
}

/// Expands template placeholders inside raw content
#[derive(Debug, Clone)]
pub struct TemplateExpander {
    variables: BTreeMap<String, String>,
    now: DateTime<Local>,
}

impl TemplateExpander {
    /// Build the variable table from site configuration using the current time
    pub fn from_config(config: &Config) -> Self {
        Self::with_clock(config, Local::now())
    }

    /// Build the variable table with a fixed clock
    pub fn with_clock(config: &Config, now: DateTime<Local>) -> Self {
        let mut variables: BTreeMap<String, String> = CONFIG_VARIABLES
            .iter()
            .filter_map(|key| config.get(key).map(|value| (key.to_string(), value)))
            .collect();

        variables.insert("date.now".into(), us_date(&now));
        variables.insert("date.year".into(), year(&now));
        variables.insert("date.month".into(), month_name(&now));
        variables.insert("date.day".into(), day_of_month(&now));

        Self { variables, now }
    }

    /// Run both passes over `content`
    pub fn expand(&self, content: &str) -> String {
        let with_expressions = self.expand_expressions(content);
        self.expand_variables(&with_expressions)
    }

    fn expand_expressions(&self, content: &str) -> String {
        EXPRESSION_RE
            .replace_all(content, |caps: &Captures| {
                match lookup_expression(&caps[1]) {
                    Some(eval) => eval(&self.now),
                    None => caps[0].to_string(),
                }
            })
            .into_owned()
    }

    fn expand_variables(&self, content: &str) -> String {
        VARIABLE_RE
            .replace_all(content, |caps: &Captures| {
                let name = caps[1].trim();
                match self.variables.get(name) {
                    Some(value) => value.clone(),
                    None => {
                        tracing::warn!("Template variable not found: {}", name);
                        caps[0].to_string()
                    }
                }
            })
            .into_owned()
    }
}
