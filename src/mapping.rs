//! The mapping table: ordered CDN rewrite rules.

use crate::config::MappingConfig;
use crate::error::Error;
use indexmap::IndexMap;
use regex::{Regex, RegexBuilder};
use std::sync::LazyLock;

static QUOTED_PATH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"'([^']+)'").unwrap_or_else(|e| unreachable!("static pattern: {e}"))
});

/// A single compiled rewrite rule.
#[derive(Debug, Clone)]
pub struct Rule {
    pub name: String,
    pub pattern: String,
    pub replacement: String,
    /// Path relative to the static root the replacement refers to.
    pub local_path: Option<String>,
    regex: Regex,
}

impl Rule {
    /// Compiles `pattern` case-insensitively.
    pub fn new(
        name: impl Into<String>,
        pattern: impl Into<String>,
        replacement: impl Into<String>,
    ) -> Result<Self, Error> {
        let name = name.into();
        let pattern = pattern.into();
        let replacement = replacement.into();
        let regex = RegexBuilder::new(&pattern)
            .case_insensitive(true)
            .build()
            .map_err(|source| Error::PatternError { rule: name.clone(), source })?;

        Ok(Self {
            local_path: extract_local_path(&replacement),
            name,
            pattern,
            replacement,
            regex,
        })
    }

    /// Overrides the path derived from the replacement.
    pub fn with_local_path(mut self, local_path: Option<String>) -> Self {
        if local_path.is_some() {
            self.local_path = local_path;
        }
        self
    }

    pub fn regex(&self) -> &Regex {
        &self.regex
    }
}

/// Returns the first single-quoted substring of `replacement`.
///
/// `{% static 'js/jquery.min.js' %}` yields `js/jquery.min.js`.
pub fn extract_local_path(replacement: &str) -> Option<String> {
    QUOTED_PATH
        .captures(replacement)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
}

/// A mapping that was left out of the table because its pattern does not compile.
#[derive(Debug, Clone, PartialEq)]
pub struct RejectedRule {
    pub name: String,
    pub reason: String,
}

/// Enabled rules in configuration order.
#[derive(Debug, Clone, Default)]
pub struct MappingTable {
    rules: Vec<Rule>,
    rejected: Vec<RejectedRule>,
}

impl MappingTable {
    /// Builds the table from the `cdn_mappings` section.
    ///
    /// Disabled mappings are dropped. A mapping whose pattern fails to compile
    /// is skipped with a warning; the rest of the table still loads.
    pub fn load(mappings: &IndexMap<String, MappingConfig>) -> Self {
        let mut table = Self::default();

        for (name, mapping) in mappings {
            if !mapping.enabled {
                log::debug!("Skipping disabled mapping '{name}'");
                continue;
            }
            match Rule::new(name, &mapping.pattern, &mapping.replacement) {
                Ok(rule) => {
                    let rule = rule.with_local_path(mapping.local_path.clone());
                    if rule.local_path.is_none() {
                        log::debug!("Mapping '{name}' does not reference a local file");
                    }
                    table.rules.push(rule);
                }
                Err(e) => {
                    log::warn!("{e}");
                    table
                        .rejected
                        .push(RejectedRule { name: name.clone(), reason: e.to_string() });
                }
            }
        }

        table
    }

    pub fn from_rules(rules: Vec<Rule>) -> Self {
        Self { rules, rejected: Vec::new() }
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn rejected(&self) -> &[RejectedRule] {
        &self.rejected
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }
}
