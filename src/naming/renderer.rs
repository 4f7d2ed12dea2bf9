//! Naming-pattern rendering on top of Tera.
//!
//! A [`NameTemplate`] wraps a fresh `Tera` instance holding exactly one
//! template (the naming pattern) plus the session's naming functions.
//! Parsing happens once per grouping operation; rendering happens once per
//! group with that group's context.
//!
//! The two failure modes stay distinct: a malformed pattern surfaces as
//! [`NamingError::PatternParse`] before any group is processed, while a
//! pattern referencing data absent from a group's context surfaces as
//! [`NamingError::PatternRender`] and aborts the operation at that group.

use tera::{Context, Tera};

use super::error::NamingError;
use super::functions::NamingSession;

/// Registered name of the one-off naming template.
const TEMPLATE_NAME: &str = "naming";

/// A parsed naming pattern, ready to render against per-group contexts.
#[derive(Debug)]
pub struct NameTemplate {
    tera: Tera,
}

impl NameTemplate {
    /// Parse `pattern` and register the session's naming functions.
    ///
    /// A fresh `Tera` instance per operation is cheap and keeps the
    /// session state scoped to the functions registered here.
    pub fn parse(pattern: &str, session: &NamingSession) -> Result<Self, NamingError> {
        let mut tera = Tera::default();
        session.register_functions(&mut tera);
        tera.add_raw_template(TEMPLATE_NAME, pattern)
            .map_err(|source| NamingError::PatternParse {
                pattern: pattern.to_string(),
                source,
            })?;
        Ok(Self { tera })
    }

    /// Evaluate the pattern against one group's context.
    pub fn render(&self, context: &Context) -> Result<String, NamingError> {
        self.tera
            .render(TEMPLATE_NAME, context)
            .map_err(|source| NamingError::PatternRender { source })
    }
}
