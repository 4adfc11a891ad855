// SPDX-FileCopyrightText: 2026 PawMarket Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Turns Figment failures into miette diagnostics.
//!
//! Unknown keys get a "did you mean" hint (Jaro-Winkler via `strsim`) and,
//! when the offending file can be re-read, a label pointing at the key.

#![allow(unused_assignments)] // miette's Diagnostic derive generates code triggering this lint

use std::path::PathBuf;

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Jaro-Winkler score a candidate must beat to be offered as a correction.
const SUGGESTION_THRESHOLD: f64 = 0.75;

#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    #[error("unknown key `{key}` in [{section}]")]
    #[diagnostic(
        code(pawmarket::config::unknown_key),
        help("{}", unknown_key_help(suggestion.as_deref(), valid_keys))
    )]
    UnknownKey {
        key: String,
        /// Table the key appeared in, or `root`.
        section: String,
        suggestion: Option<String>,
        valid_keys: String,
        #[label("not a recognized setting")]
        span: Option<SourceSpan>,
        #[source_code]
        src: Option<NamedSource<String>>,
    },

    #[error("`{key}` has the wrong type: found {found}")]
    #[diagnostic(code(pawmarket::config::invalid_type), help("expected {expected}"))]
    InvalidType {
        key: String,
        found: String,
        expected: String,
    },

    #[error("missing required key `{key}`")]
    #[diagnostic(code(pawmarket::config::missing_key))]
    MissingKey { key: String },

    /// A value parsed but failed a semantic check.
    #[error("invalid configuration: {message}")]
    #[diagnostic(code(pawmarket::config::validation))]
    Validation { message: String },

    #[error("configuration error: {0}")]
    #[diagnostic(code(pawmarket::config::other))]
    Other(String),
}

fn unknown_key_help(suggestion: Option<&str>, valid_keys: &str) -> String {
    match suggestion {
        Some(s) => format!("did you mean `{s}`? Allowed here: {valid_keys}"),
        None => format!("allowed here: {valid_keys}"),
    }
}

/// Raw TOML text of the files that fed a failed load, keyed by display path.
#[derive(Debug, Default)]
pub struct ConfigSources {
    files: Vec<(String, String)>,
}

impl ConfigSources {
    /// Read whichever of `paths` exist. Unreadable files are skipped.
    pub fn read(paths: impl IntoIterator<Item = PathBuf>) -> Self {
        let files = paths
            .into_iter()
            .filter_map(|path| {
                let content = std::fs::read_to_string(&path).ok()?;
                Some((path.display().to_string(), content))
            })
            .collect();
        Self { files }
    }

    /// A single in-memory document.
    pub fn inline(name: &str, content: &str) -> Self {
        Self {
            files: vec![(name.to_string(), content.to_string())],
        }
    }

    fn get(&self, name: &str) -> Option<&str> {
        self.files
            .iter()
            .find(|(path, _)| path == name)
            .map(|(_, content)| content.as_str())
    }

    /// Label `key` inside the file Figment attributed the error to.
    fn locate(
        &self,
        error: &figment::Error,
        section: &[String],
        key: &str,
    ) -> (Option<SourceSpan>, Option<NamedSource<String>>) {
        let file = error
            .metadata
            .as_ref()
            .and_then(|m| m.source.as_ref())
            .and_then(|source| match source {
                figment::Source::File(path) => Some(path.display().to_string()),
                _ => None,
            });

        let Some((name, content)) = file
            .as_deref()
            .and_then(|name| self.get(name).map(|content| (name, content)))
        else {
            return (None, None);
        };

        match key_offset(content, section, key) {
            Some(offset) => (
                Some(SourceSpan::new(offset.into(), key.len())),
                Some(NamedSource::new(name, content.to_string())),
            ),
            None => (None, None),
        }
    }
}

/// Flatten a Figment error chain into diagnostics.
pub fn figment_to_config_errors(err: figment::Error, sources: &ConfigSources) -> Vec<ConfigError> {
    use figment::error::Kind;

    err.into_iter()
        .map(|error| {
            let path = &error.path;
            match &error.kind {
                Kind::UnknownField(key, allowed) => {
                    let section = enclosing_section(path, key);
                    let (span, src) = sources.locate(&error, section, key);
                    ConfigError::UnknownKey {
                        key: key.clone(),
                        section: if section.is_empty() {
                            "root".to_string()
                        } else {
                            section.join(".")
                        },
                        suggestion: closest_key(key, allowed),
                        valid_keys: allowed.join(", "),
                        span,
                        src,
                    }
                }
                Kind::MissingField(key) => ConfigError::MissingKey {
                    key: key.to_string(),
                },
                Kind::InvalidType(found, expected) => ConfigError::InvalidType {
                    key: path.join("."),
                    found: found.to_string(),
                    expected: expected.clone(),
                },
                _ => ConfigError::Other(error.to_string()),
            }
        })
        .collect()
}

/// Table path containing `key`. Figment's error path ends with the key itself.
fn enclosing_section<'a>(path: &'a [String], key: &str) -> &'a [String] {
    match path.split_last() {
        Some((last, parent)) if last == key => parent,
        _ => path,
    }
}

/// Byte offset of `key` at the start of a line, searched after the
/// `[section]` header when `section` is non-empty.
pub fn key_offset(content: &str, section: &[String], key: &str) -> Option<usize> {
    let start = match section.first() {
        Some(table) => {
            let header = format!("[{table}]");
            content.find(&header)? + header.len()
        }
        None => 0,
    };

    let mut offset = start;
    for line in content[start..].split_inclusive('\n') {
        let indent = line.len() - line.trim_start().len();
        let rest = line[indent..].strip_prefix(key);
        if rest.is_some_and(|r| r.trim_start().starts_with('=')) {
            return Some(offset + indent);
        }
        offset += line.len();
    }
    None
}

/// Best candidate above [`SUGGESTION_THRESHOLD`], if any.
pub fn closest_key(unknown: &str, candidates: &[&str]) -> Option<String> {
    candidates
        .iter()
        .map(|&candidate| (candidate, strsim::jaro_winkler(unknown, candidate)))
        .filter(|&(_, score)| score > SUGGESTION_THRESHOLD)
        .max_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(candidate, _)| candidate.to_string())
}

/// Print every error to stderr with miette's graphical renderer.
pub fn render_errors(errors: &[ConfigError]) {
    let handler = miette::GraphicalReportHandler::new();
    for error in errors {
        let mut out = String::new();
        match handler.render_report(&mut out, error as &dyn Diagnostic) {
            Ok(()) => eprint!("{out}"),
            Err(_) => eprintln!("error: {error}"),
        }
    }
}
