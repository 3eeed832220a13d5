//! Clause builders: turn runs of command tokens into a filter condition or
//! a limit assignment.
//!
//! Both builders scan from a start index until the next clause keyword or
//! the end of input. Problems with individual tokens never abort a run; they
//! are logged and returned as [`Diagnostic`]s.

use thiserror::Error;
use tracing::warn;

use crate::records::{ClusterCondition, Limits};
use crate::tokens::{
    CONDITION_KEYWORDS, Clause, ConditionKey, LIMIT_KEYWORDS, Token, lookup, scan,
};

/// Non-fatal problem with a single token.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Diagnostic {
    #[error("Bad format on {0}: End your option with an '=' sign")]
    MalformedOption(String),
    #[error("Unknown option: {0}")]
    UnknownOption(String),
    #[error("Unknown condition: {0}")]
    UnknownCondition(String),
    #[error("Invalid value for {token}: {reason}")]
    InvalidValue { token: String, reason: String },
    #[error("Empty value in {0}, ignoring")]
    EmptyValue(String),
    #[error("Unexpected '{0}' clause, ignoring")]
    UnexpectedClause(String),
}

impl Diagnostic {
    /// Log the diagnostic and hand it back for collection.
    pub(crate) fn emit(self) -> Self {
        warn!("{self}");
        self
    }
}

/// Result of one builder pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Run {
    /// Tokens examined, not counting the terminating clause keyword.
    pub consumed: usize,
    /// True if the pass added at least one pattern or assignment.
    pub any_set: bool,
    pub diagnostics: Vec<Diagnostic>,
}

impl Run {
    /// Index of the first token after this run.
    pub fn end(&self, start: usize) -> usize {
        start + self.consumed
    }
}

/// Accumulate name patterns from `tokens[start..]` into `condition`.
pub fn build_condition<S: AsRef<str>>(
    tokens: &[S],
    start: usize,
    condition: &mut ClusterCondition,
) -> Run {
    let mut run = Run::default();
    for raw in tokens.iter().skip(start).map(|t| t.as_ref()) {
        match scan(raw) {
            Token::Clause(_) => break,
            Token::Bare(name) => {
                condition.push(name);
                run.any_set = true;
            }
            Token::Pair { key, value } => match lookup(CONDITION_KEYWORDS, key) {
                Some(ConditionKey::Names) if value.is_empty() => {
                    run.diagnostics
                        .push(Diagnostic::EmptyValue(raw.to_string()).emit());
                }
                Some(ConditionKey::Names) => {
                    condition.push(value);
                    run.any_set = true;
                }
                None => {
                    run.diagnostics
                        .push(Diagnostic::UnknownCondition(raw.to_string()).emit());
                }
            },
        }
        run.consumed += 1;
    }
    run
}

/// Accumulate limit assignments from `tokens[start..]` into `limits`.
pub fn build_assignment<S: AsRef<str>>(
    tokens: &[S],
    start: usize,
    limits: &mut Limits<i64>,
) -> Run {
    let mut run = Run::default();
    for raw in tokens.iter().skip(start).map(|t| t.as_ref()) {
        match scan(raw) {
            Token::Clause(_) => break,
            Token::Bare(_) => {
                run.diagnostics
                    .push(Diagnostic::MalformedOption(raw.to_string()).emit());
            }
            Token::Pair { key, value } => match lookup(LIMIT_KEYWORDS, key) {
                Some(field) => match parse_limit(raw, value) {
                    Ok(v) => {
                        limits.set(field, Some(v));
                        run.any_set = true;
                    }
                    Err(diag) => run.diagnostics.push(diag.emit()),
                },
                None => {
                    run.diagnostics
                        .push(Diagnostic::UnknownOption(raw.to_string()).emit());
                }
            },
        }
        run.consumed += 1;
    }
    run
}

/// Parse a limit value as a signed integer. Negative values are kept for
/// normalization; values above `u32::MAX` are rejected.
pub(crate) fn parse_limit(token: &str, value: &str) -> Result<i64, Diagnostic> {
    let invalid = |reason: String| Diagnostic::InvalidValue {
        token: token.to_string(),
        reason,
    };
    let v = value
        .trim()
        .parse::<i64>()
        .map_err(|e| invalid(e.to_string()))?;
    if v > i64::from(u32::MAX) {
        return Err(invalid(format!("larger than {}", u32::MAX)));
    }
    Ok(v)
}

/// Condition produced by parsing a whole command line as `Where` clauses.
#[derive(Debug, Clone, Default)]
pub struct ConditionParse {
    pub condition: ClusterCondition,
    pub any_set: bool,
    pub diagnostics: Vec<Diagnostic>,
}

/// Parse a command line that only carries conditions (list, delete).
///
/// `Where` keywords are skipped and start a new pass; a `Set` clause ends
/// parsing and whatever follows is ignored.
pub fn parse_conditions<S: AsRef<str>>(tokens: &[S]) -> ConditionParse {
    let mut parsed = ConditionParse::default();
    let mut i = 0;
    while i < tokens.len() {
        match scan(tokens[i].as_ref()) {
            Token::Clause(Clause::Where) => i += 1,
            Token::Clause(Clause::Set) => {
                let rest = tokens.len() - i - 1;
                parsed
                    .diagnostics
                    .push(Diagnostic::UnexpectedClause("Set".to_string()).emit());
                warn!("ignoring {rest} token(s) after 'Set'");
                break;
            }
            _ => {
                let mut run = build_condition(tokens, i, &mut parsed.condition);
                parsed.any_set |= run.any_set;
                parsed.diagnostics.append(&mut run.diagnostics);
                i = run.end(i);
            }
        }
    }
    parsed
}
