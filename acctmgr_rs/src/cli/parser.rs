//! Verb/entity parsing for command lines.
//!
//! The first token is a verb, the second an entity; everything after that is
//! handed to the cluster orchestrators untouched. Verbs and entities use the
//! same abbreviation rules as clause keywords.

use strsim::levenshtein;

use super::command::{Command, Entity};
use crate::tokens::{Keyword, lookup};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Verb {
    Add,
    List,
    Modify,
    Delete,
    Help,
    Version,
    Quit,
}

const VERBS: &[Keyword<Verb>] = &[
    Keyword::new("add", 3, Verb::Add),
    Keyword::new("create", 3, Verb::Add),
    Keyword::new("list", 3, Verb::List),
    Keyword::new("show", 3, Verb::List),
    Keyword::new("modify", 3, Verb::Modify),
    Keyword::new("update", 3, Verb::Modify),
    Keyword::new("delete", 3, Verb::Delete),
    Keyword::new("remove", 3, Verb::Delete),
    Keyword::new("help", 1, Verb::Help),
    Keyword::new("version", 4, Verb::Version),
    Keyword::new("quit", 1, Verb::Quit),
    Keyword::new("exit", 4, Verb::Quit),
];

const ENTITIES: &[Keyword<Entity>] = &[Keyword::new("clusters", 2, Entity::Cluster)];

/// Suggest a similar verb using Levenshtein distance.
/// Returns Some(suggestion) if a close match is found (distance <= 2).
fn suggest_similar_verb(input: &str) -> Option<&'static str> {
    let input_lower = input.to_lowercase();
    VERBS
        .iter()
        .map(|kw| (kw.name, levenshtein(&input_lower, kw.name)))
        .filter(|(_, distance)| *distance <= 2)
        .min_by_key(|(_, distance)| *distance)
        .map(|(name, _)| name)
}

/// Parse one command line (already split into tokens).
pub fn parse_command<T: AsRef<str>>(tokens: &[T]) -> Result<Command, String> {
    let Some(first) = tokens.first().map(|t| t.as_ref()) else {
        return Ok(Command::Help(None));
    };

    let Some(verb) = lookup(VERBS, first) else {
        return Err(match suggest_similar_verb(first) {
            Some(hint) => format!("Unknown command '{first}'. Did you mean '{hint}'?"),
            None => format!("Unknown command '{first}'. Run 'acctmgr help' for available commands."),
        });
    };

    let rest = || -> Vec<String> {
        tokens
            .iter()
            .skip(2)
            .map(|t| t.as_ref().to_string())
            .collect()
    };
    let entity = || -> Result<Entity, String> {
        let Some(raw) = tokens.get(1).map(|t| t.as_ref()) else {
            return Err(format!("'{first}' needs an entity, e.g. '{first} cluster'"));
        };
        lookup(ENTITIES, raw)
            .ok_or_else(|| format!("Unknown entity '{raw}'. Only 'cluster' is supported."))
    };

    Ok(match verb {
        Verb::Add => Command::Add(entity()?, rest()),
        Verb::List => Command::List(entity()?, rest()),
        Verb::Modify => Command::Modify(entity()?, rest()),
        Verb::Delete => Command::Delete(entity()?, rest()),
        Verb::Help => Command::Help(tokens.get(1).map(|t| t.as_ref().to_string())),
        Verb::Version => Command::Version,
        Verb::Quit => Command::Quit,
    })
}

/// Split an interactive input line into tokens.
///
/// Whitespace separates tokens; single or double quotes group a token that
/// contains spaces.
pub fn split_line(line: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut quote: Option<char> = None;
    let mut in_token = false;

    for ch in line.chars() {
        match quote {
            Some(q) if ch == q => quote = None,
            Some(_) => current.push(ch),
            None if ch == '"' || ch == '\'' => {
                quote = Some(ch);
                in_token = true;
            }
            None if ch.is_whitespace() => {
                if in_token {
                    tokens.push(std::mem::take(&mut current));
                    in_token = false;
                }
            }
            None => {
                current.push(ch);
                in_token = true;
            }
        }
    }
    if in_token {
        tokens.push(current);
    }
    tokens
}
