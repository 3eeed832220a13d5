//! Token scanning and keyword lookup.
//!
//! Every command token is one of three shapes: a clause keyword (`Where`,
//! `Set`), a bare value, or a `Key=Value` pair. Keys are matched against
//! static [`Keyword`] tables: a key matches when it is a case-insensitive
//! prefix of the keyword's name and at least `min_len` characters long.

use crate::records::LimitField;

/// Clause boundaries inside a command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Clause {
    Where,
    Set,
}

/// A keyword entry: full name, shortest accepted prefix, and the target it
/// resolves to.
#[derive(Debug, Clone, Copy)]
pub struct Keyword<K> {
    pub name: &'static str,
    pub min_len: usize,
    pub target: K,
}

impl<K> Keyword<K> {
    pub const fn new(name: &'static str, min_len: usize, target: K) -> Self {
        Self {
            name,
            min_len,
            target,
        }
    }

    /// True when `key` is an accepted abbreviation of this keyword.
    pub fn matches(&self, key: &str) -> bool {
        let name = self.name.as_bytes();
        let key = key.as_bytes();
        key.len() >= self.min_len
            && key.len() <= name.len()
            && name[..key.len()].eq_ignore_ascii_case(key)
    }
}

/// Resolve `key` against a keyword table.
pub fn lookup<K: Copy>(table: &[Keyword<K>], key: &str) -> Option<K> {
    table.iter().find(|kw| kw.matches(key)).map(|kw| kw.target)
}

pub const CLAUSE_KEYWORDS: &[Keyword<Clause>] = &[
    Keyword::new("Where", 5, Clause::Where),
    Keyword::new("Set", 3, Clause::Set),
];

/// Keys accepted inside a condition run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConditionKey {
    Names,
}

pub const CONDITION_KEYWORDS: &[Keyword<ConditionKey>] =
    &[Keyword::new("Names", 1, ConditionKey::Names)];

pub const LIMIT_KEYWORDS: &[Keyword<LimitField>] = &[
    Keyword::new("FairShare", 1, LimitField::FairShare),
    Keyword::new("MaxJobs", 4, LimitField::MaxJobs),
    Keyword::new("MaxNodes", 4, LimitField::MaxNodesPerJob),
    Keyword::new("MaxWall", 4, LimitField::MaxWallDurationPerJob),
    Keyword::new("MaxCPUSecs", 4, LimitField::MaxCpuSecsPerJob),
];

/// Keys accepted by `add cluster`, which mixes names and defaults in one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddKey {
    Names,
    Limit(LimitField),
}

pub const ADD_KEYWORDS: &[Keyword<AddKey>] = &[
    Keyword::new("FairShare", 1, AddKey::Limit(LimitField::FairShare)),
    Keyword::new("MaxCPUSecs", 4, AddKey::Limit(LimitField::MaxCpuSecsPerJob)),
    Keyword::new("MaxJobs", 4, AddKey::Limit(LimitField::MaxJobs)),
    Keyword::new("MaxNodes", 4, AddKey::Limit(LimitField::MaxNodesPerJob)),
    Keyword::new("MaxWall", 4, AddKey::Limit(LimitField::MaxWallDurationPerJob)),
    Keyword::new("Names", 1, AddKey::Names),
];

/// Offset just past the first `=`, or `None` for a bare token.
pub fn split_point(token: &str) -> Option<usize> {
    token.find('=').map(|idx| idx + 1)
}

/// A classified command token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token<'a> {
    Clause(Clause),
    Bare(&'a str),
    Pair { key: &'a str, value: &'a str },
}

/// Classify one token.
pub fn scan(token: &str) -> Token<'_> {
    match split_point(token) {
        Some(end) => Token::Pair {
            key: &token[..end - 1],
            value: &token[end..],
        },
        None => match lookup(CLAUSE_KEYWORDS, token) {
            Some(clause) => Token::Clause(clause),
            None => Token::Bare(token),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_unambiguous<K>(table: &[Keyword<K>]) {
        for (i, a) in table.iter().enumerate() {
            for b in &table[i + 1..] {
                let shortest = &a.name[..a.min_len];
                assert!(
                    !b.matches(shortest),
                    "{} collides with {} at '{}'",
                    a.name,
                    b.name,
                    shortest
                );
                let shortest = &b.name[..b.min_len];
                assert!(
                    !a.matches(shortest),
                    "{} collides with {} at '{}'",
                    b.name,
                    a.name,
                    shortest
                );
            }
        }
    }

    #[test]
    fn tables_have_no_collisions_at_min_length() {
        assert_unambiguous(CLAUSE_KEYWORDS);
        assert_unambiguous(CONDITION_KEYWORDS);
        assert_unambiguous(LIMIT_KEYWORDS);
        assert_unambiguous(ADD_KEYWORDS);
    }

    #[test]
    fn split_point_is_after_first_equals() {
        assert_eq!(split_point("alpha"), None);
        assert_eq!(split_point("Name=foo"), Some(5));
        assert_eq!(split_point("a=b=c"), Some(2));
        assert_eq!(split_point("="), Some(1));
        for token in ["x", "Where", "cluster-1", ""] {
            assert_eq!(split_point(token), None, "{token}");
        }
    }

    #[test]
    fn prefix_matching_is_case_insensitive() {
        assert_eq!(lookup(LIMIT_KEYWORDS, "fair"), Some(LimitField::FairShare));
        assert_eq!(
            lookup(LIMIT_KEYWORDS, "FAIRSHARE"),
            Some(LimitField::FairShare)
        );
        assert_eq!(lookup(LIMIT_KEYWORDS, "f"), Some(LimitField::FairShare));
        assert_eq!(
            lookup(LIMIT_KEYWORDS, "maxw"),
            Some(LimitField::MaxWallDurationPerJob)
        );
        assert_eq!(
            lookup(LIMIT_KEYWORDS, "MaxCpu"),
            Some(LimitField::MaxCpuSecsPerJob)
        );
    }

    #[test]
    fn short_or_overlong_keys_do_not_match() {
        assert_eq!(lookup(LIMIT_KEYWORDS, "max"), None);
        assert_eq!(lookup(LIMIT_KEYWORDS, "fairshares"), None);
        assert_eq!(lookup(LIMIT_KEYWORDS, "fx"), None);
        assert_eq!(lookup(LIMIT_KEYWORDS, ""), None);
    }

    #[test]
    fn scan_classifies_tokens() {
        assert_eq!(scan("where"), Token::Clause(Clause::Where));
        assert_eq!(scan("SET"), Token::Clause(Clause::Set));
        assert_eq!(scan("wher"), Token::Bare("wher"));
        assert_eq!(scan("alpha"), Token::Bare("alpha"));
        assert_eq!(
            scan("MaxJobs=10"),
            Token::Pair {
                key: "MaxJobs",
                value: "10"
            }
        );
        assert_eq!(
            scan("Set=1"),
            Token::Pair {
                key: "Set",
                value: "1"
            }
        );
    }
}
