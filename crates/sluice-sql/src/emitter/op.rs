use super::{Emit, SqlWriter};

/// Binary comparison operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cmp {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}

impl Cmp {
    pub fn as_str(&self) -> &'static str {
        match self {
            Cmp::Eq => "=",
            Cmp::Ne => "<>",
            Cmp::Lt => "<",
            Cmp::Le => "<=",
            Cmp::Gt => ">",
            Cmp::Ge => ">=",
        }
    }
}

impl Emit for Cmp {
    fn emit(self, w: &mut SqlWriter<'_>) {
        w.dst.push_str(self.as_str());
    }
}

/// Join clause kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinKind {
    Inner,
    Left,
}

impl JoinKind {
    pub fn keyword(&self) -> &'static str {
        match self {
            JoinKind::Inner => "INNER JOIN",
            JoinKind::Left => "LEFT JOIN",
        }
    }
}

/// Wildcard sugar over `like`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pattern {
    Exact,
    StartsWith,
    EndsWith,
    Contains,
}

impl Pattern {
    /// Apply the wildcards to the caller's pattern value.
    pub fn apply(&self, pattern: &str) -> String {
        match self {
            Pattern::Exact => pattern.to_string(),
            Pattern::StartsWith => format!("{pattern}%"),
            Pattern::EndsWith => format!("%{pattern}"),
            Pattern::Contains => format!("%{pattern}%"),
        }
    }
}
