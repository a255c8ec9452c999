use regex::Regex;
use webform_forms::FieldType;

/// Compiled validation rule for one field, built once at session setup.
#[derive(Debug, Clone)]
pub enum Pattern {
    /// Free-text kinds (and select menus) validate with a regular
    /// expression. Matching is partial unless the pattern itself anchors
    /// with `^`/`$`.
    Regex(Regex),
    /// Radio groups validate by membership in the configured option list.
    OneOf(Vec<String>),
}

impl Pattern {
    pub fn compile(kind: FieldType, filter: &str) -> Result<Pattern, regex::Error> {
        match kind {
            FieldType::Radio => Ok(Pattern::OneOf(
                filter.split('|').map(String::from).collect(),
            )),
            _ => Ok(Pattern::Regex(Regex::new(filter)?)),
        }
    }

    pub fn matches(&self, value: &str) -> bool {
        match self {
            Pattern::Regex(regex) => regex.is_match(value),
            Pattern::OneOf(options) => options.iter().any(|o| o == value),
        }
    }
}

/// Outcome of evaluating one value against a field's pattern and its
/// current error flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// Empty value, or no pass/fail edge was crossed.
    Unchanged,
    /// Failed while unflagged: flag the field and reveal its message.
    Flag,
    /// Passed while flagged: clear the field and hide its message.
    Clear,
}

/// Edge-triggered evaluation. An empty value short-circuits with no state
/// change: an untouched or cleared field is neither flagged nor unflagged
/// until a non-empty value is seen. A field already flagged stays flagged
/// until a passing check is observed, and a passing field is only
/// re-flagged by a failure observed while unflagged.
pub fn evaluate(value: &str, pattern: &Pattern, has_error: bool) -> Verdict {
    if value.is_empty() {
        return Verdict::Unchanged;
    }

    match (pattern.matches(value), has_error) {
        (false, false) => Verdict::Flag,
        (true, true) => Verdict::Clear,
        _ => Verdict::Unchanged,
    }
}
