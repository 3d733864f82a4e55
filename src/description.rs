//! Description sink and rendering helpers.

use crate::config::DescribeConfig;
use crate::matcher::{Matcher, SelfDescribing};
use std::fmt;

/// Accumulates human-readable text describing expectations and mismatches.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Description {
    text: String,
}

impl Description {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append_text(&mut self, text: &str) -> &mut Self {
        self.text.push_str(text);
        self
    }

    /// Append a value in its `Debug` form, so strings render quoted.
    pub fn append_value<V: fmt::Debug + ?Sized>(&mut self, value: &V) -> &mut Self {
        self.text.push_str(&format!("{:?}", value));
        self
    }

    pub fn append_description_of<S: SelfDescribing + ?Sized>(&mut self, value: &S) -> &mut Self {
        value.describe_to(self);
        self
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn into_string(self) -> String {
        self.text
    }
}

impl fmt::Write for Description {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.text.push_str(s);
        Ok(())
    }
}

impl fmt::Display for Description {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Render the description of a matcher.
pub fn description_of<S: SelfDescribing + ?Sized>(matcher: &S) -> String {
    let mut description = Description::new();
    matcher.describe_to(&mut description);
    description.into_string()
}

/// Render the mismatch a matcher reports for the given candidate.
pub fn mismatch_for<T, M>(matcher: &M, actual: Option<&T>) -> String
where
    T: ?Sized,
    M: Matcher<T> + ?Sized,
{
    let mut description = Description::new();
    matcher.describe_mismatch(actual, &mut description);
    description.into_string()
}

/// Render members in encounter order, honoring the configured limit.
pub fn join_members<I>(members: I, config: &DescribeConfig) -> String
where
    I: IntoIterator,
    I::Item: fmt::Display,
{
    let mut members = members.into_iter().peekable();
    let limit = config.max_listed_members.unwrap_or(usize::MAX);
    let mut rendered = Vec::new();

    while rendered.len() < limit {
        match members.next() {
            Some(member) => rendered.push(member.to_string()),
            None => break,
        }
    }

    let mut out = rendered.join(&config.member_separator);
    if members.peek().is_some() {
        if !out.is_empty() {
            out.push_str(&config.member_separator);
        }
        out.push_str("...");
    }
    out
}
