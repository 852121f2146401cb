//! Answer vector and sentinel values

use serde::{Deserialize, Serialize};
use std::ops::Index;

/// Placeholder written into an answer slot when no answer could be obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sentinel {
    /// The provider returned nothing for this prompt
    NoResponse,
    /// The reply had no usable line for this question id
    Missing,
}

impl Sentinel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sentinel::NoResponse => "NO_RESPONSE",
            Sentinel::Missing => "MISSING",
        }
    }
}

impl std::fmt::Display for Sentinel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Fixed-length answers for one (persona, model) exchange (Value Object)
///
/// Slot `i` holds the answer for the `i`-th question id in ascending order.
/// Every slot is either extracted answer text or a [`Sentinel`] string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerVector(Vec<String>);

impl AnswerVector {
    /// All slots set to `NO_RESPONSE`
    pub fn no_response(len: usize) -> Self {
        Self::filled(Sentinel::NoResponse, len)
    }

    /// All slots set to the given sentinel
    pub fn filled(sentinel: Sentinel, len: usize) -> Self {
        Self(vec![sentinel.as_str().to_string(); len])
    }

    pub(crate) fn from_slots(slots: Vec<String>) -> Self {
        Self(slots)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn into_inner(self) -> Vec<String> {
        self.0
    }
}

impl Index<usize> for AnswerVector {
    type Output = str;

    fn index(&self, index: usize) -> &str {
        &self.0[index]
    }
}

impl<'a> IntoIterator for &'a AnswerVector {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
