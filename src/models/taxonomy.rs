//! Category and item vocabularies
//!
//! Each vocabulary is an ordered list of unique names. Insertion order is the
//! display order and renames keep a name's position.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Which of the two vocabularies a name belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VocabularyKind {
    Category,
    Item,
}

impl VocabularyKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Category => "Category",
            Self::Item => "Item",
        }
    }
}

impl fmt::Display for VocabularyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An ordered set of names (case-sensitive)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Vocabulary {
    names: Vec<String>,
}

impl Vocabulary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from a list, dropping blanks and repeats
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut vocab = Self::new();
        for name in names {
            let _ = vocab.add(name.into());
        }
        vocab
    }

    /// Append a name; returns false if it was already present
    pub fn add(&mut self, name: impl AsRef<str>) -> Result<bool, VocabularyError> {
        let name = clean_name(name.as_ref())?;
        if self.contains(&name) {
            return Ok(false);
        }
        self.names.push(name);
        Ok(true)
    }

    /// Replace `old` with `new` at the same position
    pub fn rename(&mut self, old: &str, new: impl AsRef<str>) -> Result<String, VocabularyError> {
        let old = old.trim();
        let new = clean_name(new.as_ref())?;
        let position = self
            .position(old)
            .ok_or_else(|| VocabularyError::NotFound(old.to_string()))?;

        if new != old && self.contains(&new) {
            return Err(VocabularyError::Duplicate(new));
        }

        Ok(std::mem::replace(&mut self.names[position], new))
    }

    /// Remove a name, shifting later names forward
    pub fn remove(&mut self, name: &str) -> Result<String, VocabularyError> {
        let name = name.trim();
        let position = self
            .position(name)
            .ok_or_else(|| VocabularyError::NotFound(name.to_string()))?;
        Ok(self.names.remove(position))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|n| n == name)
    }

    /// Names in insertion order
    pub fn list(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

fn clean_name(name: &str) -> Result<String, VocabularyError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(VocabularyError::EmptyName);
    }
    Ok(trimmed.to_string())
}

/// Errors raised by vocabulary edits
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VocabularyError {
    EmptyName,
    NotFound(String),
    Duplicate(String),
}

impl fmt::Display for VocabularyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Name cannot be empty"),
            Self::NotFound(name) => write!(f, "'{}' not found", name),
            Self::Duplicate(name) => write!(f, "'{}' already exists", name),
        }
    }
}

impl std::error::Error for VocabularyError {}
