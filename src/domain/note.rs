//! Note domain model.
//!
//! A [`Note`] is the record kept by the remote store: a server-assigned
//! [`NoteId`] plus a title and free-form content. [`NoteDraft`] is the
//! unsaved title/content pair bound to an open editor.

use crate::domain::error::ValidationError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum title length, in characters.
pub const TITLE_MAX_CHARS: usize = 80;

/// Maximum content length, in characters.
pub const CONTENT_MAX_CHARS: usize = 800;

/// Opaque note identifier assigned by the store.
///
/// Stores may use numeric or string ids; both round-trip through JSON in
/// their original form. [`Display`](fmt::Display) gives the raw id; URL
/// paths percent-encode it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NoteId {
    Number(i64),
    Text(String),
}

impl fmt::Display for NoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for NoteId {
    fn from(value: i64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for NoteId {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

/// A note as returned by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub id: NoteId,
    pub title: String,
    #[serde(default)]
    pub content: String,
}

impl Note {
    #[must_use]
    pub fn new(id: impl Into<NoteId>, title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            content: content.into(),
        }
    }

    /// Case-insensitive substring match on title or content.
    ///
    /// `needle_lower` must already be lowercased.
    #[must_use]
    pub fn matches(&self, needle_lower: &str) -> bool {
        self.title.to_lowercase().contains(needle_lower)
            || self.content.to_lowercase().contains(needle_lower)
    }
}

/// Editable field of a draft.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DraftField {
    #[default]
    Title,
    Content,
}

impl DraftField {
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Title => Self::Content,
            Self::Content => Self::Title,
        }
    }

    const fn max_chars(self) -> usize {
        match self {
            Self::Title => TITLE_MAX_CHARS,
            Self::Content => CONTENT_MAX_CHARS,
        }
    }
}

/// Unsaved title and content of an open editor.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NoteDraft {
    pub title: String,
    pub content: String,
}

impl NoteDraft {
    /// Draft pre-filled from an existing note.
    #[must_use]
    pub fn from_note(note: &Note) -> Self {
        Self {
            title: note.title.clone(),
            content: note.content.clone(),
        }
    }

    #[must_use]
    pub fn field(&self, field: DraftField) -> &str {
        match field {
            DraftField::Title => &self.title,
            DraftField::Content => &self.content,
        }
    }

    /// Appends a character to `field`, dropping it once the field is full.
    ///
    /// Returns whether the draft changed.
    pub fn push(&mut self, field: DraftField, c: char) -> bool {
        let text = self.field_mut(field);
        if text.chars().count() >= field.max_chars() {
            return false;
        }
        text.push(c);
        true
    }

    /// Removes the last character of `field`. Returns whether the draft changed.
    pub fn pop(&mut self, field: DraftField) -> bool {
        self.field_mut(field).pop().is_some()
    }

    /// Replaces `field`, keeping at most its maximum number of characters.
    pub fn set(&mut self, field: DraftField, value: &str) {
        let limit = field.max_chars();
        *self.field_mut(field) = value.chars().take(limit).collect();
    }

    fn field_mut(&mut self, field: DraftField) -> &mut String {
        match field {
            DraftField::Title => &mut self.title,
            DraftField::Content => &mut self.content,
        }
    }
}

/// Checks a title/content pair before it is sent to the store.
///
/// # Errors
///
/// - [`ValidationError::TitleRequired`] if the trimmed title is empty
/// - [`ValidationError::TitleTooLong`] / [`ValidationError::ContentTooLong`]
///   if a field exceeds its limit
pub fn validate(title: &str, content: &str) -> std::result::Result<(), ValidationError> {
    if title.trim().is_empty() {
        return Err(ValidationError::TitleRequired);
    }
    if title.chars().count() > TITLE_MAX_CHARS {
        return Err(ValidationError::TitleTooLong);
    }
    if content.chars().count() > CONTENT_MAX_CHARS {
        return Err(ValidationError::ContentTooLong);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn note_id_accepts_numbers_and_strings() {
        let notes: Vec<Note> = serde_json::from_str(
            r#"[{"id":1,"title":"a","content":"b"},{"id":"x-9","title":"c","content":"d"}]"#,
        )
        .unwrap();
        assert_eq!(notes[0].id, NoteId::Number(1));
        assert_eq!(notes[1].id, NoteId::Text("x-9".to_string()));
        assert_eq!(notes[1].id.to_string(), "x-9");
    }

    #[test]
    fn missing_content_defaults_to_empty() {
        let note: Note = serde_json::from_str(r#"{"id":3,"title":"t"}"#).unwrap();
        assert_eq!(note.content, "");
    }

    #[test]
    fn matches_title_or_content_ignoring_case() {
        let note = Note::new(1, "Groceries", "Milk, eggs");
        assert!(note.matches("groc"));
        assert!(note.matches("milk"));
        assert!(!note.matches("bread"));
    }

    #[test]
    fn draft_push_stops_at_field_limit() {
        let mut draft = NoteDraft::default();
        for _ in 0..TITLE_MAX_CHARS {
            assert!(draft.push(DraftField::Title, 'a'));
        }
        assert!(!draft.push(DraftField::Title, 'b'));
        assert_eq!(draft.title.chars().count(), TITLE_MAX_CHARS);
        assert!(draft.push(DraftField::Content, 'c'));
    }

    #[test]
    fn draft_set_truncates_by_characters() {
        let mut draft = NoteDraft::default();
        draft.set(DraftField::Title, &"é".repeat(100));
        assert_eq!(draft.title.chars().count(), TITLE_MAX_CHARS);
    }

    #[test]
    fn validate_rejects_blank_title() {
        assert_eq!(validate("   ", "x"), Err(ValidationError::TitleRequired));
        assert_eq!(validate("ok", ""), Ok(()));
    }

    #[test]
    fn validate_enforces_length_limits() {
        assert_eq!(validate(&"a".repeat(TITLE_MAX_CHARS), ""), Ok(()));
        assert_eq!(
            validate(&"a".repeat(TITLE_MAX_CHARS + 1), ""),
            Err(ValidationError::TitleTooLong)
        );
        assert_eq!(
            validate("ok", &"é".repeat(CONTENT_MAX_CHARS + 1)),
            Err(ValidationError::ContentTooLong)
        );
        assert_eq!(
            validate("ok", &"x".repeat(CONTENT_MAX_CHARS + 1)),
            Err(ValidationError::ContentTooLong)
        );
    }
}
