//! Search filter over the note collection.
//!
//! A pure function of (collection, term): no state, no I/O. The session
//! re-runs it whenever either input changes.

use crate::domain::Note;

/// Returns the notes matching `term`, in collection order.
///
/// A blank term (after trimming) keeps every note. Otherwise a note is kept
/// when its title or content contains the trimmed term, ignoring case.
///
/// # Example
///
/// ```rust
/// use notekeeper::app::filter::filter;
/// use notekeeper::domain::Note;
///
/// let notes = vec![Note::new(1, "Groceries", "milk, eggs")];
/// assert_eq!(filter(&notes, "MILK").len(), 1);
/// assert!(filter(&notes, "bread").is_empty());
/// ```
#[must_use]
pub fn filter<'a>(notes: &'a [Note], term: &str) -> Vec<&'a Note> {
    let needle = term.trim().to_lowercase();
    if needle.is_empty() {
        return notes.iter().collect();
    }
    notes.iter().filter(|note| note.matches(&needle)).collect()
}

/// Why the visible list is empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmptyKind {
    /// The collection itself is empty.
    NoNotes,

    /// Notes exist but none match the search term.
    NoMatches,
}

impl EmptyKind {
    /// Classifies an empty view; `None` while something is visible.
    #[must_use]
    pub const fn classify(total: usize, visible: usize) -> Option<Self> {
        if total == 0 {
            Some(Self::NoNotes)
        } else if visible == 0 {
            Some(Self::NoMatches)
        } else {
            None
        }
    }

    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::NoNotes => "No notes yet. Start by adding one!",
            Self::NoMatches => "No notes found for search.",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<Note> {
        vec![
            Note::new(1, "Groceries", "milk, eggs"),
            Note::new(2, "Work", "Ship the MILKSHAKE release"),
            Note::new(3, "Ideas", "garden"),
            Note::new(4, "milk run", ""),
        ]
    }

    #[test]
    fn blank_term_keeps_everything_in_order() {
        let notes = sample();
        for term in ["", "   ", "\t"] {
            let kept: Vec<&Note> = filter(&notes, term);
            assert_eq!(kept, notes.iter().collect::<Vec<_>>());
        }
    }

    #[test]
    fn every_kept_note_matches_the_term() {
        let notes = sample();
        for term in ["milk", "MiLk", " eggs ", "e", "zzz"] {
            let needle = term.trim().to_lowercase();
            for note in filter(&notes, term) {
                assert!(
                    note.title.to_lowercase().contains(&needle)
                        || note.content.to_lowercase().contains(&needle)
                );
            }
        }
    }

    #[test]
    fn survivors_keep_their_relative_order() {
        let notes = sample();
        let ids: Vec<_> = filter(&notes, "milk").iter().map(|n| n.id.clone()).collect();
        assert_eq!(ids, vec![1.into(), 2.into(), 4.into()]);
    }

    #[test]
    fn groceries_scenario() {
        let notes = vec![Note::new(1, "Groceries", "milk, eggs")];

        assert_eq!(filter(&notes, "milk"), vec![&notes[0]]);

        let none = filter(&notes, "bread");
        assert!(none.is_empty());
        assert_eq!(EmptyKind::classify(notes.len(), none.len()), Some(EmptyKind::NoMatches));
    }

    #[test]
    fn empty_collection_is_no_notes() {
        assert_eq!(EmptyKind::classify(0, 0), Some(EmptyKind::NoNotes));
        assert_eq!(EmptyKind::classify(3, 1), None);
        assert_eq!(EmptyKind::NoNotes.message(), "No notes yet. Start by adding one!");
        assert_eq!(EmptyKind::NoMatches.message(), "No notes found for search.");
    }
}
