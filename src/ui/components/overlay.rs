//! Modal overlays drawn on top of the list.
//!
//! Both modals are a centred box. The editor lists its fields with the
//! focused one marked, then the error slot, then the submit hint (or a
//! saving notice while a submit is outstanding).

use crate::domain::DraftField;
use crate::ui::helpers::{centered, fit, position_cursor, BOLD, DIM, RESET, REVERSE};
use crate::ui::viewmodel::{ConfirmOverlay, EditorOverlay};

/// Widest the modal box gets.
const MAX_BOX_WIDTH: usize = 64;

/// Content lines shown before the rest is elided.
const MAX_CONTENT_LINES: usize = 8;

/// One styled line of a modal.
struct Line {
    style: &'static str,
    text: String,
}

impl Line {
    fn plain(text: impl Into<String>) -> Self {
        Self { style: "", text: text.into() }
    }

    fn styled(style: &'static str, text: impl Into<String>) -> Self {
        Self { style, text: text.into() }
    }
}

pub fn render_editor(editor: &EditorOverlay, rows: usize, cols: usize) {
    let marker = |field: DraftField| if editor.focus == field { "> " } else { "  " };
    let cursor = |field: DraftField| if editor.focus == field && !editor.saving { "_" } else { "" };

    let mut lines = vec![
        Line::styled(BOLD, editor.heading.clone()),
        Line::plain(""),
        Line::plain(format!(
            "{}Title: {}{}",
            marker(DraftField::Title),
            editor.title,
            cursor(DraftField::Title)
        )),
        Line::plain(format!("{}Content:", marker(DraftField::Content))),
    ];

    let content = format!("{}{}", editor.content, cursor(DraftField::Content));
    let content_lines: Vec<&str> = content.split('\n').collect();
    let hidden = content_lines.len().saturating_sub(MAX_CONTENT_LINES);
    for text in &content_lines[hidden..] {
        lines.push(Line::plain(format!("    {text}")));
    }
    if hidden > 0 {
        lines.insert(4, Line::styled(DIM, format!("    ({hidden} more lines)")));
    }

    lines.push(Line::plain(""));
    if let Some(error) = &editor.error {
        lines.push(Line::styled(BOLD, format!("! {error}")));
    }
    if editor.saving {
        lines.push(Line::styled(DIM, "Saving…"));
    } else {
        lines.push(Line::styled(
            DIM,
            format!("[Ctrl+s] {}   [Esc] Cancel", editor.submit_label),
        ));
    }

    render_box(&lines, rows, cols);
}

pub fn render_confirm(confirm: &ConfirmOverlay, rows: usize, cols: usize) {
    let mut lines = vec![Line::styled(BOLD, confirm.prompt.clone())];
    if let Some(title) = &confirm.note_title {
        lines.push(Line::plain(format!("\"{title}\"")));
    }
    lines.push(Line::plain(""));
    lines.push(Line::styled(DIM, "[y] Delete   [n] Cancel"));

    render_box(&lines, rows, cols);
}

fn render_box(lines: &[Line], rows: usize, cols: usize) {
    let width = cols.saturating_sub(4).min(MAX_BOX_WIDTH);
    let inner = width.saturating_sub(4);
    let left = (cols.saturating_sub(width)) / 2 + 1;
    let height = lines.len() + 2;
    let top = (rows.saturating_sub(height)) / 2 + 1;

    position_cursor(top, left);
    print!("{REVERSE}{}{RESET}", centered("", width));

    for (offset, line) in lines.iter().enumerate() {
        position_cursor(top + 1 + offset, left);
        print!("{REVERSE} {RESET} {}{}{RESET} {REVERSE} {RESET}", line.style, fit(&line.text, inner));
    }

    position_cursor(top + height - 1, left);
    print!("{REVERSE}{}{RESET}", centered("", width));
}
