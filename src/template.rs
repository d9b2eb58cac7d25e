//! Template expansion
//!
//! The scheduler resolves its own date token and hands everything else to a
//! `VariableExpander`. The bundled `TitleExpander` understands `{{title}}`;
//! richer engines plug in through the trait.

use crate::calendar::CalendarDate;

/// External variable-substitution engine.
pub trait VariableExpander {
    /// Expand `text` for the note named `context_name` (base name, no extension).
    fn expand(&self, text: &str, context_name: &str) -> String;
}

/// Replaces `{{title}}` with the note name.
#[derive(Debug, Clone, Copy, Default)]
pub struct TitleExpander;

pub const TITLE_TOKEN: &str = "{{title}}";

impl VariableExpander for TitleExpander {
    fn expand(&self, text: &str, context_name: &str) -> String {
        text.replace(TITLE_TOKEN, context_name)
    }
}

/// Leaves the text untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopExpander;

impl VariableExpander for NoopExpander {
    fn expand(&self, text: &str, _context_name: &str) -> String {
        text.to_string()
    }
}

/// Render note content: the date token first, then the external engine.
///
/// The engine runs on text whose date is already fixed, so its own
/// substitutions cannot change which date the note shows.
pub fn render_note(
    template: &str,
    date_token: &str,
    date_format: &str,
    created_at: &CalendarDate,
    context_name: &str,
    expander: &dyn VariableExpander,
) -> String {
    let dated = if date_token.is_empty() {
        template.to_string()
    } else {
        template.replace(date_token, &created_at.format(date_format))
    };
    expander.expand(&dated, context_name)
}
