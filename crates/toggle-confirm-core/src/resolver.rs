// Dialog text resolution for a pending toggle transition.

use crate::config::ToggleConfig;

/// Content and title for a dialog about to open.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialogText {
    pub content: String,
    pub title: String,
}

/// Resolve the dialog text from the toggle's *current* value.
///
/// A toggle that is currently off is about to turn on, so the on-specific
/// fields take precedence; a toggle that is on prefers the off-specific ones.
/// The generic field is the fallback. Either result may be empty.
pub fn resolve(current: bool, config: &ToggleConfig) -> DialogText {
    let (content, title) = if current {
        (config.confirm_off_text(), config.confirm_off_title())
    } else {
        (config.confirm_on_text(), config.confirm_on_title())
    };

    DialogText {
        content: content
            .or(config.confirm_text())
            .unwrap_or_default()
            .to_string(),
        title: title
            .or(config.confirm_title())
            .unwrap_or_default()
            .to_string(),
    }
}
