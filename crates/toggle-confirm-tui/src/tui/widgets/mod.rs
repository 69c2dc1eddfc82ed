// TUI widget modules.

pub mod confirm_modal;
pub mod toggle_list;
