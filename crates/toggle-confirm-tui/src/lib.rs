// Library root: re-exports the terminal host's modules so integration tests
// and the binary share them.

pub mod settings;
pub mod tui;
