mod terminal;

pub use terminal::{TerminalEvents, run_interactive_terminal};
