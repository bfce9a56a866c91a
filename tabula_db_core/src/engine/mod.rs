pub mod execute;
pub mod format;

pub use execute::execute_command;
pub use format::{format_explain, format_select, format_show_tables};
