mod browse;
mod commands;
mod handlers;

pub use browse::handle_browse;
pub use commands::{Cli, Commands};
pub use handlers::{handle_create, handle_delete, handle_list, load_config};
