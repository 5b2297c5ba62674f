//! CLI command handlers, one file per subcommand.

mod completions;
mod query;

pub use completions::run_completions;
pub use query::{done_message, run_query, QueryArgs};
