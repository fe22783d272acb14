//! CLI command handlers.

mod download;
mod prompt;

pub use download::run_download;
pub use prompt::prompt_url;
pub use speed_test::run_speed_test;
