//! One module per subcommand. Handlers translate arguments into core calls
//! and render the result; no business logic lives here.

pub mod behaviors;
pub mod completions;
pub mod config;
pub mod harness;
pub mod init;
pub mod plan;
pub mod resolve;
