//! Command handler modules for the ridesim CLI.
//!
//! Each command lives in its own file and follows the same pattern:
//!
//! - Public handler function: `pub fn handle_COMMAND_command(...) -> Result<(), CliError>`
//! - Output streams (`&mut dyn Write`) passed in by the caller
//! - Errors propagated via the `CliError` enum

pub mod cfg;
pub mod rng;
pub mod sim;

pub use cfg::handle_cfg_command;
pub use rng::handle_rng_command;
pub use sim::handle_sim_command;
