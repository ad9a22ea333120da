//! Command handler modules for the `ofc` CLI.
//!
//! Each command lives in its own module with a consistent pattern:
//!
//! - Public handler function: `pub fn handle_COMMAND_command(...) -> Result<(), CliError>`
//! - Output streams (`&mut dyn Write`) passed in by the caller
//! - Errors propagated via `CliError`; the dispatcher maps them to exit codes

pub mod bench;
pub mod cfg;
pub mod deal;
pub mod play;
pub mod score;
pub mod sim;
pub mod stats;

pub use bench::handle_bench_command;
pub use cfg::handle_cfg_command;
pub use deal::handle_deal_command;
pub use play::{PlayOptions, handle_play_command};
pub use score::handle_score_command;
pub use sim::{SimOptions, handle_sim_command};
pub use stats::handle_stats_command;
