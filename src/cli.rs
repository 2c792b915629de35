//! CLI domain: parse, route, output, and presentation only.
//! Orchestration lives in the view and feed; the route table just wires them up.

mod output;
mod parse;
mod presentation;
mod route;

pub use output::map_error;
pub use parse::{Cli, Commands};
pub use presentation::{format_config_json, format_snapshot_table, format_watch_summary};
pub use route::{RunContext, WatchOptions};
