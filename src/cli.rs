//! CLI domain: parse, route, output, and presentation only.
//! No domain orchestration; the route table hands off to `run::Scheduler`.

mod output;
mod parse;
mod presentation;
mod route;

pub use output::map_error;
pub use parse::{Cli, Commands, OutputFormat};
pub use presentation::{
    format_config_toml, format_plan_json, format_plan_text, format_run_json, format_run_text,
};
pub use route::{parse_now, RunContext};
