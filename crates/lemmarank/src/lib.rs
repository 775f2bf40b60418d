pub mod config;
pub mod output;
pub mod pipeline;

pub use config::{Config, OutputFormat};
pub use output::{OutputError, OutputOptions, write_ranking, write_rows};
pub use pipeline::{InputError, run};
