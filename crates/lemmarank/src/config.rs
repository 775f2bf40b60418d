use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use lemma_index::LoadMode;

use crate::output::OutputOptions;

const DEFAULT_LEMMA_CSV: &str = "output/fi_200000_lemmas.csv";
const DEFAULT_FREQ_LIST: &str = "freqwords/fi_100k.txt";
const DEFAULT_OUTPUT: &str = "output/fi_200000_lemmas_rank.csv";

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Csv,
    Json,
    Jsonl,
}

/// Run configuration. Every path can also come from the environment.
#[derive(Clone, Debug, Parser)]
#[command(name = "lemmarank")]
#[command(about = "Create a lemma frequency ranking from a lemma table and a surface frequency list")]
pub struct Config {
    /// Candidate table CSV (surface_form,pos,lemma).
    #[arg(short = 'l', long = "lemma-csv", env = "LEMMA_CSV", default_value = DEFAULT_LEMMA_CSV)]
    pub lemma_csv: PathBuf,

    /// Whitespace-separated `surface frequency` list.
    #[arg(short = 'f', long = "freq-list", env = "FREQ_LIST", default_value = DEFAULT_FREQ_LIST)]
    pub freq_list: PathBuf,

    #[arg(short = 'o', long, env = "LEMMA_RANK_OUTPUT", default_value = DEFAULT_OUTPUT)]
    pub output: PathBuf,

    /// Include the frequency column in the output.
    #[arg(long, default_value_t = false)]
    pub include_freq: bool,

    #[arg(long, value_enum, default_value_t = OutputFormat::Csv)]
    pub format: OutputFormat,

    /// Wrap the JSON array in an object under this key (json format only).
    #[arg(long = "json-key")]
    pub json_key: Option<String>,

    /// Write JSON without indentation.
    #[arg(long, default_value_t = false)]
    pub minify: bool,

    /// Indent JSON with tabs.
    #[arg(long, default_value_t = false)]
    pub tabs: bool,

    /// How input files are read: mmap or owned.
    #[arg(long = "load-mode", env = "LEMMARANK_LOAD_MODE", default_value_t = LoadMode::Mmap)]
    pub load_mode: LoadMode,
}

impl Config {
    /// Config with the given paths and every other setting at its default.
    pub fn new(
        lemma_csv: impl Into<PathBuf>,
        freq_list: impl Into<PathBuf>,
        output: impl Into<PathBuf>,
    ) -> Self {
        Self {
            lemma_csv: lemma_csv.into(),
            freq_list: freq_list.into(),
            output: output.into(),
            include_freq: false,
            format: OutputFormat::Csv,
            json_key: None,
            minify: false,
            tabs: false,
            load_mode: LoadMode::Mmap,
        }
    }

    pub fn output_options(&self) -> OutputOptions {
        OutputOptions {
            format: self.format,
            include_freq: self.include_freq,
            json_key: self.json_key.clone(),
            minify: self.minify,
            tabs: self.tabs,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_short_and_long_flags() {
        let config = Config::try_parse_from([
            "lemmarank",
            "-l",
            "table.csv",
            "--freq-list=freq.txt",
            "-o",
            "out/rank.jsonl",
            "--include-freq",
            "--format",
            "jsonl",
            "--load-mode",
            "owned",
        ])
        .unwrap();
        assert_eq!(config.lemma_csv, PathBuf::from("table.csv"));
        assert_eq!(config.freq_list, PathBuf::from("freq.txt"));
        assert_eq!(config.output, PathBuf::from("out/rank.jsonl"));
        assert!(config.include_freq);
        assert_eq!(config.format, OutputFormat::Jsonl);
        assert_eq!(config.load_mode, LoadMode::Owned);
    }

    #[test]
    fn rejects_unknown_load_mode() {
        let result = Config::try_parse_from(["lemmarank", "--load-mode", "heap"]);
        assert!(result.is_err());
    }

    #[test]
    fn tabs_flag_reaches_output_options() {
        let config = Config::try_parse_from(["lemmarank", "--format", "json", "--tabs"]).unwrap();
        assert!(config.tabs);
        assert!(!config.minify);
        assert!(config.output_options().tabs);
    }

    #[test]
    fn output_options_follow_flags() {
        let mut config = Config::new("a.csv", "b.txt", "c.json");
        config.format = OutputFormat::Json;
        config.json_key = Some("fi_FI_lemma_rank".into());
        config.minify = true;
        let options = config.output_options();
        assert_eq!(options.format, OutputFormat::Json);
        assert!(!options.include_freq);
        assert_eq!(options.json_key.as_deref(), Some("fi_FI_lemma_rank"));
        assert!(options.minify);
    }
}
