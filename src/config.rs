use std::env;
use std::path::PathBuf;

const DEFAULT_MATCHES_FILE: &str = "matches.json";
const DEFAULT_PARALLELISM: usize = 4;

#[derive(Debug, Clone, PartialEq)]
pub struct InsightConfig {
    pub matches_file: PathBuf,
    pub table_file: Option<PathBuf>,
    pub fixtures_file: Option<PathBuf>,
    pub export_path: Option<PathBuf>,
    pub parallelism: usize,
}

impl Default for InsightConfig {
    fn default() -> Self {
        Self {
            matches_file: PathBuf::from(DEFAULT_MATCHES_FILE),
            table_file: None,
            fixtures_file: None,
            export_path: None,
            parallelism: DEFAULT_PARALLELISM,
        }
    }
}

impl InsightConfig {
    /// Read `.env.local`, then `.env`, then the process environment. Values
    /// already set in the environment win over the files.
    pub fn load() -> Self {
        let _ = dotenvy::from_filename(".env.local");
        let _ = dotenvy::from_filename(".env");
        Self::from_env()
    }

    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let path = |key: &str| {
            lookup(key)
                .map(|val| val.trim().to_string())
                .filter(|val| !val.is_empty())
                .map(PathBuf::from)
        };
        Self {
            matches_file: path("MATCHDAY_MATCHES_FILE").unwrap_or(defaults.matches_file),
            table_file: path("MATCHDAY_TABLE_FILE"),
            fixtures_file: path("MATCHDAY_FIXTURES_FILE"),
            export_path: path("MATCHDAY_EXPORT_PATH"),
            parallelism: lookup("ANALYSIS_PARALLELISM")
                .and_then(|val| val.trim().parse::<usize>().ok())
                .unwrap_or(defaults.parallelism)
                .clamp(1, 32),
        }
    }
}
