use std::ffi::OsString;
use std::path::PathBuf;

use crate::cli::RootArgs;

pub const DATA_DIR_ENV: &str = "SEKAI_DATA_DIR";
pub const SCORE_CONTROL_ENV: &str = "SEKAI_SCORE_CONTROL";
pub const DEFAULT_DATA_DIR: &str = "data";
pub const DEFAULT_SCORE_CONTROL: &str = "data/score-control-data.json";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub data_dir: PathBuf,
    pub score_control_path: PathBuf,
}

impl AppConfig {
    /// Command-line flags win over environment variables, which win over defaults.
    pub fn from_env_and_args(args: &RootArgs) -> eyre::Result<Self> {
        let config = Self {
            data_dir: resolve(
                args.data_dir.clone(),
                std::env::var_os(DATA_DIR_ENV),
                DEFAULT_DATA_DIR,
            ),
            score_control_path: resolve(
                args.score_control.clone(),
                std::env::var_os(SCORE_CONTROL_ENV),
                DEFAULT_SCORE_CONTROL,
            ),
        };

        if config.data_dir.exists() && !config.data_dir.is_dir() {
            return Err(eyre::eyre!(
                "data dir is not a directory: {}",
                config.data_dir.display()
            ));
        }
        Ok(config)
    }
}

fn resolve(arg: Option<PathBuf>, env: Option<OsString>, default: &str) -> PathBuf {
    arg.or_else(|| env.filter(|v| !v.is_empty()).map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(default))
}
