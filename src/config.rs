/// Runtime configuration resolved from command line flags and environment.
use std::path::PathBuf;
use std::time::Duration;

use crate::cli::Cli;
use crate::db;
use crate::lookup::DEFAULT_API_BASE;

#[derive(Clone, Debug)]
pub struct Config {
    pub db_path: PathBuf,
    pub log_path: PathBuf,
    pub api_base: String,
    pub lookup_timeout: Duration,
}

impl Config {
    pub fn from_cli(cli: &Cli) -> Self {
        let db_path = cli.db.clone().unwrap_or_else(db::default_db_path);
        let log_path = cli.log_file.clone().unwrap_or_else(|| {
            db_path
                .parent()
                .map(|dir| dir.join("staystrong.log"))
                .unwrap_or_else(|| PathBuf::from("staystrong.log"))
        });
        Config {
            db_path,
            log_path,
            api_base: cli
                .api_base
                .clone()
                .unwrap_or_else(|| DEFAULT_API_BASE.to_string()),
            lookup_timeout: Duration::from_secs(cli.lookup_timeout.max(1)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_log_file_defaults_next_to_database() {
        let cli = Cli::parse_from(["staystrong", "--db", "/tmp/fit/app.db"]);
        let config = Config::from_cli(&cli);
        assert_eq!(config.db_path, PathBuf::from("/tmp/fit/app.db"));
        assert_eq!(config.log_path, PathBuf::from("/tmp/fit/staystrong.log"));
        assert_eq!(config.api_base, DEFAULT_API_BASE);
        assert_eq!(config.lookup_timeout, Duration::from_secs(15));
    }

    #[test]
    fn test_every_global_flag_has_env_fallback() {
        use clap::CommandFactory;

        let command = Cli::command();
        let env_of = |id: &str| {
            command
                .get_arguments()
                .find(|arg| arg.get_id() == id)
                .and_then(|arg| arg.get_env())
                .and_then(|env| env.to_str())
                .map(str::to_string)
        };
        assert_eq!(env_of("db").as_deref(), Some("STAYSTRONG_DB"));
        assert_eq!(env_of("api_base").as_deref(), Some("STAYSTRONG_API_BASE"));
        assert_eq!(env_of("log_file").as_deref(), Some("STAYSTRONG_LOG"));
        assert_eq!(
            env_of("lookup_timeout").as_deref(),
            Some("STAYSTRONG_LOOKUP_TIMEOUT")
        );
    }

    #[test]
    fn test_overrides() {
        let cli = Cli::parse_from([
            "staystrong",
            "--db",
            "fit.db",
            "--api-base",
            "http://localhost:9000",
            "--log-file",
            "debug.log",
            "--lookup-timeout",
            "3",
        ]);
        let config = Config::from_cli(&cli);
        assert_eq!(config.api_base, "http://localhost:9000");
        assert_eq!(config.log_path, PathBuf::from("debug.log"));
        assert_eq!(config.lookup_timeout, Duration::from_secs(3));
    }
}
