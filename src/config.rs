//! Run configuration built from the command line.
//!
//! Handlers receive a [`Config`] instead of reading flags, so every mode can
//! be driven directly from tests.

use std::path::PathBuf;
use std::time::Duration;
use url::Url;

use crate::cli::Cli;
use crate::error::Result;
use crate::srr::MarkerCheck;

/// What the program was asked to do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Version,
    Search { query: String },
    Download { dirnames: Vec<String> },
    UploadSrrs { paths: Vec<PathBuf> },
    UploadStoredFiles {
        paths: Vec<PathBuf>,
        dirname: String,
        folder: String,
    },
    Help,
}

/// Account used for uploads
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

/// Options of the download mode
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DownloadOptions {
    /// Lower-cased extension filter, `None` for the whole SRR file
    pub extension: Option<String>,
    pub to_stdout: bool,
    pub prune_paths: bool,
    pub list: bool,
    pub marker_check: MarkerCheck,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub action: Action,
    pub base_url: Url,
    pub timeout: Duration,
    pub max_retries: u32,
    /// Root for saved files
    pub output_dir: PathBuf,
    pub download: DownloadOptions,
    pub credentials: Option<Credentials>,
}

impl Config {
    pub fn from_cli(cli: Cli) -> Result<Self> {
        let action = if cli.version {
            Action::Version
        } else if cli.search {
            Action::Search {
                query: cli.args.join(" "),
            }
        } else if cli.download {
            Action::Download { dirnames: cli.args }
        } else if cli.upload {
            let paths = cli.args.into_iter().map(PathBuf::from).collect();
            match cli.release {
                Some(dirname) => Action::UploadStoredFiles {
                    paths,
                    dirname,
                    folder: cli.folder.unwrap_or_default(),
                },
                None => Action::UploadSrrs { paths },
            }
        } else {
            Action::Help
        };

        // Both halves are needed, a lone username or password is ignored
        let credentials = match (cli.username, cli.password) {
            (Some(username), Some(password)) if !username.is_empty() && !password.is_empty() => {
                Some(Credentials { username, password })
            }
            _ => None,
        };

        Ok(Self {
            action,
            base_url: Url::parse(&cli.base_url)?,
            timeout: Duration::from_secs(cli.timeout),
            max_retries: cli.retries,
            output_dir: cli.directory,
            download: DownloadOptions {
                extension: cli.extension.map(|e| e.to_lowercase()),
                to_stdout: cli.stdout,
                prune_paths: cli.prune_paths,
                list: cli.list,
                marker_check: if cli.lenient_markers {
                    MarkerCheck::Lenient
                } else {
                    MarkerCheck::Strict
                },
            },
            credentials,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn parse(args: &[&str]) -> Config {
        let mut argv = vec!["srrdb", "--base-url", "https://srrdb.example"];
        argv.extend_from_slice(args);
        Config::from_cli(Cli::try_parse_from(argv).unwrap()).unwrap()
    }

    #[test]
    fn test_search_query() {
        let config = parse(&["-s", "foo", "bar"]);
        assert_eq!(
            config.action,
            Action::Search {
                query: "foo bar".into()
            }
        );
        assert_eq!(config.base_url.as_str(), "https://srrdb.example/");
    }

    #[test]
    fn test_download_options() {
        let config = parse(&["-d", "-e", "NFO", "--lenient-markers", "A-GRP"]);
        assert_eq!(
            config.action,
            Action::Download {
                dirnames: vec!["A-GRP".into()]
            }
        );
        assert_eq!(config.download.extension.as_deref(), Some("nfo"));
        assert_eq!(config.download.marker_check, MarkerCheck::Lenient);
        assert_eq!(config.output_dir, PathBuf::from("."));
    }

    #[test]
    fn test_upload_actions() {
        let config = parse(&["-u", "a.srr"]);
        assert_eq!(
            config.action,
            Action::UploadSrrs {
                paths: vec![PathBuf::from("a.srr")]
            }
        );
        assert!(config.credentials.is_none());

        let config = parse(&["-u", "-n", "u", "-p", "p", "-r", "Rel-GRP", "proof.jpg"]);
        assert_eq!(
            config.action,
            Action::UploadStoredFiles {
                paths: vec![PathBuf::from("proof.jpg")],
                dirname: "Rel-GRP".into(),
                folder: String::new(),
            }
        );
        assert_eq!(config.credentials.unwrap().username, "u");
    }

    #[test]
    fn test_lone_username_is_ignored() {
        let config = parse(&["-u", "-n", "u", "a.srr"]);
        assert!(config.credentials.is_none());
    }

    #[test]
    fn test_no_mode_prints_help() {
        assert_eq!(parse(&[]).action, Action::Help);
    }

    #[test]
    fn test_invalid_base_url() {
        let cli = Cli::try_parse_from(["srrdb", "--base-url", "not a url", "-s", "x"]).unwrap();
        assert!(Config::from_cli(cli).is_err());
    }
}
