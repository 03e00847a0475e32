use clap::{ArgGroup, Parser};
use std::path::PathBuf;

use crate::client::DEFAULT_BASE_URL;

#[derive(Parser, Debug)]
#[command(name = "srrdb")]
#[command(about = "srrdb.com terminal client", long_about = None)]
#[command(disable_version_flag = true)]
#[command(group(ArgGroup::new("mode").args(["version", "search", "download", "upload"])))]
#[command(after_help = "Examples:\n  \
  srrdb -s some release group:grp     search srrdb.com\n  \
  srrdb -d -e nfo Some.Release-GRP    save the NFO of a release\n  \
  srrdb -u -n user -p pass -r Some.Release-GRP -f Proof proof.jpg\n\n\
  For a list of search keywords see https://www.srrdb.com/help#keywords")]
pub struct Cli {
    /// Show the version and build information
    #[arg(short = 'v', long)]
    pub version: bool,

    /// Search srrdb.com for releases
    #[arg(short = 's', long)]
    pub search: bool,

    /// Download one or multiple SRR files
    #[arg(short = 'd', long)]
    pub download: bool,

    /// Save only stored files with this extension from the SRR file
    #[arg(short = 'e', long, value_name = "EXTENSION", requires = "download")]
    pub extension: Option<String>,

    /// Print file data to stdout instead of saving the file
    #[arg(short = 'o', long)]
    pub stdout: bool,

    /// Save stored files without their directories
    #[arg(long = "prunePaths", visible_alias = "prune-paths")]
    pub prune_paths: bool,

    /// List the stored files of the SRR files instead of saving anything
    #[arg(short = 'l', long, requires = "download")]
    pub list: bool,

    /// Match stored file blocks by their first two marker bytes only
    #[arg(long)]
    pub lenient_markers: bool,

    /// Upload one or multiple files
    #[arg(short = 'u', long)]
    pub upload: bool,

    /// Account used for uploads
    #[arg(short = 'n', long)]
    pub username: Option<String>,

    /// Password of the upload account
    #[arg(short = 'p', long)]
    pub password: Option<String>,

    /// Upload stored files to this release (needs a login)
    #[arg(short = 'r', long, value_name = "DIRNAME", requires = "upload")]
    pub release: Option<String>,

    /// Folder of the stored files, used with --release
    #[arg(short = 'f', long, requires = "release")]
    pub folder: Option<String>,

    /// Directory files are saved to
    #[arg(short = 'C', long, value_name = "DIR", default_value = ".")]
    pub directory: PathBuf,

    /// Service address
    #[arg(long, env = "SRRDB_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Request timeout in seconds
    #[arg(long, value_name = "SECONDS", default_value_t = 30)]
    pub timeout: u64,

    /// Retries for downloads and searches on connection errors
    #[arg(long, default_value_t = 3)]
    pub retries: u32,

    /// Log level, overridden by RUST_LOG
    #[arg(long, value_name = "LEVEL", default_value = "warn")]
    pub log_level: String,

    /// Query terms, dirnames or files, depending on the mode
    #[arg(value_name = "ARGS")]
    pub args: Vec<String>,
}
