//! Command handlers, one per mode.
//!
//! User facing messages and stdout data go to the `out` writer. Failures of
//! a single dirname or file are reported there and the batch continues;
//! only fatal errors are returned.

use std::io::Write;
use std::path::Path;

use crate::client::{Catalog, Session};
use crate::config::{Config, Credentials, DownloadOptions};
use crate::error::{Result, SrrdbError};
use crate::srr::{SrrExtractor, StoredFile, save_member, wants_whole_container};

/// Print program and build information
pub fn version<W: Write>(out: &mut W) -> Result<()> {
    writeln!(out, "srrdb.com Terminal Client")?;
    writeln!(out, "{}", env!("CARGO_PKG_DESCRIPTION"))?;
    writeln!(out, "Version: {}", env!("CARGO_PKG_VERSION"))?;
    writeln!(
        out,
        "Commit: {}",
        option_env!("SRRDB_BUILD_COMMIT").unwrap_or("unknown")
    )?;
    writeln!(
        out,
        "Build date: {}",
        option_env!("SRRDB_BUILD_DATE").unwrap_or("unknown")
    )?;
    writeln!(out)?;
    writeln!(out, "Published under the GNU General Public License v3.0.")?;
    Ok(())
}

/// Search the catalog and print the results sorted by date
pub async fn search<C: Catalog, W: Write>(catalog: &C, query: &str, out: &mut W) -> Result<()> {
    let response = catalog.search(query).await?;
    if response.is_empty() {
        return Err(SrrdbError::NothingFound);
    }

    let mut results = response.results;
    results.sort_by(|a, b| a.date.cmp(&b.date));

    for result in &results {
        write!(out, "[{}] {}", result.date, result.dirname)?;
        if result.has_nfo() {
            write!(out, " [NFO]")?;
        }
        if result.has_srs() {
            write!(out, " [SRS]")?;
        }
        writeln!(out)?;
    }

    Ok(())
}

/// Download the SRR file of every dirname and save or print it, or the
/// stored files matching the configured extension.
pub async fn download<C: Catalog, W: Write>(
    catalog: &C,
    config: &Config,
    dirnames: &[String],
    out: &mut W,
) -> Result<()> {
    if dirnames.is_empty() {
        return Err(SrrdbError::MissingArguments(
            "You must provide at least one dirname.",
        ));
    }

    for dirname in dirnames {
        let srr = match catalog.download(dirname).await {
            Ok(srr) => srr,
            Err(e) => {
                tracing::warn!(dirname = dirname.as_str(), error = %e, "download failed");
                writeln!(out, "Failed to download SRR file for {}: {}", dirname, e)?;
                continue;
            }
        };

        match process_srr(srr, dirname, &config.download, &config.output_dir, out).await {
            Ok(()) => {}
            Err(SrrdbError::InvalidContainer) => {
                writeln!(out, "The downloaded file for {} isn't a valid SRR file.", dirname)?;
            }
            Err(SrrdbError::MemberNotFound(_)) => {
                writeln!(out, "Extension not found in SRR of {}.", dirname)?;
            }
            Err(e @ SrrdbError::MalformedContainer { .. }) => {
                tracing::warn!(dirname = dirname.as_str(), error = %e, "scan failed");
                writeln!(out, "The SRR file of {} is malformed: {}", dirname, e)?;
            }
            Err(e) => {
                writeln!(out, "Failed to process SRR file of {}: {}", dirname, e)?;
            }
        }
    }

    Ok(())
}

/// Validate one downloaded SRR file and hand it or its members to the sink.
async fn process_srr<W: Write>(
    srr: Vec<u8>,
    dirname: &str,
    options: &DownloadOptions,
    output_dir: &Path,
    out: &mut W,
) -> Result<()> {
    let extractor = SrrExtractor::new(srr, options.marker_check)?;

    if options.list {
        let files = extractor.list_files()?;
        writeln!(out, "{} ({} stored files)", dirname, files.len())?;
        for file in &files {
            writeln!(out, "{:>10}  {}", file.size(), file.name)?;
        }
        return Ok(());
    }

    let extension = options.extension.as_deref();
    if wants_whole_container(extension) {
        let name = format!("{}.srr", dirname);
        return write_member(&name, extractor.as_bytes(), options, output_dir, out).await;
    }

    let files: Vec<StoredFile> = extractor.extract_matching(extension.unwrap_or_default())?;
    tracing::info!(dirname, matches = files.len(), "extracted stored files");
    for file in &files {
        write_member(&file.name, &file.data, options, output_dir, out).await?;
    }

    Ok(())
}

/// Write one member to stdout or below `output_dir`.
///
/// A failed save is reported and does not stop the other members.
async fn write_member<W: Write>(
    name: &str,
    data: &[u8],
    options: &DownloadOptions,
    output_dir: &Path,
    out: &mut W,
) -> Result<()> {
    if options.to_stdout {
        out.write_all(data)?;
        return Ok(());
    }

    match save_member(output_dir, name, data, options.prune_paths).await {
        Ok(path) => writeln!(out, "Saved file to {}.", path.display())?,
        Err(e) => writeln!(out, "Failed to save file {}: {}", name, e)?,
    }
    Ok(())
}

async fn open_session<C: Catalog>(catalog: &C, credentials: Option<&Credentials>) -> Result<Session> {
    match credentials {
        Some(c) => {
            let session = catalog.login(&c.username, &c.password).await?;
            tracing::info!(username = c.username.as_str(), "logged in");
            Ok(session)
        }
        None => Ok(catalog.anonymous_session()),
    }
}

/// Upload SRR files, logged in if credentials are configured
pub async fn upload_srrs<C: Catalog, W: Write>(
    catalog: &C,
    config: &Config,
    paths: &[std::path::PathBuf],
    out: &mut W,
) -> Result<()> {
    if paths.is_empty() {
        return Err(SrrdbError::MissingArguments(
            "You must provide at least one file to upload.",
        ));
    }

    let session = open_session(catalog, config.credentials.as_ref()).await?;
    let response = catalog.upload_srrs(paths, &session).await?;

    for file in &response.files {
        writeln!(out, "{}", file.summary())?;
    }
    Ok(())
}

/// Upload stored files into a folder of a release, one request per file
pub async fn upload_stored_files<C: Catalog, W: Write>(
    catalog: &C,
    config: &Config,
    paths: &[std::path::PathBuf],
    dirname: &str,
    folder: &str,
    out: &mut W,
) -> Result<()> {
    if paths.is_empty() {
        return Err(SrrdbError::MissingArguments(
            "You must provide at least one file to upload.",
        ));
    }
    let Some(credentials) = config.credentials.as_ref() else {
        return Err(SrrdbError::MissingArguments(
            "You need to set your username and password to upload stored files.",
        ));
    };

    let session = open_session(catalog, Some(credentials)).await?;

    for path in paths {
        let base_name = path
            .file_name()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());

        match catalog
            .upload_stored_file(path, dirname, folder, &session)
            .await
        {
            Ok(message) => writeln!(out, "{}: {}", base_name, message)?,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "stored file upload failed");
                writeln!(out, "{}: Failed to upload stored file - {}", base_name, e)?;
            }
        }
    }
    Ok(())
}
