//! `cp`: byte-for-byte file copy.

use std::fs::{self, File, OpenOptions};
use std::io;

use camino::Utf8Path;

#[cfg(unix)]
use std::os::unix::fs::OpenOptionsExt;

use crate::error::ActionError;
use crate::outcome::Completion;
use crate::subcommand::Subcommand;

/// Mode applied to newly created destinations: owner read/write/execute and
/// read/execute for everyone else, so copied tools run for any step user.
#[cfg(unix)]
const DESTINATION_MODE: u32 = 0o755;

/// Copies `source` to `destination`, creating or truncating the destination.
///
/// The source is opened before the destination is touched, so a missing
/// source never clobbers an existing destination. A destination that resolves
/// to the source itself is rejected before anything is truncated. A failure
/// mid-stream leaves the destination partially written.
pub(crate) fn copy(source: &Utf8Path, destination: &Utf8Path) -> Result<Completion, ActionError> {
    let mut reader =
        File::open(source).map_err(|error| ActionError::io("open source", source, error))?;
    ensure_distinct(source, destination)?;
    let mut writer = destination_options()
        .open(destination)
        .map_err(|error| ActionError::io("create destination", destination, error))?;

    io::copy(&mut reader, &mut writer)
        .map_err(|error| ActionError::io("copy into", destination, error))?;

    Ok(Completion::new(
        Subcommand::Copy,
        format!("copied {source} to {destination}"),
    ))
}

/// Fails when `destination` already exists and resolves to `source`.
///
/// Paths are compared after symlink resolution; distinct hard links to one
/// inode are not detected.
fn ensure_distinct(source: &Utf8Path, destination: &Utf8Path) -> Result<(), ActionError> {
    let Ok(resolved_destination) = fs::canonicalize(destination) else {
        return Ok(());
    };
    let resolved_source =
        fs::canonicalize(source).map_err(|error| ActionError::io("resolve source", source, error))?;
    if resolved_source == resolved_destination {
        return Err(ActionError::SameFile {
            path: destination.to_path_buf(),
        });
    }
    Ok(())
}

fn destination_options() -> OpenOptions {
    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    options.mode(DESTINATION_MODE);
    options
}
