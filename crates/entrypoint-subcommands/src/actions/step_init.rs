//! `step-init`: lays out per-step state directories under the step root.
//!
//! For steps `[s0, s1, ...]` the layout is:
//!
//! ```text
//! <root>/run/<i>/status/       one writable status directory per step
//! <root>/steps/<name> -> ../run/<i>/status
//! <root>/steps/<i>    -> ../run/<i>/status
//! ```
//!
//! Link targets are relative to `steps/`, so the layout resolves whether the
//! root was given as an absolute or a relative path, and keeps resolving when
//! the root is mounted elsewhere. `<root>/steps/` is created even when no
//! steps are given.

use std::fs;
use std::io;

use camino::{Utf8Path, Utf8PathBuf};
use tracing::debug;

use crate::SUBCOMMAND_TARGET;
use crate::error::ActionError;
use crate::outcome::Completion;
use crate::subcommand::Subcommand;

const STEPS_DIR: &str = "steps";
const RUN_DIR: &str = "run";
const STATUS_DIR: &str = "status";

/// Creates the step directory layout under `root`.
///
/// Every name is validated before anything is written. Re-running with the
/// same root replaces existing step links rather than failing.
pub(crate) fn step_init<S: AsRef<str>>(
    root: &Utf8Path,
    steps: &[S],
) -> Result<Completion, ActionError> {
    for step in steps {
        validate_step_name(step.as_ref())?;
    }

    let steps_dir = root.join(STEPS_DIR);
    create_dir(&steps_dir, "create steps directory")?;

    for (index, step) in steps.iter().enumerate() {
        let index = index.to_string();
        create_dir(
            &status_directory(root, &index),
            "create step status directory",
        )?;
        let target = link_target(&index);
        link_step(&target, &steps_dir.join(step.as_ref()))?;
        link_step(&target, &steps_dir.join(&index))?;
    }

    Ok(Completion::new(
        Subcommand::StepInit,
        format!("initialised step directories under {root}"),
    ))
}

/// Returns `<root>/run/<index>/status`.
pub(crate) fn status_directory(root: &Utf8Path, index: &str) -> Utf8PathBuf {
    root.join(RUN_DIR).join(index).join(STATUS_DIR)
}

/// Returns `../run/<index>/status`, the status directory as seen from
/// `<root>/steps/`.
pub(crate) fn link_target(index: &str) -> Utf8PathBuf {
    Utf8Path::new("..")
        .join(RUN_DIR)
        .join(index)
        .join(STATUS_DIR)
}

fn validate_step_name(name: &str) -> Result<(), ActionError> {
    if name.is_empty() {
        return Err(ActionError::invalid_step_name(name, "step name is empty"));
    }
    if name == "." || name == ".." {
        return Err(ActionError::invalid_step_name(
            name,
            "step name is a relative path component",
        ));
    }
    if name.contains(['/', '\\']) {
        return Err(ActionError::invalid_step_name(
            name,
            "step name contains a path separator",
        ));
    }
    if name.contains('\0') {
        return Err(ActionError::invalid_step_name(
            name,
            "step name contains a NUL byte",
        ));
    }
    Ok(())
}

fn create_dir(path: &Utf8Path, operation: &'static str) -> Result<(), ActionError> {
    fs::create_dir_all(path).map_err(|error| ActionError::io(operation, path, error))
}

fn link_step(target: &Utf8Path, link: &Utf8Path) -> Result<(), ActionError> {
    match fs::symlink_metadata(link) {
        Ok(metadata) if metadata.file_type().is_symlink() => {
            remove_link(link)
                .map_err(|error| ActionError::io("remove stale step link", link, error))?;
        }
        Ok(_) => {
            return Err(ActionError::LinkOccupied {
                path: link.to_path_buf(),
            });
        }
        Err(error) if error.kind() == io::ErrorKind::NotFound => {}
        Err(error) => return Err(ActionError::io("inspect step link", link, error)),
    }

    debug!(
        target: SUBCOMMAND_TARGET,
        link = link.as_str(),
        link_target = target.as_str(),
        "linking step status directory"
    );
    symlink(target, link).map_err(|error| ActionError::io("create step link", link, error))
}

#[cfg(unix)]
fn symlink(target: &Utf8Path, link: &Utf8Path) -> io::Result<()> {
    std::os::unix::fs::symlink(target, link)
}

#[cfg(windows)]
fn symlink(target: &Utf8Path, link: &Utf8Path) -> io::Result<()> {
    std::os::windows::fs::symlink_dir(target, link)
}

#[cfg(unix)]
fn remove_link(link: &Utf8Path) -> io::Result<()> {
    fs::remove_file(link)
}

#[cfg(windows)]
fn remove_link(link: &Utf8Path) -> io::Result<()> {
    fs::remove_dir(link)
}
