//! `decode-script`: in-place base64 decoding of a script file.

use std::fs;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use camino::Utf8Path;

use crate::error::ActionError;
use crate::outcome::Completion;
use crate::subcommand::Subcommand;

/// Replaces the base64 payload stored at `path` with its decoded bytes.
///
/// ASCII whitespace is ignored so wrapped encoder output decodes cleanly.
/// Rewriting the existing file keeps its permission bits. An invalid payload
/// leaves the file untouched.
pub(crate) fn decode_script(path: &Utf8Path) -> Result<Completion, ActionError> {
    let encoded = fs::read(path).map_err(|error| ActionError::io("read script", path, error))?;
    let decoded = decode_payload(&encoded).map_err(|error| ActionError::decode(path, error))?;
    fs::write(path, decoded)
        .map_err(|error| ActionError::io("write decoded script", path, error))?;

    Ok(Completion::new(
        Subcommand::DecodeScript,
        format!("decoded script {path}"),
    ))
}

fn decode_payload(encoded: &[u8]) -> Result<Vec<u8>, base64::DecodeError> {
    let compact: Vec<u8> = encoded
        .iter()
        .copied()
        .filter(|byte| !byte.is_ascii_whitespace())
        .collect();
    STANDARD.decode(compact)
}
