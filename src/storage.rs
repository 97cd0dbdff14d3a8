#![cfg(feature = "std")]

//! Save files and configuration files.
//!
//! Snapshots are stored with `bincode`; configuration is JSON so it can be
//! edited by hand and may leave out any value that should keep its default.

use std::fs;
use std::path::Path;
use std::string::String;
use std::vec::Vec;

use anyhow::Context;

use crate::config::{GameConfig, PartialConfig};
use crate::game::GameSession;
use crate::snapshot::Snapshot;

/// Serialize a snapshot for storage.
pub fn encode_snapshot(snapshot: &Snapshot) -> anyhow::Result<Vec<u8>> {
    Ok(bincode::serialize(snapshot)?)
}

/// Decode stored bytes into a snapshot. The snapshot is not validated; pass
/// it to [`GameSession::restore`] for that.
pub fn decode_snapshot(bytes: &[u8]) -> anyhow::Result<Snapshot> {
    Ok(bincode::deserialize(bytes)?)
}

/// Write the session's snapshot to `path`, replacing any previous save.
pub fn save_session(path: &Path, session: &GameSession) -> anyhow::Result<()> {
    let bytes = encode_snapshot(&session.snapshot())?;
    fs::write(path, bytes).with_context(|| format!("writing save file {}", path.display()))?;
    Ok(())
}

/// Read and validate a saved session.
pub fn load_session(path: &Path) -> anyhow::Result<GameSession> {
    let bytes =
        fs::read(path).with_context(|| format!("reading save file {}", path.display()))?;
    let snapshot = decode_snapshot(&bytes).context("decoding save file")?;
    GameSession::restore(snapshot).map_err(|e| anyhow::anyhow!("rejected save file: {}", e))
}

/// Remove a save file. A missing file is not an error.
pub fn clear_saved(path: &Path) -> anyhow::Result<()> {
    match fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e).with_context(|| format!("removing save file {}", path.display())),
    }
}

/// Session obtained from [`load_session_or_fresh`].
#[derive(Debug)]
pub struct LoadOutcome {
    pub session: GameSession,
    /// True when the session came from the save file.
    pub resumed: bool,
    /// Why the save file was ignored, if it existed but could not be used.
    pub warning: Option<String>,
}

/// Resume from `path` if it holds a valid save. A missing file yields a fresh
/// `setup` session; a corrupt one yields a fresh session plus a warning.
pub fn load_session_or_fresh(path: &Path, config: GameConfig) -> LoadOutcome {
    let fresh = || GameSession::new(config).unwrap_or_default();
    if !path.exists() {
        return LoadOutcome {
            session: fresh(),
            resumed: false,
            warning: None,
        };
    }
    match load_session(path) {
        Ok(session) => LoadOutcome {
            session,
            resumed: true,
            warning: None,
        },
        Err(e) => {
            let warning = format!("{:#}", e);
            log::warn!("ignoring save file {}: {}", path.display(), warning);
            LoadOutcome {
                session: fresh(),
                resumed: false,
                warning: Some(warning),
            }
        }
    }
}

/// Parse a JSON configuration, filling gaps from the defaults and
/// validating the result.
pub fn parse_config(json: &str) -> anyhow::Result<GameConfig> {
    let partial: PartialConfig = serde_json::from_str(json).context("parsing configuration")?;
    GameConfig::try_from(partial).map_err(|e| anyhow::anyhow!("invalid configuration: {}", e))
}

/// Load a JSON configuration file.
pub fn load_config(path: &Path) -> anyhow::Result<GameConfig> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("reading configuration {}", path.display()))?;
    parse_config(&json)
}

/// Write a configuration as pretty JSON.
pub fn save_config(path: &Path, config: &GameConfig) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(config)?;
    fs::write(path, json).with_context(|| format!("writing configuration {}", path.display()))?;
    Ok(())
}
