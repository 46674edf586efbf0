use std::path::Path;
use std::time::Duration;

use anyhow::Result;

use super::open_store;

#[cfg(unix)]
pub(super) fn run_serve(db: &Path, socket: &Path, timeout: Duration) -> Result<()> {
    use anyhow::Context;
    use lilium_core::control::{ControlServer, PaletteState};
    use serde::Serialize;
    use tracing::info;

    #[derive(Debug, Serialize)]
    struct ServeReport<'a> {
        socket: &'a Path,
        notes: usize,
        visible: bool,
    }

    let store = open_store(db)?;
    let notes = store.count_notes()?;
    info!(db = %db.display(), notes, "notes database ready");

    let server = ControlServer::bind(socket, timeout)
        .with_context(|| format!("failed to bind control socket {}", socket.display()))?;
    eprintln!("palette listening on {}", server.path().display());

    let mut state = PaletteState::default();
    server.serve(&mut state)?;
    super::print_json(&ServeReport {
        socket,
        notes,
        visible: state.is_visible(),
    })
}

#[cfg(not(unix))]
pub(super) fn run_serve(db: &Path, _socket: &Path, _timeout: Duration) -> Result<()> {
    open_store(db)?;
    anyhow::bail!("serve requires a unix domain socket control channel")
}
