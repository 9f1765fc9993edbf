// P-key snapshots.
// Visual: nothing on screen; a PNG of the scene (without the HUD) lands in `snapshot_dir`.

use crate::error::Error;
use crate::render::Renderer;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

/// Write the current frame as `snapshot-<scene>-<unix ms>.png` under `dir`,
/// creating the directory first if needed.
pub fn save_snapshot(renderer: &Renderer, dir: &Path, scene: usize) -> Result<PathBuf, Error> {
    let stamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or(0);
    std::fs::create_dir_all(dir)?;
    let path = dir.join(format!("snapshot-{scene}-{stamp}.png"));
    renderer.frame().save(&path)?;
    log::debug!("snapshot {}x{} -> {}", renderer.width(), renderer.height(), path.display());
    Ok(path)
}
