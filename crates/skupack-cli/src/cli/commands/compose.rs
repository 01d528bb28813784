//! `skupack compose` – frame one local image.

use anyhow::{Context, Result};
use skupack_core::compose::{self, Frame};
use std::path::Path;

pub fn run_compose(base: &Path, frame: &Path, out: &Path) -> Result<()> {
    let base_bytes =
        std::fs::read(base).with_context(|| format!("reading image {}", base.display()))?;
    let frame = Frame::open(frame)?;
    let png = compose::composite(&base_bytes, &frame)?;
    std::fs::write(out, &png).with_context(|| format!("writing {}", out.display()))?;
    println!("{}  {} bytes", out.display(), png.len());
    Ok(())
}
