mod accessibility;
mod hotkey;
mod screen;

use std::sync::mpsc;
use std::thread;

use anyhow::{Context, Result};
use core_foundation::runloop::CFRunLoop;
use madori_layout::{BoxMuller, LayoutMode, Placer};

use crate::config::Config;

pub use accessibility::AxBackend;
pub use hotkey::HotkeyTap;

/// Install the hotkey tap and serve placements until the run loop exits.
///
/// The tap lives on the main run loop; placements run one at a time on a
/// worker thread, which also keeps the main queue free for screen queries.
pub fn run(config: Config) -> Result<()> {
    let bindings = config.hotkeys()?;
    for (hotkey, mode) in &bindings {
        tracing::info!("Binding {} to {}", hotkey, mode);
    }

    let (mode_tx, mode_rx) = mpsc::channel::<LayoutMode>();
    let placement = config.placement;
    let presets = config.presets;

    thread::Builder::new()
        .name("placement".into())
        .spawn(move || {
            let mut placer = Placer::new(AxBackend, BoxMuller::from_entropy(), placement);
            for mode in mode_rx {
                let intent = presets.intent(mode);
                if let Err(e) = placer.place(&intent) {
                    tracing::warn!("{} failed: {}", mode, e);
                }
            }
        })
        .context("Failed to spawn placement worker")?;

    let _tap = HotkeyTap::start(bindings, mode_tx).map_err(anyhow::Error::msg)?;
    CFRunLoop::run_current();

    Ok(())
}
