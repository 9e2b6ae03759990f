use dispatch::Queue;
use madori_layout::{PlacementError, Rect, Result};
use objc2_app_kit::NSScreen;
use objc2_foundation::MainThreadMarker;

/// Frames of all attached screens in AppKit order (bottom-left origin,
/// primary first). AppKit is only usable on the main thread, so the query
/// hops onto the main queue; never call this from the main thread itself.
pub fn native_display_frames() -> Result<Vec<Rect>> {
    Queue::main()
        .exec_sync(|| {
            let mtm = MainThreadMarker::new()?;
            let frames = NSScreen::screens(mtm)
                .iter()
                .map(|screen| {
                    let frame = screen.frame();
                    Rect::new(
                        frame.origin.x,
                        frame.origin.y,
                        frame.size.width,
                        frame.size.height,
                    )
                })
                .collect::<Vec<_>>();
            Some(frames)
        })
        .ok_or_else(|| PlacementError::backend("Screen query did not run on the main thread"))
}
