use std::collections::HashMap;
use std::sync::mpsc;

use core_foundation::runloop::{kCFRunLoopCommonModes, CFRunLoop, CFRunLoopSource};
use core_graphics::event::{
    CGEventFlags, CGEventTap, CGEventTapLocation, CGEventTapOptions, CGEventTapPlacement,
    CGEventType, CallbackResult, EventField,
};
use madori_layout::LayoutMode;

use crate::hotkey::{Hotkey, Modifiers};

/// Session event tap that swallows bound key presses and forwards their
/// layout mode. Dropping it removes the tap.
pub struct HotkeyTap {
    _tap: CGEventTap<'static>,
    _source: CFRunLoopSource,
}

impl HotkeyTap {
    /// Install the tap on the current thread's run loop.
    pub fn start(
        bindings: HashMap<Hotkey, LayoutMode>,
        mode_tx: mpsc::Sender<LayoutMode>,
    ) -> Result<Self, String> {
        let count = bindings.len();

        let tap = CGEventTap::new(
            CGEventTapLocation::Session,
            CGEventTapPlacement::HeadInsertEventTap,
            CGEventTapOptions::Default,
            vec![CGEventType::KeyDown],
            move |_proxy, _event_type, event| {
                let key_code =
                    event.get_integer_value_field(EventField::KEYBOARD_EVENT_KEYCODE) as u16;
                let flags = event.get_flags();

                let hotkey = Hotkey {
                    key_code,
                    modifiers: Modifiers {
                        cmd: flags.contains(CGEventFlags::CGEventFlagCommand),
                        alt: flags.contains(CGEventFlags::CGEventFlagAlternate),
                        ctrl: flags.contains(CGEventFlags::CGEventFlagControl),
                        shift: flags.contains(CGEventFlags::CGEventFlagShift),
                    },
                };

                let Some(mode) = bindings.get(&hotkey).copied() else {
                    return CallbackResult::Keep;
                };

                // Key repeat would queue the same placement over and over.
                let repeat = event.get_integer_value_field(EventField::KEYBOARD_EVENT_AUTOREPEAT);
                if repeat == 0 {
                    tracing::debug!("Hotkey {} -> {}", hotkey, mode);
                    if mode_tx.send(mode).is_err() {
                        tracing::error!("Placement worker is gone, dropping {}", mode);
                    }
                }
                CallbackResult::Drop
            },
        )
        .map_err(|_| {
            "Failed to create event tap. Make sure Accessibility permission is granted."
                .to_string()
        })?;

        tap.enable();

        let source = tap
            .mach_port()
            .create_runloop_source(0)
            .map_err(|_| "Failed to create run loop source".to_string())?;

        CFRunLoop::get_current().add_source(&source, unsafe { kCFRunLoopCommonModes });

        tracing::info!("Hotkey tap started with {} bindings", count);

        Ok(Self {
            _tap: tap,
            _source: source,
        })
    }
}
