use std::ffi::c_void;
use std::ptr;

use core_foundation::base::{CFRelease, CFTypeRef, TCFType};
use core_foundation::string::{CFString, CFStringRef};
use core_graphics::geometry::{CGPoint, CGSize};
use madori_layout::{PlacementError, Point, Rect, Result, Size, WindowBackend};

use super::screen::native_display_frames;

type AXUIElementRef = *mut c_void;

#[link(name = "ApplicationServices", kind = "framework")]
extern "C" {
    fn AXUIElementCreateSystemWide() -> AXUIElementRef;
    fn AXUIElementCopyAttributeValue(
        element: AXUIElementRef,
        attribute: CFStringRef,
        value: *mut CFTypeRef,
    ) -> i32;
    fn AXUIElementSetAttributeValue(
        element: AXUIElementRef,
        attribute: CFStringRef,
        value: CFTypeRef,
    ) -> i32;
    fn AXValueCreate(value_type: u32, value: *const c_void) -> CFTypeRef;
    fn AXValueGetValue(value: CFTypeRef, value_type: u32, out: *mut c_void) -> bool;
}

const K_AX_VALUE_CGPOINT_TYPE: u32 = 1;
const K_AX_VALUE_CGSIZE_TYPE: u32 = 2;

const K_AX_ERROR_INVALID_UI_ELEMENT: i32 = -25202;
const K_AX_ERROR_API_DISABLED: i32 = -25211;
const K_AX_ERROR_NO_VALUE: i32 = -25212;

/// Owned reference to an accessibility object, released on drop.
struct AxElement(AXUIElementRef);

impl AxElement {
    fn system_wide() -> Result<Self> {
        let element = unsafe { AXUIElementCreateSystemWide() };
        if element.is_null() {
            return Err(PlacementError::backend(
                "Failed to create system-wide AX element",
            ));
        }
        Ok(Self(element))
    }

    fn child(&self, attribute: &str) -> Result<Self> {
        let value = self.copy(attribute)?;
        Ok(Self(value as AXUIElementRef))
    }

    fn copy(&self, attribute: &str) -> Result<CFTypeRef> {
        let name = CFString::new(attribute);
        let mut value: CFTypeRef = ptr::null();
        let err = unsafe {
            AXUIElementCopyAttributeValue(self.0, name.as_concrete_TypeRef(), &mut value)
        };
        if err != 0 {
            return Err(ax_error(err, attribute));
        }
        if value.is_null() {
            return Err(PlacementError::WindowNotFound);
        }
        Ok(value)
    }

    /// Read an AXValue-wrapped struct into `out`.
    fn get<T>(&self, attribute: &str, value_type: u32, mut out: T) -> Result<T> {
        let value = self.copy(attribute)?;
        let ok = unsafe { AXValueGetValue(value, value_type, &mut out as *mut T as *mut c_void) };
        unsafe { CFRelease(value) };
        if !ok {
            return Err(PlacementError::backend(format!(
                "{} has an unexpected value type",
                attribute
            )));
        }
        Ok(out)
    }

    fn set<T>(&self, attribute: &str, value_type: u32, value: &T) -> Result<()> {
        let name = CFString::new(attribute);
        let ax_value = unsafe { AXValueCreate(value_type, value as *const T as *const c_void) };
        if ax_value.is_null() {
            return Err(PlacementError::backend(format!(
                "Failed to create AX value for {}",
                attribute
            )));
        }
        let err =
            unsafe { AXUIElementSetAttributeValue(self.0, name.as_concrete_TypeRef(), ax_value) };
        unsafe { CFRelease(ax_value) };
        if err != 0 {
            return Err(ax_error(err, attribute));
        }
        Ok(())
    }
}

impl Drop for AxElement {
    fn drop(&mut self) {
        unsafe { CFRelease(self.0 as CFTypeRef) };
    }
}

fn ax_error(code: i32, attribute: &str) -> PlacementError {
    match code {
        K_AX_ERROR_NO_VALUE | K_AX_ERROR_INVALID_UI_ELEMENT => PlacementError::WindowNotFound,
        K_AX_ERROR_API_DISABLED => {
            PlacementError::backend("Accessibility permission is not granted")
        }
        _ => PlacementError::backend(format!("{}: AX error {}", attribute, code)),
    }
}

fn focused_window() -> Result<AxElement> {
    AxElement::system_wide()?
        .child("AXFocusedApplication")?
        .child("AXFocusedWindow")
}

/// Window backend over the macOS Accessibility API.
pub struct AxBackend;

impl WindowBackend for AxBackend {
    fn active_window_geometry(&self) -> Result<Rect> {
        let window = focused_window()?;
        let origin = window.get(
            "AXPosition",
            K_AX_VALUE_CGPOINT_TYPE,
            CGPoint::new(0.0, 0.0),
        )?;
        let size = window.get("AXSize", K_AX_VALUE_CGSIZE_TYPE, CGSize::new(0.0, 0.0))?;
        Ok(Rect::new(origin.x, origin.y, size.width, size.height))
    }

    fn set_active_window_geometry(&self, size: Option<Size>, position: Option<Point>) -> Result<()> {
        let window = focused_window()?;
        if let Some(position) = position {
            let origin = CGPoint::new(position.x as f64, position.y as f64);
            window.set("AXPosition", K_AX_VALUE_CGPOINT_TYPE, &origin)?;
        }
        if let Some(size) = size {
            let size = CGSize::new(size.width as f64, size.height as f64);
            window.set("AXSize", K_AX_VALUE_CGSIZE_TYPE, &size)?;
        }
        Ok(())
    }

    fn displays(&self) -> Result<Vec<Rect>> {
        native_display_frames()
    }
}
