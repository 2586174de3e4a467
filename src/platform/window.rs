//! Window management and positioning
//!
//! This module handles:
//! - Getting the currently active window
//! - Reading a window's outer rectangle
//! - Moving and resizing windows to specific rectangles
//! - Pumping the thread's message queue so geometry changes land
//!
//! Placement never activates the target window.

use std::time::{Duration, Instant};

use windows::Win32::Foundation::*;
use windows::Win32::UI::WindowsAndMessaging::*;

use crate::domain::core::Rect;
use crate::platform::windows::{handle_of, win32_rect_to_rect};
use crate::platform::BackendError;

/// Information about a window
#[derive(Debug, Clone)]
pub struct WindowInfo {
    /// Window handle
    pub handle: HWND,
    /// Window title (if available)
    pub title: String,
    /// Current window rectangle in screen coordinates
    pub rect: Rect,
    /// Whether the window is currently maximized
    pub is_maximized: bool,
}

/// Gets the currently active (foreground) window
pub fn get_active_window() -> Result<HWND, BackendError> {
    let hwnd = unsafe { GetForegroundWindow() };
    if hwnd.0 == 0 {
        return Err(BackendError::NoActiveWindow);
    }
    Ok(hwnd)
}

/// Fails with `InvalidHandle` unless `hwnd` is a live window
pub fn ensure_window(hwnd: HWND) -> Result<(), BackendError> {
    if unsafe { IsWindow(hwnd) }.as_bool() {
        Ok(())
    } else {
        Err(BackendError::InvalidHandle(handle_of(hwnd)))
    }
}

/// Gets information about the specified window
pub fn get_window_info(hwnd: HWND) -> Result<WindowInfo, BackendError> {
    ensure_window(hwnd)?;

    unsafe {
        let mut title_buffer = [0u16; 512];
        let title_length = GetWindowTextW(hwnd, &mut title_buffer);
        let title = if title_length > 0 {
            String::from_utf16_lossy(&title_buffer[..title_length as usize])
        } else {
            String::from("<No Title>")
        };

        let mut window_rect = RECT::default();
        if GetWindowRect(hwnd, &mut window_rect).is_err() {
            return Err(BackendError::OperationFailed {
                operation: "GetWindowRect",
                handle: handle_of(hwnd),
            });
        }

        let mut placement = WINDOWPLACEMENT {
            length: std::mem::size_of::<WINDOWPLACEMENT>() as u32,
            ..Default::default()
        };

        let is_maximized = if GetWindowPlacement(hwnd, &mut placement).is_ok() {
            placement.showCmd == (SW_SHOWMAXIMIZED.0 as u32)
        } else {
            false
        };

        Ok(WindowInfo {
            handle: hwnd,
            title,
            rect: win32_rect_to_rect(&window_rect),
            is_maximized,
        })
    }
}

/// Maximizes a window
pub fn maximize_window(hwnd: HWND) -> Result<(), BackendError> {
    ensure_window(hwnd)?;
    // Return value is the previous visibility, not success
    unsafe {
        ShowWindow(hwnd, SW_MAXIMIZE);
    }
    Ok(())
}

/// Moves and resizes a window to the specified rectangle
///
/// This function:
/// - Restores maximized windows first (a maximized window ignores moves)
/// - Preserves the window's Z-order
/// - Does not change focus
pub fn position_window(hwnd: HWND, target_rect: Rect) -> Result<(), BackendError> {
    let window_info = get_window_info(hwnd)?;

    if window_info.is_maximized {
        unsafe {
            ShowWindow(hwnd, SW_RESTORE);
        }
        pump_messages(Duration::from_millis(50));
    }

    log::trace!("Moving '{}' to {}", window_info.title, target_rect);

    // SWP_NOACTIVATE: Don't activate the window (preserve focus)
    // SWP_NOZORDER: Don't change Z-order position (HWND parameter ignored)
    let result = unsafe {
        SetWindowPos(
            hwnd,
            HWND(0),
            target_rect.x,
            target_rect.y,
            target_rect.w,
            target_rect.h,
            SWP_NOACTIVATE | SWP_NOZORDER,
        )
    };

    result.map_err(|_| BackendError::OperationFailed {
        operation: "SetWindowPos",
        handle: handle_of(hwnd),
    })
}

/// Destroys a window created by this thread
pub fn destroy_window(hwnd: HWND) -> Result<(), BackendError> {
    ensure_window(hwnd)?;
    unsafe { DestroyWindow(hwnd) }.map_err(|_| BackendError::OperationFailed {
        operation: "DestroyWindow",
        handle: handle_of(hwnd),
    })
}

/// Dispatches queued messages until `duration` has elapsed
pub fn pump_messages(duration: Duration) {
    let deadline = Instant::now() + duration;

    loop {
        unsafe {
            let mut msg = MSG::default();
            while PeekMessageW(&mut msg, HWND(0), 0, 0, PM_REMOVE).as_bool() {
                TranslateMessage(&msg);
                DispatchMessageW(&msg);
            }
        }

        let now = Instant::now();
        if now >= deadline {
            break;
        }
        std::thread::sleep((deadline - now).min(Duration::from_millis(10)));
    }
}
