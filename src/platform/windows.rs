//! Win32 window backend
//!
//! Probe windows are plain overlapped windows of a private class that paint
//! their title centred in the client area, so several probes opened at once
//! can be told apart on screen.

use std::sync::OnceLock;
use std::time::Duration;

use windows::Win32::Foundation::{COLORREF, HWND, LPARAM, LRESULT, RECT, WPARAM};
use windows::Win32::Graphics::Gdi::{
    BeginPaint, CreateSolidBrush, DrawTextW, EndPaint, SetBkMode, UpdateWindow, DT_CENTER,
    DT_SINGLELINE, DT_VCENTER, PAINTSTRUCT, TRANSPARENT,
};
use windows::Win32::System::LibraryLoader::GetModuleHandleW;
use windows::Win32::UI::WindowsAndMessaging::{
    CreateWindowExW, DefWindowProcW, GetClientRect, GetSystemMetrics, GetWindowTextW,
    RegisterClassW, ShowWindow, CW_USEDEFAULT, SM_CMONITORS, SW_SHOWNOACTIVATE, WINDOW_EX_STYLE,
    WM_PAINT, WNDCLASSW, WS_OVERLAPPEDWINDOW,
};
use windows::core::{w, PCWSTR};

use crate::domain::core::Rect;
use crate::platform::window::{
    destroy_window, get_active_window, get_window_info, maximize_window, position_window,
    pump_messages,
};
use crate::platform::{BackendError, WindowBackend, WindowHandle};

const PROBE_CLASS: PCWSTR = w!("FigmanProbeWindow");

/// Converts a Windows RECT to domain rectangle
pub fn win32_rect_to_rect(rect: &RECT) -> Rect {
    Rect {
        x: rect.left,
        y: rect.top,
        w: rect.right - rect.left,
        h: rect.bottom - rect.top,
    }
}

pub fn handle_of(hwnd: HWND) -> WindowHandle {
    WindowHandle::from_raw(hwnd.0)
}

fn hwnd_of(handle: WindowHandle) -> HWND {
    HWND(handle.raw())
}

unsafe extern "system" fn probe_window_proc(
    hwnd: HWND,
    msg: u32,
    wparam: WPARAM,
    lparam: LPARAM,
) -> LRESULT {
    unsafe {
        match msg {
            WM_PAINT => {
                let mut ps = PAINTSTRUCT::default();
                let hdc = BeginPaint(hwnd, &mut ps);

                let mut title = [0u16; 256];
                let len = GetWindowTextW(hwnd, &mut title).max(0) as usize;
                let mut client = RECT::default();
                if GetClientRect(hwnd, &mut client).is_ok() {
                    SetBkMode(hdc, TRANSPARENT);
                    DrawTextW(
                        hdc,
                        &mut title[..len],
                        &mut client,
                        DT_CENTER | DT_VCENTER | DT_SINGLELINE,
                    );
                }

                EndPaint(hwnd, &ps);
                LRESULT(0)
            }
            _ => DefWindowProcW(hwnd, msg, wparam, lparam),
        }
    }
}

/// Registers the probe window class once per process
fn register_probe_class() -> Result<(), BackendError> {
    static REGISTERED: OnceLock<bool> = OnceLock::new();

    let ok = *REGISTERED.get_or_init(|| unsafe {
        let Ok(hinstance) = GetModuleHandleW(None) else {
            return false;
        };

        let wc = WNDCLASSW {
            lpfnWndProc: Some(probe_window_proc),
            hInstance: hinstance.into(),
            lpszClassName: PROBE_CLASS,
            hbrBackground: CreateSolidBrush(COLORREF(0x00ffffff)),
            ..Default::default()
        };

        RegisterClassW(&wc) != 0
    });

    if ok {
        Ok(())
    } else {
        Err(BackendError::Unavailable {
            reason: "could not register probe window class".to_string(),
        })
    }
}

/// Window backend driving the Win32 API on the calling thread
///
/// Probe windows belong to the thread that created them, so every call must
/// come from that same thread.
#[derive(Debug, Default)]
pub struct Win32Backend;

impl Win32Backend {
    pub fn new() -> Self {
        Self
    }
}

impl WindowBackend for Win32Backend {
    fn name(&self) -> &'static str {
        "win32"
    }

    fn is_interactive(&self) -> bool {
        // Services and non-interactive window stations report no monitors
        unsafe { GetSystemMetrics(SM_CMONITORS) > 0 }
    }

    fn open_probe(&self, label: &str) -> Result<WindowHandle, BackendError> {
        register_probe_class()?;

        let title: Vec<u16> = label.encode_utf16().chain(std::iter::once(0)).collect();
        let hinstance = unsafe { GetModuleHandleW(None) }.map_err(|e| BackendError::Unavailable {
            reason: e.to_string(),
        })?;

        let hwnd = unsafe {
            CreateWindowExW(
                WINDOW_EX_STYLE(0),
                PROBE_CLASS,
                PCWSTR(title.as_ptr()),
                WS_OVERLAPPEDWINDOW,
                CW_USEDEFAULT,
                CW_USEDEFAULT,
                640,
                480,
                None,
                None,
                hinstance,
                None,
            )
        };

        if hwnd.0 == 0 {
            return Err(BackendError::Unavailable {
                reason: "CreateWindowExW returned a null window".to_string(),
            });
        }

        unsafe {
            ShowWindow(hwnd, SW_SHOWNOACTIVATE);
            UpdateWindow(hwnd);
        }

        Ok(handle_of(hwnd))
    }

    fn maximize(&self, window: WindowHandle) -> Result<(), BackendError> {
        maximize_window(hwnd_of(window))
    }

    fn geometry(&self, window: WindowHandle) -> Result<Rect, BackendError> {
        get_window_info(hwnd_of(window)).map(|info| info.rect)
    }

    fn set_geometry(&self, window: WindowHandle, rect: Rect) -> Result<(), BackendError> {
        position_window(hwnd_of(window), rect)
    }

    fn active_window(&self) -> Result<WindowHandle, BackendError> {
        get_active_window().map(handle_of)
    }

    fn close(&self, window: WindowHandle) -> Result<(), BackendError> {
        destroy_window(hwnd_of(window))
    }

    fn settle(&self, delay: Duration) {
        pump_messages(delay);
    }
}
