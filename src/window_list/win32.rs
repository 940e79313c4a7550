//! Win32 window enumeration through `EnumWindows`.

use windows_sys::Win32::Foundation::{GetLastError, BOOL, HWND, LPARAM};
use windows_sys::Win32::UI::WindowsAndMessaging::{
    EnumWindows, GetWindowTextLengthW, GetWindowTextW, GetWindowThreadProcessId, IsIconic,
    IsWindowVisible,
};

use super::{WindowEnumerator, WindowRecord, WindowSnapshot};
use crate::snapshot::SnapshotError;

#[derive(Debug, Clone, Copy, Default)]
pub struct Win32Windows;

unsafe extern "system" fn collect_window(hwnd: HWND, lparam: LPARAM) -> BOOL {
    // lparam is the &mut Vec handed to EnumWindows below.
    let windows = &mut *(lparam as *mut Vec<WindowRecord>);

    if IsWindowVisible(hwnd) == 0 || IsIconic(hwnd) != 0 {
        return 1;
    }

    let len = GetWindowTextLengthW(hwnd);
    if len <= 0 {
        return 1;
    }
    let mut buffer = vec![0u16; len as usize + 1];
    let copied = GetWindowTextW(hwnd, buffer.as_mut_ptr(), buffer.len() as i32);
    if copied <= 0 {
        return 1;
    }
    let title = String::from_utf16_lossy(&buffer[..copied as usize]);

    let mut pid: u32 = 0;
    GetWindowThreadProcessId(hwnd, &mut pid);

    windows.push(WindowRecord {
        owner_pid: (pid != 0).then_some(pid),
        title,
    });
    1 // continue enumeration
}

impl WindowEnumerator for Win32Windows {
    fn visible_windows(&self) -> Result<WindowSnapshot, SnapshotError> {
        let mut windows: Vec<WindowRecord> = Vec::new();
        let ok = unsafe {
            EnumWindows(
                Some(collect_window),
                &mut windows as *mut Vec<WindowRecord> as LPARAM,
            )
        };
        if ok == 0 {
            let code = unsafe { GetLastError() };
            return Err(SnapshotError::Windows(format!(
                "EnumWindows failed with error {}",
                code
            )));
        }
        Ok(WindowSnapshot::Available(windows))
    }
}
