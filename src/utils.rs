//! # Utilities
//!
//! Small helpers shared by the engine, the actions and the UI.

#[cfg(target_os = "windows")]
use windows_sys::Win32::Foundation::{CloseHandle, HANDLE};
#[cfg(target_os = "windows")]
use windows_sys::Win32::Security::{
    GetTokenInformation, TokenElevation, TOKEN_ELEVATION, TOKEN_QUERY,
};
#[cfg(target_os = "windows")]
use windows_sys::Win32::System::Threading::{GetCurrentProcess, OpenProcessToken};
#[cfg(target_os = "windows")]
use std::ffi::c_void;

/// Checks if the current process is elevated (running as administrator or root).
pub fn is_elevated() -> bool {
    #[cfg(target_os = "windows")]
    {
        unsafe {
            let mut token: HANDLE = std::ptr::null_mut();
            if OpenProcessToken(GetCurrentProcess(), TOKEN_QUERY, &mut token) == 0 {
                return false;
            }

            let mut elevation: TOKEN_ELEVATION = std::mem::zeroed();
            let mut return_length: u32 = 0;

            let result = GetTokenInformation(
                token,
                TokenElevation,
                &mut elevation as *mut TOKEN_ELEVATION as *mut c_void,
                std::mem::size_of::<TOKEN_ELEVATION>() as u32,
                &mut return_length,
            );

            CloseHandle(token);

            result != 0 && elevation.TokenIsElevated != 0
        }
    }
    #[cfg(not(target_os = "windows"))]
    {
        unsafe { libc::geteuid() == 0 }
    }
}

/// Normalizes an executable name for set lookups: lowercase, without a trailing `.exe`.
pub fn normalize_app_name(name: &str) -> String {
    let lower = name.trim().to_lowercase();
    match lower.strip_suffix(".exe") {
        Some(stripped) => stripped.to_string(),
        None => lower,
    }
}

/// Case-insensitive path prefix test that treats `/` and `\` as the same separator.
pub fn path_has_prefix(path: &str, prefix: &str) -> bool {
    if path.is_empty() || prefix.is_empty() {
        return false;
    }
    let canon = |s: &str| s.replace('\\', "/").to_lowercase();
    canon(path).starts_with(&canon(prefix))
}

/// Format a megabyte amount for display.
pub fn format_mb(mb: f64) -> String {
    if mb >= 1024.0 {
        format!("{:.2} GB", mb / 1024.0)
    } else {
        format!("{:.1} MB", mb)
    }
}
