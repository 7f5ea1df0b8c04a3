//! Cross-platform logging module.
//!
//! The store and HTTP layers log through the `log_*!` macros below, which
//! dispatch to the appropriate backend:
//! - Web: `web_sys::console`
//! - Native: `tracing`, under the `smartshelf_client` target

#[cfg(not(target_arch = "wasm32"))]
const TARGET: &str = "smartshelf_client";

#[cfg(target_arch = "wasm32")]
fn console_line(scope: &str, msg: &str) -> wasm_bindgen::JsValue {
    wasm_bindgen::JsValue::from_str(&format!("[{scope}] {msg}"))
}

/// Log an info message (platform-specific)
#[cfg(target_arch = "wasm32")]
pub fn log_info_impl(scope: &str, msg: &str) {
    web_sys::console::log_1(&console_line(scope, msg));
}

#[cfg(not(target_arch = "wasm32"))]
pub fn log_info_impl(scope: &str, msg: &str) {
    tracing::info!(target: TARGET, scope, "{}", msg);
}

/// Log an error message (platform-specific)
#[cfg(target_arch = "wasm32")]
pub fn log_error_impl(scope: &str, msg: &str) {
    web_sys::console::error_1(&console_line(scope, msg));
}

#[cfg(not(target_arch = "wasm32"))]
pub fn log_error_impl(scope: &str, msg: &str) {
    tracing::error!(target: TARGET, scope, "{}", msg);
}

/// Log a warning message (platform-specific)
#[cfg(target_arch = "wasm32")]
pub fn log_warn_impl(scope: &str, msg: &str) {
    web_sys::console::warn_1(&console_line(scope, msg));
}

#[cfg(not(target_arch = "wasm32"))]
pub fn log_warn_impl(scope: &str, msg: &str) {
    tracing::warn!(target: TARGET, scope, "{}", msg);
}

/// Log a debug message (platform-specific)
#[cfg(target_arch = "wasm32")]
pub fn log_debug_impl(scope: &str, msg: &str) {
    web_sys::console::debug_1(&console_line(scope, msg));
}

#[cfg(not(target_arch = "wasm32"))]
pub fn log_debug_impl(scope: &str, msg: &str) {
    tracing::debug!(target: TARGET, scope, "{}", msg);
}

/// Log an info message, tagged with the calling module.
#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => {
        $crate::logging::log_info_impl(module_path!(), &format!($($arg)*))
    };
}

/// Log an error message, tagged with the calling module.
#[macro_export]
macro_rules! log_error {
    ($($arg:tt)*) => {
        $crate::logging::log_error_impl(module_path!(), &format!($($arg)*))
    };
}

/// Log a warning message, tagged with the calling module.
#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => {
        $crate::logging::log_warn_impl(module_path!(), &format!($($arg)*))
    };
}

/// Log a debug message, tagged with the calling module.
#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)*) => {
        $crate::logging::log_debug_impl(module_path!(), &format!($($arg)*))
    };
}
