//! C FFI bindings for stats-core
//!
//! Every parser takes a NUL-terminated page text and returns a newly
//! allocated JSON string, or null on error. Returned strings must be
//! released with `stats_free_string`.

use serde::Serialize;
use std::ffi::{CStr, CString};
use std::os::raw::c_char;
use std::ptr;

/// Borrow a C string as UTF-8, None for null or invalid input
unsafe fn input_str<'a>(text: *const c_char) -> Option<&'a str> {
    if text.is_null() {
        return None;
    }
    CStr::from_ptr(text).to_str().ok()
}

fn into_json<T: Serialize>(result: stats_core::Result<T>) -> *mut c_char {
    let value = match result {
        Ok(value) => value,
        Err(e) => {
            tracing::debug!(error = %e, "parse failed");
            return ptr::null_mut();
        }
    };

    serde_json::to_string(&value)
        .ok()
        .and_then(|s| CString::new(s).ok())
        .map_or(ptr::null_mut(), CString::into_raw)
}

unsafe fn parse_with<T: Serialize>(
    text: *const c_char,
    parse: impl FnOnce(&str) -> stats_core::Result<T>,
) -> *mut c_char {
    match input_str(text) {
        Some(text) => into_json(parse(text)),
        None => ptr::null_mut(),
    }
}

/// Parse a usage page into JSON
///
/// # Safety
/// - `text` must be a valid NUL-terminated string or null
/// - Caller must free the returned string with `stats_free_string`
#[no_mangle]
pub unsafe extern "C" fn stats_parse_usage(text: *const c_char) -> *mut c_char {
    parse_with(text, stats_core::parse_usage_page)
}

/// Parse a leads page into JSON
///
/// # Safety
/// - `text` must be a valid NUL-terminated string or null
/// - Caller must free the returned string with `stats_free_string`
#[no_mangle]
pub unsafe extern "C" fn stats_parse_leads(text: *const c_char) -> *mut c_char {
    parse_with(text, stats_core::parse_leads_page)
}

/// Parse a metagame page into JSON
///
/// # Safety
/// - `text` must be a valid NUL-terminated string or null
/// - Caller must free the returned string with `stats_free_string`
#[no_mangle]
pub unsafe extern "C" fn stats_parse_metagame(text: *const c_char) -> *mut c_char {
    parse_with(text, stats_core::parse_metagame_page)
}

/// Parse a chaos JSON document into the mapped moveset JSON
///
/// # Safety
/// - `text` must be a valid NUL-terminated string or null
/// - Caller must free the returned string with `stats_free_string`
#[no_mangle]
pub unsafe extern "C" fn stats_parse_chaos(text: *const c_char) -> *mut c_char {
    parse_with(text, stats_core::parse_chaos_page)
}

/// Validate a format string and return its canonical form.
///
/// The result is a plain string, not JSON.
///
/// # Safety
/// - `text` must be a valid NUL-terminated string or null
/// - Caller must free the returned string with `stats_free_string`
#[no_mangle]
pub unsafe extern "C" fn stats_format_normalize(text: *const c_char) -> *mut c_char {
    input_str(text)
        .and_then(|s| stats_core::format_from_str(s).ok())
        .map(|format| stats_core::format_to_string(&format))
        .and_then(|s| CString::new(s).ok())
        .map_or(ptr::null_mut(), CString::into_raw)
}

/// Free a string returned by any of the functions above
///
/// # Safety
/// - `s` must be a pointer returned by this library or null
#[no_mangle]
pub unsafe extern "C" fn stats_free_string(s: *mut c_char) {
    if !s.is_null() {
        drop(CString::from_raw(s));
    }
}
