//! `#[repr(C)]` types for the FFI boundary.
//!
//! # Design
//! Each type mirrors a core type with C-compatible representations:
//! `*mut c_char` instead of `String`, raw pointer + length instead of `Vec`,
//! and tagged enums with explicit discriminants. Conversions live here to
//! keep `lib.rs` focused on the `extern "C"` surface.

use std::ffi::CString;
use std::os::raw::c_char;

use meals_core::{HttpMethod, MealItem, MealsController, View};

/// Opaque handle to a `MealsController`. C callers receive a pointer to
/// this and pass it back into every `meals_controller_*` function.
pub struct FfiMealsController {
    pub(crate) inner: MealsController,
}

/// Copy `s` into a heap C string. Interior NULs are dropped rather than
/// failing the conversion.
pub(crate) fn c_string(s: &str) -> *mut c_char {
    CString::new(s.replace('\0', ""))
        .unwrap_or_default()
        .into_raw()
}

/// Leak `items` as a raw array, or null when empty.
fn into_raw_array<T>(items: Vec<T>) -> *mut T {
    if items.is_empty() {
        return std::ptr::null_mut();
    }
    Box::into_raw(items.into_boxed_slice()) as *mut T
}

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// HTTP method as a C enum.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FfiHttpMethod {
    Get = 0,
}

impl From<HttpMethod> for FfiHttpMethod {
    fn from(m: HttpMethod) -> Self {
        match m {
            HttpMethod::Get => FfiHttpMethod::Get,
        }
    }
}

/// A single HTTP header as a key-value pair of C strings.
#[repr(C)]
pub struct FfiHeader {
    pub key: *mut c_char,
    pub value: *mut c_char,
}

/// The collection request, as C-compatible plain data.
///
/// Returned by `meals_controller_start`. The C caller executes it and
/// reports the outcome through `meals_controller_resolve` or
/// `meals_controller_fail`.
#[repr(C)]
pub struct FfiHttpRequest {
    pub method: FfiHttpMethod,
    pub url: *mut c_char,
    pub headers: *mut FfiHeader,
    pub headers_len: u32,
    pub body: *mut c_char,
}

impl FfiHttpRequest {
    pub(crate) fn from_core(req: meals_core::HttpRequest) -> *mut Self {
        let headers_len = req.headers.len() as u32;
        let headers = into_raw_array(
            req.headers
                .iter()
                .map(|(k, v)| FfiHeader {
                    key: c_string(k),
                    value: c_string(v),
                })
                .collect(),
        );
        let body = match &req.body {
            Some(b) => c_string(b),
            None => std::ptr::null_mut(),
        };

        Box::into_raw(Box::new(FfiHttpRequest {
            method: req.method.into(),
            url: c_string(&req.url),
            headers,
            headers_len,
            body,
        }))
    }
}

// ---------------------------------------------------------------------------
// Response input (caller-provided, not heap-allocated by us)
// ---------------------------------------------------------------------------

/// An HTTP response described as C-compatible plain data.
///
/// The C caller builds this on the stack after executing the request and
/// passes a pointer to `meals_controller_resolve`. The FFI layer reads but
/// does not free these fields.
///
/// `body` is read up to its first NUL byte. A body with an embedded NUL is
/// cut off there, which for a JSON collection means a decode error rather
/// than a partial list. Invalid UTF-8 is replaced, not rejected.
#[repr(C)]
pub struct FfiHttpResponse {
    pub status: u16,
    pub body: *const c_char,
}

/// Outcome of handing a result to the controller.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FfiResolveCode {
    /// The controller settled with this outcome.
    Applied = 0,
    /// The controller was not waiting (already settled, never started or
    /// unmounted); nothing changed.
    Ignored = 1,
    NullArg = 2,
    Panic = 3,
}

// ---------------------------------------------------------------------------
// View snapshot
// ---------------------------------------------------------------------------

/// Which of the three outputs an `FfiView` carries.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FfiViewTag {
    Loading = 0,
    Error = 1,
    List = 2,
}

/// A single meal item exposed to C. `id` doubles as the item key.
#[repr(C)]
pub struct FfiMealItem {
    pub id: *mut c_char,
    pub name: *mut c_char,
    pub description: *mut c_char,
    pub price: f64,
}

impl From<&MealItem> for FfiMealItem {
    fn from(item: &MealItem) -> Self {
        Self {
            id: c_string(&item.id),
            name: c_string(&item.name),
            description: c_string(&item.description),
            price: item.price,
        }
    }
}

/// Snapshot of what the viewer shows.
///
/// `message` is set only for `Error`; `items`/`len` only for `List` (an
/// empty list has `items` null and `len` 0).
#[repr(C)]
pub struct FfiView {
    pub tag: FfiViewTag,
    pub message: *mut c_char,
    pub items: *mut FfiMealItem,
    pub len: u32,
}

impl FfiView {
    pub(crate) fn from_core(view: &View) -> *mut Self {
        let ffi_view = match view {
            View::Loading => FfiView {
                tag: FfiViewTag::Loading,
                message: std::ptr::null_mut(),
                items: std::ptr::null_mut(),
                len: 0,
            },
            View::Error { message } => FfiView {
                tag: FfiViewTag::Error,
                message: c_string(message),
                items: std::ptr::null_mut(),
                len: 0,
            },
            View::List { items } => FfiView {
                tag: FfiViewTag::List,
                message: std::ptr::null_mut(),
                len: items.len() as u32,
                items: into_raw_array(items.iter().map(FfiMealItem::from).collect()),
            },
        };
        Box::into_raw(Box::new(ffi_view))
    }
}
