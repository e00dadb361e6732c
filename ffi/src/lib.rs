//! C-ABI wrapper around `meals-core`.
//!
//! # Overview
//! Lets a UI host written in any language with a C FFI drive the meal
//! viewer: create a controller, take its one request, execute it however
//! the host likes, report the outcome and read back a view snapshot.
//!
//! # Design
//! - Every `extern "C"` function wraps its body in `catch_unwind` so panics
//!   never cross the FFI boundary.
//! - The controller is an opaque handle; the host never sees Rust types.
//! - The C caller owns all returned pointers and must call the matching
//!   `meals_free_*` / `meals_controller_free` function to release them.

pub mod types;

use std::ffi::{CStr, CString};
use std::os::raw::c_char;
use std::panic::catch_unwind;

use meals_core::{select_view, HttpResponse, MealsClient, MealsController, TransportError};

use types::*;

/// Read a borrowed C string, replacing invalid UTF-8.
///
/// # Safety
/// `s` must be null or point to a NUL-terminated string.
unsafe fn read_c_str(s: *const c_char) -> String {
    if s.is_null() {
        return String::new();
    }
    unsafe { CStr::from_ptr(s) }.to_string_lossy().into_owned()
}

// ---------------------------------------------------------------------------
// Controller lifecycle
// ---------------------------------------------------------------------------

/// Create a controller that will read the collection at `url`.
///
/// Returns null if `url` is null or if an internal panic occurs.
/// The caller must free the returned pointer with `meals_controller_free`.
#[unsafe(no_mangle)]
pub extern "C" fn meals_controller_new(url: *const c_char) -> *mut FfiMealsController {
    catch_unwind(|| {
        if url.is_null() {
            return std::ptr::null_mut();
        }
        let url = unsafe { read_c_str(url) };
        let controller = MealsController::new(MealsClient::new(&url));
        Box::into_raw(Box::new(FfiMealsController { inner: controller }))
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Free a controller created by `meals_controller_new`. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn meals_controller_free(controller: *mut FfiMealsController) {
    if !controller.is_null() {
        let _ = catch_unwind(|| {
            drop(unsafe { Box::from_raw(controller) });
        });
    }
}

/// Take the collection request. Only the first call on a controller
/// returns a request; later calls (and null `controller`) return null.
///
/// The caller must free the returned pointer with `meals_free_request`.
#[unsafe(no_mangle)]
pub extern "C" fn meals_controller_start(controller: *mut FfiMealsController) -> *mut FfiHttpRequest {
    catch_unwind(|| {
        if controller.is_null() {
            return std::ptr::null_mut();
        }
        let controller = unsafe { &mut *controller };
        match controller.inner.start() {
            Some(req) => FfiHttpRequest::from_core(req),
            None => std::ptr::null_mut(),
        }
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Report the response the host received for the collection request.
/// A null `body` is treated as an empty body.
#[unsafe(no_mangle)]
pub extern "C" fn meals_controller_resolve(
    controller: *mut FfiMealsController,
    response: *const FfiHttpResponse,
) -> FfiResolveCode {
    catch_unwind(|| {
        if controller.is_null() || response.is_null() {
            return FfiResolveCode::NullArg;
        }
        let controller = unsafe { &mut *controller };
        let resp = unsafe { &*response };
        let body = unsafe { read_c_str(resp.body) };
        resolve_code(controller.inner.resolve(Ok(HttpResponse::new(resp.status, body))))
    })
    .unwrap_or(FfiResolveCode::Panic)
}

/// Report that the host could not get any response (DNS, connect, TLS...).
/// `message` is shown to the user verbatim; null means an empty message.
#[unsafe(no_mangle)]
pub extern "C" fn meals_controller_fail(
    controller: *mut FfiMealsController,
    message: *const c_char,
) -> FfiResolveCode {
    catch_unwind(|| {
        if controller.is_null() {
            return FfiResolveCode::NullArg;
        }
        let controller = unsafe { &mut *controller };
        let message = unsafe { read_c_str(message) };
        resolve_code(controller.inner.resolve(Err(TransportError::new(message))))
    })
    .unwrap_or(FfiResolveCode::Panic)
}

fn resolve_code(applied: bool) -> FfiResolveCode {
    if applied {
        FfiResolveCode::Applied
    } else {
        FfiResolveCode::Ignored
    }
}

/// Tear the controller down; an outcome reported afterwards is ignored.
/// The handle stays valid until `meals_controller_free`.
#[unsafe(no_mangle)]
pub extern "C" fn meals_controller_unmount(controller: *mut FfiMealsController) {
    if !controller.is_null() {
        let _ = catch_unwind(|| {
            unsafe { &mut *controller }.inner.unmount();
        });
    }
}

/// Snapshot what the viewer shows right now.
///
/// Returns null if `controller` is null. The caller must free the returned
/// pointer with `meals_free_view`.
#[unsafe(no_mangle)]
pub extern "C" fn meals_controller_view(controller: *const FfiMealsController) -> *mut FfiView {
    catch_unwind(|| {
        if controller.is_null() {
            return std::ptr::null_mut();
        }
        let controller = unsafe { &*controller };
        FfiView::from_core(&select_view(controller.inner.state()))
    })
    .unwrap_or(std::ptr::null_mut())
}

// ---------------------------------------------------------------------------
// Free functions
// ---------------------------------------------------------------------------

/// Free a C string allocated by this library, if non-null.
///
/// # Safety
/// `s` must come from `CString::into_raw` in this crate.
unsafe fn free_c_string(s: *mut c_char) {
    if !s.is_null() {
        drop(unsafe { CString::from_raw(s) });
    }
}

/// Free an `FfiHttpRequest` returned by `meals_controller_start`.
/// Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn meals_free_request(req: *mut FfiHttpRequest) {
    if req.is_null() {
        return;
    }
    let _ = catch_unwind(|| {
        let req = unsafe { Box::from_raw(req) };
        unsafe {
            free_c_string(req.url);
            free_c_string(req.body);
        }
        if !req.headers.is_null() && req.headers_len > 0 {
            let headers = unsafe {
                Box::from_raw(std::ptr::slice_from_raw_parts_mut(
                    req.headers,
                    req.headers_len as usize,
                ))
            };
            for h in headers.iter() {
                unsafe {
                    free_c_string(h.key);
                    free_c_string(h.value);
                }
            }
        }
    });
}

/// Free an `FfiView` returned by `meals_controller_view`.
/// Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn meals_free_view(view: *mut FfiView) {
    if view.is_null() {
        return;
    }
    let _ = catch_unwind(|| {
        let view = unsafe { Box::from_raw(view) };
        unsafe { free_c_string(view.message) };
        if !view.items.is_null() && view.len > 0 {
            let items = unsafe {
                Box::from_raw(std::ptr::slice_from_raw_parts_mut(view.items, view.len as usize))
            };
            for item in items.iter() {
                unsafe {
                    free_c_string(item.id);
                    free_c_string(item.name);
                    free_c_string(item.description);
                }
            }
        }
    });
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::CString;

    const TWO_MEALS: &str = r#"{"m1": {"name":"Pasta","description":"Creamy","price":9.5}, "m2": {"name":"Salad","description":"Fresh","price":5}}"#;

    fn new_controller() -> *mut FfiMealsController {
        let url = CString::new("http://localhost:3000/meals.json").unwrap();
        let controller = meals_controller_new(url.as_ptr());
        assert!(!controller.is_null());
        controller
    }

    fn str_at<'a>(p: *const c_char) -> &'a str {
        unsafe { CStr::from_ptr(p) }.to_str().unwrap()
    }

    fn start(controller: *mut FfiMealsController) {
        let req = meals_controller_start(controller);
        assert!(!req.is_null());
        meals_free_request(req);
    }

    fn resolve(controller: *mut FfiMealsController, status: u16, body: &str) -> FfiResolveCode {
        let body = CString::new(body).unwrap();
        let resp = FfiHttpResponse {
            status,
            body: body.as_ptr(),
        };
        meals_controller_resolve(controller, &resp)
    }

    #[test]
    fn controller_new_and_free() {
        meals_controller_free(new_controller());
    }

    #[test]
    fn controller_new_null_returns_null() {
        assert!(meals_controller_new(std::ptr::null()).is_null());
    }

    #[test]
    fn controller_free_null_is_safe() {
        meals_controller_free(std::ptr::null_mut());
    }

    #[test]
    fn start_returns_get_request_once() {
        let controller = new_controller();
        let req = meals_controller_start(controller);
        assert!(!req.is_null());

        let req_ref = unsafe { &*req };
        assert_eq!(req_ref.method, FfiHttpMethod::Get);
        assert_eq!(str_at(req_ref.url), "http://localhost:3000/meals.json");
        assert!(req_ref.body.is_null());
        assert!(req_ref.headers.is_null());
        assert_eq!(req_ref.headers_len, 0);
        meals_free_request(req);

        assert!(meals_controller_start(controller).is_null());
        meals_controller_free(controller);
    }

    #[test]
    fn view_is_loading_before_resolve() {
        let controller = new_controller();
        start(controller);

        let view = meals_controller_view(controller);
        let v = unsafe { &*view };
        assert_eq!(v.tag, FfiViewTag::Loading);
        assert!(v.message.is_null());
        assert!(v.items.is_null());
        assert_eq!(v.len, 0);

        meals_free_view(view);
        meals_controller_free(controller);
    }

    #[test]
    fn resolve_two_meals_lists_them_in_order() {
        let controller = new_controller();
        start(controller);
        assert_eq!(resolve(controller, 200, TWO_MEALS), FfiResolveCode::Applied);

        let view = meals_controller_view(controller);
        let v = unsafe { &*view };
        assert_eq!(v.tag, FfiViewTag::List);
        assert_eq!(v.len, 2);

        let items = unsafe { std::slice::from_raw_parts(v.items, v.len as usize) };
        assert_eq!(str_at(items[0].id), "m1");
        assert_eq!(str_at(items[0].name), "Pasta");
        assert_eq!(str_at(items[0].description), "Creamy");
        assert_eq!(items[0].price, 9.5);
        assert_eq!(str_at(items[1].name), "Salad");
        assert_eq!(items[1].price, 5.0);

        meals_free_view(view);
        meals_controller_free(controller);
    }

    #[test]
    fn resolve_empty_object_is_empty_list() {
        let controller = new_controller();
        start(controller);
        resolve(controller, 200, "{}");

        let view = meals_controller_view(controller);
        let v = unsafe { &*view };
        assert_eq!(v.tag, FfiViewTag::List);
        assert_eq!(v.len, 0);
        assert!(v.items.is_null());

        meals_free_view(view);
        meals_controller_free(controller);
    }

    #[test]
    fn server_error_shows_fixed_message() {
        let controller = new_controller();
        start(controller);
        resolve(controller, 500, r#"{"error":"boom"}"#);

        let view = meals_controller_view(controller);
        let v = unsafe { &*view };
        assert_eq!(v.tag, FfiViewTag::Error);
        assert_eq!(str_at(v.message), "Something went wrong!");

        meals_free_view(view);
        meals_controller_free(controller);
    }

    #[test]
    fn fail_shows_host_message() {
        let controller = new_controller();
        start(controller);
        let message = CString::new("Failed to fetch").unwrap();
        assert_eq!(
            meals_controller_fail(controller, message.as_ptr()),
            FfiResolveCode::Applied
        );

        let view = meals_controller_view(controller);
        assert_eq!(str_at(unsafe { &*view }.message), "Failed to fetch");

        meals_free_view(view);
        meals_controller_free(controller);
    }

    #[test]
    fn second_resolve_is_ignored() {
        let controller = new_controller();
        start(controller);
        assert_eq!(resolve(controller, 500, ""), FfiResolveCode::Applied);
        assert_eq!(resolve(controller, 200, TWO_MEALS), FfiResolveCode::Ignored);
        meals_controller_free(controller);
    }

    #[test]
    fn resolve_after_unmount_is_ignored() {
        let controller = new_controller();
        start(controller);
        meals_controller_unmount(controller);
        assert_eq!(resolve(controller, 200, TWO_MEALS), FfiResolveCode::Ignored);

        let view = meals_controller_view(controller);
        assert_eq!(unsafe { &*view }.tag, FfiViewTag::Loading);

        meals_free_view(view);
        meals_controller_free(controller);
    }

    #[test]
    fn resolve_null_args() {
        let controller = new_controller();
        assert_eq!(
            meals_controller_resolve(controller, std::ptr::null()),
            FfiResolveCode::NullArg
        );
        assert_eq!(resolve(std::ptr::null_mut(), 200, "{}"), FfiResolveCode::NullArg);
        assert_eq!(
            meals_controller_fail(std::ptr::null_mut(), std::ptr::null()),
            FfiResolveCode::NullArg
        );
        meals_controller_free(controller);
    }

    #[test]
    fn null_body_is_empty_body() {
        let controller = new_controller();
        start(controller);
        let resp = FfiHttpResponse {
            status: 200,
            body: std::ptr::null(),
        };
        meals_controller_resolve(controller, &resp);

        let view = meals_controller_view(controller);
        assert_eq!(unsafe { &*view }.tag, FfiViewTag::Error);

        meals_free_view(view);
        meals_controller_free(controller);
    }

    #[test]
    fn body_stops_at_embedded_nul() {
        let controller = new_controller();
        start(controller);
        let body = b"{\"m1\": {\"name\":\"Pasta\"\0,\"description\":\"Creamy\",\"price\":9.5}}\0";
        let resp = FfiHttpResponse {
            status: 200,
            body: body.as_ptr() as *const c_char,
        };
        assert_eq!(meals_controller_resolve(controller, &resp), FfiResolveCode::Applied);

        let view = meals_controller_view(controller);
        let v = unsafe { &*view };
        assert_eq!(v.tag, FfiViewTag::Error);
        assert!(str_at(v.message).contains("EOF"), "{}", str_at(v.message));

        meals_free_view(view);
        meals_controller_free(controller);
    }

    #[test]
    fn view_null_controller_returns_null() {
        assert!(meals_controller_view(std::ptr::null()).is_null());
    }

    #[test]
    fn free_null_is_safe() {
        meals_free_request(std::ptr::null_mut());
        meals_free_view(std::ptr::null_mut());
        meals_controller_unmount(std::ptr::null_mut());
    }
}
