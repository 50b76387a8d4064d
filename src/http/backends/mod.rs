//! Interchangeable HTTP backend implementations.
//!
//! All three behave identically at the [`HttpBackend`](super::HttpBackend)
//! contract level, differing only in the underlying HTTP client technology.

mod blocking_backend;
mod hyper_backend;
mod reqwest_backend;

pub use blocking_backend::BlockingBackend;
pub use hyper_backend::HyperBackend;
pub use reqwest_backend::ReqwestBackend;

use super::HttpMethod;

pub(crate) fn reqwest_method(method: HttpMethod) -> reqwest::Method {
    match method {
        HttpMethod::Get => reqwest::Method::GET,
        HttpMethod::Post => reqwest::Method::POST,
        HttpMethod::Put => reqwest::Method::PUT,
        HttpMethod::Delete => reqwest::Method::DELETE,
    }
}

pub(crate) fn hyper_method(method: HttpMethod) -> hyper::Method {
    match method {
        HttpMethod::Get => hyper::Method::GET,
        HttpMethod::Post => hyper::Method::POST,
        HttpMethod::Put => hyper::Method::PUT,
        HttpMethod::Delete => hyper::Method::DELETE,
    }
}
