//! Assertions shared by list-controller and API tests.

use anyhow::{Result, bail};
use posadmin_client::Method;

use crate::FakeBackend;

/// Assert the number of requests made to `method path` (query string ignored).
pub fn assert_request_count(
    backend: &FakeBackend,
    method: Method,
    path: &str,
    expected: usize,
) -> Result<()> {
    let actual = backend.count(method, path);
    if actual != expected {
        bail!(
            "Expected {} {} request(s) to {}, got {}",
            expected,
            method,
            path,
            actual
        );
    }
    Ok(())
}

/// Assert that a rendered page respects the page size.
pub fn assert_page_within<T>(rows: &[T], page_size: usize) -> Result<()> {
    if rows.len() > page_size {
        bail!(
            "Page holds {} rows but the page size is {}",
            rows.len(),
            page_size
        );
    }
    Ok(())
}

/// Assert that the last request carried no Authorization header.
pub fn assert_last_request_anonymous(backend: &FakeBackend) -> Result<()> {
    let Some(last) = backend.requests().pop() else {
        bail!("No requests recorded");
    };
    if last.authorization.is_some() {
        bail!(
            "Expected {} {} without Authorization, but a header was sent",
            last.method,
            last.path
        );
    }
    Ok(())
}
