//! Endpoint operations.
//!
//! Each operation maps one logical REST call onto a [`Request`] and hands it to
//! [`SearchClient::execute`]. None of them retry or touch the pool directly.
//!
//! [`Request`]: crate::transport::Request
//! [`SearchClient::execute`]: crate::client::SearchClient::execute

pub mod aliases;
pub mod bulk;
pub mod cluster;
pub mod documents;
pub mod indices;
pub mod scroll;
pub mod search;

pub use aliases::AliasAction;
pub use bulk::BulkAction;
pub use scroll::ScrollOptions;

/// Extra query parameters passed through to the server.
pub type Params<'a> = &'a [(&'a str, &'a str)];

/// Build an absolute path from segments.
pub(crate) fn path(segments: &[&str]) -> String {
    let mut out = String::new();
    for segment in segments {
        out.push('/');
        out.push_str(segment.trim_matches('/'));
    }
    if out.is_empty() {
        out.push('/');
    }
    out
}

/// Join index or type names the way the API expects them in a path segment.
pub(crate) fn join_names(names: &[&str]) -> String {
    names.join(",")
}
