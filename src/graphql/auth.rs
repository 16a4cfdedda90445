//! Request context and the write authorization gate
//!
//! Every GraphQL operation carries a [`RequestContext`] in its request data.
//! The context is built by [`RequestContext::build`] from the inbound HTTP
//! headers.
//!
//! ## Stub identity
//!
//! There is no credential verification. `build` attaches the fixed
//! [`STUB_USER_ID`] to every request so that the mutation gate has something
//! to check. Replace `build` with real token verification before exposing
//! the server to untrusted clients.

use async_graphql::{Context, Result};
use axum::http::HeaderMap;

use super::helpers::{UNAUTHORIZED, coded_error};

/// Identity attached to every request by the stub context builder
pub const STUB_USER_ID: &str = "user1";

/// Per-operation data available to resolvers
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestContext {
    /// Identity claim. `None` means the operation is anonymous.
    pub user_id: Option<String>,
}

impl RequestContext {
    /// Build the context for an inbound request.
    ///
    /// STUB: ignores the headers and always claims [`STUB_USER_ID`].
    pub fn build(_headers: &HeaderMap) -> Self {
        Self::for_user(STUB_USER_ID)
    }

    pub fn for_user(user_id: impl Into<String>) -> Self {
        Self {
            user_id: Some(user_id.into()),
        }
    }

    /// Context with no identity claim
    pub fn anonymous() -> Self {
        Self::default()
    }
}

/// Extension trait to read the request context from a resolver
pub trait AuthExt {
    /// The request context, or an anonymous one if none was attached
    fn request_context(&self) -> RequestContext;

    /// The identity claim, or an `UNAUTHORIZED` error when absent
    fn require_user(&self) -> Result<String>;
}

impl<'a> AuthExt for Context<'a> {
    fn request_context(&self) -> RequestContext {
        self.data_opt::<RequestContext>()
            .cloned()
            .unwrap_or_default()
    }

    fn require_user(&self) -> Result<String> {
        self.request_context()
            .user_id
            .ok_or_else(|| coded_error("Authentication required", UNAUTHORIZED))
    }
}
