//! CMS login - GitHub OAuth authorization code exchange
//!
//! The handler is stateless: each request is classified only by the
//! presence of a `code` query parameter.
//!
//! 1. No code: redirect the pop-up to the provider's authorize page.
//! 2. Code: exchange it for an access token, then answer with a page that
//!    posts the token to the opener window and closes itself.

mod github;
mod handoff;

pub use github::{AuthEndpoint, AuthResponse, ExchangeError, GitHubAuth};
pub use handoff::{handoff_html, TokenPayload};
