//! Print the CMS login authorize URL

use anyhow::Result;

use crate::auth::GitHubAuth;
use crate::config::OAuthSettings;
use crate::Portfolio;

/// Print the redirect URI and authorize URL built from config and environment
pub fn run(portfolio: &Portfolio) -> Result<()> {
    let settings = OAuthSettings::from_env(&portfolio.config)?;
    println!("Redirect URI: {}", settings.redirect_uri);

    let auth = GitHubAuth::new(settings)?;
    println!("Authorize URL: {}", auth.authorize_url());

    Ok(())
}
