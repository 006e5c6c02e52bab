//! Configuration module

mod site;

pub use site::ConfigError;
pub use site::GoogleDocsConfig;
pub use site::OAuthConfig;
pub use site::OAuthSettings;
pub use site::SiteConfig;
