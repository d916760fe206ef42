//! Configuration module

mod site;

pub use site::HighlightConfig;
pub use site::ProfileConfig;
pub use site::SiteConfig;
