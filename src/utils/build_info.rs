//! Build metadata captured by `build.rs`.

pub const CLI_VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Debug, Clone, Copy)]
pub struct BuildInfo {
    pub version: &'static str,
    pub git_hash: &'static str,
    pub git_status: &'static str,
    pub timestamp: &'static str,
    pub profile: &'static str,
}

pub fn current() -> BuildInfo {
    BuildInfo {
        version: CLI_VERSION,
        git_hash: env!("CHURN_CLIENT_BUILD_HASH"),
        git_status: env!("CHURN_CLIENT_BUILD_STATUS"),
        timestamp: env!("CHURN_CLIENT_BUILD_TIMESTAMP"),
        profile: env!("CHURN_CLIENT_BUILD_PROFILE"),
    }
}

impl BuildInfo {
    pub fn lines(&self) -> Vec<String> {
        vec![
            format!("churn_client {}", self.version),
            format!("  Build hash : {} ({})", self.git_hash, self.git_status),
            format!("  Built at   : {}", self.timestamp),
            format!("  Profile    : {}", self.profile),
        ]
    }
}
