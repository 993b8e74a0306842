/// Configuration constants for the controller API
pub mod api {
    /// Base path for the controller API v2
    pub const BASE_PATH: &str = "/api/v2";

    /// Identity endpoint used by the preflight auth probe
    pub const ME: &str = "me";

    /// Organizations endpoint (host org-name resolution)
    pub const ORGANIZATIONS: &str = "organizations";

    /// Default page size for API requests
    pub const DEFAULT_PAGE_SIZE: u32 = 200;

    /// Largest page size the controller accepts
    pub const MAX_PAGE_SIZE: u32 = 200;
}

/// Configuration constants for credentials
pub mod credentials {
    /// Per-user credentials file (relative to the config dir)
    pub const FILE_PATH: &str = "aapaudit/credentials.json";

    /// Environment variable names for the password (checked in order)
    pub const PASSWORD_ENV_VARS: &[&str] = &["AAP_PASSWORD", "TOWER_PASSWORD", "CONTROLLER_PASSWORD"];
}

/// Default values for CLI
pub mod defaults {
    /// Default controller HTTPS port
    pub const PORT: u16 = 443;

    /// Default directory for generated report files
    pub const RESULTS_DIR: &str = "results";

    /// Run log file name (created inside the results directory)
    pub const LOG_FILE_NAME: &str = "run.log";

    /// Default log level
    pub const LOG_LEVEL: &str = "warn";
}
