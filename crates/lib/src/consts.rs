/// Application name, used for data/config directory names.
pub const APP_NAME: &str = "qdp";

/// Environment variable overriding the preset directory.
pub const PRESETS_DIR_ENV: &str = "QDP_PRESETS_DIR";

/// Environment variable pointing at a build-step descriptor file.
pub const STEPS_FILE_ENV: &str = "QDP_STEPS_FILE";

/// Environment variable overriding the directory scanned for RTEMS installs.
pub const INSTALL_ROOT_ENV: &str = "QDP_INSTALL_ROOT";

/// Environment variable overriding the session file location.
pub const SESSION_FILE_ENV: &str = "QDP_SESSION_FILE";

/// Directory scanned for RTEMS installs when nothing else is configured.
pub const DEFAULT_INSTALL_ROOT: &str = "/opt";
