//! Configuration constants and profile loading for movieline
//!
//! Profiles live in an INI file (`~/.movieline/profile` by default), one
//! section per profile name:
//!
//! ```ini
//! [default]
//! api_url = http://localhost:8000/api/v1
//! email = petro@example.com
//! name = Petro
//! password = super-password
//! import_encoding = windows-1251
//! ```

use ini::Ini;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default profile file path for movieline
pub const DEFAULT_PROFILE_PATH: &str = "~/.movieline/profile";

/// Environment variable name for overriding the profile path
pub const PROFILE_PATH_ENV_VAR: &str = "MOVIELINE_PROFILE_PATH";

/// Environment variable name for overriding the API base URL
pub const API_URL_ENV_VAR: &str = "MOVIELINE_API_URL";

/// Environment variable name for the log level
pub const LOG_LEVEL_ENV_VAR: &str = "MOVIELINE_LOG_LEVEL";

/// API base URL used when neither profile nor environment name one
pub const DEFAULT_API_URL: &str = "http://localhost:8000/api/v1";

/// File name of the persisted session token, next to the profile file
pub const TOKEN_FILE_NAME: &str = "token";

/// Movies shown per list page
pub const MOVIES_PER_PAGE: u32 = 9;

/// Quiet period before a filter keystroke is applied
pub const FILTER_DEBOUNCE: Duration = Duration::from_millis(500);

/// Minimum trimmed length for the title filter to apply
pub const TITLE_FILTER_MIN_LEN: usize = 3;

/// Minimum trimmed length for the actor filter to apply
pub const ACTOR_FILTER_MIN_LEN: usize = 2;

/// Errors raised while loading a profile
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read profile file '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: ini::Error,
    },
}

/// Get the profile file path, checking environment variable first, then falling back to default
pub fn get_profile_path() -> String {
    std::env::var_os(PROFILE_PATH_ENV_VAR)
        .and_then(|val| val.into_string().ok())
        .unwrap_or_else(|| DEFAULT_PROFILE_PATH.to_string())
}

/// Expand `~` and environment variables in a configured path
pub fn expand_path(path: &str) -> PathBuf {
    match shellexpand::full(path) {
        Ok(expanded) => PathBuf::from(expanded.as_ref()),
        Err(e) => {
            tracing::warn!("Could not expand path '{}': {}", path, e);
            PathBuf::from(path)
        }
    }
}

/// Location of the token file for a profile file path
pub fn token_path_for(profile_path: &str) -> PathBuf {
    let profile = expand_path(profile_path);
    match profile.parent() {
        Some(dir) => dir.join(TOKEN_FILE_NAME),
        None => PathBuf::from(TOKEN_FILE_NAME),
    }
}

/// Credentials used to register or log in when no token is available
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub email: String,
    pub name: String,
    pub password: String,
}

/// Connection settings for one named profile
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    name: String,
    api_url: String,
    token: Option<String>,
    credentials: Option<Credentials>,
    import_encoding: Option<String>,
}

impl Profile {
    /// Profile with no file behind it, pointing at the default API URL
    pub fn blank(name: &str) -> Self {
        Self {
            name: name.to_string(),
            api_url: DEFAULT_API_URL.to_string(),
            token: None,
            credentials: None,
            import_encoding: None,
        }
    }

    /// Load profile `name` from an INI file
    ///
    /// A missing file or section yields a blank profile; an unreadable file
    /// is an error.
    pub fn load(name: &str, path: &str) -> Result<Self, ConfigError> {
        let file = expand_path(path);
        if !file.exists() {
            tracing::debug!("Profile file '{}' not found, using blank profile", file.display());
            return Ok(Self::blank(name));
        }
        Self::load_from_file(name, &file)
    }

    fn load_from_file(name: &str, file: &Path) -> Result<Self, ConfigError> {
        let ini = Ini::load_from_file(file).map_err(|source| ConfigError::Read {
            path: file.display().to_string(),
            source,
        })?;

        let Some(section) = ini.section(Some(name)) else {
            tracing::debug!("Profile '{}' not found in '{}', using blank profile", name, file.display());
            return Ok(Self::blank(name));
        };

        let get = |key: &str| {
            section
                .get(key)
                .map(str::trim)
                .filter(|value| !value.is_empty())
                .map(str::to_string)
        };

        let credentials = match (get("email"), get("password")) {
            (Some(email), Some(password)) => Some(Credentials {
                name: get("name").unwrap_or_else(|| email.clone()),
                email,
                password,
            }),
            _ => None,
        };

        Ok(Self {
            name: name.to_string(),
            api_url: get("api_url").unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            token: get("token"),
            credentials,
            import_encoding: get("import_encoding"),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Base URL without a trailing slash
    pub fn api_url(&self) -> &str {
        self.api_url.trim_end_matches('/')
    }

    pub fn set_api_url<S: Into<String>>(&mut self, api_url: S) {
        self.api_url = api_url.into();
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn credentials(&self) -> Option<&Credentials> {
        self.credentials.as_ref()
    }

    pub fn import_encoding(&self) -> Option<&str> {
        self.import_encoding.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_profile(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_default_profile_path() {
        assert_eq!(DEFAULT_PROFILE_PATH, "~/.movieline/profile");
    }

    #[test]
    fn test_env_var_name() {
        assert_eq!(PROFILE_PATH_ENV_VAR, "MOVIELINE_PROFILE_PATH");
    }

    #[test]
    fn test_get_profile_path_env_override() {
        // Save current env var state
        let original = std::env::var_os(PROFILE_PATH_ENV_VAR);

        let test_path = "/custom/profile/path";
        std::env::set_var(PROFILE_PATH_ENV_VAR, test_path);
        assert_eq!(get_profile_path(), test_path);

        std::env::remove_var(PROFILE_PATH_ENV_VAR);
        assert_eq!(get_profile_path(), DEFAULT_PROFILE_PATH);

        // Restore original state
        if let Some(val) = original {
            std::env::set_var(PROFILE_PATH_ENV_VAR, val);
        }
    }

    #[test]
    fn test_load_profile_section() {
        let file = write_profile(
            "[default]\napi_url = http://movies.local/api/v1/\nemail = a@b.c\npassword = pw\n\n[staging]\napi_url = http://staging/api\ntoken = abc\nimport_encoding = windows-1251\n",
        );
        let path = file.path().to_str().unwrap();

        let profile = Profile::load("default", path).unwrap();
        assert_eq!(profile.api_url(), "http://movies.local/api/v1");
        assert_eq!(profile.token(), None);
        let credentials = profile.credentials().unwrap();
        assert_eq!(credentials.email, "a@b.c");
        assert_eq!(credentials.name, "a@b.c");

        let staging = Profile::load("staging", path).unwrap();
        assert_eq!(staging.api_url(), "http://staging/api");
        assert_eq!(staging.token(), Some("abc"));
        assert_eq!(staging.import_encoding(), Some("windows-1251"));
        assert!(staging.credentials().is_none());
    }

    #[test]
    fn test_missing_section_yields_blank_profile() {
        let file = write_profile("[default]\napi_url = http://x\n");
        let profile = Profile::load("other", file.path().to_str().unwrap()).unwrap();
        assert_eq!(profile, Profile::blank("other"));
    }

    #[test]
    fn test_missing_file_yields_blank_profile() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope");
        let profile = Profile::load("default", path.to_str().unwrap()).unwrap();
        assert_eq!(profile.api_url(), DEFAULT_API_URL);
    }

    #[test]
    fn test_token_path_sits_next_to_profile() {
        let path = token_path_for("/etc/movieline/profile");
        assert_eq!(path, PathBuf::from("/etc/movieline/token"));
    }
}
