//! # Status Line Model
//!
//! State behind the one-line summary printed under the movie list: the
//! active profile, the last user message and the outcome of the most recent
//! API call.

/// Outcome of the most recent API call
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApiStatus {
    /// Short name of the operation (e.g., "list", "import")
    pub operation: Option<String>,
    pub succeeded: Option<bool>,
    pub duration_ms: Option<u64>,
}

impl ApiStatus {
    /// `list ok (12 ms)`, or nothing before the first call
    pub fn summary(&self) -> Option<String> {
        let (Some(operation), Some(succeeded), Some(duration_ms)) =
            (&self.operation, self.succeeded, self.duration_ms)
        else {
            return None;
        };
        let outcome = if succeeded { "ok" } else { "failed" };
        Some(format!("{operation} {outcome} ({duration_ms} ms)"))
    }
}

/// Status line state
#[derive(Debug, Clone)]
pub struct StatusLine {
    status_message: Option<String>,
    api_status: ApiStatus,
    profile_name: String,
    profile_path: String,
}

impl StatusLine {
    pub fn new() -> Self {
        Self {
            status_message: None,
            api_status: ApiStatus::default(),
            profile_name: "default".to_string(),
            profile_path: crate::config::DEFAULT_PROFILE_PATH.to_string(),
        }
    }

    /// Remember the last message shown to the user
    pub fn set_status_message<S: Into<String>>(&mut self, message: S) {
        self.status_message = Some(message.into());
    }

    pub fn status_message(&self) -> Option<&str> {
        self.status_message.as_deref()
    }

    /// Record the outcome of an API call
    pub fn set_api_status<S: Into<String>>(&mut self, operation: S, succeeded: bool, duration_ms: u64) {
        self.api_status = ApiStatus {
            operation: Some(operation.into()),
            succeeded: Some(succeeded),
            duration_ms: Some(duration_ms),
        };
    }

    pub fn api_status(&self) -> &ApiStatus {
        &self.api_status
    }

    pub fn set_profile(&mut self, name: String, path: String) {
        self.profile_name = name;
        self.profile_path = path;
    }

    pub fn profile_name(&self) -> &str {
        &self.profile_name
    }

    pub fn profile_path(&self) -> &str {
        &self.profile_path
    }
}

impl Default for StatusLine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_status_line_should_use_default_profile() {
        let status = StatusLine::new();
        assert_eq!(status.status_message(), None);
        assert_eq!(status.api_status().summary(), None);
        assert_eq!(status.profile_name(), "default");
    }

    #[test]
    fn status_message_should_keep_latest() {
        let mut status = StatusLine::new();

        status.set_status_message("Imported: 2, Failed: 0");
        status.set_status_message("Movie added successfully!");

        assert_eq!(status.status_message(), Some("Movie added successfully!"));
    }

    #[test]
    fn api_status_should_summarize_last_call() {
        let mut status = StatusLine::new();

        status.set_api_status("list", true, 42);
        assert_eq!(status.api_status().summary().as_deref(), Some("list ok (42 ms)"));

        status.set_api_status("delete", false, 7);
        assert_eq!(
            status.api_status().summary().as_deref(),
            Some("delete failed (7 ms)")
        );
    }

    #[test]
    fn profile_should_be_replaced() {
        let mut status = StatusLine::new();

        status.set_profile("staging".to_string(), "/etc/movieline/profile".to_string());

        assert_eq!(status.profile_name(), "staging");
        assert_eq!(status.profile_path(), "/etc/movieline/profile");
    }
}
