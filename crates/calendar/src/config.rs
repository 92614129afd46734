/// OAuth client credentials for Google Calendar.
#[derive(Debug, Clone)]
pub struct GoogleOAuthConfig {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
}

impl GoogleOAuthConfig {
    /// Load credentials from environment variables.
    ///
    /// | Env Var                | Required |
    /// |------------------------|----------|
    /// | `GOOGLE_CLIENT_ID`     | yes      |
    /// | `GOOGLE_CLIENT_SECRET` | yes      |
    /// | `GOOGLE_REDIRECT_URI`  | yes      |
    ///
    /// Returns `None` unless all three are set and non-empty; the calendar
    /// feature is then disabled.
    pub fn from_env() -> Option<Self> {
        let var = |name: &str| {
            std::env::var(name)
                .ok()
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        Some(Self {
            client_id: var("GOOGLE_CLIENT_ID")?,
            client_secret: var("GOOGLE_CLIENT_SECRET")?,
            redirect_uri: var("GOOGLE_REDIRECT_URI")?,
        })
    }
}
