/// What an API client needs from an authenticated session.
pub trait Credentials: Send + Sync {
    /// Base URL of the org, without a trailing slash.
    fn instance_url(&self) -> &str;

    fn access_token(&self) -> &str;

    /// REST API version such as `63.0`.
    fn api_version(&self) -> &str;
}
