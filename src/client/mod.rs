use crate::models::{Listing, PostData, Thing};
use log::debug;
use reqwest::{Client, Error as ReqwestError};
use std::fmt;

pub const PUBLIC_BASE_URL: &str = "https://www.reddit.com";
pub const OAUTH_BASE_URL: &str = "https://oauth.reddit.com";
pub(crate) const DEFAULT_USER_AGENT: &str = "redlink/0.1 (by /u/redlink_dev)";

// Define a custom error type for handling Reddit API errors
#[derive(Debug)]
pub enum RedditError {
    /// The operation needs a logged-in session and the client has no token.
    AuthenticationRequired,
    /// The API told us to slow down. `seconds` is how long it asked us to
    /// wait, 0.0 when the response did not say.
    RateLimited { seconds: f64 },
    /// The request never completed (connection, TLS, timeout).
    Network(ReqwestError),
    /// The response body was not the JSON we expected.
    Json(serde_json::Error),
    /// The server answered, but not in a shape we can use.
    UnexpectedResponse(String),
    /// The API accepted the request and rejected its content.
    ValidationFailed(Vec<ApiError>),
}

/// One entry from the API's error list: a code, a human-readable
/// message, and sometimes the form field it applies to.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiError {
    pub code: String,
    pub message: String,
    pub field: Option<String>,
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.field {
            Some(field) => write!(f, "{}: {} (field: {})", self.code, self.message, field),
            None => write!(f, "{}: {}", self.code, self.message),
        }
    }
}

impl fmt::Display for RedditError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            RedditError::AuthenticationRequired => {
                write!(f, "No access token available. This action requires a logged-in session.")
            }
            RedditError::RateLimited { seconds } => {
                write!(f, "Rate limited by Reddit. Try again in {} seconds.", seconds)
            }
            RedditError::Network(err) => write!(f, "Request error: {}", err),
            RedditError::Json(err) => write!(f, "Parse error: {}", err),
            RedditError::UnexpectedResponse(msg) => write!(f, "Reddit API error: {}", msg),
            RedditError::ValidationFailed(errors) => {
                let rendered: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
                write!(f, "Reddit API returned errors: {}", rendered.join("; "))
            }
        }
    }
}

impl std::error::Error for RedditError {}

impl From<ReqwestError> for RedditError {
    fn from(err: ReqwestError) -> Self {
        RedditError::Network(err)
    }
}

impl From<serde_json::Error> for RedditError {
    fn from(err: serde_json::Error) -> Self {
        RedditError::Json(err)
    }
}

#[derive(Clone)]
pub struct RedditClient {
    pub client: Client,
    pub access_token: Option<String>,
    /// Modhash sent along with write actions when the session has one.
    pub modhash: Option<String>,
    pub user_agent: String,
    base_url: Option<String>,
}

impl RedditClient {
    pub fn new() -> Self {
        let user_agent = DEFAULT_USER_AGENT.to_string();
        Self {
            client: Self::get_client(&user_agent).unwrap(),
            access_token: None,
            modhash: None,
            user_agent,
            base_url: None,
        }
    }

    pub fn with_user_agent(user_agent: String) -> Self {
        Self {
            client: Self::get_client(&user_agent).unwrap(),
            access_token: None,
            modhash: None,
            user_agent,
            base_url: None,
        }
    }

    /// Create a client from a configuration object
    pub fn from_config(config: &crate::config::AppConfig) -> Self {
        debug!(
            "Creating RedditClient with user_agent: {}",
            config.user_agent
        );
        let mut client = Self::with_user_agent(config.user_agent.clone());

        if let Some(token) = &config.access_token {
            client.access_token = Some(token.clone());
        }
        if let Some(modhash) = &config.modhash {
            client.modhash = Some(modhash.clone());
        }

        client
    }

    /// Set an access token manually (useful for headless environments)
    pub fn set_access_token(&mut self, access_token: &str) {
        self.access_token = Some(access_token.to_string());
    }

    /// Set the session modhash sent alongside write actions
    pub fn set_modhash(&mut self, modhash: &str) {
        self.modhash = Some(modhash.to_string());
    }

    /// Point the client at a different server instead of reddit.com.
    /// Mainly useful for talking to a local test server.
    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = Some(base_url);
        self
    }

    fn get_client(user_agent: &str) -> Result<Client, RedditError> {
        Ok(Client::builder().user_agent(user_agent).build()?)
    }

    fn api_base(&self) -> &str {
        if let Some(base) = &self.base_url {
            return base;
        }
        if self.access_token.is_some() {
            debug!("Using OAuth API endpoint with access token");
            OAUTH_BASE_URL
        } else {
            debug!("Using public API endpoint (no access token)");
            PUBLIC_BASE_URL
        }
    }

    /// GET a path under the API base and parse the body as JSON.
    pub(crate) async fn get_json(&self, path: &str) -> Result<serde_json::Value, RedditError> {
        let url = format!("{}{}", self.api_base(), path);
        debug!("Fetching from URL: {}", url);
        debug!("Using User-Agent: {}", self.user_agent);

        let mut req_builder = self.client.get(&url);

        if let Some(token) = &self.access_token {
            debug!("Adding Authorization header with token");
            req_builder = req_builder.header("Authorization", format!("Bearer {}", token));
        }

        let response = req_builder.send().await?;
        let status = response.status();
        debug!("Response status: {}", status);

        if !status.is_success() {
            return Err(RedditError::UnexpectedResponse(format!(
                "Server returned error status: {}",
                status
            )));
        }

        let body = response.text().await?;
        debug!("Response body length: {} bytes", body.len());

        match serde_json::from_str(&body) {
            Ok(json) => Ok(json),
            Err(e) => {
                debug!("Error parsing response: {}", e);
                debug!(
                    "First 100 chars: {}",
                    body.chars().take(100).collect::<String>()
                );
                Err(RedditError::Json(e))
            }
        }
    }

    /// POST a form to a path under the API base. Requires a token; the
    /// session modhash rides along as `uh` when we have one. The parsed
    /// response is returned after its error list has been checked.
    pub(crate) async fn post_form(
        &self,
        path: &str,
        params: &[(&str, &str)],
    ) -> Result<serde_json::Value, RedditError> {
        let token = match &self.access_token {
            Some(token) => token,
            None => return Err(RedditError::AuthenticationRequired),
        };

        let url = format!("{}{}", self.api_base(), path);
        debug!("Posting to URL: {}", url);
        debug!("Using User-Agent: {}", self.user_agent);

        let mut form: Vec<(&str, &str)> = params.to_vec();
        if let Some(modhash) = &self.modhash {
            form.push(("uh", modhash.as_str()));
        }

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", token))
            .header("Content-Type", "application/x-www-form-urlencoded")
            .form(&form)
            .send()
            .await?;

        let status = response.status();
        debug!("Response status: {}", status);

        if !status.is_success() {
            let body = response.text().await?;
            return Err(RedditError::UnexpectedResponse(format!(
                "Action failed: HTTP {}: {}",
                status, body
            )));
        }

        let body = response.text().await?;
        debug!("Response body length: {} bytes", body.len());

        let json: serde_json::Value = match serde_json::from_str(&body) {
            Ok(json) => json,
            Err(e) => {
                debug!("Error parsing action response: {}", e);
                debug!(
                    "First 100 chars: {}",
                    body.chars().take(100).collect::<String>()
                );
                return Err(RedditError::Json(e));
            }
        };

        Self::check_api_errors(&json)?;
        Ok(json)
    }

    /// Inspect the `json.errors` list the API embeds in action responses.
    /// A RATELIMIT entry wins over everything else and carries the wait
    /// time from `json.ratelimit`.
    pub(crate) fn check_api_errors(json: &serde_json::Value) -> Result<(), RedditError> {
        let errors = match json["json"]["errors"].as_array() {
            Some(errors) if !errors.is_empty() => errors,
            _ => return Ok(()),
        };

        let api_errors: Vec<ApiError> = errors
            .iter()
            .map(|entry| ApiError {
                code: entry[0].as_str().unwrap_or("UNKNOWN").to_string(),
                message: entry[1].as_str().unwrap_or("").to_string(),
                field: entry[2].as_str().map(|s| s.to_string()),
            })
            .collect();

        if api_errors.iter().any(|e| e.code == "RATELIMIT") {
            let seconds = json["json"]["ratelimit"].as_f64().unwrap_or(0.0);
            return Err(RedditError::RateLimited { seconds });
        }

        Err(RedditError::ValidationFailed(api_errors))
    }

    /// Fetch the current server-side state of a post by its id.
    pub(crate) async fn fetch_post_data(&self, post_id: &str) -> Result<PostData, RedditError> {
        let fullname = if post_id.starts_with("t3_") {
            post_id.to_string()
        } else {
            format!("t3_{}", post_id)
        };

        let json = self.get_json(&format!("/by_id/{}.json", fullname)).await?;
        let listing: Listing<Thing<PostData>> = serde_json::from_value(json)?;

        let post = listing.data.children.into_iter().next().ok_or_else(|| {
            RedditError::UnexpectedResponse(format!("No post found for id {}", post_id))
        })?;

        debug!("Fetched post {} ({})", post.data.id, post.data.title);
        Ok(post.data)
    }

    /// Fetch a post and wrap it together with this client so actions can
    /// be taken on it.
    pub async fn post(&self, post_id: &str) -> Result<crate::post::Post, RedditError> {
        let data = self.fetch_post_data(post_id).await?;
        Ok(crate::post::Post::new(self.clone(), data))
    }
}
