//! HTTP plumbing for the Fleet API and Fleet Auth endpoints.

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use serde::{Serialize, de::DeserializeOwned};
use tracing::{debug, instrument, trace};

use brightcharge_core::{BaseUrl, Error};

use crate::endpoints::TOKEN;

/// HTTP client over the two upstream bases.
#[derive(Debug, Clone)]
pub(crate) struct FleetHttp {
    client: reqwest::Client,
    auth_base: BaseUrl,
    api_base: BaseUrl,
}

impl FleetHttp {
    /// Create a new HTTP client for the given auth and API bases.
    pub(crate) fn new(auth_base: BaseUrl, api_base: BaseUrl) -> Self {
        let client = reqwest::Client::builder()
            .user_agent(concat!("brightcharge/", env!("CARGO_PKG_VERSION")))
            .build()
            .expect("failed to build HTTP client");

        Self {
            client,
            auth_base,
            api_base,
        }
    }

    /// Returns the Fleet Auth base URL.
    pub(crate) fn auth_base(&self) -> &BaseUrl {
        &self.auth_base
    }

    /// Returns the Fleet API base URL.
    pub(crate) fn api_base(&self) -> &BaseUrl {
        &self.api_base
    }

    /// POST a grant request to the token endpoint.
    #[instrument(skip(self, body), fields(auth = %self.auth_base))]
    pub(crate) async fn token_request<B, R>(&self, body: &B) -> Result<R, Error>
    where
        B: Serialize,
        R: DeserializeOwned,
    {
        let url = self.auth_base.endpoint(TOKEN);
        debug!("token request");

        let response = self.client.post(&url).json(body).send().await?;

        self.handle_response(response).await
    }

    /// Make an authenticated GET against the Fleet API base.
    #[instrument(skip(self, token), fields(api = %self.api_base))]
    pub(crate) async fn get_authed<R>(&self, path: &str, token: &str) -> Result<R, Error>
    where
        R: DeserializeOwned,
    {
        let url = self.api_base.endpoint(path);
        debug!(path, "authenticated GET");

        let response = self
            .client
            .get(&url)
            .headers(self.auth_headers(token))
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// Make an authenticated POST against the Fleet API base, ignoring the
    /// response body.
    #[instrument(skip(self, body, token), fields(api = %self.api_base))]
    pub(crate) async fn post_authed<B>(&self, path: &str, body: &B, token: &str) -> Result<(), Error>
    where
        B: Serialize,
    {
        let url = self.api_base.endpoint(path);
        debug!(path, "authenticated POST");

        let response = self
            .client
            .post(&url)
            .json(body)
            .headers(self.auth_headers(token))
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(self.reject(response).await)
        }
    }

    /// Create authorization headers for authenticated requests.
    fn auth_headers(&self, token: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        let auth_value = format!("Bearer {}", token);
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&auth_value).expect("invalid token characters"),
        );
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers
    }

    /// Handle a response, decoding the body or normalizing the error.
    async fn handle_response<R: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<R, Error> {
        let status = response.status();
        trace!(status = %status, "upstream response");

        if status.is_success() {
            let body = response.json::<R>().await?;
            Ok(body)
        } else {
            Err(self.reject(response).await)
        }
    }

    /// Normalize a non-2xx response into an error.
    async fn reject(&self, response: reqwest::Response) -> Error {
        let status = response.status().as_u16();

        match response.text().await {
            Ok(body) => Error::from_error_body(status, &body),
            Err(err) => err.into(),
        }
    }
}
