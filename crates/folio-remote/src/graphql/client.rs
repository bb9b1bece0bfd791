//! GraphQL HTTP client.

use folio_core::error::{ApiError, Error, InvalidInputError};
use folio_core::{ApiToken, ApiUrl, Result};
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, trace};

use crate::http::{build_client, decode_json, status_error, transport_error};

/// Request body for a GraphQL operation.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GraphqlRequest<'a, V> {
    query: &'a str,
    variables: &'a V,
    operation_name: &'a str,
}

/// Response envelope for a GraphQL operation.
#[derive(Debug, Deserialize)]
struct GraphqlResponse<R> {
    data: Option<R>,
    #[serde(default)]
    errors: Vec<GraphqlErrorEntry>,
}

/// One entry of the top-level `errors` array.
#[derive(Debug, Deserialize)]
struct GraphqlErrorEntry {
    message: String,
}

/// HTTP client for GraphQL requests.
///
/// Every operation is a JSON `POST` of `{ query, variables, operationName }`
/// to a single endpoint. When a token is configured it is sent as a bearer
/// `Authorization` header.
#[derive(Clone)]
pub struct GraphqlClient {
    client: reqwest::Client,
    endpoint: ApiUrl,
    token: Option<ApiToken>,
}

impl GraphqlClient {
    /// Create a new GraphQL client for the given endpoint.
    pub fn new(endpoint: ApiUrl, token: Option<ApiToken>) -> Result<Self> {
        Ok(Self {
            client: build_client()?,
            endpoint,
            token,
        })
    }

    /// Returns the endpoint this client is configured for.
    pub fn endpoint(&self) -> &ApiUrl {
        &self.endpoint
    }

    /// Whether requests carry an authorization header.
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// Run one operation and decode its `data`.
    ///
    /// A non-empty `errors` array fails the call even if partial data came
    /// back with it.
    #[instrument(skip(self, query, variables), fields(endpoint = %self.endpoint))]
    pub async fn execute<V, R>(&self, operation: &str, query: &str, variables: &V) -> Result<R>
    where
        V: Serialize + std::fmt::Debug,
        R: DeserializeOwned,
    {
        debug!(operation, "GraphQL request");
        trace!(?variables, "operation variables");

        let body = GraphqlRequest {
            query,
            variables,
            operation_name: operation,
        };

        let response = self
            .client
            .post(self.endpoint.as_str())
            .headers(self.auth_headers()?)
            .json(&body)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        trace!(status = %status, "GraphQL response");

        if !status.is_success() {
            return Err(status_error(response).await);
        }

        let envelope: GraphqlResponse<R> = decode_json(response).await?;

        if !envelope.errors.is_empty() {
            let messages = envelope.errors.into_iter().map(|e| e.message).collect();
            return Err(ApiError::GraphQl { messages }.into());
        }

        envelope
            .data
            .ok_or(Error::Api(ApiError::MissingData { what: "data" }))
    }

    /// Create authorization headers for authenticated requests.
    fn auth_headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        if let Some(token) = &self.token {
            let value = HeaderValue::from_str(&format!("Bearer {}", token.expose())).map_err(
                |_| InvalidInputError::Token {
                    reason: "not a valid header value".to_string(),
                },
            )?;
            headers.insert(AUTHORIZATION, value);
        }
        Ok(headers)
    }
}

impl std::fmt::Debug for GraphqlClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GraphqlClient")
            .field("endpoint", &self.endpoint)
            .field("token", &self.token)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[derive(Debug, Deserialize)]
    struct Viewer {
        name: String,
    }

    #[derive(Debug, Deserialize)]
    struct ViewerData {
        viewer: Viewer,
    }

    const VIEWER: &str = "query Viewer { viewer { name } }";

    fn endpoint(server: &MockServer) -> ApiUrl {
        ApiUrl::new(format!("{}/graphql", server.uri())).unwrap()
    }

    #[tokio::test]
    async fn decodes_data() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/graphql"))
            .and(body_partial_json(json!({ "operationName": "Viewer" })))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "data": { "viewer": { "name": "ada" } } })),
            )
            .mount(&server)
            .await;

        let client = GraphqlClient::new(endpoint(&server), None).unwrap();
        let data: ViewerData = client.execute("Viewer", VIEWER, &json!({})).await.unwrap();

        assert_eq!(data.viewer.name, "ada");
    }

    #[tokio::test]
    async fn sends_bearer_token() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(header("authorization", "Bearer secret-token"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "data": { "viewer": { "name": "ada" } } })),
            )
            .expect(1)
            .mount(&server)
            .await;

        let token = ApiToken::new("secret-token").unwrap();
        let client = GraphqlClient::new(endpoint(&server), Some(token)).unwrap();
        assert!(client.is_authenticated());
        let _: ViewerData = client.execute("Viewer", VIEWER, &json!({})).await.unwrap();
    }

    #[tokio::test]
    async fn errors_array_fails_the_call() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": null,
                "errors": [{ "message": "Cannot query field" }]
            })))
            .mount(&server)
            .await;

        let client = GraphqlClient::new(endpoint(&server), None).unwrap();
        let err = client
            .execute::<_, ViewerData>("Viewer", VIEWER, &json!({}))
            .await
            .unwrap_err();

        match err {
            Error::Api(ApiError::GraphQl { messages }) => {
                assert_eq!(messages, vec!["Cannot query field".to_string()]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn http_status_is_reported() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(503).set_body_json(json!({ "message": "maintenance" })),
            )
            .mount(&server)
            .await;

        let client = GraphqlClient::new(endpoint(&server), None).unwrap();
        let err = client
            .execute::<_, ViewerData>("Viewer", VIEWER, &json!({}))
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "api error: HTTP 503: maintenance");
    }

    #[tokio::test]
    async fn missing_data_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .mount(&server)
            .await;

        let client = GraphqlClient::new(endpoint(&server), None).unwrap();
        let err = client
            .execute::<_, ViewerData>("Viewer", VIEWER, &json!({}))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            Error::Api(ApiError::MissingData { what: "data" })
        ));
    }

    #[tokio::test]
    async fn non_json_body_is_malformed() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let client = GraphqlClient::new(endpoint(&server), None).unwrap();
        let err = client
            .execute::<_, ViewerData>("Viewer", VIEWER, &json!({}))
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Api(ApiError::Malformed { .. })));
    }

    #[test]
    fn debug_redacts_token() {
        let client = GraphqlClient::new(
            ApiUrl::new("https://gql.example.com").unwrap(),
            Some(ApiToken::new("topsecret").unwrap()),
        )
        .unwrap();
        let debug = format!("{:?}", client);
        assert!(!debug.contains("topsecret"));
    }
}
