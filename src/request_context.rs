use std::sync::Arc;

use reqwest::{Client, Response, Url};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, error, warn};

use crate::endpoint::Endpoint;
use crate::errors::Error;
use crate::token::{TokenGuard, TokenPolicy};
use crate::types::ApiStatus;

/// One call against the directory API: endpoint, query parameters and optional JSON body.
pub struct ApiRequest {
    endpoint: Endpoint,
    query: Vec<(String, String)>,
    body: Option<Value>,
}

impl ApiRequest {
    pub fn new(endpoint: Endpoint) -> Self {
        Self {
            endpoint,
            query: Vec::new(),
            body: None,
        }
    }

    pub fn query(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.query.push((key.into(), value.to_string()));
        self
    }

    pub fn json<T: Serialize + ?Sized>(mut self, body: &T) -> Result<Self, Error> {
        self.body = Some(serde_json::to_value(body)?);
        Ok(self)
    }

    pub fn endpoint(&self) -> Endpoint {
        self.endpoint
    }

    pub fn query_pairs(&self) -> &[(String, String)] {
        &self.query
    }

    pub fn body(&self) -> Option<&Value> {
        self.body.as_ref()
    }
}

/// Shared context for outbound requests: HTTP client, base URL and the token guard.
#[derive(Clone)]
pub struct RequestDispatchContext {
    http_client: Client,
    base_url: Url,
    guard: Arc<TokenGuard>,
}

impl RequestDispatchContext {
    pub fn build(http_client: Client, base_url: Url, policy: TokenPolicy) -> Self {
        Self {
            http_client,
            base_url,
            guard: Arc::new(TokenGuard::new(policy)),
        }
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn guard(&self) -> Arc<TokenGuard> {
        Arc::clone(&self.guard)
    }

    pub fn url_for(&self, endpoint: Endpoint) -> Result<Url, Error> {
        self.base_url.join(endpoint.path()).map_err(|e| {
            Error::Config(format!(
                "Cannot build URL for '{}' from '{}': {}",
                endpoint, self.base_url, e
            ))
        })
    }

    /// Issues `request`, attaching `access_token` ahead of the caller's query parameters,
    /// and classifies the response.
    pub async fn send(&self, request: ApiRequest, access_token: Option<&str>) -> Result<Value, Error> {
        let ApiRequest {
            endpoint,
            query,
            body,
        } = request;
        let url = self.url_for(endpoint)?;

        let mut params: Vec<(String, String)> = Vec::with_capacity(query.len() + 1);
        if let Some(token) = access_token {
            params.push(("access_token".to_string(), token.to_string()));
        }
        params.extend(query);

        let mut builder = self
            .http_client
            .request(endpoint.method(), url.clone())
            .query(&params);
        if let Some(body) = &body {
            builder = builder.json(body);
        }

        debug!(endpoint = %endpoint, method = %endpoint.method(), "sending request");
        let response = builder.send().await.map_err(|e| {
            let err = Error::from_transport(e, url.as_str());
            error!(endpoint = %endpoint, url = %url, error = %err, "request failed");
            err
        })?;
        classify(endpoint, url.as_str(), response).await
    }
}

async fn classify(endpoint: Endpoint, url: &str, response: Response) -> Result<Value, Error> {
    let status = response.status();
    if !status.is_success() {
        let err = Error::from_status(status, url);
        error!(endpoint = %endpoint, status = status.as_u16(), url, "{}", err);
        return Err(err);
    }
    let bytes = response
        .bytes()
        .await
        .map_err(|e| Error::from_transport(e, url))?;
    let value: Value = serde_json::from_slice(&bytes).map_err(|e| {
        Error::InvalidResponse(format!("{endpoint} returned a non-JSON body: {e}"))
    })?;
    check_errcode(endpoint, value)
}

/// Splits a decoded body into success (`errcode == 0`) or an application error.
pub(crate) fn check_errcode(endpoint: Endpoint, value: Value) -> Result<Value, Error> {
    let status = ApiStatus::deserialize(&value).map_err(|e| {
        Error::InvalidResponse(format!("{endpoint} response lacks errcode: {e}"))
    })?;
    if status.errcode == 0 {
        return Ok(value);
    }
    warn!(
        endpoint = %endpoint,
        errcode = status.errcode,
        errmsg = %status.errmsg,
        "directory api returned an error"
    );
    Err(Error::Api {
        code: status.errcode,
        message: status.errmsg,
    })
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn zero_errcode_returns_whole_body() {
        let body = json!({"errcode": 0, "errmsg": "ok", "userid": "zhangsan"});
        let value = check_errcode(Endpoint::UserGet, body.clone()).unwrap();
        assert_eq!(value, body);
    }

    #[test]
    fn nonzero_errcode_is_api_error() {
        let body = json!({"errcode": 60011, "errmsg": "no permission"});
        match check_errcode(Endpoint::UserGet, body) {
            Err(Error::Api { code, message }) => {
                assert_eq!(code, 60011);
                assert_eq!(message, "no permission");
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn missing_errcode_is_invalid_response() {
        let body = json!({"userid": "zhangsan"});
        assert!(matches!(
            check_errcode(Endpoint::UserGet, body),
            Err(Error::InvalidResponse(_))
        ));
    }

    #[test]
    fn request_builder_collects_params() {
        let request = ApiRequest::new(Endpoint::UserSimpleList)
            .query("department_id", 1)
            .query("fetch_child", 0);
        assert_eq!(request.endpoint(), Endpoint::UserSimpleList);
        assert_eq!(
            request.query_pairs(),
            &[
                ("department_id".to_string(), "1".to_string()),
                ("fetch_child".to_string(), "0".to_string())
            ]
        );
        assert!(request.body().is_none());
    }

    #[test]
    fn endpoint_urls_join_base() {
        let context = RequestDispatchContext::build(
            Client::new(),
            Url::parse("https://qyapi.weixin.qq.com/cgi-bin/").unwrap(),
            TokenPolicy::default(),
        );
        assert_eq!(
            context.url_for(Endpoint::DepartmentList).unwrap().as_str(),
            "https://qyapi.weixin.qq.com/cgi-bin/department/list"
        );
    }
}
