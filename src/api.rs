use reqwest::{Client, StatusCode, Url};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
  #[error("Network error")]
  Reqwest(#[from] reqwest::Error),

  #[error("Request failed with status {status}")]
  Status { status: StatusCode, message: Option<String> },

  #[error("Custom error: {0}")]
  Custom(String),
}

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct UserSummary {
  #[serde(rename = "_id")]
  pub id: String,
  #[serde(rename = "fullName")]
  pub full_name: String,
  pub username: String,
  #[serde(rename = "profileImg", default)]
  pub profile_img: Option<String>,
}

/// A resolved profile. `username` is the canonical handle and may differ from
/// whatever the user typed into the search bar.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct Profile {
  pub username: String,
  #[serde(rename = "fullName", default)]
  pub full_name: Option<String>,
  #[serde(rename = "profileImg", default)]
  pub profile_img: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
  message: Option<String>,
}

#[derive(Clone)]
pub struct ApiClient {
  client: Client,
  base_url: Url,
}

impl ApiClient {
  pub fn new(base_url: &str) -> Result<Self, ApiError> {
    let base_url = Url::parse(base_url).map_err(|e| ApiError::Custom(format!("Invalid base URL {base_url:?}: {e}")))?;
    Ok(Self { client: Client::new(), base_url })
  }

  pub async fn suggested_users(&self) -> Result<Vec<UserSummary>, ApiError> {
    let url = self.join("api/users/suggested")?;
    let res = self.client.get(url).send().await?.error_for_status()?;
    Ok(res.json().await?)
  }

  pub async fn profile_lookup(&self, handle: &str) -> Result<Profile, ApiError> {
    let url = self.join(&format!("api/users/profile/{handle}"))?;
    let res = self.client.get(url).send().await?;
    let status = res.status();
    if !status.is_success() {
      let message = res.json::<ErrorBody>().await.unwrap_or_default().message;
      return Err(ApiError::Status { status, message });
    }
    Ok(res.json().await?)
  }

  fn join(&self, path: &str) -> Result<Url, ApiError> {
    self.base_url.join(path).map_err(|e| ApiError::Custom(format!("Invalid request path {path:?}: {e}")))
  }
}

#[cfg(test)]
mod tests {
  use std::sync::mpsc;

  use pretty_assertions::assert_eq;

  use super::*;

  fn serve_once(status: u16, body: &'static str) -> (String, mpsc::Receiver<String>) {
    let server = tiny_http::Server::http("127.0.0.1:0").unwrap();
    let port = server.server_addr().to_ip().unwrap().port();
    let (url_tx, url_rx) = mpsc::channel();
    std::thread::spawn(move || {
      if let Ok(request) = server.recv() {
        let _ = url_tx.send(request.url().to_string());
        let header = tiny_http::Header::from_bytes(&b"Content-Type"[..], &b"application/json"[..]).unwrap();
        let response = tiny_http::Response::from_string(body).with_status_code(status).with_header(header);
        let _ = request.respond(response);
      }
    });
    (format!("http://127.0.0.1:{port}"), url_rx)
  }

  #[tokio::test]
  async fn suggested_users_parses_wire_fields() {
    let (base, urls) = serve_once(
      200,
      r#"[{"_id":"1","fullName":"Alice Aardvark","username":"alice","profileImg":"/avatars/alice.png"},
         {"_id":"2","fullName":"Bob Bokmakierie","username":"bob"}]"#,
    );
    let client = ApiClient::new(&base).unwrap();

    let users = client.suggested_users().await.unwrap();

    assert_eq!(urls.recv().unwrap(), "/api/users/suggested");
    assert_eq!(users.len(), 2);
    assert_eq!(users[0].full_name, "Alice Aardvark");
    assert_eq!(users[0].profile_img.as_deref(), Some("/avatars/alice.png"));
    assert_eq!(users[1].username, "bob");
    assert_eq!(users[1].profile_img, None);
  }

  #[tokio::test]
  async fn suggested_users_propagates_server_failure() {
    let (base, _urls) = serve_once(500, "{}");
    let client = ApiClient::new(&base).unwrap();

    let err = client.suggested_users().await.unwrap_err();
    assert!(matches!(err, ApiError::Reqwest(_)));
  }

  #[tokio::test]
  async fn profile_lookup_returns_the_canonical_handle() {
    let (base, urls) = serve_once(200, r#"{"username":"alice","fullName":"Alice Aardvark"}"#);
    let client = ApiClient::new(&base).unwrap();

    let profile = client.profile_lookup("Alice").await.unwrap();

    assert_eq!(urls.recv().unwrap(), "/api/users/profile/Alice");
    assert_eq!(profile.username, "alice");
  }

  #[tokio::test]
  async fn profile_lookup_surfaces_the_server_message() {
    let (base, _urls) = serve_once(404, r#"{"message":"no such user"}"#);
    let client = ApiClient::new(&base).unwrap();

    let err = client.profile_lookup("nobody").await.unwrap_err();
    match err {
      ApiError::Status { status, message } => {
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(message.as_deref(), Some("no such user"));
      },
      other => panic!("expected a status error, got {other:?}"),
    }
  }

  #[tokio::test]
  async fn profile_lookup_tolerates_a_bodyless_failure() {
    let (base, _urls) = serve_once(404, "");
    let client = ApiClient::new(&base).unwrap();

    let err = client.profile_lookup("nobody").await.unwrap_err();
    match err {
      ApiError::Status { message, .. } => assert_eq!(message, None),
      other => panic!("expected a status error, got {other:?}"),
    }
  }

  #[tokio::test]
  async fn transport_failure_is_a_network_error() {
    // Bind and drop to find a port with nothing listening on it.
    let port = std::net::TcpListener::bind("127.0.0.1:0").unwrap().local_addr().unwrap().port();
    let client = ApiClient::new(&format!("http://127.0.0.1:{port}")).unwrap();

    let err = client.profile_lookup("alice").await.unwrap_err();
    assert!(matches!(err, ApiError::Reqwest(_)));
  }
}
