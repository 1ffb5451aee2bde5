//! REST client for the Kinopio API.

use reqwest::{header::AUTHORIZATION, RequestBuilder, Response};
use serde::de::DeserializeOwned;

use super::*;
use crate::config::BoardConfig;

/// How the API token is presented in the `Authorization` header.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthScheme {
  /// The token on its own: `Authorization: <token>`
  #[default]
  Raw,
  /// `Authorization: Bearer <token>`
  Bearer,
}

impl AuthScheme {
  /// Header value carrying `token`.
  pub fn header_value(&self, token: &str) -> String {
    match self {
      AuthScheme::Raw => token.to_string(),
      AuthScheme::Bearer => format!("Bearer {token}"),
    }
  }
}

/// Authenticated client for one board.
///
/// # Examples
///
/// ```no_run
/// # use shelf::{board::BoardClient, config::BoardConfig};
/// # async fn example(config: &BoardConfig) -> Result<(), shelf::error::ShelfError> {
/// let board = BoardClient::new(reqwest::Client::new(), config)?;
/// let space = board.space().await?;
/// println!("{} cards on {}", space.cards.len(), space.name);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct BoardClient {
  /// Shared HTTP client
  client:      Client,
  /// API root, always ending in `/`
  api_url:     Url,
  /// Board the client reads and writes
  space_id:    String,
  /// Value of the `Authorization` header
  credentials: String,
}

impl BoardClient {
  /// Creates a client from board configuration.
  pub fn new(client: Client, config: &BoardConfig) -> Result<Self> {
    let api_url = if config.api_url.ends_with('/') {
      Url::parse(&config.api_url)?
    } else {
      Url::parse(&format!("{}/", config.api_url))?
    };
    Ok(Self {
      client,
      api_url,
      space_id: config.space_id.clone(),
      credentials: config.auth_scheme.header_value(&config.token),
    })
  }

  /// The board this client works on.
  pub fn space_id(&self) -> &str { &self.space_id }

  /// Fetches the current board snapshot.
  pub async fn space(&self) -> Result<Space> {
    let endpoint = format!("space/{}", self.space_id);
    let request = self.client.get(self.api_url.join(&endpoint)?);
    self.send(&endpoint, request).await
  }

  /// Creates a card and returns it as stored by the server, including its id.
  pub async fn create_card(&self, card: &NewCard) -> Result<Card> {
    let request = self.client.post(self.api_url.join("card")?).json(card);
    self.send("card", request).await
  }

  /// Creates a connection between two cards.
  pub async fn create_connection(&self, connection: &NewConnection) -> Result<Connection> {
    let request = self.client.post(self.api_url.join("connection")?).json(connection);
    self.send("connection", request).await
  }

  /// Sends an authenticated request and decodes the JSON reply.
  async fn send<T: DeserializeOwned>(&self, endpoint: &str, request: RequestBuilder) -> Result<T> {
    debug!("Board request /{endpoint}");
    let response: Response = request.header(AUTHORIZATION, &self.credentials).send().await?;

    if !response.status().is_success() {
      trace!("Board response: {response:?}");
      return Err(ShelfError::BoardStatus {
        endpoint: format!("/{endpoint}"),
        status:   response.status(),
      });
    }

    let body = response.bytes().await?;
    trace!("Board response body: {}", String::from_utf8_lossy(&body));
    Ok(serde_json::from_slice(&body)?)
  }
}
