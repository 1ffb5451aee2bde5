//! The filing sequence: download, publish, pin.
//!
//! Steps run strictly in order and the first failure ends the run. Nothing is
//! rolled back: a failed push leaves the downloaded PDF in place, and a failed
//! connection leaves the newly created card on the board.
//!
//! Each step is also exposed on its own so a front end can report progress
//! between them; [`Pipeline::run`] simply chains them.

use crate::{
  board::{BoardClient, Card, Connection, Placement},
  config::BoardConfig,
  publish::GitPublisher,
};

use super::*;

/// What a completed run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Filing {
  /// Where the PDF was written
  pub path:      PathBuf,
  /// Whether the papers directory was committed and pushed
  pub published: bool,
  /// Board result, when the board step ran
  pub pin:       Option<Pin>,
}

/// The card (and connection) created for a paper.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pin {
  /// Card as stored by the server
  pub card:       Card,
  /// Category card the new card was attached to
  pub parent:     Option<Card>,
  /// Connection from the category card, when one was created
  pub connection: Option<Connection>,
}

/// Board client plus the settings that shape each card.
struct BoardStep {
  /// Authenticated client for the configured board
  client:           BoardClient,
  /// Public URL of the papers directory
  raw_base_url:     String,
  /// Whether to connect category card and new card
  connect:          bool,
  /// Whether a missing category card is an error
  require_category: bool,
}

/// Runs the filing steps with injected collaborators.
///
/// # Examples
///
/// ```no_run
/// # use shelf::{Config, PaperRequest, Pipeline};
/// # async fn example(config: Config) -> Result<(), shelf::error::ShelfError> {
/// let request = PaperRequest::new("https://example.com/p.pdf", "A Paper", "", "Miscellaneous");
/// let pipeline = Pipeline::from_config(config)?.without_board();
/// let filing = pipeline.run(&request).await?;
/// assert!(filing.pin.is_none());
/// # Ok(())
/// # }
/// ```
pub struct Pipeline {
  /// HTTP client shared by the download and the board
  client:     Client,
  /// Directory the PDF is written to
  papers_dir: PathBuf,
  /// Publishing step, if enabled
  publisher:  Option<Box<dyn Publisher>>,
  /// Board step, if configured
  board:      Option<BoardStep>,
}

impl Pipeline {
  /// Builds a pipeline from configuration, using git for publishing.
  pub fn from_config(config: Config) -> Result<Self> {
    config.validate()?;
    let client = Client::new();

    let publisher: Option<Box<dyn Publisher>> = if config.publish.enabled {
      Some(Box::new(
        GitPublisher::new(&config.papers_dir)
          .with_commit_prefix(config.publish.commit_prefix.clone())
          .with_remote(config.publish.remote.clone()),
      ))
    } else {
      None
    };

    let board =
      config.board.as_ref().map(|board| BoardStep::new(client.clone(), board)).transpose()?;

    Ok(Self { client, papers_dir: config.papers_dir, publisher, board })
  }

  /// Replaces the publishing step.
  pub fn with_publisher(mut self, publisher: impl Publisher + 'static) -> Self {
    self.publisher = Some(Box::new(publisher));
    self
  }

  /// Skips publishing.
  pub fn without_publisher(mut self) -> Self {
    self.publisher = None;
    self
  }

  /// Skips the board step.
  pub fn without_board(mut self) -> Self {
    self.board = None;
    self
  }

  /// Whether a publishing step will run.
  pub fn publishes(&self) -> bool { self.publisher.is_some() }

  /// Whether a board step will run.
  pub fn pins(&self) -> bool { self.board.is_some() }

  /// Runs every enabled step in order.
  pub async fn run(&self, request: &PaperRequest) -> Result<Filing> {
    info!("Filing {request}");
    let path = self.download(request).await?;
    let published = self.publish(request).await?;
    let pin = self.pin(request).await?;
    Ok(Filing { path, published, pin })
  }

  /// Downloads the PDF into the papers directory.
  pub async fn download(&self, request: &PaperRequest) -> Result<PathBuf> {
    fetch::download(&self.client, request.url(), &self.papers_dir, request.filename()).await
  }

  /// Publishes the papers directory, returning whether anything ran.
  pub async fn publish(&self, request: &PaperRequest) -> Result<bool> {
    match &self.publisher {
      Some(publisher) => {
        publisher.publish(request).await?;
        Ok(true)
      },
      None => {
        debug!("Publishing disabled, skipping");
        Ok(false)
      },
    }
  }

  /// Adds the paper's card to the board.
  pub async fn pin(&self, request: &PaperRequest) -> Result<Option<Pin>> {
    let Some(board) = &self.board else {
      debug!("No board configured, skipping");
      return Ok(None);
    };

    let space = board.client.space().await?;
    trace!("Board has {} cards and {} connections", space.cards.len(), space.connections.len());

    let placement =
      Placement::plan(&space, request, board.client.space_id(), &board.raw_base_url)?;
    if placement.parent.is_none() {
      if board.require_category {
        return Err(ShelfError::CategoryNotFound(request.category().to_string()));
      }
      warn!(
        "No card matches category \"{}\", placing card without a parent",
        request.category()
      );
    }

    let card = board.client.create_card(&placement.card).await?;
    info!("Created card {}", card.id);

    let connection = match placement.connection_to(&card) {
      Some(new_connection) if board.connect => {
        let connection = board.client.create_connection(&new_connection).await?;
        info!("Connected {} to {}", new_connection.start_card_id, new_connection.end_card_id);
        Some(connection)
      },
      _ => None,
    };

    Ok(Some(Pin { card, parent: placement.parent, connection }))
  }
}

impl BoardStep {
  /// Builds the board step from its configuration.
  fn new(client: Client, config: &BoardConfig) -> Result<Self> {
    Ok(Self {
      client:           BoardClient::new(client, config)?,
      raw_base_url:     config.raw_base_url.clone(),
      connect:          config.connect,
      require_category: config.require_category,
    })
  }
}

#[cfg(test)]
mod tests {
  use std::sync::{Arc, Mutex};

  use serde_json::json;
  use wiremock::{
    matchers::{body_json, method, path},
    Mock, MockServer, ResponseTemplate,
  };

  use super::*;
  use crate::config::PublishConfig;

  const RAW: &str = "https://raw.githubusercontent.com/someone/papers/master";

  /// Publisher that records titles and optionally fails.
  #[derive(Clone, Default)]
  struct RecordingPublisher {
    titles: Arc<Mutex<Vec<String>>>,
    fail:   bool,
  }

  #[async_trait]
  impl Publisher for RecordingPublisher {
    async fn publish(&self, request: &PaperRequest) -> Result<()> {
      self.titles.lock().unwrap().push(request.title().to_string());
      if self.fail {
        return Err(ShelfError::Git {
          step:   "push".into(),
          code:   "exit status: 1".into(),
          stderr: "rejected".into(),
        });
      }
      Ok(())
    }
  }

  fn config(papers_dir: &Path, server: &MockServer) -> Config {
    Config::default()
      .with_papers_dir(papers_dir)
      .with_publish(PublishConfig { enabled: false, ..PublishConfig::default() })
      .with_board(Some(BoardConfig {
        api_url: server.uri(),
        space_id: "space-1".into(),
        token: "tok".into(),
        raw_base_url: RAW.into(),
        ..BoardConfig::default()
      }))
  }

  async fn mount_pdf(server: &MockServer) {
    Mock::given(method("GET"))
      .and(path("/paper.pdf"))
      .respond_with(ResponseTemplate::new(200).set_body_bytes(b"%PDF".to_vec()))
      .mount(server)
      .await;
  }

  async fn mount_space(server: &MockServer, space: serde_json::Value) {
    Mock::given(method("GET"))
      .and(path("/space/space-1"))
      .respond_with(ResponseTemplate::new(200).set_body_json(space))
      .mount(server)
      .await;
  }

  #[traced_test]
  #[tokio::test]
  async fn test_end_to_end_with_category_card() {
    let server = MockServer::start().await;
    mount_pdf(&server).await;
    mount_space(
      &server,
      json!({
        "id": "space-1",
        "cards": [{ "id": "c1", "name": "Robotics", "x": 5, "y": 5, "z": 0 }],
        "connections": []
      }),
    )
    .await;
    Mock::given(method("POST"))
      .and(path("/card"))
      .and(body_json(json!({
        "name": format!("[Legged Robots]({RAW}/legged-robots.pdf)"),
        "spaceId": "space-1",
        "parentId": "c1",
        "x": 15,
        "y": 15,
        "z": 0
      })))
      .respond_with(ResponseTemplate::new(200).set_body_json(json!({
        "id": "n1", "spaceId": "space-1", "parentId": "c1", "x": 15, "y": 15, "z": 0
      })))
      .expect(1)
      .mount(&server)
      .await;
    Mock::given(method("POST"))
      .and(path("/connection"))
      .and(body_json(json!({ "spaceId": "space-1", "startCardId": "c1", "endCardId": "n1" })))
      .respond_with(ResponseTemplate::new(200).set_body_json(json!({
        "id": "k1", "startCardId": "c1", "endCardId": "n1"
      })))
      .expect(1)
      .mount(&server)
      .await;

    let dir = tempdir().unwrap();
    let publisher = RecordingPublisher::default();
    let pipeline =
      Pipeline::from_config(config(dir.path(), &server)).unwrap().with_publisher(publisher.clone());
    let request = PaperRequest::new(
      format!("{}/paper.pdf", server.uri()),
      "Legged Robots",
      "robotics",
      "Miscellaneous",
    );

    let filing = pipeline.run(&request).await.unwrap();

    assert_eq!(filing.path, dir.path().join("legged-robots.pdf"));
    assert!(filing.path.exists());
    assert!(filing.published);
    assert_eq!(*publisher.titles.lock().unwrap(), vec!["Legged Robots".to_string()]);

    let pin = filing.pin.unwrap();
    assert_eq!(pin.card.id, "n1");
    assert_eq!(pin.card.parent_id.as_deref(), Some("c1"));
    assert_eq!((pin.card.x, pin.card.y, pin.card.z), (15, 15, 0));
    let connection = pin.connection.unwrap();
    assert_eq!(connection.connection_type_id, None);
    assert_eq!(connection.start_card_id, "c1");
  }

  #[traced_test]
  #[tokio::test]
  async fn test_missing_category_places_card_without_connection() {
    let server = MockServer::start().await;
    mount_pdf(&server).await;
    mount_space(&server, json!({ "id": "space-1", "cards": [], "connections": [] })).await;
    Mock::given(method("POST"))
      .and(path("/card"))
      .and(body_json(json!({
        "name": format!("[A]({RAW}/a.pdf)"),
        "spaceId": "space-1",
        "x": 10,
        "y": 10,
        "z": 0
      })))
      .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "n1" })))
      .expect(1)
      .mount(&server)
      .await;
    Mock::given(method("POST"))
      .and(path("/connection"))
      .respond_with(ResponseTemplate::new(200))
      .expect(0)
      .mount(&server)
      .await;

    let dir = tempdir().unwrap();
    let pipeline = Pipeline::from_config(config(dir.path(), &server)).unwrap();
    let request =
      PaperRequest::new(format!("{}/paper.pdf", server.uri()), "A", "Astronomy", "Misc");

    let pin = pipeline.run(&request).await.unwrap().pin.unwrap();
    assert!(pin.parent.is_none());
    assert!(pin.connection.is_none());
    assert!(logs_contain("No card matches category"));
  }

  #[traced_test]
  #[tokio::test]
  async fn test_required_category_fails_before_posting() {
    let server = MockServer::start().await;
    mount_pdf(&server).await;
    mount_space(&server, json!({ "id": "space-1" })).await;
    Mock::given(method("POST"))
      .respond_with(ResponseTemplate::new(200))
      .expect(0)
      .mount(&server)
      .await;

    let dir = tempdir().unwrap();
    let mut config = config(dir.path(), &server);
    if let Some(board) = config.board.as_mut() {
      board.require_category = true;
    }
    let pipeline = Pipeline::from_config(config).unwrap();
    let request = PaperRequest::new(format!("{}/paper.pdf", server.uri()), "A", "Nope", "Misc");

    match pipeline.run(&request).await.unwrap_err() {
      ShelfError::CategoryNotFound(category) => assert_eq!(category, "Nope"),
      e => panic!("unexpected error: {e:?}"),
    }
    assert!(!logs_contain("placing card without a parent"));
  }

  #[traced_test]
  #[tokio::test]
  async fn test_connect_disabled_posts_card_only() {
    let server = MockServer::start().await;
    mount_pdf(&server).await;
    mount_space(
      &server,
      json!({ "id": "space-1", "cards": [{ "id": "c1", "name": "#NLP", "x": 0, "y": 0, "z": 1 }] }),
    )
    .await;
    Mock::given(method("POST"))
      .and(path("/card"))
      .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "n1" })))
      .expect(1)
      .mount(&server)
      .await;
    Mock::given(method("POST"))
      .and(path("/connection"))
      .respond_with(ResponseTemplate::new(200))
      .expect(0)
      .mount(&server)
      .await;

    let dir = tempdir().unwrap();
    let mut config = config(dir.path(), &server);
    if let Some(board) = config.board.as_mut() {
      board.connect = false;
    }
    let pipeline = Pipeline::from_config(config).unwrap();
    let request = PaperRequest::new(format!("{}/paper.pdf", server.uri()), "A", "nlp", "Misc");

    let pin = pipeline.run(&request).await.unwrap().pin.unwrap();
    assert_eq!(pin.parent.map(|card| card.id), Some("c1".to_string()));
    assert!(pin.connection.is_none());
  }

  #[traced_test]
  #[tokio::test]
  async fn test_publish_failure_stops_before_board() {
    let server = MockServer::start().await;
    mount_pdf(&server).await;
    Mock::given(method("GET"))
      .and(path("/space/space-1"))
      .respond_with(ResponseTemplate::new(200))
      .expect(0)
      .mount(&server)
      .await;

    let dir = tempdir().unwrap();
    let publisher = RecordingPublisher { fail: true, ..RecordingPublisher::default() };
    let pipeline =
      Pipeline::from_config(config(dir.path(), &server)).unwrap().with_publisher(publisher);
    let request = PaperRequest::new(format!("{}/paper.pdf", server.uri()), "A", "", "Misc");

    assert!(matches!(pipeline.run(&request).await, Err(ShelfError::Git { .. })));
    assert!(dir.path().join("a.pdf").exists());
  }

  #[traced_test]
  #[tokio::test]
  async fn test_download_failure_stops_everything() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
      .and(path("/paper.pdf"))
      .respond_with(ResponseTemplate::new(404))
      .mount(&server)
      .await;

    let dir = tempdir().unwrap();
    let publisher = RecordingPublisher::default();
    let pipeline =
      Pipeline::from_config(config(dir.path(), &server)).unwrap().with_publisher(publisher.clone());
    let request = PaperRequest::new(format!("{}/paper.pdf", server.uri()), "A", "", "Misc");

    assert!(matches!(pipeline.run(&request).await, Err(ShelfError::DownloadStatus { .. })));
    assert!(publisher.titles.lock().unwrap().is_empty());
    assert!(!dir.path().join("a.pdf").exists());
  }

  #[traced_test]
  #[tokio::test]
  async fn test_connection_failure_keeps_card() {
    let server = MockServer::start().await;
    mount_pdf(&server).await;
    mount_space(&server, json!({ "id": "space-1", "cards": [{ "id": "c1", "name": "NLP" }] })).await;
    Mock::given(method("POST"))
      .and(path("/card"))
      .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "n1" })))
      .expect(1)
      .mount(&server)
      .await;
    Mock::given(method("POST"))
      .and(path("/connection"))
      .respond_with(ResponseTemplate::new(500))
      .expect(1)
      .mount(&server)
      .await;

    let dir = tempdir().unwrap();
    let pipeline = Pipeline::from_config(config(dir.path(), &server)).unwrap();
    let request = PaperRequest::new(format!("{}/paper.pdf", server.uri()), "A", "NLP", "Misc");

    match pipeline.run(&request).await.unwrap_err() {
      ShelfError::BoardStatus { endpoint, status } => {
        assert_eq!(endpoint, "/connection");
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
      },
      e => panic!("unexpected error: {e:?}"),
    }
  }

  #[tokio::test]
  async fn test_steps_follow_configuration() {
    let server = MockServer::start().await;
    let dir = tempdir().unwrap();

    let pipeline = Pipeline::from_config(config(dir.path(), &server)).unwrap();
    assert!(!pipeline.publishes());
    assert!(pipeline.pins());

    let pipeline = pipeline.with_publisher(RecordingPublisher::default()).without_board();
    assert!(pipeline.publishes());
    assert!(!pipeline.pins());
  }
}
