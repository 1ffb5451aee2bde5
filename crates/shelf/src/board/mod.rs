//! Kinopio board types and card placement.
//!
//! A board ("space") is fetched fresh on every run and only read. Filing a
//! paper adds one card next to the card whose name matches the paper's
//! category, and optionally a connection from that category card to the new
//! one.
//!
//! # Examples
//!
//! ```
//! use shelf::{
//!   board::{Card, Placement, Space},
//!   request::DEFAULT_CATEGORY,
//!   PaperRequest,
//! };
//!
//! let space = Space {
//!   cards: vec![Card { id: "c1".into(), name: "#Robotics".into(), x: 5, y: 5, ..Card::default() }],
//!   ..Space::default()
//! };
//! let request = PaperRequest::new("u", "Legged Robots", "robotics", DEFAULT_CATEGORY);
//!
//! let placement =
//!   Placement::plan(&space, &request, "space", "https://example.com/papers/master").unwrap();
//! assert_eq!(placement.card.parent_id.as_deref(), Some("c1"));
//! assert_eq!((placement.card.x, placement.card.y), (15, 15));
//! ```

use super::*;

pub mod client;

pub use self::client::{AuthScheme, BoardClient};

/// Horizontal and vertical distance of a new card from its category card.
pub const CARD_OFFSET: (i64, i64) = (10, 10);

/// Snapshot of a board as returned by `GET /space/{id}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Space {
  /// Board identifier
  pub id:          String,
  /// Board title
  pub name:        String,
  /// Every card currently on the board
  pub cards:       Vec<Card>,
  /// Every connection currently on the board
  pub connections: Vec<Connection>,
}

/// A card that exists on the board.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Card {
  /// Server-assigned identifier
  pub id:        String,
  /// Markdown label
  pub name:      String,
  /// Board the card belongs to
  pub space_id:  String,
  /// Card this one hangs off, if any
  pub parent_id: Option<String>,
  /// Horizontal position
  pub x:         i64,
  /// Vertical position
  pub y:         i64,
  /// Stacking depth
  pub z:         i64,
}

/// A connection that exists on the board.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Connection {
  /// Server-assigned identifier
  pub id:                 String,
  /// Style of the connection (color, label) shared between connections
  pub connection_type_id: Option<String>,
  /// Card the connection starts from
  pub start_card_id:      String,
  /// Card the connection points to
  pub end_card_id:        String,
}

/// Body of `POST /card`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCard {
  /// Markdown label
  pub name:      String,
  /// Board to create the card on
  pub space_id:  String,
  /// Category card, omitted when no category card was found
  #[serde(skip_serializing_if = "Option::is_none")]
  pub parent_id: Option<String>,
  /// Horizontal position
  pub x:         i64,
  /// Vertical position
  pub y:         i64,
  /// Stacking depth
  pub z:         i64,
}

/// Body of `POST /connection`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewConnection {
  /// Board to create the connection on
  pub space_id:           String,
  /// Style to reuse; the server picks one when omitted
  #[serde(skip_serializing_if = "Option::is_none")]
  pub connection_type_id: Option<String>,
  /// Category card
  pub start_card_id:      String,
  /// Newly created paper card
  pub end_card_id:        String,
}

impl Space {
  /// Finds the card whose name matches `category`.
  ///
  /// Names are compared after [`format::normalize_label`], so `#Robotics`
  /// matches `robotics`. The first match in board order wins.
  pub fn find_category(&self, category: &str) -> Option<&Card> {
    let wanted = format::normalize_label(category);
    self.cards.iter().find(|card| format::normalize_label(&card.name) == wanted)
  }

  /// Connection style already used by a connection leaving `card_id`.
  pub fn connection_type_from(&self, card_id: &str) -> Option<&str> {
    self
      .connections
      .iter()
      .filter(|connection| connection.start_card_id == card_id)
      .find_map(|connection| connection.connection_type_id.as_deref())
  }
}

/// Where and how a paper card goes on the board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placement {
  /// Card to create
  pub card:            NewCard,
  /// Category card the new card is attached to, if one matched
  pub parent:          Option<Card>,
  /// Connection style to reuse when connecting parent and card
  pub connection_type: Option<String>,
}

impl Placement {
  /// Plans the card for `request` on `space`.
  ///
  /// The label links to `raw_base_url/<filename>`. With a category card the new
  /// card sits at its position plus [`CARD_OFFSET`] at the same depth; without
  /// one it is placed as if the parent were at the origin.
  pub fn plan(
    space: &Space,
    request: &PaperRequest,
    space_id: &str,
    raw_base_url: &str,
  ) -> Result<Self> {
    let link = raw_url(raw_base_url, request.filename())?;
    let parent = space.find_category(request.category()).cloned();

    match &parent {
      Some(card) =>
        debug!("Category \"{}\" matched card {} ({})", request.category(), card.id, card.name),
      None => debug!("Category \"{}\" matched no card", request.category()),
    }

    let origin = parent.clone().unwrap_or_default();
    let card = NewCard {
      name:      format!("[{}]({})", request.title(), link),
      space_id:  space_id.to_string(),
      parent_id: parent.as_ref().map(|card| card.id.clone()),
      x:         origin.x + CARD_OFFSET.0,
      y:         origin.y + CARD_OFFSET.1,
      z:         origin.z,
    };
    let connection_type =
      parent.as_ref().and_then(|card| space.connection_type_from(&card.id)).map(str::to_string);

    Ok(Self { card, parent, connection_type })
  }

  /// Connection from the category card to `created`, if there is a category card.
  pub fn connection_to(&self, created: &Card) -> Option<NewConnection> {
    self.parent.as_ref().map(|parent| NewConnection {
      space_id:           self.card.space_id.clone(),
      connection_type_id: self.connection_type.clone(),
      start_card_id:      parent.id.clone(),
      end_card_id:        created.id.clone(),
    })
  }
}

/// Public URL of `filename` under `base`.
fn raw_url(base: &str, filename: &str) -> Result<Url> {
  let base = if base.ends_with('/') { Url::parse(base)? } else { Url::parse(&format!("{base}/"))? };
  Ok(base.join(filename)?)
}
