//! Request payloads and query parameters

use menu_core::domain::{NewMenu, UpdateMenu};
use serde::{de, Deserialize, Deserializer};
use uuid::Uuid;
use validator::Validate;

use crate::error::ApiError;

/// Create menu payload - POST /api/menus
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateMenuRequest {
    #[validate(length(min = 1, max = 255, message = "Menu name must be between 1 and 255 characters"))]
    pub name: String,

    #[serde(default, deserialize_with = "optional_uuid")]
    pub parent_id: Option<Uuid>,

    #[validate(range(min = 0, message = "Menu position cannot be negative"))]
    #[serde(default)]
    pub position: Option<i32>,
}

/// Partial update payload - PATCH /api/menus/{id}
///
/// `"parentId": null` (or `""`) moves the menu to the root level; omitting the key keeps the parent.
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMenuRequest {
    #[validate(length(min = 1, max = 255, message = "Menu name must be between 1 and 255 characters"))]
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default, deserialize_with = "present")]
    pub parent_id: Option<Option<Uuid>>,

    #[validate(range(min = 0, message = "Menu position cannot be negative"))]
    #[serde(default)]
    pub position: Option<i32>,
}

/// Reads a menu id where `null` and a blank string both mean "no parent".
fn optional_uuid<'de, D>(deserializer: D) -> Result<Option<Uuid>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)?.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(raw) => Uuid::parse_str(raw).map(Some).map_err(de::Error::custom),
    }
}

/// Marks a key that is present in the payload, even when it clears the parent.
fn present<'de, D>(deserializer: D) -> Result<Option<Option<Uuid>>, D::Error>
where
    D: Deserializer<'de>,
{
    optional_uuid(deserializer).map(Some)
}

impl From<CreateMenuRequest> for NewMenu {
    fn from(req: CreateMenuRequest) -> Self {
        NewMenu {
            name: req.name,
            parent_id: req.parent_id,
            position: req.position,
        }
    }
}

impl From<UpdateMenuRequest> for UpdateMenu {
    fn from(req: UpdateMenuRequest) -> Self {
        UpdateMenu {
            name: req.name,
            parent_id: req.parent_id,
            position: req.position,
        }
    }
}

/// `?depth=N` on read endpoints. Kept as text so malformed values get our error body.
#[derive(Debug, Default, Deserialize)]
pub struct DepthQuery {
    pub depth: Option<String>,
}

impl DepthQuery {
    /// `None` when absent or empty; rejects negative and non-numeric values.
    pub fn levels(&self) -> Result<Option<u32>, ApiError> {
        let raw = match self.depth.as_deref().map(str::trim) {
            None | Some("") => return Ok(None),
            Some(raw) => raw,
        };

        let depth: i64 = raw
            .parse()
            .map_err(|_| ApiError::BadRequest(format!("depth must be an integer, got '{}'", raw)))?;
        if depth < 0 {
            return Err(ApiError::BadRequest("depth cannot be negative".to_string()));
        }

        u32::try_from(depth)
            .map(Some)
            .map_err(|_| ApiError::BadRequest(format!("depth {} is too large", depth)))
    }
}

pub fn parse_menu_id(raw: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|_| ApiError::BadRequest(format!("Invalid menu id: {}", raw)))
}
