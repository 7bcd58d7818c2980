//! Session area record
//!
//! The whole-record snapshot exchanged with the remote session service.

use serde::{Deserialize, Serialize};

use crate::error::SessionAreaError;
use crate::Result;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionAreaRecord {
    /// Identity assigned by the remote service
    pub id: String,
    /// Poster title, if one has been set
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Opaque image reference (data or URI), if an image is displayed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_contents: Option<String>,
    /// Aggregate star count
    pub stars: i64,
}

impl SessionAreaRecord {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: None,
            image_contents: None,
            stars: 0,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_image_contents(mut self, image_contents: impl Into<String>) -> Self {
        self.image_contents = Some(image_contents.into());
        self
    }

    pub fn with_stars(mut self, stars: i64) -> Self {
        self.stars = stars;
        self
    }

    /// Check the record is well-formed before it is applied anywhere
    pub fn validate(&self) -> Result<()> {
        if self.id.is_empty() {
            return Err(SessionAreaError::EmptyId);
        }
        if self.stars < 0 {
            return Err(SessionAreaError::NegativeStars(self.stars));
        }
        Ok(())
    }
}
