//! Category model
//!
//! Categories without an owner are system categories shared by every user.
//! Users can add their own categories next to them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{CategoryId, UserId};

/// An expense category
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,

    /// Icon name or emoji
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,

    /// Display colour as `#RRGGBB`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color_hex: Option<String>,

    /// Lower values are listed first
    #[serde(default)]
    pub sort_order: i32,

    /// Owner, or `None` for a system category
    #[serde(default)]
    pub user_id: Option<UserId>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Category {
    /// Create a new system category
    pub fn system(name: impl Into<String>, sort_order: i32) -> Self {
        let now = Utc::now();
        Self {
            id: CategoryId::new(),
            name: name.into(),
            icon: None,
            color_hex: None,
            sort_order,
            user_id: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Create a new category owned by a user
    pub fn owned(name: impl Into<String>, user_id: UserId) -> Self {
        let mut category = Self::system(name, 0);
        category.user_id = Some(user_id);
        category
    }

    /// Set the icon
    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    /// Set the colour
    pub fn with_color(mut self, color_hex: impl Into<String>) -> Self {
        self.color_hex = Some(color_hex.into());
        self
    }

    /// Whether this is a shared system category
    pub fn is_system(&self) -> bool {
        self.user_id.is_none()
    }

    /// System categories are visible to everyone, custom ones to their owner
    pub fn is_visible_to(&self, user: &UserId) -> bool {
        match &self.user_id {
            None => true,
            Some(owner) => owner == user,
        }
    }

    /// Whether the given user may modify this category
    pub fn is_owned_by(&self, user: &UserId) -> bool {
        self.user_id.as_ref() == Some(user)
    }

    /// Name must be 1 to 50 characters, colour `#RRGGBB` when present
    pub fn validate(&self) -> Result<(), CategoryValidationError> {
        if self.name.trim().is_empty() {
            return Err(CategoryValidationError::EmptyName);
        }

        if self.name.len() > 50 {
            return Err(CategoryValidationError::NameTooLong(self.name.len()));
        }

        if let Some(color) = &self.color_hex {
            let valid = color.len() == 7
                && color.starts_with('#')
                && color[1..].chars().all(|c| c.is_ascii_hexdigit());
            if !valid {
                return Err(CategoryValidationError::InvalidColor(color.clone()));
            }
        }

        Ok(())
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Categories seeded on first run, in display order
pub const DEFAULT_CATEGORIES: &[(&str, &str, &str)] = &[
    ("Food", "🍽", "#E4572E"),
    ("Transport", "🚆", "#17BEBB"),
    ("Lodging", "🏨", "#76B041"),
    ("Activities", "🎟", "#FFC914"),
    ("Shopping", "🛍", "#9B5DE5"),
    ("Other", "📦", "#7D7D7D"),
];

/// Validation errors for categories
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryValidationError {
    EmptyName,
    NameTooLong(usize),
    InvalidColor(String),
}

impl fmt::Display for CategoryValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Category name cannot be empty"),
            Self::NameTooLong(len) => {
                write!(f, "Category name too long ({} chars, max 50)", len)
            }
            Self::InvalidColor(color) => {
                write!(f, "Invalid colour '{}' (expected #RRGGBB)", color)
            }
        }
    }
}

impl std::error::Error for CategoryValidationError {}
