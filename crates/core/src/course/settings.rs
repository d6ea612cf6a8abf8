//! Course settings that drive catalog visibility and enrollment.

use serde::{Deserialize, Serialize};

use crate::assets::key::CourseKey;
use crate::types::Timestamp;

/// Prefix marking an enrollment domain backed by an external identity provider.
pub const SHIB_DOMAIN_PREFIX: &str = "shib:";

/// Mode slug whose price puts a course behind the shopping cart.
pub const HONOR_MODE: &str = "honor";

/// Who may see the course's about page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CatalogVisibility {
    /// Listed in the catalog and about page visible.
    #[default]
    Both,
    /// Not listed, about page visible.
    About,
    /// Hidden from everyone but staff.
    None,
}

/// A purchasable enrollment mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseMode {
    pub slug: String,
    pub display_name: String,
    /// Whole currency units.
    pub min_price: i64,
    pub currency: String,
}

impl CourseMode {
    pub fn honor(min_price: i64) -> Self {
        Self {
            slug: HONOR_MODE.to_string(),
            display_name: "honor cert".to_string(),
            min_price,
            currency: "usd".to_string(),
        }
    }

    /// Price as shown to learners, e.g. `$10`.
    pub fn formatted_price(&self) -> String {
        match self.currency.to_lowercase().as_str() {
            "usd" => format!("${}", self.min_price),
            other => format!("{} {}", self.min_price, other.to_uppercase()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseSettings {
    pub key: CourseKey,
    pub display_name: String,
    /// Overrides the course number shown to learners.
    #[serde(default)]
    pub display_coursenumber: Option<String>,
    #[serde(default)]
    pub catalog_visibility: CatalogVisibility,
    #[serde(default)]
    pub invitation_only: bool,
    #[serde(default)]
    pub enrollment_start: Option<Timestamp>,
    #[serde(default)]
    pub enrollment_end: Option<Timestamp>,
    #[serde(default)]
    pub max_student_enrollments_allowed: Option<u64>,
    #[serde(default)]
    pub modes: Vec<CourseMode>,
    #[serde(default)]
    pub enrollment_domain: Option<String>,
    #[serde(default)]
    pub prerequisites: Vec<CourseKey>,
    /// About page overview, already-rendered HTML.
    #[serde(default)]
    pub overview: String,
}

impl CourseSettings {
    pub fn new(key: CourseKey, display_name: &str) -> Self {
        Self {
            key,
            display_name: display_name.to_string(),
            display_coursenumber: None,
            catalog_visibility: CatalogVisibility::default(),
            invitation_only: false,
            enrollment_start: None,
            enrollment_end: None,
            max_student_enrollments_allowed: None,
            modes: Vec::new(),
            enrollment_domain: None,
            prerequisites: Vec::new(),
            overview: String::new(),
        }
    }

    /// Course number shown to learners.
    pub fn display_number(&self) -> &str {
        self.display_coursenumber
            .as_deref()
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| self.key.course())
    }

    /// The honor mode with a positive price, if the course is sold.
    pub fn paid_mode(&self) -> Option<&CourseMode> {
        self.modes
            .iter()
            .find(|m| m.slug == HONOR_MODE && m.min_price > 0)
    }

    /// Whether `now` falls inside the enrollment window. Unset bounds are open.
    pub fn enrollment_open(&self, now: Timestamp) -> bool {
        let started = self.enrollment_start.map_or(true, |start| start <= now);
        let not_ended = self.enrollment_end.map_or(true, |end| now <= end);
        started && not_ended
    }

    pub fn is_shib_course(&self) -> bool {
        self.enrollment_domain
            .as_deref()
            .is_some_and(|d| d.starts_with(SHIB_DOMAIN_PREFIX))
    }
}
