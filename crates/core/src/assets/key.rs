//! Course and asset identifiers.
//!
//! A [`CourseKey`] is `org/course/run` (or `course-v1:org+course+run` in
//! URLs). An [`AssetKey`] is the `/c4x/{org}/{course}/{category}/{name}`
//! location used both as the asset id and as its download URL. The c4x form
//! carries no run, so two runs of the same course share an asset namespace.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::AssetError;

/// Category for uploaded course assets.
pub const ASSET_CATEGORY: &str = "asset";

/// Category for generated thumbnails.
pub const THUMBNAIL_CATEGORY: &str = "thumbnail";

/// Prefix of the URL-safe course key form.
const COURSE_V1_PREFIX: &str = "course-v1:";

/// Root segment of every asset location.
const C4X_ROOT: &str = "c4x";

// ---------------------------------------------------------------------------
// CourseKey
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CourseKey {
    org: String,
    course: String,
    run: String,
}

impl CourseKey {
    pub fn new(org: &str, course: &str, run: &str) -> Result<Self, AssetError> {
        let parts = [org, course, run];
        if parts.iter().any(|p| !is_valid_segment(p)) {
            return Err(AssetError::InvalidCourseKey(format!("{org}/{course}/{run}")));
        }
        Ok(Self {
            org: org.to_string(),
            course: course.to_string(),
            run: run.to_string(),
        })
    }

    pub fn org(&self) -> &str {
        &self.org
    }

    pub fn course(&self) -> &str {
        &self.course
    }

    pub fn run(&self) -> &str {
        &self.run
    }

    /// URL path segment form: `course-v1:org+course+run`.
    pub fn url_segment(&self) -> String {
        format!("{COURSE_V1_PREFIX}{}+{}+{}", self.org, self.course, self.run)
    }

    /// Build the location of a file in this course's namespace.
    pub fn make_asset_key(&self, category: &str, name: &str) -> AssetKey {
        AssetKey {
            org: self.org.clone(),
            course: self.course.clone(),
            category: category.to_string(),
            name: name.to_string(),
        }
    }
}

impl fmt::Display for CourseKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.org, self.course, self.run)
    }
}

impl FromStr for CourseKey {
    type Err = AssetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = match s.strip_prefix(COURSE_V1_PREFIX) {
            Some(rest) => rest.split('+').collect(),
            None => s.split('/').collect(),
        };
        match parts.as_slice() {
            [org, course, run] => {
                Self::new(org, course, run).map_err(|_| AssetError::InvalidCourseKey(s.into()))
            }
            _ => Err(AssetError::InvalidCourseKey(s.to_string())),
        }
    }
}

impl TryFrom<String> for CourseKey {
    type Error = AssetError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<CourseKey> for String {
    fn from(key: CourseKey) -> Self {
        key.to_string()
    }
}

// ---------------------------------------------------------------------------
// AssetKey
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AssetKey {
    org: String,
    course: String,
    category: String,
    name: String,
}

impl AssetKey {
    pub fn org(&self) -> &str {
        &self.org
    }

    pub fn course(&self) -> &str {
        &self.course
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Course-relative URL of the asset, identical to its string form.
    pub fn path(&self) -> String {
        self.to_string()
    }

    /// Location-independent path used inside course content.
    pub fn static_path(&self) -> String {
        format!("/static/{}", self.name)
    }
}

impl fmt::Display for AssetKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "/{C4X_ROOT}/{}/{}/{}/{}",
            self.org, self.course, self.category, self.name
        )
    }
}

impl FromStr for AssetKey {
    type Err = AssetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || AssetError::InvalidAssetKey(s.to_string());
        let rest = s.strip_prefix('/').unwrap_or(s);
        let parts: Vec<&str> = rest.splitn(5, '/').collect();
        match parts.as_slice() {
            [root, org, course, category, name]
                if *root == C4X_ROOT
                    && [org, course, category].iter().all(|p| is_valid_segment(p))
                    && !name.is_empty()
                    && !name.contains('/') =>
            {
                Ok(Self {
                    org: org.to_string(),
                    course: course.to_string(),
                    category: category.to_string(),
                    name: name.to_string(),
                })
            }
            _ => Err(invalid()),
        }
    }
}

impl TryFrom<String> for AssetKey {
    type Error = AssetError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<AssetKey> for String {
    fn from(key: AssetKey) -> Self {
        key.to_string()
    }
}

fn is_valid_segment(segment: &str) -> bool {
    !segment.is_empty() && !segment.contains(['/', '+', ':'])
}
