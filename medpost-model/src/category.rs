use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use crate::error::ModelError;

/// Searchable record kinds; each maps to its own backend search endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Category {
    Jobs,
    Facilities,
    Workers,
}

impl Category {
    pub const ALL: [Self; 3] = [Self::Jobs, Self::Facilities, Self::Workers];

    /// Resource segment of the category's REST collection.
    pub fn resource(self) -> &'static str {
        match self {
            Category::Jobs => "jobs",
            Category::Facilities => "facilities",
            Category::Workers => "workers",
        }
    }

    /// Whether results of this category can contain the viewer's own record.
    pub fn excludes_viewer(self) -> bool {
        matches!(self, Category::Facilities | Category::Workers)
    }

    /// Only worker search understands the endorsed-only filter.
    pub fn supports_endorsed_filter(self) -> bool {
        matches!(self, Category::Workers)
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Category::Jobs => write!(f, "Jobs"),
            Category::Facilities => write!(f, "Facilities"),
            Category::Workers => write!(f, "Workers"),
        }
    }
}

impl FromStr for Category {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "jobs" | "job" => Ok(Category::Jobs),
            "facilities" | "facility" => Ok(Category::Facilities),
            "workers" | "worker" => Ok(Category::Workers),
            _ => Err(ModelError::UnknownCategory(s.to_string())),
        }
    }
}

/// Account type of the signed-in viewer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum UserRole {
    Worker,
    Facility,
}

impl UserRole {
    /// Categories this role may search, in tab order. The first entry is the
    /// default category.
    pub fn allowed_categories(self) -> &'static [Category] {
        match self {
            UserRole::Worker => &[Category::Jobs, Category::Facilities],
            UserRole::Facility => &[Category::Facilities, Category::Workers],
        }
    }

    pub fn default_category(self) -> Category {
        self.allowed_categories()[0]
    }

    pub fn allows(self, category: Category) -> bool {
        self.allowed_categories().contains(&category)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            UserRole::Worker => "worker",
            UserRole::Facility => "facility",
        }
    }
}

impl Display for UserRole {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "worker" => Ok(UserRole::Worker),
            "facility" => Ok(UserRole::Facility),
            _ => Err(ModelError::UnknownRole(s.to_string())),
        }
    }
}
