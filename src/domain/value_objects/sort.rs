use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Column a film listing can be ordered by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortField {
    Title,
    #[default]
    Rating,
    ReleaseDate,
}

impl SortField {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Rating => "rating",
            Self::ReleaseDate => "release_date",
        }
    }
}

impl FromStr for SortField {
    type Err = SortParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "title" => Ok(Self::Title),
            "rating" => Ok(Self::Rating),
            "release_date" => Ok(Self::ReleaseDate),
            _ => Err(SortParseError::Field),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    #[must_use]
    pub fn as_sql(&self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

impl FromStr for SortOrder {
    type Err = SortParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            _ => Err(SortParseError::Order),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SortParseError {
    #[error("Invalid sort by field")]
    Field,
    #[error("Invalid sort order")]
    Order,
}

/// Ordering for film listings; defaults to highest rated first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FilmSort {
    pub field: SortField,
    pub order: SortOrder,
}

impl FilmSort {
    /// Parse raw query values. Missing or empty values fall back to the
    /// default; the order is checked before the field.
    pub fn parse(sort_by: Option<&str>, order: Option<&str>) -> Result<Self, SortParseError> {
        let order = match order.filter(|o| !o.is_empty()) {
            Some(o) => o.parse()?,
            None => SortOrder::default(),
        };
        let field = match sort_by.filter(|s| !s.is_empty()) {
            Some(s) => s.parse()?,
            None => SortField::default(),
        };
        Ok(Self { field, order })
    }
}

impl fmt::Display for FilmSort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.field.as_str(), self.order.as_sql().to_lowercase())
    }
}
