//! Filter model for collection reads
//!
//! Request decoding hands us every field as an optional string. Parsing and
//! normalization happen here, once, so the query builder can take a
//! `SongFilter` as already valid and never reject it.

use serde::{Deserialize, Serialize};

use crate::core::verses::VerseRange;
use crate::error::{Result, SongLibError};

/// Page size used when the caller asks for fewer than one row.
pub const DEFAULT_LIMIT: i64 = 10;

/// Filter fields exactly as they arrived, before validation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RawFilter {
    pub id: Option<String>,
    #[serde(alias = "title")]
    pub song: Option<String>,
    pub group: Option<String>,
    pub date: Option<String>,
    pub verse: Option<String>,
    pub limit: Option<String>,
    pub offset: Option<String>,
}

/// Normalized equality filters plus page bounds.
///
/// `id == 0` and empty strings mean "not filtered on this field".
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SongFilter {
    pub id: i64,
    pub title: String,
    pub group: String,
    pub date: String,
    /// 1-based verse to keep in each returned song's text; 0 keeps the full text.
    pub verse: i64,
    pub limit: i64,
    pub offset: i64,
}

impl Default for SongFilter {
    fn default() -> Self {
        Self {
            id: 0,
            title: String::new(),
            group: String::new(),
            date: String::new(),
            verse: 0,
            limit: DEFAULT_LIMIT,
            offset: 0,
        }
    }
}

impl SongFilter {
    pub fn from_raw(raw: &RawFilter) -> Result<Self> {
        let id = parse_int("id", raw.id.as_deref())?;
        let verse = parse_int("verse", raw.verse.as_deref())?;
        let limit = parse_int("limit", raw.limit.as_deref())?;
        let offset = parse_int("offset", raw.offset.as_deref())?;

        let filter = Self {
            id,
            verse: verse.max(0),
            ..Self::default()
        };

        Ok(filter
            .with_title(raw.song.clone().unwrap_or_default())
            .with_group(raw.group.clone().unwrap_or_default())
            .with_date(raw.date.clone().unwrap_or_default())
            .with_page(limit, offset))
    }

    /// Filter matching exactly one song by id.
    pub fn by_id(id: i64) -> Self {
        Self {
            id,
            limit: 1,
            ..Default::default()
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.group = group.into();
        self
    }

    pub fn with_date(mut self, date: impl Into<String>) -> Self {
        self.date = date.into();
        self
    }

    pub fn with_page(mut self, limit: i64, offset: i64) -> Self {
        self.limit = normalize_limit(limit);
        self.offset = normalize_offset(offset);
        self
    }
}

/// Page bounds for a single-song verse read, as they arrived.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RawVerseRange {
    pub limit: Option<String>,
    pub offset: Option<String>,
}

impl RawVerseRange {
    pub fn normalize(&self) -> Result<VerseRange> {
        let limit = normalize_limit(parse_int("limit", self.limit.as_deref())?);
        let offset = normalize_offset(parse_int("offset", self.offset.as_deref())?);

        // Both are non-negative after normalization.
        Ok(VerseRange::new(limit as usize, offset as usize))
    }
}

pub fn normalize_limit(limit: i64) -> i64 {
    if limit < 1 {
        DEFAULT_LIMIT
    } else {
        limit
    }
}

pub fn normalize_offset(offset: i64) -> i64 {
    offset.max(0)
}

/// Absent or blank input is the zero sentinel; anything else must parse.
fn parse_int(field: &str, value: Option<&str>) -> Result<i64> {
    match value.map(str::trim) {
        None | Some("") => Ok(0),
        Some(v) => v
            .parse::<i64>()
            .map_err(|_| SongLibError::invalid_filter(field, v)),
    }
}
