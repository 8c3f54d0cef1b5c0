//! Query model for the asset listing.
//!
//! Turns raw query-string pairs into a validated [`AssetListQuery`]: free-text
//! search, multi-value status/type filters, owner filter, the tri-state
//! `assigned` filter, and a sort key taken from a fixed whitelist. The
//! repository maps each [`SortKey`] to its column; nothing from the request
//! reaches SQL except as a bound parameter.

use crate::error::CoreError;
use crate::types::DbId;

/// Upper bound for an explicit `limit`.
pub const MAX_LIMIT: i64 = 500;

// ---------------------------------------------------------------------------
// Sorting
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    #[default]
    AssetTag,
    Status,
    Type,
    Owner,
    Location,
    Updated,
}

impl SortKey {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "asset_tag" => Some(SortKey::AssetTag),
            "status" => Some(SortKey::Status),
            "type" => Some(SortKey::Type),
            "owner" => Some(SortKey::Owner),
            "location" => Some(SortKey::Location),
            "updated" => Some(SortKey::Updated),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_sql(self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

/// Primary sort for the listing. Asset tag ascending is always appended as
/// the tie-break.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AssetSort {
    pub key: SortKey,
    pub direction: SortDirection,
}

impl AssetSort {
    /// Parse a `sort` parameter such as `status` or `-updated`.
    ///
    /// A leading `-` selects descending order. Unrecognised keys fall back to
    /// the default (`asset_tag` ascending), including their direction.
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        let (name, direction) = match raw.strip_prefix('-') {
            Some(rest) => (rest, SortDirection::Desc),
            None => (raw, SortDirection::Asc),
        };
        match SortKey::from_name(name) {
            Some(key) => AssetSort { key, direction },
            None => AssetSort::default(),
        }
    }
}

// ---------------------------------------------------------------------------
// Filters
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssetFilter {
    /// Case-insensitive substring over tag, serial number, model, description.
    pub search: Option<String>,
    /// Status names; empty means no filter.
    pub statuses: Vec<String>,
    /// Type names; empty means no filter.
    pub types: Vec<String>,
    pub owner_org_unit_id: Option<DbId>,
    /// `Some(true)`: has an open assignment. `Some(false)`: has none.
    pub assigned: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssetListQuery {
    pub filter: AssetFilter,
    pub sort: AssetSort,
    pub limit: Option<i64>,
    pub offset: i64,
}

impl AssetListQuery {
    /// Build a query from decoded query-string pairs.
    ///
    /// `status` and `type` may repeat and are also accepted in their `[]`
    /// form. Unknown parameters are ignored. Malformed numbers or booleans
    /// are rejected.
    pub fn from_pairs<I, K, V>(pairs: I) -> Result<Self, CoreError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut query = AssetListQuery::default();

        for (key, value) in pairs {
            let value = value.as_ref().trim();
            match key.as_ref() {
                "q" => {
                    query.filter.search = (!value.is_empty()).then(|| value.to_string());
                }
                "status" | "status[]" => {
                    if !value.is_empty() {
                        query.filter.statuses.push(value.to_string());
                    }
                }
                "type" | "type[]" => {
                    if !value.is_empty() {
                        query.filter.types.push(value.to_string());
                    }
                }
                "owner_org_unit_id" => {
                    if !value.is_empty() {
                        query.filter.owner_org_unit_id =
                            Some(parse_number("owner_org_unit_id", value)?);
                    }
                }
                "assigned" => {
                    if !value.is_empty() {
                        query.filter.assigned = Some(parse_bool(value).ok_or_else(|| {
                            CoreError::Validation(format!(
                                "assigned must be a boolean, got '{value}'"
                            ))
                        })?);
                    }
                }
                "sort" => query.sort = AssetSort::parse(value),
                "limit" => {
                    if !value.is_empty() {
                        let limit: i64 = parse_number("limit", value)?;
                        query.limit = Some(limit.clamp(1, MAX_LIMIT));
                    }
                }
                "offset" => {
                    if !value.is_empty() {
                        let offset: i64 = parse_number("offset", value)?;
                        query.offset = offset.max(0);
                    }
                }
                _ => {}
            }
        }

        Ok(query)
    }
}

fn parse_number(name: &str, value: &str) -> Result<i64, CoreError> {
    value
        .parse()
        .map_err(|_| CoreError::Validation(format!("{name} must be an integer, got '{value}'")))
}

/// Accepts `true/false`, `1/0`, `yes/no`, `on/off` (case-insensitive).
pub fn parse_bool(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Escape `\`, `%` and `_` so the text matches literally inside a LIKE
/// pattern using the default `\` escape character.
pub fn escape_like(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}
