#![forbid(unsafe_code)]
#![deny(
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]
//! Shared HTTP DTOs for the Microflix gateway.
//!
//! These types are re-used by the web UI and the CLI for request/response
//! encoding so both surfaces agree on the wire contract of the movie, rating
//! and user services. Field names follow the backend's camelCase JSON.

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;
use uuid::Uuid;

pub mod pagination;

pub use pagination::{PageSlot, window};

/// Identity returned by a successful login or registration.
///
/// This is the record persisted by the session store; the token is a signed
/// JWT issued by the user service.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SessionRecord {
    /// Bearer token attached to authenticated calls.
    pub token: String,
    /// Account email address.
    pub email: String,
    /// Name shown in the header once signed in.
    pub display_name: String,
    /// Comma separated role list as issued by the user service.
    pub roles: String,
}

impl SessionRecord {
    /// Whether the record carries a usable token.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        !self.token.trim().is_empty()
    }

    /// `Authorization` header value for this session.
    #[must_use]
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.token)
    }

    /// Individual role names, trimmed, with empty entries dropped.
    pub fn role_names(&self) -> impl Iterator<Item = &str> {
        self.roles
            .split(',')
            .map(str::trim)
            .filter(|role| !role.is_empty())
    }
}

/// Login/registration responses share the session record shape.
pub type AuthResponse = SessionRecord;

/// Credentials submitted to the login endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoginRequest {
    /// Account email address.
    pub email: String,
    /// Plain-text password (sent over TLS to the gateway).
    pub password: String,
}

/// Payload submitted to the registration endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    /// Account email address.
    pub email: String,
    /// Plain-text password.
    pub password: String,
    /// Public display name.
    pub display_name: String,
}

/// Profile of the signed-in user as reported by `/users/me`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    /// Stable user identifier.
    pub id: Uuid,
    /// Account email address.
    pub email: String,
    /// Public display name.
    pub display_name: String,
    /// Granted roles.
    #[serde(default)]
    pub roles: Vec<String>,
}

/// Partial profile update (only the display name is mutable).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    /// New display name.
    pub display_name: String,
}

/// Password rotation request for the signed-in user.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    /// Current password, verified by the backend.
    pub old_password: String,
    /// Replacement password.
    pub new_password: String,
}

/// RFC9457-style problem document returned by the backend on failure.
///
/// Every attribute is optional. Fields the client does not know about are
/// kept in [`ProblemDetails::extensions`] so nothing is lost when the payload
/// is logged or re-serialised.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProblemDetails {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    /// URI reference identifying the problem type.
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Short, human-readable summary of the issue.
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// HTTP status code echoed by the backend.
    pub status: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Detailed diagnostic message when available.
    pub detail: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// URI reference for this specific occurrence.
    pub instance: Option<String>,
    #[serde(flatten)]
    /// Extension members (for example `path` or `timestamp`).
    pub extensions: Map<String, Value>,
}

impl ProblemDetails {
    /// Interpret an arbitrary JSON body as a problem document.
    ///
    /// Objects whose well-known members have unexpected types are still
    /// accepted: members that cannot be read are kept as extensions.
    /// Non-object bodies are not problem documents and yield `None`.
    #[must_use]
    pub fn from_json(body: &Value) -> Option<Self> {
        let Value::Object(map) = body else {
            return None;
        };
        if let Ok(problem) = serde_json::from_value::<Self>(body.clone()) {
            return Some(problem);
        }

        let mut extensions = map.clone();
        let mut take_text = |key: &str| {
            let text = extensions.get(key)?.as_str()?.to_string();
            extensions.remove(key);
            Some(text)
        };
        let kind = take_text("type");
        let title = take_text("title");
        let detail = take_text("detail");
        let instance = take_text("instance");
        let status = extensions
            .get("status")
            .and_then(Value::as_u64)
            .and_then(|status| u16::try_from(status).ok());
        if status.is_some() {
            extensions.remove("status");
        }
        Some(Self {
            kind,
            title,
            status,
            detail,
            instance,
            extensions,
        })
    }

    /// Best short message: title first, then detail.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        non_blank(self.title.as_deref()).or_else(|| non_blank(self.detail.as_deref()))
    }

    /// Look up an extension member by name.
    #[must_use]
    pub fn extension(&self, key: &str) -> Option<&Value> {
        self.extensions.get(key)
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|text| !text.trim().is_empty())
}

/// Catalog entry returned by the movie service.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Movie {
    /// Catalog identifier.
    pub id: i64,
    /// Display title.
    pub title: String,
    #[serde(default)]
    /// Synopsis.
    pub overview: Option<String>,
    #[serde(default)]
    /// Year of first release.
    pub release_year: Option<i32>,
    #[serde(default)]
    /// Poster image URL.
    pub poster_url: Option<String>,
    #[serde(default)]
    /// Backdrop image URL.
    pub backdrop_url: Option<String>,
    #[serde(default)]
    /// Genre names.
    pub genres: Vec<String>,
}

/// Spring-style page envelope used by list endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    /// Items on this page.
    pub content: Vec<T>,
    /// Total number of items across all pages.
    pub total_elements: u64,
    /// Total number of pages.
    pub total_pages: u32,
    /// Zero-based index of this page.
    pub number: u32,
    /// Requested page size.
    pub size: u32,
}

impl<T> Page<T> {
    /// Whether a following page exists.
    #[must_use]
    pub const fn has_next(&self) -> bool {
        self.number.saturating_add(1) < self.total_pages
    }

    /// Whether a preceding page exists.
    #[must_use]
    pub const fn has_previous(&self) -> bool {
        self.number > 0
    }
}

/// Sort keys understood by the movie search endpoint.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum MovieSort {
    /// Most recently added first.
    #[default]
    CreatedDesc,
    /// Alphabetical by title.
    TitleAsc,
    /// Newest release year first.
    YearDesc,
}

impl MovieSort {
    /// Wire value sent as the `sort` query parameter.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CreatedDesc => "created_desc",
            Self::TitleAsc => "title_asc",
            Self::YearDesc => "year_desc",
        }
    }

    /// All supported sort keys, in menu order.
    #[must_use]
    pub const fn all() -> [Self; 3] {
        [Self::CreatedDesc, Self::TitleAsc, Self::YearDesc]
    }
}

impl Display for MovieSort {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl FromStr for MovieSort {
    type Err = UnknownSort;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::all()
            .into_iter()
            .find(|sort| sort.as_str().eq_ignore_ascii_case(value.trim()))
            .ok_or_else(|| UnknownSort(value.to_string()))
    }
}

/// Error returned when parsing an unsupported sort key.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown sort key '{0}'")]
pub struct UnknownSort(pub String);

/// Default page size used by the movie search endpoint.
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Filter, sort and paging parameters for the movie search endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovieQuery {
    /// Case-insensitive title search.
    pub query: Option<String>,
    /// Exact genre name.
    pub genre: Option<String>,
    /// Release year.
    pub year: Option<i32>,
    /// Sort key.
    pub sort: MovieSort,
    /// Zero-based page index.
    pub page: u32,
    /// Page size.
    pub size: u32,
}

impl Default for MovieQuery {
    fn default() -> Self {
        Self {
            query: None,
            genre: None,
            year: None,
            sort: MovieSort::default(),
            page: 0,
            size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl MovieQuery {
    /// Query for a single page with default filters.
    #[must_use]
    pub fn page(page: u32, size: u32) -> Self {
        Self {
            page,
            size,
            ..Self::default()
        }
    }

    /// Query parameters in wire order; blank text filters are omitted.
    #[must_use]
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::with_capacity(6);
        if let Some(query) = self.query.as_deref().filter(|q| !q.trim().is_empty()) {
            pairs.push(("query", query.trim().to_string()));
        }
        if let Some(genre) = self.genre.as_deref().filter(|g| !g.trim().is_empty()) {
            pairs.push(("genre", genre.trim().to_string()));
        }
        if let Some(year) = self.year {
            pairs.push(("year", year.to_string()));
        }
        pairs.push(("sort", self.sort.as_str().to_string()));
        pairs.push(("page", self.page.to_string()));
        pairs.push(("size", self.size.to_string()));
        pairs
    }
}

/// Public rating aggregate for a movie.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RatingSummary {
    /// Movie the summary belongs to.
    pub movie_id: i64,
    /// Mean rating, absent when nobody has rated the movie.
    #[serde(default)]
    pub average: Option<f64>,
    /// Number of ratings.
    pub count: u64,
}

/// A single user's rating of a movie.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Rating {
    /// Rating identifier.
    pub id: i64,
    /// Author of the rating.
    pub user_id: Uuid,
    /// Rated movie.
    pub movie_id: i64,
    /// Score on the 1.0 to 10.0 scale; fractional values are allowed.
    pub rate: f64,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Body for creating (upserting) or updating a rating.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RatingRequest {
    /// Movie being rated.
    pub movie_id: i64,
    /// Validated score.
    pub rate: RatingValue,
}

/// Lowest accepted rating.
pub const MIN_RATING: f64 = 1.0;
/// Highest accepted rating.
pub const MAX_RATING: f64 = 10.0;

/// Rating score validated to lie within [`MIN_RATING`]..=[`MAX_RATING`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, PartialOrd)]
#[serde(try_from = "f64", into = "f64")]
pub struct RatingValue(f64);

impl RatingValue {
    /// Validate a raw score.
    ///
    /// # Errors
    /// Returns [`RatingValueError`] when the value is not a finite number in range.
    pub fn new(value: f64) -> Result<Self, RatingValueError> {
        if !value.is_finite() {
            return Err(RatingValueError::NotANumber);
        }
        if !(MIN_RATING..=MAX_RATING).contains(&value) {
            return Err(RatingValueError::OutOfRange { value });
        }
        Ok(Self(value))
    }

    /// Raw score.
    #[must_use]
    pub const fn get(self) -> f64 {
        self.0
    }
}

impl TryFrom<f64> for RatingValue {
    type Error = RatingValueError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<RatingValue> for f64 {
    fn from(value: RatingValue) -> Self {
        value.0
    }
}

impl FromStr for RatingValue {
    type Err = RatingValueError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let parsed = value
            .trim()
            .parse::<f64>()
            .map_err(|_| RatingValueError::NotANumber)?;
        Self::new(parsed)
    }
}

impl Display for RatingValue {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        write!(formatter, "{:.1}", self.0)
    }
}

/// Reasons a rating score is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum RatingValueError {
    /// Input was not a finite number.
    #[error("Please enter a number between 1.0 and 10.0.")]
    NotANumber,
    /// Number fell outside the accepted scale.
    #[error("Rating must be between 1.0 and 10.0.")]
    OutOfRange {
        /// Offending value.
        value: f64,
    },
}


/// Engagement type for watchlist entries.
pub const ENGAGEMENT_WATCHLIST: &str = "WATCHLIST";

/// One entry in a user's engagement list (currently only the watchlist).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct EngagementItem {
    /// Owner of the entry.
    pub user_id: Uuid,
    /// Movie the entry refers to.
    pub movie_id: i64,
    /// Engagement type, kept verbatim.
    #[serde(rename = "type")]
    pub kind: String,
    /// When the movie was added.
    pub added_at: DateTime<Utc>,
}

impl EngagementItem {
    /// Whether this entry is a watchlist membership.
    #[must_use]
    pub fn is_watchlist(&self) -> bool {
        self.kind.eq_ignore_ascii_case(ENGAGEMENT_WATCHLIST)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn session_record_uses_camel_case_wire_names() {
        let record: SessionRecord = serde_json::from_value(json!({
            "token": "jwt",
            "email": "ada@example.com",
            "displayName": "Ada",
            "roles": "USER, ADMIN"
        }))
        .expect("session record");
        assert_eq!(record.display_name, "Ada");
        assert!(record.is_authenticated());
        assert_eq!(record.bearer(), "Bearer jwt");
        assert_eq!(record.role_names().collect::<Vec<_>>(), vec!["USER", "ADMIN"]);
    }

    #[test]
    fn blank_token_is_not_authenticated() {
        let record = SessionRecord {
            token: "  ".to_string(),
            email: String::new(),
            display_name: String::new(),
            roles: String::new(),
        };
        assert!(!record.is_authenticated());
    }

    #[test]
    fn problem_details_keeps_extension_members() {
        let body = json!({
            "type": "about:blank",
            "title": "Not Found",
            "status": 404,
            "path": "/api/v1/movies/9"
        });
        let problem = ProblemDetails::from_json(&body).expect("problem");
        assert_eq!(problem.title.as_deref(), Some("Not Found"));
        assert_eq!(problem.status, Some(404));
        assert_eq!(problem.extension("path"), Some(&json!("/api/v1/movies/9")));
        assert_eq!(serde_json::to_value(&problem).expect("serialize"), body);
    }

    #[test]
    fn problem_details_tolerates_unexpected_member_types() {
        let body = json!({ "status": "teapot", "title": "Conflict", "error": "boom" });
        let problem = ProblemDetails::from_json(&body).expect("problem");
        assert_eq!(problem.status, None);
        assert_eq!(problem.title.as_deref(), Some("Conflict"));
        assert_eq!(problem.extension("status"), Some(&json!("teapot")));
        assert_eq!(problem.extension("error"), Some(&json!("boom")));
        assert!(ProblemDetails::from_json(&json!("plain")).is_none());
    }

    #[test]
    fn problem_message_prefers_title_over_detail() {
        let problem = ProblemDetails {
            title: Some(" ".to_string()),
            detail: Some("rating not found".to_string()),
            ..ProblemDetails::default()
        };
        assert_eq!(problem.message(), Some("rating not found"));
    }

    #[test]
    fn movie_query_omits_blank_filters() {
        let query = MovieQuery {
            query: Some("  ".to_string()),
            genre: Some("Action".to_string()),
            year: Some(2010),
            sort: MovieSort::TitleAsc,
            page: 2,
            size: 12,
        };
        assert_eq!(
            query.to_pairs(),
            vec![
                ("genre", "Action".to_string()),
                ("year", "2010".to_string()),
                ("sort", "title_asc".to_string()),
                ("page", "2".to_string()),
                ("size", "12".to_string()),
            ]
        );
    }

    #[test]
    fn movie_sort_parses_case_insensitively() {
        assert_eq!("YEAR_DESC".parse::<MovieSort>(), Ok(MovieSort::YearDesc));
        assert!("newest".parse::<MovieSort>().is_err());
    }

    #[test]
    fn parse_errors_render_user_facing_messages() {
        let sort = "newest".parse::<MovieSort>().unwrap_err();
        assert_eq!(sort.to_string(), "unknown sort key 'newest'");
        assert_eq!(
            RatingValueError::OutOfRange { value: 11.0 }.to_string(),
            "Rating must be between 1.0 and 10.0."
        );
        let boxed: Box<dyn std::error::Error> = Box::new(RatingValueError::NotANumber);
        assert_eq!(boxed.to_string(), "Please enter a number between 1.0 and 10.0.");
    }

    #[test]
    fn rating_value_enforces_scale() {
        assert!(RatingValue::new(8.5).is_ok());
        assert_eq!(
            RatingValue::new(0.5),
            Err(RatingValueError::OutOfRange { value: 0.5 })
        );
        assert_eq!("abc".parse::<RatingValue>(), Err(RatingValueError::NotANumber));
        assert_eq!(RatingValue::new(f64::NAN), Err(RatingValueError::NotANumber));
        assert_eq!(
            " 8.5 ".parse::<RatingValue>().map(|value| value.to_string()),
            Ok("8.5".to_string())
        );
    }

    #[test]
    fn rating_request_serializes_plain_number() {
        let request = RatingRequest {
            movie_id: 7,
            rate: RatingValue::new(8.5).expect("valid"),
        };
        assert_eq!(
            serde_json::to_value(request).expect("serialize"),
            json!({ "movieId": 7, "rate": 8.5 })
        );
    }

    #[test]
    fn page_navigation_flags() {
        let page = Page::<Movie> {
            content: Vec::new(),
            total_elements: 40,
            total_pages: 2,
            number: 1,
            size: 20,
        };
        assert!(page.has_previous());
        assert!(!page.has_next());
    }

    #[test]
    fn engagement_item_parses_offset_timestamps() {
        let item: EngagementItem = serde_json::from_value(json!({
            "userId": "5b0c8c8e-8f0a-4a59-9a53-2c1f2f1f0c01",
            "movieId": 3,
            "type": "WATCHLIST",
            "addedAt": "2025-01-02T10:00:00+02:00"
        }))
        .expect("engagement item");
        assert!(item.is_watchlist());
        assert_eq!(item.added_at.to_rfc3339(), "2025-01-02T08:00:00+00:00");
    }
}
