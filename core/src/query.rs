use chrono::{DateTime, NaiveDateTime, ParseError, Utc};

pub const DEFAULT_BASE_URL: &str = "https://www.space-track.org";

/// Microsecond-precision ISO-8601 layout the provider expects in predicates.
const PROVIDER_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f";

/// Builds provider URLs for a given base.
#[derive(Debug, Clone)]
pub struct QueryBuilder {
    base_url: String,
}

impl QueryBuilder {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Endpoint that accepts credentials and a query target in one form post.
    pub fn login_url(&self) -> String {
        format!("{}/ajaxauth/login", self.base_url)
    }

    /// Query for every public CDM with a TCA strictly after `now`, soonest first.
    ///
    /// The `>` comparator and the space in `TCA asc` are percent-encoded
    /// here; sub-microsecond precision in `now` is truncated.
    pub fn cdm_after(&self, now: DateTime<Utc>) -> String {
        format!(
            "{}/basicspacedata/query/class/cdm_public/TCA/%3E{}/orderby/TCA%20asc/emptyresult/show",
            self.base_url,
            format_provider_timestamp(now)
        )
    }
}

impl Default for QueryBuilder {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

pub fn format_provider_timestamp(instant: DateTime<Utc>) -> String {
    instant.format(PROVIDER_TIMESTAMP_FORMAT).to_string()
}

/// Parses a provider timestamp as UTC.
///
/// Accepts either `T` or a single space between date and time, with an
/// optional fractional second (`CREATED` uses the space form, `TCA` the `T`).
pub fn parse_provider_timestamp(text: &str) -> Result<DateTime<Utc>, ParseError> {
    let text = text.trim();
    NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S%.f"))
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn embedded_timestamp(query: &str) -> &str {
        let start = query.find("%3E").unwrap() + "%3E".len();
        let end = query.find("/orderby").unwrap();
        &query[start..end]
    }

    #[test]
    fn query_matches_provider_layout() {
        let now = Utc.with_ymd_and_hms(2022, 5, 19, 7, 20, 26).unwrap()
            + Duration::microseconds(595_000);
        let query = QueryBuilder::new("https://www.space-track.org").cdm_after(now);
        assert_eq!(
            query,
            "https://www.space-track.org/basicspacedata/query/class/cdm_public/TCA/%3E2022-05-19T07:20:26.595000/orderby/TCA%20asc/emptyresult/show"
        );
        assert!(!query.contains('>'));
        assert!(!query.contains(' '));
    }

    #[test]
    fn embedded_timestamp_parses_back_exactly() {
        let now = Utc.with_ymd_and_hms(2031, 12, 31, 23, 59, 59).unwrap()
            + Duration::microseconds(1);
        let query = QueryBuilder::default().cdm_after(now);
        let parsed = parse_provider_timestamp(embedded_timestamp(&query)).unwrap();
        assert_eq!(parsed, now);
    }

    #[test]
    fn sub_microsecond_precision_is_truncated() {
        let micros = Utc.with_ymd_and_hms(2024, 2, 29, 12, 0, 0).unwrap()
            + Duration::microseconds(123_456);
        let now = micros + Duration::nanoseconds(789);
        let query = QueryBuilder::default().cdm_after(now);
        assert_eq!(embedded_timestamp(&query), "2024-02-29T12:00:00.123456");
        assert_eq!(parse_provider_timestamp(embedded_timestamp(&query)).unwrap(), micros);
    }

    #[test]
    fn trailing_slash_on_base_is_ignored() {
        let builder = QueryBuilder::new("http://127.0.0.1:8080/");
        assert_eq!(builder.login_url(), "http://127.0.0.1:8080/ajaxauth/login");
    }

    #[test]
    fn parses_created_and_tca_layouts() {
        let created = parse_provider_timestamp("2022-04-29 00:45:12.000000").unwrap();
        assert_eq!(created, Utc.with_ymd_and_hms(2022, 4, 29, 0, 45, 12).unwrap());
        let tca = parse_provider_timestamp("2022-04-29T22:03:26.595000").unwrap();
        assert_eq!(
            tca,
            Utc.with_ymd_and_hms(2022, 4, 29, 22, 3, 26).unwrap() + Duration::milliseconds(595)
        );
        assert!(parse_provider_timestamp("29/04/2022").is_err());
    }
}
