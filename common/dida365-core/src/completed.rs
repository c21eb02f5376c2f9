//! Completed-task queries
//!
//! Local wall-clock bounds are computed in the target timezone, converted to
//! UTC and sent as `"YYYY-MM-DD HH:MM:SS"` strings to
//! `GET /project/all/completed`. The boundary helpers are pure and take the
//! current instant as a parameter.

use chrono::{
    DateTime, Datelike, Duration, LocalResult, NaiveDate, NaiveDateTime, NaiveTime, Offset,
    TimeZone, Utc,
};
use chrono_tz::Tz;
use serde::Serialize;
use tracing::instrument;

use crate::error::{Dida365Error, Result};
use crate::transport::{ApiRequest, Backend, Dida365Client};
use crate::types::{Task, DEFAULT_TIMEZONE};

/// Upper bound on tasks returned by one query
pub const COMPLETED_LIMIT: u32 = 100;

/// Format of the `from` / `to` query parameters
pub const QUERY_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Resolve an IANA name, `None` meaning the default timezone
pub fn resolve_timezone(name: Option<&str>) -> Result<Tz> {
    let name = name.unwrap_or(DEFAULT_TIMEZONE);
    name.parse::<Tz>()
        .map_err(|_| Dida365Error::InvalidTimezone(name.to_string()))
}

/// `00:00:00.000` on `date`
pub fn start_of_day(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN)
}

/// `23:59:59.999` on `date`
pub fn end_of_day(date: NaiveDate) -> NaiveDateTime {
    start_of_day(date) + Duration::days(1) - Duration::milliseconds(1)
}

/// Sunday 00:00:00.000 through Saturday 23:59:59.999 of the week holding `date`
pub fn week_bounds(date: NaiveDate) -> (NaiveDateTime, NaiveDateTime) {
    let sunday = date - Duration::days(i64::from(date.weekday().num_days_from_sunday()));
    (start_of_day(sunday), end_of_day(sunday + Duration::days(6)))
}

/// Calendar date of `now` as seen in `tz`
pub fn today_in(tz: Tz, now: DateTime<Utc>) -> NaiveDate {
    now.with_timezone(&tz).date_naive()
}

/// Interpret `local` as wall-clock time in `tz` and convert to UTC
///
/// Ambiguous times (clocks going back) take the earlier instant. Times that
/// do not exist (clocks going forward) map to the first instant after the
/// gap, so the conversion never reorders two local times.
pub fn local_to_utc(local: NaiveDateTime, tz: Tz) -> DateTime<Utc> {
    match tz.from_local_datetime(&local) {
        LocalResult::Single(dt) => dt.with_timezone(&Utc),
        LocalResult::Ambiguous(earliest, _) => earliest.with_timezone(&Utc),
        LocalResult::None => end_of_gap(local, tz),
    }
}

/// Earliest instant whose wall-clock reading in `tz` is at or after `local`
fn end_of_gap(local: NaiveDateTime, tz: Tz) -> DateTime<Utc> {
    let offset_at = |t: NaiveDateTime| {
        Duration::seconds(i64::from(tz.offset_from_utc_datetime(&t).fix().local_minus_utc()))
    };
    let before = offset_at(local - Duration::days(1));
    let after = offset_at(local + Duration::days(1));

    // Reading below `local` at `lo`, at or above it at `hi`
    let mut lo = local - before.max(after);
    let mut hi = local - before.min(after);
    let reading = |t: NaiveDateTime| tz.from_utc_datetime(&t).naive_local();
    while hi - lo > Duration::milliseconds(1) {
        let mid = lo + (hi - lo) / 2;
        if reading(mid) >= local {
            hi = mid;
        } else {
            lo = mid;
        }
    }
    Utc.from_utc_datetime(&hi)
}

/// Query parameters of one completed-task request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompletedQuery {
    pub from: String,
    pub to: String,
    pub limit: u32,
}

impl CompletedQuery {
    /// Local `[start, end]` in `tz`; fails when `start` is after `end`
    pub fn for_range(start: NaiveDateTime, end: NaiveDateTime, tz: Tz) -> Result<Self> {
        if start > end {
            return Err(Dida365Error::InvalidRange {
                start: start.format(QUERY_TIME_FORMAT).to_string(),
                end: end.format(QUERY_TIME_FORMAT).to_string(),
            });
        }
        Ok(Self {
            from: local_to_utc(start, tz).format(QUERY_TIME_FORMAT).to_string(),
            to: local_to_utc(end, tz).format(QUERY_TIME_FORMAT).to_string(),
            limit: COMPLETED_LIMIT,
        })
    }

    /// The whole local day `date` in `tz`
    pub fn for_date(date: NaiveDate, tz: Tz) -> Result<Self> {
        Self::for_range(start_of_day(date), end_of_day(date), tz)
    }

    fn into_request(self) -> ApiRequest {
        ApiRequest::get(Backend::Private, "/project/all/completed")
            .query("from", self.from)
            .query("to", self.to)
            .query("limit", self.limit.to_string())
    }
}

/// Completed tasks by date
#[derive(Debug, Clone)]
pub struct CompletedService {
    client: Dida365Client,
}

impl CompletedService {
    pub fn new(client: Dida365Client) -> Self {
        Self { client }
    }

    pub async fn get_by_date(&self, date: NaiveDate, timezone: Option<&str>) -> Result<Vec<Task>> {
        self.get_by_date_range(start_of_day(date), end_of_day(date), timezone)
            .await
    }

    /// Tasks completed between two local wall-clock times, inclusive
    pub async fn get_by_date_range(
        &self,
        start: NaiveDateTime,
        end: NaiveDateTime,
        timezone: Option<&str>,
    ) -> Result<Vec<Task>> {
        let tz = resolve_timezone(timezone)?;
        let query = CompletedQuery::for_range(start, end, tz)?;
        self.query(query).await
    }

    pub async fn get_today(&self, timezone: Option<&str>) -> Result<Vec<Task>> {
        let tz = resolve_timezone(timezone)?;
        self.query(CompletedQuery::for_date(today_in(tz, Utc::now()), tz)?)
            .await
    }

    pub async fn get_yesterday(&self, timezone: Option<&str>) -> Result<Vec<Task>> {
        let tz = resolve_timezone(timezone)?;
        let yesterday = today_in(tz, Utc::now()) - Duration::days(1);
        self.query(CompletedQuery::for_date(yesterday, tz)?).await
    }

    pub async fn get_this_week(&self, timezone: Option<&str>) -> Result<Vec<Task>> {
        let tz = resolve_timezone(timezone)?;
        let (start, end) = week_bounds(today_in(tz, Utc::now()));
        self.query(CompletedQuery::for_range(start, end, tz)?).await
    }

    #[instrument(skip(self), fields(from = %query.from, to = %query.to))]
    pub async fn query(&self, query: CompletedQuery) -> Result<Vec<Task>> {
        self.client.send(query.into_request()).await
    }
}
