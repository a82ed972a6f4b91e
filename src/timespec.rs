//! Time specification: a single point in time or a bounded range expanded
//! into an ordered sequence of timezone-aware timestamps.

use crate::error::{Result, ShadowError};
use chrono::{DateTime, Duration, LocalResult, NaiveDateTime, TimeZone};
use chrono_tz::Tz;

/// Upper bound on the number of timestamps a range may expand into.
///
/// Backpressure guard against pathological configurations such as a
/// sub-second interval over a multi-day range.
pub const MAX_TIME_POINTS: i64 = 1000;

/// A timestamp that may or may not carry timezone information.
///
/// Naive values are resolved against a configured default zone; they are
/// rejected only when no default is available.
#[derive(Debug, Clone, PartialEq)]
pub enum TimeField {
    Aware(DateTime<Tz>),
    Naive(NaiveDateTime),
}

impl TimeField {
    /// Resolves this field into an aware timestamp.
    pub fn resolve(&self, default_zone: Option<Tz>) -> Result<DateTime<Tz>> {
        match self {
            TimeField::Aware(dt) => Ok(dt.clone()),
            TimeField::Naive(naive) => {
                let tz = default_zone.ok_or_else(|| {
                    ShadowError::Timezone(
                        "naive timestamp supplied and no default timezone configured".to_string(),
                    )
                })?;
                match tz.from_local_datetime(naive) {
                    LocalResult::Single(dt) => Ok(dt),
                    // DST fold: take the earlier of the two candidates
                    LocalResult::Ambiguous(earliest, _) => Ok(earliest),
                    LocalResult::None => Err(ShadowError::Timezone(format!(
                        "local time {naive} does not exist in zone {tz}"
                    ))),
                }
            }
        }
    }
}

/// Explicit configuration for building a [`TimeSpec`].
///
/// Either `point` alone, or all of `start`/`end`/`interval`, must be
/// supplied; anything else is a configuration error.
#[derive(Debug, Clone, Default)]
pub struct TimeConfig {
    pub point: Option<TimeField>,
    pub start: Option<TimeField>,
    pub end: Option<TimeField>,
    pub interval: Option<Duration>,
    pub default_timezone: Option<Tz>,
}

/// Time(s) for shadow calculation: a single point or a bounded range.
#[derive(Debug, Clone, PartialEq)]
pub enum TimeSpec {
    Point(DateTime<Tz>),
    Range {
        start: DateTime<Tz>,
        end: DateTime<Tz>,
        interval: Duration,
    },
}

impl TimeSpec {
    pub fn point(time: DateTime<Tz>) -> Self {
        TimeSpec::Point(time)
    }

    /// Creates a range specification, validating that `end > start`, the
    /// interval is strictly positive, and the expansion stays within
    /// [`MAX_TIME_POINTS`].
    pub fn range(start: DateTime<Tz>, end: DateTime<Tz>, interval: Duration) -> Result<Self> {
        if end <= start {
            return Err(ShadowError::Configuration(format!(
                "end time {end} must be after start time {start}"
            )));
        }
        if interval <= Duration::zero() {
            return Err(ShadowError::Configuration(
                "interval must be positive".to_string(),
            ));
        }
        let span_ms = (end - start).num_milliseconds();
        let interval_ms = interval.num_milliseconds();
        // ceil(span / interval) + 1, inclusive of both endpoints
        let points = (span_ms + interval_ms - 1) / interval_ms + 1;
        if points > MAX_TIME_POINTS {
            return Err(ShadowError::RangeTooLarge {
                points,
                max: MAX_TIME_POINTS,
            });
        }
        Ok(TimeSpec::Range {
            start,
            end,
            interval,
        })
    }

    /// Builds a specification from an explicit configuration, enforcing the
    /// point/range exclusivity rules.
    pub fn from_config(cfg: &TimeConfig) -> Result<Self> {
        let has_range_field = cfg.start.is_some() || cfg.end.is_some() || cfg.interval.is_some();
        if let Some(point) = &cfg.point {
            if has_range_field {
                return Err(ShadowError::Configuration(
                    "cannot specify both a point time and time range fields".to_string(),
                ));
            }
            return Ok(TimeSpec::point(point.resolve(cfg.default_timezone)?));
        }
        match (&cfg.start, &cfg.end, &cfg.interval) {
            (Some(start), Some(end), Some(interval)) => TimeSpec::range(
                start.resolve(cfg.default_timezone)?,
                end.resolve(cfg.default_timezone)?,
                *interval,
            ),
            _ => Err(ShadowError::Configuration(
                "must specify either a point time or all of start, end and interval".to_string(),
            )),
        }
    }

    pub fn is_point(&self) -> bool {
        matches!(self, TimeSpec::Point(_))
    }

    pub fn is_range(&self) -> bool {
        matches!(self, TimeSpec::Range { .. })
    }

    /// Number of timestamps `times()` will yield.
    pub fn len(&self) -> usize {
        match self {
            TimeSpec::Point(_) => 1,
            TimeSpec::Range {
                start,
                end,
                interval,
            } => {
                let span_ms = (*end - *start).num_milliseconds();
                (span_ms / interval.num_milliseconds() + 1) as usize
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    /// The ordered sequence of timestamps described by this specification.
    ///
    /// The iterator is finite and restartable: each call starts over from
    /// the first timestamp. Both endpoints are included when the end lies
    /// exactly on the interval grid.
    pub fn times(&self) -> Times {
        match self {
            TimeSpec::Point(t) => Times {
                next: Some(t.clone()),
                end: t.clone(),
                interval: Duration::seconds(1),
            },
            TimeSpec::Range {
                start,
                end,
                interval,
            } => Times {
                next: Some(start.clone()),
                end: end.clone(),
                interval: *interval,
            },
        }
    }

    /// Point count plus a human-readable summary of the expansion.
    pub fn describe(&self) -> (usize, String) {
        match self {
            TimeSpec::Point(_) => (1, "single time point".to_string()),
            TimeSpec::Range { start, end, .. } => {
                let points = self.len();
                let hours = (*end - *start).num_seconds() as f64 / 3600.0;
                (points, format!("{points} points over {hours:.1} hours"))
            }
        }
    }

    /// Parses an interval string: `<integer>m` for minutes or `<integer>h`
    /// for hours.
    pub fn parse_interval(text: &str) -> Result<Duration> {
        let text = text.trim();
        let (digits, to_duration): (&str, fn(i64) -> Duration) =
            if let Some(d) = text.strip_suffix('m') {
                (d, Duration::minutes)
            } else if let Some(d) = text.strip_suffix('h') {
                (d, Duration::hours)
            } else {
                return Err(invalid_interval(text));
            };
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid_interval(text));
        }
        let value: i64 = digits.parse().map_err(|_| invalid_interval(text))?;
        Ok(to_duration(value))
    }
}

fn invalid_interval(text: &str) -> ShadowError {
    ShadowError::Configuration(format!(
        "invalid interval format: {text:?}, use <number>m for minutes or <number>h for hours"
    ))
}

/// Iterator over the timestamps of a [`TimeSpec`].
#[derive(Debug, Clone)]
pub struct Times {
    next: Option<DateTime<Tz>>,
    end: DateTime<Tz>,
    interval: Duration,
}

impl Iterator for Times {
    type Item = DateTime<Tz>;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next.take()?;
        if let Some(following) = current.checked_add_signed(self.interval) {
            if following <= self.end {
                self.next = Some(following);
            }
        }
        Some(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use chrono_tz::America::Denver;
    use chrono_tz::UTC;

    fn utc(h: u32, m: u32) -> DateTime<Tz> {
        UTC.with_ymd_and_hms(2024, 6, 1, h, m, 0).unwrap()
    }

    #[test]
    fn test_point_expansion() {
        let spec = TimeSpec::point(utc(12, 0));
        let times: Vec<_> = spec.times().collect();
        assert_eq!(times, vec![utc(12, 0)]);
        assert_eq!(spec.len(), 1);
        assert!(spec.is_point());
    }

    #[test]
    fn test_range_expansion_inclusive() {
        // start=T, end=T+2h, interval=30m => exactly 5 timestamps
        let spec = TimeSpec::range(utc(10, 0), utc(12, 0), Duration::minutes(30)).unwrap();
        let times: Vec<_> = spec.times().collect();
        assert_eq!(
            times,
            vec![utc(10, 0), utc(10, 30), utc(11, 0), utc(11, 30), utc(12, 0)]
        );
        assert_eq!(spec.len(), 5);
    }

    #[test]
    fn test_range_expansion_misaligned_end() {
        // End not on the interval grid: it is not yielded
        let spec = TimeSpec::range(utc(10, 0), utc(10, 50), Duration::minutes(30)).unwrap();
        let times: Vec<_> = spec.times().collect();
        assert_eq!(times, vec![utc(10, 0), utc(10, 30)]);
    }

    #[test]
    fn test_times_restartable() {
        let spec = TimeSpec::range(utc(10, 0), utc(11, 0), Duration::minutes(30)).unwrap();
        assert_eq!(spec.times().count(), 3);
        assert_eq!(spec.times().count(), 3);
    }

    #[test]
    fn test_range_too_large() {
        // 1-second interval over 24 hours: 86,401 points
        let start = utc(0, 0);
        let end = start + Duration::hours(24);
        let res = TimeSpec::range(start, end, Duration::seconds(1));
        match res {
            Err(ShadowError::RangeTooLarge { points, max }) => {
                assert_eq!(points, 86_401);
                assert_eq!(max, 1000);
            }
            other => panic!("expected RangeTooLarge, got {other:?}"),
        }
    }

    #[test]
    fn test_range_validation() {
        assert!(matches!(
            TimeSpec::range(utc(12, 0), utc(10, 0), Duration::minutes(30)),
            Err(ShadowError::Configuration(_))
        ));
        assert!(matches!(
            TimeSpec::range(utc(10, 0), utc(10, 0), Duration::minutes(30)),
            Err(ShadowError::Configuration(_))
        ));
        assert!(matches!(
            TimeSpec::range(utc(10, 0), utc(12, 0), Duration::zero()),
            Err(ShadowError::Configuration(_))
        ));
    }

    #[test]
    fn test_config_exclusivity() {
        let cfg = TimeConfig {
            point: Some(TimeField::Aware(utc(12, 0))),
            start: Some(TimeField::Aware(utc(10, 0))),
            ..Default::default()
        };
        assert!(matches!(
            TimeSpec::from_config(&cfg),
            Err(ShadowError::Configuration(_))
        ));

        // Incomplete range
        let cfg = TimeConfig {
            start: Some(TimeField::Aware(utc(10, 0))),
            end: Some(TimeField::Aware(utc(12, 0))),
            ..Default::default()
        };
        assert!(matches!(
            TimeSpec::from_config(&cfg),
            Err(ShadowError::Configuration(_))
        ));

        // Nothing at all
        assert!(matches!(
            TimeSpec::from_config(&TimeConfig::default()),
            Err(ShadowError::Configuration(_))
        ));
    }

    #[test]
    fn test_naive_resolved_with_default_zone() {
        let naive = NaiveDate::from_ymd_opt(2024, 6, 1)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap();
        let cfg = TimeConfig {
            point: Some(TimeField::Naive(naive)),
            default_timezone: Some(Denver),
            ..Default::default()
        };
        let spec = TimeSpec::from_config(&cfg).unwrap();
        match spec {
            TimeSpec::Point(t) => {
                assert_eq!(t.timezone(), Denver);
                // Denver is UTC-6 in June (MDT)
                assert_eq!(t.with_timezone(&UTC), utc(18, 0));
            }
            _ => panic!("expected point spec"),
        }
    }

    #[test]
    fn test_naive_without_default_zone() {
        let naive = NaiveDate::from_ymd_opt(2024, 6, 1)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap();
        let cfg = TimeConfig {
            point: Some(TimeField::Naive(naive)),
            ..Default::default()
        };
        assert!(matches!(
            TimeSpec::from_config(&cfg),
            Err(ShadowError::Timezone(_))
        ));
    }

    #[test]
    fn test_parse_interval() {
        assert_eq!(
            TimeSpec::parse_interval("30m").unwrap(),
            Duration::minutes(30)
        );
        assert_eq!(TimeSpec::parse_interval("2h").unwrap(), Duration::hours(2));
        assert!(TimeSpec::parse_interval("30").is_err());
        assert!(TimeSpec::parse_interval("m").is_err());
        assert!(TimeSpec::parse_interval("1.5h").is_err());
        assert!(TimeSpec::parse_interval("-5m").is_err());
        assert!(TimeSpec::parse_interval("30s").is_err());
        assert!(TimeSpec::parse_interval("").is_err());
    }

    #[test]
    fn test_describe() {
        let spec = TimeSpec::range(utc(10, 0), utc(12, 0), Duration::minutes(30)).unwrap();
        let (points, text) = spec.describe();
        assert_eq!(points, 5);
        assert_eq!(text, "5 points over 2.0 hours");
    }
}
