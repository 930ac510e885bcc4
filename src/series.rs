use crate::errors::LoadError;
use crate::models::{CommandTotal, CommandUsageRow, CommandsPerDay, DailyCounts};
use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use std::collections::BTreeMap;

/// Observed days only, ascending. Missing days mean zero.
pub type SparseSeries = BTreeMap<NaiveDate, u64>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DailyValue {
    pub date: NaiveDate,
    pub value: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SeriesSummary {
    pub min: u64,
    pub max: u64,
    /// Mean rounded to the nearest whole count.
    pub average: u64,
}

/// Parses a day key in either `YYYY-MM-DD` or unpadded `M-D-YYYY` form.
/// Years are exactly four digits without a leading zero.
pub fn parse_day_key(key: &str) -> Option<NaiveDate> {
    let mut parts = key.trim().split('-');
    let (first, second, third) = (parts.next()?, parts.next()?, parts.next()?);
    if parts.next().is_some() {
        return None;
    }

    if first.len() == 4 {
        NaiveDate::from_ymd_opt(year(first)?, month_or_day(second)?, month_or_day(third)?)
    } else {
        NaiveDate::from_ymd_opt(year(third)?, month_or_day(first)?, month_or_day(second)?)
    }
}

fn digits(part: &str, min: usize, max: usize) -> Option<u32> {
    let in_range = (min..=max).contains(&part.len());
    if !in_range || !part.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    part.parse().ok()
}

fn year(part: &str) -> Option<i32> {
    if part.starts_with('0') {
        return None;
    }
    digits(part, 4, 4).and_then(|value| i32::try_from(value).ok())
}

fn month_or_day(part: &str) -> Option<u32> {
    digits(part, 1, 2)
}

/// Chart axis label, `M-D-YYYY` without padding.
pub fn day_label(date: NaiveDate) -> String {
    format!("{}-{}-{}", date.month(), date.day(), date.year())
}

pub fn sparse_from_counts(counts: &DailyCounts) -> Result<SparseSeries, LoadError> {
    let mut series = SparseSeries::new();
    for (key, count) in counts {
        let date =
            parse_day_key(key).ok_or_else(|| LoadError::InvalidDate { key: key.clone() })?;
        let entry = series.entry(date).or_default();
        *entry = entry.saturating_add(*count);
    }
    Ok(series)
}

/// Splits command rows into separate text and slash invocation series.
/// Both series share the same observed days.
pub fn text_and_slash_series(
    rows: &[CommandUsageRow],
) -> Result<(SparseSeries, SparseSeries), LoadError> {
    let mut text = SparseSeries::new();
    let mut slash = SparseSeries::new();
    for row in rows {
        let date = parse_day_key(&row.date).ok_or_else(|| LoadError::InvalidDate {
            key: row.date.clone(),
        })?;
        let text_entry = text.entry(date).or_default();
        *text_entry = text_entry.saturating_add(row.text_count);
        let slash_entry = slash.entry(date).or_default();
        *slash_entry = slash_entry.saturating_add(row.slash_count);
    }
    Ok((text, slash))
}

/// One value per calendar day from the first observed day up to, but not
/// including, `today`. Days with no observation are zero.
pub fn fill_gaps(sparse: &SparseSeries, today: NaiveDate) -> Vec<DailyValue> {
    let Some(&start) = sparse.keys().next() else {
        return Vec::new();
    };

    start
        .iter_days()
        .take_while(|date| *date < today)
        .map(|date| DailyValue {
            date,
            value: sparse.get(&date).copied().unwrap_or(0),
        })
        .collect()
}

/// Running total over a dense series.
pub fn cumulative(dense: &[DailyValue]) -> Vec<DailyValue> {
    let mut sum = 0u64;
    dense
        .iter()
        .map(|point| {
            sum = sum.saturating_add(point.value);
            DailyValue {
                date: point.date,
                value: sum,
            }
        })
        .collect()
}

pub fn fill_gaps_cumulative(sparse: &SparseSeries, today: NaiveDate) -> Vec<DailyValue> {
    cumulative(&fill_gaps(sparse, today))
}

pub fn summarize(dense: &[DailyValue]) -> Option<SeriesSummary> {
    let min = dense.iter().map(|point| point.value).min()?;
    let max = dense.iter().map(|point| point.value).max()?;
    let total: u128 = dense.iter().map(|point| u128::from(point.value)).sum();
    let average = (total as f64 / dense.len() as f64).round() as u64;
    Some(SeriesSummary { min, max, average })
}

/// Text plus slash invocations per command across every day, in command
/// name order.
pub fn command_totals(usage: &CommandsPerDay) -> Vec<CommandTotal> {
    usage
        .iter()
        .map(|(name, rows)| CommandTotal {
            name: name.clone(),
            total: rows.iter().fold(0u64, |acc, row| {
                acc.saturating_add(row.text_count).saturating_add(row.slash_count)
            }),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn values(points: &[DailyValue]) -> Vec<u64> {
        points.iter().map(|point| point.value).collect()
    }

    #[test]
    fn parses_both_key_forms() {
        assert_eq!(parse_day_key("2021-03-07"), Some(day(2021, 3, 7)));
        assert_eq!(parse_day_key("3-7-2021"), Some(day(2021, 3, 7)));
        assert_eq!(parse_day_key("12-31-2020"), Some(day(2020, 12, 31)));
        assert_eq!(parse_day_key(" 2021-3-7 "), Some(day(2021, 3, 7)));
    }

    #[test]
    fn rejects_garbage_keys() {
        assert_eq!(parse_day_key("yesterday"), None);
        assert_eq!(parse_day_key("2021-02-30"), None);
        assert_eq!(parse_day_key("1-2-3-4"), None);
        assert_eq!(parse_day_key("13-01-2021"), None);
        assert_eq!(parse_day_key("3-7-21"), None);
        assert_eq!(parse_day_key("0021-03-07"), None);
        assert_eq!(parse_day_key("+3-+7-2021"), None);
        assert_eq!(parse_day_key("2021-+3-07"), None);
        assert_eq!(parse_day_key("3-7-02021"), None);
        assert_eq!(parse_day_key("003-7-2021"), None);

        let mut counts = DailyCounts::new();
        counts.insert("not-a-date".to_string(), 4);
        let err = sparse_from_counts(&counts).unwrap_err();
        assert!(matches!(err, LoadError::InvalidDate { key } if key == "not-a-date"));
    }

    #[test]
    fn two_digit_year_fails_instead_of_spanning_centuries() {
        let mut counts = DailyCounts::new();
        counts.insert("3-7-21".to_string(), 1);
        counts.insert("3-8-2021".to_string(), 2);

        let err = sparse_from_counts(&counts).unwrap_err();
        assert!(matches!(err, LoadError::InvalidDate { key } if key == "3-7-21"));
    }

    #[test]
    fn summary_serializes_as_plain_counts() {
        let summary = SeriesSummary { min: 1, max: 9, average: 4 };
        let value = serde_json::to_value(summary).unwrap();
        assert_eq!(value, serde_json::json!({ "min": 1, "max": 9, "average": 4 }));
    }

    #[test]
    fn label_is_unpadded_month_day_year() {
        assert_eq!(day_label(day(2021, 3, 7)), "3-7-2021");
        assert_eq!(day_label(day(2021, 11, 20)), "11-20-2021");
    }

    #[test]
    fn fill_gaps_emits_every_day_with_zero_for_missing() {
        let start = day(2021, 2, 26);
        let today = day(2021, 3, 5);
        let mut sparse = SparseSeries::new();
        sparse.insert(start, 4);
        sparse.insert(day(2021, 3, 1), 9);
        sparse.insert(day(2021, 3, 3), 1);

        let dense = fill_gaps(&sparse, today);
        assert_eq!(dense.len(), (today - start).num_days() as usize);
        for (offset, point) in dense.iter().enumerate() {
            assert_eq!(point.date, start + Duration::days(offset as i64));
        }
        assert_eq!(values(&dense), vec![4, 0, 0, 9, 0, 1, 0]);
    }

    #[test]
    fn fill_gaps_stops_before_today() {
        let today = day(2021, 3, 5);
        let mut sparse = SparseSeries::new();
        sparse.insert(day(2021, 3, 3), 2);
        sparse.insert(today, 50);
        sparse.insert(day(2021, 3, 9), 70);

        let dense = fill_gaps(&sparse, today);
        assert_eq!(values(&dense), vec![2, 0]);
        assert_eq!(dense.last().map(|point| point.date), Some(day(2021, 3, 4)));
    }

    #[test]
    fn fill_gaps_empty_when_nothing_before_today() {
        let today = day(2021, 3, 5);
        assert!(fill_gaps(&SparseSeries::new(), today).is_empty());

        let mut sparse = SparseSeries::new();
        sparse.insert(day(2021, 3, 8), 1);
        assert!(fill_gaps(&sparse, today).is_empty());
    }

    #[test]
    fn fill_gaps_uses_chronological_order_of_us_keys() {
        let mut counts = DailyCounts::new();
        // Lexical order would put 10-1 before 9-30.
        counts.insert("9-30-2021".to_string(), 3);
        counts.insert("10-1-2021".to_string(), 5);

        let sparse = sparse_from_counts(&counts).unwrap();
        let dense = fill_gaps(&sparse, day(2021, 10, 3));
        assert_eq!(dense.first().map(|point| point.date), Some(day(2021, 9, 30)));
        assert_eq!(values(&dense), vec![3, 5, 0]);
    }

    #[test]
    fn cumulative_of_two_zero_five() {
        let start = day(2022, 1, 1);
        let dense: Vec<DailyValue> = [2, 0, 5]
            .iter()
            .enumerate()
            .map(|(offset, value)| DailyValue {
                date: start + Duration::days(offset as i64),
                value: *value,
            })
            .collect();

        let totals = cumulative(&dense);
        assert_eq!(values(&totals), vec![2, 2, 7]);
        assert_eq!(totals[2].date, day(2022, 1, 3));
    }

    #[test]
    fn cumulative_is_monotonic_and_ends_at_sum() {
        let start = day(2022, 6, 1);
        let mut sparse = SparseSeries::new();
        sparse.insert(start, 7);
        sparse.insert(day(2022, 6, 4), 3);
        sparse.insert(day(2022, 6, 9), 12);
        let today = day(2022, 6, 15);

        let dense = fill_gaps(&sparse, today);
        let totals = fill_gaps_cumulative(&sparse, today);
        assert_eq!(totals.len(), dense.len());
        assert!(totals.windows(2).all(|pair| pair[0].value <= pair[1].value));
        assert_eq!(totals.last().map(|point| point.value), Some(22));
        assert_eq!(
            totals.last().map(|point| point.value),
            Some(dense.iter().map(|point| point.value).sum())
        );
    }

    #[test]
    fn summary_matches_dense_values() {
        let start = day(2022, 6, 1);
        let mut sparse = SparseSeries::new();
        sparse.insert(start, 4);
        sparse.insert(day(2022, 6, 3), 7);
        let dense = fill_gaps(&sparse, day(2022, 6, 4));

        let summary = summarize(&dense).unwrap();
        assert_eq!(summary, SeriesSummary { min: 0, max: 7, average: 4 });
        assert_eq!(summarize(&[]), None);
    }

    #[test]
    fn command_totals_add_text_and_slash_across_days() {
        let mut usage = CommandsPerDay::new();
        usage.insert(
            "define".to_string(),
            vec![
                CommandUsageRow { date: "2021-05-01".into(), text_count: 10, slash_count: 2 },
                CommandUsageRow { date: "2021-05-02".into(), text_count: 3, slash_count: 8 },
            ],
        );
        usage.insert(
            "stop".to_string(),
            vec![CommandUsageRow { date: "2021-05-02".into(), text_count: 0, slash_count: 1 }],
        );
        usage.insert("voices".to_string(), Vec::new());

        let totals = command_totals(&usage);
        assert_eq!(
            totals,
            vec![
                CommandTotal { name: "define".into(), total: 23 },
                CommandTotal { name: "stop".into(), total: 1 },
                CommandTotal { name: "voices".into(), total: 0 },
            ]
        );
    }

    #[test]
    fn text_and_slash_share_observed_days() {
        let rows = vec![
            CommandUsageRow { date: "5-1-2021".into(), text_count: 4, slash_count: 0 },
            CommandUsageRow { date: "5-3-2021".into(), text_count: 1, slash_count: 6 },
        ];
        let (text, slash) = text_and_slash_series(&rows).unwrap();
        let today = day(2021, 5, 4);
        assert_eq!(values(&fill_gaps(&text, today)), vec![4, 0, 1]);
        assert_eq!(values(&fill_gaps(&slash, today)), vec![0, 0, 6]);
    }
}
