use chrono::{DateTime, Utc};

const MILLIS_PER_DAY: f64 = 86_400_000.0;

/// Breakdown of a booking price, as shown beside the booking form.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quote {
    pub days: i64,
    pub rental: f64,
    pub deposit: f64,
    pub total: f64,
}

/// Days billed for a rental: the duration rounded up to whole days, at
/// least one. `None` when the range is empty or inverted.
pub fn billed_days(start: DateTime<Utc>, end: DateTime<Utc>) -> Option<i64> {
    let millis = (end - start).num_milliseconds();
    if millis <= 0 {
        return None;
    }
    let days = (millis as f64 / MILLIS_PER_DAY).ceil() as i64;
    Some(days.max(1))
}

pub fn quote(
    start: Option<DateTime<Utc>>,
    end: Option<DateTime<Utc>>,
    quantity: u32,
    daily_rate: f64,
    deposit: f64,
) -> Option<Quote> {
    let days = billed_days(start?, end?)?;
    let rental = daily_rate * days as f64 * quantity as f64;
    Some(Quote {
        days,
        rental,
        deposit,
        total: rental + deposit,
    })
}

/// Total price of a booking. Zero means "not yet computable" (missing or
/// inverted dates), never a free booking.
pub fn calculate_total(
    start: Option<DateTime<Utc>>,
    end: Option<DateTime<Utc>>,
    quantity: u32,
    daily_rate: f64,
    deposit: f64,
) -> f64 {
    quote(start, end, quantity, daily_rate, deposit)
        .map(|q| q.total)
        .unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn ts(s: &str) -> DateTime<Utc> {
        s.parse().unwrap()
    }

    #[test]
    fn test_two_day_booking() {
        let total = calculate_total(
            Some(ts("2024-01-01T00:00:00Z")),
            Some(ts("2024-01-03T00:00:00Z")),
            2,
            500.0,
            1000.0,
        );
        assert_eq!(total, 3000.0);
    }

    #[test]
    fn test_partial_day_rounds_up() {
        let q = quote(
            Some(ts("2024-01-01T09:00:00Z")),
            Some(ts("2024-01-02T10:00:00Z")),
            1,
            100.0,
            0.0,
        )
        .unwrap();
        assert_eq!(q.days, 2);
        assert_eq!(q.total, 200.0);
    }

    #[test]
    fn test_short_rental_bills_one_day() {
        let start = ts("2024-01-01T09:00:00Z");
        assert_eq!(billed_days(start, start + Duration::minutes(30)), Some(1));
    }

    #[test]
    fn test_missing_or_inverted_dates_return_zero() {
        let start = ts("2024-01-05T00:00:00Z");
        let end = ts("2024-01-03T00:00:00Z");
        assert_eq!(calculate_total(None, Some(end), 1, 100.0, 50.0), 0.0);
        assert_eq!(calculate_total(Some(start), None, 1, 100.0, 50.0), 0.0);
        assert_eq!(calculate_total(Some(start), Some(end), 1, 100.0, 50.0), 0.0);
        assert_eq!(calculate_total(Some(start), Some(start), 1, 100.0, 50.0), 0.0);
    }

    #[test]
    fn test_total_matches_formula_across_ranges() {
        let start = ts("2024-03-01T00:00:00Z");
        for minutes in [1_i64, 59, 1440, 1441, 2880, 10_000, 43_200] {
            for qty in 1..=3u32 {
                let end = start + Duration::minutes(minutes);
                let days = ((minutes as f64) / 1440.0).ceil().max(1.0);
                let expected = days * 250.0 * qty as f64 + 75.0;
                assert_eq!(calculate_total(Some(start), Some(end), qty, 250.0, 75.0), expected);
            }
        }
    }
}
