#[cfg(test)]
mod tests {
    use crate::conflict::overlaps;
    use crate::error::BookingError;
    use crate::hours::BusinessHours;
    use crate::interval::normalize;
    use bookit_common::models::Interval;
    use chrono::{Duration, NaiveDate, NaiveTime, TimeZone, Utc};
    use chrono_tz::Tz;
    use proptest::prelude::*;

    fn clock(minutes: u32) -> String {
        format!("{:02}:{:02}", minutes / 60, minutes % 60)
    }

    fn date_string(offset_days: i64) -> String {
        let base = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        (base + Duration::days(offset_days)).format("%Y-%m-%d").to_string()
    }

    fn hours(zone: Tz) -> BusinessHours {
        BusinessHours::new(
            zone,
            NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            NaiveTime::from_hms_opt(17, 0, 0).unwrap(),
        )
    }

    fn interval(start_min: i64, len_min: i64) -> Interval {
        let base = Utc.with_ymd_and_hms(2025, 6, 10, 0, 0, 0).unwrap();
        Interval::new(
            base + Duration::minutes(start_min),
            base + Duration::minutes(start_min + len_min),
        )
    }

    fn zones() -> impl Strategy<Value = Tz> {
        prop_oneof![
            Just(Tz::Asia__Jakarta),
            Just(Tz::UTC),
            Just(Tz::Asia__Tokyo),
            Just(Tz::Europe__Zurich),
        ]
    }

    proptest! {
        // Ordering error exactly when end <= start, whatever the window says.
        #[test]
        fn test_order_error_iff_end_not_after_start(
            day in 0..730i64,
            start in 0..1440u32,
            end in 0..1440u32,
            zone in zones(),
        ) {
            let interval = match normalize(&date_string(day), &clock(start), &clock(end), &zone) {
                Ok(interval) => interval,
                // DST gaps in Zurich
                Err(BookingError::Parse { .. }) => return Ok(()),
                Err(other) => panic!("unexpected {other:?}"),
            };
            let result = hours(zone).validate(&interval);
            prop_assert_eq!(matches!(result, Err(BookingError::Order)), end <= start);
        }

        // For ordered intervals, accepted exactly when 09:00 <= start and end <= 17:00.
        #[test]
        fn test_hours_pass_iff_inside_window(
            day in 0..730i64,
            start in 0..1439u32,
            len in 1..600u32,
        ) {
            let end = (start + len).min(1439);
            prop_assume!(end > start);
            let zone = Tz::Asia__Jakarta;
            let interval = normalize(&date_string(day), &clock(start), &clock(end), &zone).unwrap();
            let inside = start >= 9 * 60 && end <= 17 * 60;
            prop_assert_eq!(hours(zone).validate(&interval).is_ok(), inside);
        }

        #[test]
        fn test_overlap_is_symmetric(
            a_start in 0..2000i64, a_len in 1..300i64,
            b_start in 0..2000i64, b_len in 1..300i64,
        ) {
            let a = interval(a_start, a_len);
            let b = interval(b_start, b_len);
            prop_assert_eq!(overlaps(&a, &b), overlaps(&b, &a));
            prop_assert!(overlaps(&a, &a));
        }

        // Touching intervals never overlap; shifting one minute into the other always does.
        #[test]
        fn test_half_open_boundary(start in 0..2000i64, len_a in 1..300i64, len_b in 1..300i64) {
            let a = interval(start, len_a);
            let b = interval(start + len_a, len_b);
            prop_assert!(!overlaps(&a, &b));
            prop_assert!(!overlaps(&b, &a));

            let shifted = interval(start + len_a - 1, len_b);
            prop_assert!(overlaps(&a, &shifted));
        }
    }

    #[test]
    fn test_reference_boundary_cases() {
        let zone = Tz::Asia__Jakarta;
        let nine_ten = normalize("2025-06-10", "09:00", "10:00", &zone).unwrap();
        let ten_eleven = normalize("2025-06-10", "10:00", "11:00", &zone).unwrap();
        let half_past = normalize("2025-06-10", "09:30", "10:30", &zone).unwrap();

        assert!(!overlaps(&nine_ten, &ten_eleven));
        assert!(overlaps(&nine_ten, &half_past));
    }
}
