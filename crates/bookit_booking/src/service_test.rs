#[cfg(test)]
mod tests {
    use crate::error::BookingError;
    use crate::hours::BusinessHours;
    use crate::models::{CreateBookingRequest, UpdateBookingRequest};
    use crate::service::BookingService;
    use bookit_config::BookingConfig;
    use bookit_db::{MemoryReservationRepository, ReservationRepository};
    use chrono::{TimeZone, Utc};
    use std::sync::Arc;

    fn service() -> BookingService<MemoryReservationRepository> {
        let hours = BusinessHours::from_config(&BookingConfig::default()).unwrap();
        BookingService::new(Arc::new(MemoryReservationRepository::new()), hours)
    }

    fn request(date: &str, start: &str, end: &str) -> CreateBookingRequest {
        CreateBookingRequest {
            name: "Budi".to_string(),
            phone: "081234567890".to_string(),
            date: date.to_string(),
            start_time: start.to_string(),
            end_time: end.to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_then_duplicate_conflicts() {
        let service = service();
        let stored = service.create(request("2025-06-10", "09:00", "10:00")).await.unwrap();
        assert_eq!(stored.start_time, Utc.with_ymd_and_hms(2025, 6, 10, 2, 0, 0).unwrap());

        let err = service.create(request("2025-06-10", "09:00", "10:00")).await.unwrap_err();
        assert!(matches!(err, BookingError::Conflict));

        // Adjacent slot is free.
        service.create(request("2025-06-10", "10:00", "11:00")).await.unwrap();
    }

    #[tokio::test]
    async fn test_create_runs_pipeline_in_order() {
        let service = service();
        assert!(matches!(
            service.create(request("2025-13-01", "25:00", "xx")).await,
            Err(BookingError::Parse { .. })
        ));
        assert!(matches!(
            service.create(request("2025-06-10", "10:00", "09:30")).await,
            Err(BookingError::Order)
        ));
        assert!(matches!(
            service.create(request("2025-06-10", "08:00", "09:00")).await,
            Err(BookingError::Hours { .. })
        ));
        // Nothing reached storage.
        assert!(service.list_admin(None).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_blank_name_or_phone_is_invalid() {
        let service = service();
        let mut blank = request("2025-06-10", "09:00", "10:00");
        blank.name = "   ".to_string();
        assert!(matches!(service.create(blank).await, Err(BookingError::Invalid(_))));

        let mut blank = request("2025-06-10", "09:00", "10:00");
        blank.phone = String::new();
        assert!(matches!(service.create(blank).await, Err(BookingError::Invalid(_))));
    }

    #[tokio::test]
    async fn test_public_list_is_local_and_sorted() {
        let service = service();
        service.create(request("2025-06-10", "13:00", "14:00")).await.unwrap();
        service.create(request("2025-06-10", "09:00", "10:00")).await.unwrap();
        service.create(request("2025-06-11", "09:00", "10:00")).await.unwrap();

        let slots = service.list_public(Some("2025-06-10")).await.unwrap();
        let pairs: Vec<(&str, &str)> = slots
            .iter()
            .map(|s| (s.start_time.as_str(), s.end_time.as_str()))
            .collect();
        assert_eq!(pairs, vec![("09:00", "10:00"), ("13:00", "14:00")]);

        assert!(service.list_public(Some("2025-06-12")).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_public_list_requires_valid_date() {
        let service = service();
        assert!(matches!(service.list_public(None).await, Err(BookingError::Invalid(_))));
        assert!(matches!(service.list_public(Some("")).await, Err(BookingError::Invalid(_))));
        assert!(matches!(
            service.list_public(Some("10-06-2025")).await,
            Err(BookingError::Parse { .. })
        ));
    }

    #[tokio::test]
    async fn test_admin_list_filters_by_local_day() {
        let service = service();
        service.create(request("2025-06-11", "09:00", "10:00")).await.unwrap();
        service.create(request("2025-06-10", "16:00", "17:00")).await.unwrap();

        let all = service.list_admin(None).await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].start_time, "2025-06-10T16:00:00+07:00");
        assert_eq!(all[0].name, "Budi");

        let day = service.list_admin(Some("2025-06-11")).await.unwrap();
        assert_eq!(day.len(), 1);
        assert_eq!(day[0].end_time, "2025-06-11T10:00:00+07:00");
    }

    #[tokio::test]
    async fn test_update_to_own_interval_is_not_a_conflict() {
        let service = service();
        let stored = service.create(request("2025-06-10", "09:00", "10:00")).await.unwrap();

        let same = UpdateBookingRequest {
            date: Some("2025-06-10".to_string()),
            start_time: Some("09:00".to_string()),
            end_time: Some("10:00".to_string()),
            ..Default::default()
        };
        let updated = service.update(stored.id, same).await.unwrap();
        assert_eq!(updated.interval(), stored.interval());
    }

    #[tokio::test]
    async fn test_update_details_only_keeps_interval() {
        let service = service();
        let stored = service.create(request("2025-06-10", "09:00", "10:00")).await.unwrap();

        let rename = UpdateBookingRequest {
            name: Some("Sari".to_string()),
            ..Default::default()
        };
        let updated = service.update(stored.id, rename).await.unwrap();
        assert_eq!(updated.name, "Sari");
        assert_eq!(updated.phone, stored.phone);
        assert_eq!(updated.interval(), stored.interval());
    }

    #[tokio::test]
    async fn test_partial_interval_update_merges_current_values() {
        let service = service();
        let stored = service.create(request("2025-06-10", "09:00", "10:00")).await.unwrap();

        let later_end = UpdateBookingRequest {
            end_time: Some("11:30".to_string()),
            ..Default::default()
        };
        let updated = service.update(stored.id, later_end).await.unwrap();
        assert_eq!(updated.start_time, stored.start_time);
        assert_eq!(updated.end_time, Utc.with_ymd_and_hms(2025, 6, 10, 4, 30, 0).unwrap());

        let next_day = UpdateBookingRequest {
            date: Some("2025-06-12".to_string()),
            ..Default::default()
        };
        let moved = service.update(stored.id, next_day).await.unwrap();
        assert_eq!(moved.start_time, Utc.with_ymd_and_hms(2025, 6, 12, 2, 0, 0).unwrap());
        assert_eq!(moved.end_time, Utc.with_ymd_and_hms(2025, 6, 12, 4, 30, 0).unwrap());
    }

    #[tokio::test]
    async fn test_update_is_validated_like_create() {
        let service = service();
        let first = service.create(request("2025-06-10", "09:00", "10:00")).await.unwrap();
        service.create(request("2025-06-10", "11:00", "12:00")).await.unwrap();

        let onto_other = UpdateBookingRequest {
            start_time: Some("10:30".to_string()),
            end_time: Some("11:30".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            service.update(first.id, onto_other).await,
            Err(BookingError::Conflict)
        ));

        let too_late = UpdateBookingRequest {
            end_time: Some("17:30".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            service.update(first.id, too_late).await,
            Err(BookingError::Hours { .. })
        ));

        let blank = UpdateBookingRequest {
            phone: Some(" ".to_string()),
            ..Default::default()
        };
        assert!(matches!(service.update(first.id, blank).await, Err(BookingError::Invalid(_))));
    }

    #[tokio::test]
    async fn test_unknown_id_is_not_found() {
        let service = service();
        assert!(matches!(
            service.update(42, UpdateBookingRequest::default()).await,
            Err(BookingError::NotFound(42))
        ));
        assert!(matches!(service.delete(42).await, Err(BookingError::NotFound(42))));
    }

    #[tokio::test]
    async fn test_delete_frees_the_slot() {
        let service = service();
        let stored = service.create(request("2025-06-10", "09:00", "10:00")).await.unwrap();
        service.delete(stored.id).await.unwrap();
        service.create(request("2025-06-10", "09:00", "10:00")).await.unwrap();
    }

    #[tokio::test]
    async fn test_concurrent_creates_store_exactly_one() {
        let repository = Arc::new(MemoryReservationRepository::new());
        let hours = BusinessHours::from_config(&BookingConfig::default()).unwrap();
        let service = BookingService::new(Arc::clone(&repository), hours);

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let service = service.clone();
                tokio::spawn(async move { service.create(request("2025-06-10", "09:00", "10:00")).await })
            })
            .collect();

        let mut created = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(_) => created += 1,
                Err(err) => assert!(matches!(err, BookingError::Conflict)),
            }
        }
        assert_eq!(created, 1);
        assert_eq!(repository.find_in_range(None, None).await.unwrap().len(), 1);
    }
}
