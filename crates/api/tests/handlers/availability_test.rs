use chrono::{NaiveDate, Utc};
use fieldsync_core::{
    errors::FieldError,
    models::availability::{
        AvailabilityCheckResponse, AvailabilityDay, AvailabilitySet, DaySlots,
        GetAvailabilityResponse, MatchResponse, Slot, TechnicianMatch, UpdateAvailabilityRequest,
        UpdateAvailabilityResponse,
    },
};
use fieldsync_db::models::DbAvailabilityDay;
use mockall::predicate;
use pretty_assertions::assert_eq;
use uuid::Uuid;

use crate::test_utils::{availability_row, date, technician_fixture, TestContext};
use fieldsync_api::{handlers::availability::parse_date, middleware::error_handling::AppError};

fn day_from_row(row: DbAvailabilityDay) -> AvailabilityDay {
    AvailabilityDay::new(
        row.date,
        DaySlots {
            morning: row.morning,
            afternoon: row.afternoon,
        },
    )
}

// Wrapper mirroring the load-or-seed flow of the availability handler, with
// the repositories swapped for mocks.
async fn load_availability_wrapper(
    ctx: &mut TestContext,
    technician_id: Uuid,
    today: NaiveDate,
    window_days: usize,
) -> Result<GetAvailabilityResponse, AppError> {
    ctx.technician_repo
        .get_technician_by_id(technician_id)
        .await
        .map_err(FieldError::Storage)?
        .ok_or_else(|| {
            AppError(FieldError::NotFound(format!(
                "Technician with ID {} not found",
                technician_id
            )))
        })?;

    let rows = ctx
        .availability_repo
        .get_availability_by_technician_id(technician_id)
        .await
        .map_err(FieldError::Storage)?;

    let set = if rows.is_empty() {
        let seeded = AvailabilitySet::default_window(today, window_days);
        ctx.availability_repo
            .replace_availability(technician_id, seeded.days())
            .await
            .map_err(FieldError::Storage)?;
        seeded
    } else {
        AvailabilitySet::from_days(rows.into_iter().map(day_from_row))
    };

    Ok(GetAvailabilityResponse {
        technician_id,
        days: set.days(),
    })
}

// Wrapper mirroring the whole-set replace flow of the availability handler.
async fn replace_availability_wrapper(
    ctx: &mut TestContext,
    technician_id: Uuid,
    payload: UpdateAvailabilityRequest,
) -> Result<UpdateAvailabilityResponse, AppError> {
    ctx.technician_repo
        .get_technician_by_id(technician_id)
        .await
        .map_err(FieldError::Storage)?
        .ok_or_else(|| {
            AppError(FieldError::NotFound(format!(
                "Technician with ID {} not found",
                technician_id
            )))
        })?;

    let set = AvailabilitySet::from_days(payload.days);

    ctx.availability_repo
        .replace_availability(technician_id, set.days())
        .await
        .map_err(FieldError::Storage)?;

    Ok(UpdateAvailabilityResponse {
        technician_id,
        updated_at: Utc::now(),
    })
}

// Wrapper mirroring the check endpoint: boundary parsing first, then the
// read-only query against the stored set.
async fn check_availability_wrapper(
    ctx: &mut TestContext,
    technician_id: Uuid,
    date_text: &str,
    slot_text: Option<&str>,
) -> Result<AvailabilityCheckResponse, AppError> {
    let date = parse_date(date_text)?;
    let slot = slot_text.map(str::parse::<Slot>).transpose()?;

    let rows = ctx
        .availability_repo
        .get_availability_by_technician_id(technician_id)
        .await
        .map_err(FieldError::Storage)?;
    let set = AvailabilitySet::from_days(rows.into_iter().map(day_from_row));

    let available = match slot {
        Some(slot) => set.is_slot_available(date, slot),
        None => set.is_date_available(date),
    };

    Ok(AvailabilityCheckResponse {
        technician_id,
        date,
        slot,
        available,
    })
}

#[tokio::test]
async fn test_load_availability_unknown_technician() {
    let mut ctx = TestContext::new();
    let technician_id = Uuid::new_v4();

    ctx.technician_repo
        .expect_get_technician_by_id()
        .with(predicate::eq(technician_id))
        .returning(|_| Ok(None));

    let result =
        load_availability_wrapper(&mut ctx, technician_id, date(2025, 5, 16), 5).await;

    assert!(result.is_err());
    match result.unwrap_err().0 {
        FieldError::NotFound(_) => {}
        e => panic!("Expected NotFound error, got: {:?}", e),
    }
}

#[tokio::test]
async fn test_load_availability_seeds_default_window_when_empty() {
    let mut ctx = TestContext::new();
    let technician = technician_fixture("Karim Benali");
    let technician_id = technician.id;

    ctx.technician_repo
        .expect_get_technician_by_id()
        .returning(move |_| Ok(Some(technician.clone())));

    ctx.availability_repo
        .expect_get_availability_by_technician_id()
        .returning(|_| Ok(vec![]));

    // The seeded window must be persisted before the response goes out.
    ctx.availability_repo
        .expect_replace_availability()
        .withf(move |id, days| *id == technician_id && days.len() == 5)
        .times(1)
        .returning(|_, _| Ok(()));

    // 2025-05-16 is a Friday; five business days are Fri 16 and Mon 19
    // through Thu 22.
    let response = load_availability_wrapper(&mut ctx, technician_id, date(2025, 5, 16), 5)
        .await
        .unwrap();

    assert_eq!(response.days.len(), 5);
    assert!(response.days.iter().all(|day| day.slots == DaySlots {
        morning: true,
        afternoon: true,
    }));
    assert_eq!(response.days[0].date, date(2025, 5, 16));
    assert_eq!(response.days[1].date, date(2025, 5, 19));
    assert_eq!(response.days[4].date, date(2025, 5, 22));
}

#[tokio::test]
async fn test_load_availability_returns_stored_set() {
    let mut ctx = TestContext::new();
    let technician = technician_fixture("Ana Costa");
    let technician_id = technician.id;

    ctx.technician_repo
        .expect_get_technician_by_id()
        .returning(move |_| Ok(Some(technician.clone())));

    ctx.availability_repo
        .expect_get_availability_by_technician_id()
        .returning(move |id| {
            Ok(vec![
                availability_row(id, date(2025, 5, 20), true, false),
                availability_row(id, date(2025, 5, 21), false, true),
            ])
        });

    let response = load_availability_wrapper(&mut ctx, technician_id, date(2025, 5, 16), 5)
        .await
        .unwrap();

    assert_eq!(response.days.len(), 2);
    assert!(response.days[0].available);
    assert_eq!(
        response.days[0].slots,
        DaySlots {
            morning: true,
            afternoon: false,
        }
    );
    assert!(response.days[1].available);
}

#[tokio::test]
async fn test_replace_availability_normalizes_payload() {
    let mut ctx = TestContext::new();
    let technician = technician_fixture("Karim Benali");
    let technician_id = technician.id;

    ctx.technician_repo
        .expect_get_technician_by_id()
        .returning(move |_| Ok(Some(technician.clone())));

    // The duplicate date resolves last-wins and the both-slots-closed day is
    // dropped, so exactly one day reaches storage.
    ctx.availability_repo
        .expect_replace_availability()
        .withf(move |id, days| {
            *id == technician_id
                && days.len() == 1
                && days[0].date == date(2025, 5, 20)
                && days[0].slots == DaySlots {
                    morning: false,
                    afternoon: true,
                }
        })
        .times(1)
        .returning(|_, _| Ok(()));

    let payload = UpdateAvailabilityRequest {
        days: vec![
            AvailabilityDay::new(date(2025, 5, 20), DaySlots::full()),
            AvailabilityDay::new(date(2025, 5, 20), DaySlots::only(Slot::Afternoon)),
            AvailabilityDay::new(date(2025, 5, 21), DaySlots::default()),
        ],
    };

    let response = replace_availability_wrapper(&mut ctx, technician_id, payload)
        .await
        .unwrap();
    assert_eq!(response.technician_id, technician_id);
}

#[tokio::test]
async fn test_replace_availability_surfaces_storage_failure() {
    let mut ctx = TestContext::new();
    let technician = technician_fixture("Ana Costa");
    let technician_id = technician.id;

    ctx.technician_repo
        .expect_get_technician_by_id()
        .returning(move |_| Ok(Some(technician.clone())));

    ctx.availability_repo
        .expect_replace_availability()
        .returning(|_, _| Err(eyre::eyre!("connection reset during replace")));

    let payload = UpdateAvailabilityRequest {
        days: vec![AvailabilityDay::new(date(2025, 5, 20), DaySlots::full())],
    };

    let result = replace_availability_wrapper(&mut ctx, technician_id, payload).await;

    // The failure is recoverable; the stored rows were never touched and the
    // caller may retry the save.
    assert!(result.is_err());
    match result.unwrap_err().0 {
        FieldError::Storage(_) => {}
        e => panic!("Expected Storage error, got: {:?}", e),
    }
}

#[tokio::test]
async fn test_check_availability_malformed_date() {
    let mut ctx = TestContext::new();

    let result =
        check_availability_wrapper(&mut ctx, Uuid::new_v4(), "20-05-2025", None).await;

    assert!(result.is_err());
    match result.unwrap_err().0 {
        FieldError::InvalidInput(_) => {}
        e => panic!("Expected InvalidInput error, got: {:?}", e),
    }
}

#[tokio::test]
async fn test_check_availability_unknown_slot_name() {
    let mut ctx = TestContext::new();

    let result =
        check_availability_wrapper(&mut ctx, Uuid::new_v4(), "2025-05-20", Some("evening")).await;

    assert!(result.is_err());
    match result.unwrap_err().0 {
        FieldError::InvalidInput(_) => {}
        e => panic!("Expected InvalidInput error, got: {:?}", e),
    }
}

#[tokio::test]
async fn test_check_availability_absent_date_answers_false() {
    let mut ctx = TestContext::new();
    let technician_id = Uuid::new_v4();

    ctx.availability_repo
        .expect_get_availability_by_technician_id()
        .returning(move |id| Ok(vec![availability_row(id, date(2025, 5, 20), true, true)]));

    // A date with no record is a valid question with a negative answer.
    let response = check_availability_wrapper(&mut ctx, technician_id, "2025-05-21", None)
        .await
        .unwrap();
    assert!(!response.available);
}

#[tokio::test]
async fn test_check_availability_specific_slot() {
    let mut ctx = TestContext::new();
    let technician_id = Uuid::new_v4();

    ctx.availability_repo
        .expect_get_availability_by_technician_id()
        .returning(move |id| Ok(vec![availability_row(id, date(2025, 5, 20), true, false)]));

    let response =
        check_availability_wrapper(&mut ctx, technician_id, "2025-05-20", Some("morning"))
            .await
            .unwrap();
    assert!(response.available);
    assert_eq!(response.slot, Some(Slot::Morning));

    let response =
        check_availability_wrapper(&mut ctx, technician_id, "2025-05-20", Some("afternoon"))
            .await
            .unwrap();
    assert!(!response.available);
}

#[test]
fn test_match_ranking_orders_and_truncates() {
    // The ranking step of the match endpoint is plain data manipulation over
    // per-technician counts; exercise it directly.
    let start = date(2025, 5, 19);
    let end = date(2025, 5, 23);

    let sets = [
        ("Ana Costa", 2usize),
        ("Karim Benali", 4),
        ("Lena Fischer", 4),
        ("Marc Petit", 0),
    ]
    .map(|(name, open_days)| {
        let mut set = AvailabilitySet::new();
        for offset in 0..open_days as i64 {
            set.toggle_day(start + chrono::Duration::days(offset));
        }
        (name, set)
    });

    let mut matches: Vec<TechnicianMatch> = sets
        .iter()
        .filter_map(|(name, set)| {
            let available_days = set.count_available_days_in_range(start, end);
            (available_days > 0).then(|| TechnicianMatch {
                id: Uuid::new_v4(),
                name: name.to_string(),
                available_days,
            })
        })
        .collect();

    matches.sort_by(|a, b| {
        b.available_days
            .cmp(&a.available_days)
            .then_with(|| a.name.cmp(&b.name))
    });
    matches.truncate(2);

    let response = MatchResponse { matches };
    assert_eq!(response.matches.len(), 2);
    // Equal counts resolve alphabetically; the fully booked technician is
    // filtered out before ranking.
    assert_eq!(response.matches[0].name, "Karim Benali");
    assert_eq!(response.matches[0].available_days, 4);
    assert_eq!(response.matches[1].name, "Lena Fischer");
}
