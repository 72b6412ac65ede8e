// Integration tests for reserve/cancel invariants

mod common;

use common::{add_workshop, all_access_pass, attendee, empty_store, exhibition_pass};
use greenwave_core::model::ReservationStatus;
use greenwave_core::ExErrorKind;
use greenwave_engine::{cancel_reservation, reserve_workshop};
use greenwave_store::{Store, StoreConfig};
use std::fs;
use std::sync::{Arc, Mutex};
use std::thread;

#[test]
fn test_full_workshop_rejects_without_mutation() {
    // GIVEN a one-seat workshop that is already taken
    let (_dir, mut store) = empty_store();
    add_workshop(&mut store, "WS-X", "EX1", 1);
    let ada = attendee(&mut store, "Ada");
    let bob = attendee(&mut store, "Bob");
    let ada_pass = all_access_pass(&mut store, &ada);
    let bob_pass = all_access_pass(&mut store, &bob);
    reserve_workshop(&mut store, &ada.id, &ada_pass.ticket.id, "WS-X").unwrap();
    let held_before = store.workshop("WS-X").unwrap().reservation_ids.clone();

    // WHEN another attendee tries to reserve
    let result = reserve_workshop(&mut store, &bob.id, &bob_pass.ticket.id, "WS-X");

    // THEN capacity is exceeded and nothing changed
    assert_eq!(result.unwrap_err().kind(), ExErrorKind::CapacityExceeded);
    assert_eq!(store.workshop("WS-X").unwrap().reservation_ids, held_before);
    assert_eq!(store.reservations().count(), 1);
    assert!(store.account(&bob.id).unwrap().reservation_ids.is_empty());
}

#[test]
fn test_scope_excludes_other_exhibitions() {
    let (_dir, mut store) = empty_store();
    add_workshop(&mut store, "WS-P", "EX2", 10);
    let ada = attendee(&mut store, "Ada");
    let pass = exhibition_pass(&mut store, &ada, &["EX1"]);

    let err = reserve_workshop(&mut store, &ada.id, &pass.ticket.id, "WS-P").unwrap_err();

    assert_eq!(err.kind(), ExErrorKind::AccessDenied);
    assert_eq!(err.op(), Some("reserve_workshop"));
    assert_eq!(store.workshop("WS-P").unwrap().held_seats(), 0);
}

#[test]
fn test_full_workshop_is_reported_before_scope() {
    // GIVEN a full EX2 workshop and an attendee whose pass only covers EX1
    let (_dir, mut store) = empty_store();
    add_workshop(&mut store, "WS-P", "EX2", 1);
    let bob = attendee(&mut store, "Bob");
    let bobs = all_access_pass(&mut store, &bob);
    reserve_workshop(&mut store, &bob.id, &bobs.ticket.id, "WS-P").unwrap();
    let ada = attendee(&mut store, "Ada");
    let pass = exhibition_pass(&mut store, &ada, &["EX1"]);

    // WHEN the attendee tries to reserve it
    let err = reserve_workshop(&mut store, &ada.id, &pass.ticket.id, "WS-P").unwrap_err();

    // THEN capacity is what fails
    assert_eq!(err.kind(), ExErrorKind::CapacityExceeded);
}

#[test]
fn test_foreign_ticket_is_rejected() {
    // GIVEN Bob holding a ticket and Ada holding none
    let (_dir, mut store) = empty_store();
    add_workshop(&mut store, "WS-1", "EX1", 10);
    let ada = attendee(&mut store, "Ada");
    let bob = attendee(&mut store, "Bob");
    let bobs = all_access_pass(&mut store, &bob);

    // WHEN Ada presents Bob's ticket
    let err = reserve_workshop(&mut store, &ada.id, &bobs.ticket.id, "WS-1").unwrap_err();

    // THEN access is denied
    assert_eq!(err.kind(), ExErrorKind::AccessDenied);
    assert_eq!(store.workshop("WS-1").unwrap().held_seats(), 0);
}

#[test]
fn test_unknown_references_are_not_found() {
    let (_dir, mut store) = empty_store();
    add_workshop(&mut store, "WS-1", "EX1", 10);
    let ada = attendee(&mut store, "Ada");
    let pass = all_access_pass(&mut store, &ada);

    let cases = [
        ("U-missing", pass.ticket.id.as_str(), "WS-1"),
        (ada.id.as_str(), "T-missing", "WS-1"),
        (ada.id.as_str(), pass.ticket.id.as_str(), "WS-missing"),
    ];
    for (account_id, ticket_id, workshop_id) in cases {
        let err = reserve_workshop(&mut store, account_id, ticket_id, workshop_id).unwrap_err();
        assert_eq!(err.kind(), ExErrorKind::NotFound);
    }
    assert_eq!(store.reservations().count(), 0);
}

#[test]
fn test_cancel_frees_exactly_one_seat() {
    // GIVEN two reservations on the same workshop
    let (_dir, mut store) = empty_store();
    add_workshop(&mut store, "WS-1", "EX1", 10);
    let ada = attendee(&mut store, "Ada");
    let pass = all_access_pass(&mut store, &ada);
    let first = reserve_workshop(&mut store, &ada.id, &pass.ticket.id, "WS-1").unwrap();
    let second = reserve_workshop(&mut store, &ada.id, &pass.ticket.id, "WS-1").unwrap();
    assert_eq!(store.workshop("WS-1").unwrap().available_seats(), 8);

    // WHEN the first is cancelled
    cancel_reservation(&mut store, &first.id).unwrap();

    // THEN one seat is freed and only the second is still held
    let workshop = store.workshop("WS-1").unwrap();
    assert_eq!(workshop.available_seats(), 9);
    assert!(workshop.has_reservation(&second.id));
    assert_eq!(
        store.account(&ada.id).unwrap().reservation_ids,
        vec![second.id.clone()]
    );
    assert_eq!(store.reservations().count(), 2);
}

#[test]
fn test_second_cancel_is_rejected() {
    let (_dir, mut store) = empty_store();
    add_workshop(&mut store, "WS-1", "EX1", 10);
    let ada = attendee(&mut store, "Ada");
    let pass = all_access_pass(&mut store, &ada);
    let reservation = reserve_workshop(&mut store, &ada.id, &pass.ticket.id, "WS-1").unwrap();
    cancel_reservation(&mut store, &reservation.id).unwrap();

    let err = cancel_reservation(&mut store, &reservation.id).unwrap_err();

    assert_eq!(err.kind(), ExErrorKind::AlreadyCancelled);
    assert_eq!(store.workshop("WS-1").unwrap().available_seats(), 10);
    assert_eq!(
        store.reservation(&reservation.id).unwrap().status,
        ReservationStatus::Cancelled
    );
}

#[test]
fn test_cancel_tolerates_missing_links() {
    // GIVEN a confirmed reservation already unlinked from workshop and account
    let (dir, mut store) = empty_store();
    add_workshop(&mut store, "WS-1", "EX1", 3);
    let ada = attendee(&mut store, "Ada");
    let pass = all_access_pass(&mut store, &ada);
    let reservation = reserve_workshop(&mut store, &ada.id, &pass.ticket.id, "WS-1").unwrap();

    let mut workshop = store.workshop("WS-1").unwrap().clone();
    assert!(workshop.release_seat(&reservation.id));
    store.update_workshop(workshop.clone()).unwrap();
    let mut account = store.account(&ada.id).unwrap().clone();
    assert!(account.remove_reservation_id(&reservation.id));
    store.update_account(account.clone()).unwrap();

    let workshops_file = fs::read(dir.path().join("workshops.json")).unwrap();
    let accounts_file = fs::read(dir.path().join("accounts.json")).unwrap();

    // WHEN it is cancelled
    let cancelled = cancel_reservation(&mut store, &reservation.id).unwrap();

    // THEN only the status changes
    assert_eq!(cancelled.status, ReservationStatus::Cancelled);
    assert_eq!(store.workshop("WS-1").unwrap(), &workshop);
    assert_eq!(store.workshop("WS-1").unwrap().available_seats(), 3);
    assert_eq!(store.account(&ada.id).unwrap(), &account);
    assert_eq!(fs::read(dir.path().join("workshops.json")).unwrap(), workshops_file);
    assert_eq!(fs::read(dir.path().join("accounts.json")).unwrap(), accounts_file);

    let reopened = Store::open(&StoreConfig::new(dir.path()).without_seed()).unwrap();
    assert_eq!(
        reopened.reservation(&reservation.id).unwrap().status,
        ReservationStatus::Cancelled
    );
}

#[test]
fn test_cancel_after_failed_workshop_write_can_be_retried() {
    // GIVEN a one-seat workshop with its seat taken
    let (dir, mut store) = empty_store();
    add_workshop(&mut store, "WS-1", "EX1", 1);
    let ada = attendee(&mut store, "Ada");
    let pass = all_access_pass(&mut store, &ada);
    let reservation = reserve_workshop(&mut store, &ada.id, &pass.ticket.id, "WS-1").unwrap();

    // WHEN the workshop file cannot be written during cancel
    let blocker = dir.path().join("workshops.json.tmp");
    fs::create_dir(&blocker).unwrap();
    let err = cancel_reservation(&mut store, &reservation.id).unwrap_err();

    // THEN the reservation stays confirmed with its seat held
    assert_eq!(err.kind(), ExErrorKind::Io);
    assert_eq!(
        store.reservation(&reservation.id).unwrap().status,
        ReservationStatus::Confirmed
    );
    assert_eq!(store.workshop("WS-1").unwrap().available_seats(), 0);

    // AND a retry once the disk recovers frees the seat
    fs::remove_dir(&blocker).unwrap();
    let cancelled = cancel_reservation(&mut store, &reservation.id).unwrap();
    assert_eq!(cancelled.status, ReservationStatus::Cancelled);

    let reopened = Store::open(&StoreConfig::new(dir.path()).without_seed()).unwrap();
    assert_eq!(reopened.workshop("WS-1").unwrap().available_seats(), 1);
    assert!(reopened.account(&ada.id).unwrap().reservation_ids.is_empty());
    assert_eq!(
        reopened.reservation(&reservation.id).unwrap().status,
        ReservationStatus::Cancelled
    );
}

#[test]
fn test_cancel_after_failed_account_write_can_be_retried() {
    // GIVEN one of two seats taken
    let (dir, mut store) = empty_store();
    add_workshop(&mut store, "WS-1", "EX1", 2);
    let ada = attendee(&mut store, "Ada");
    let pass = all_access_pass(&mut store, &ada);
    let reservation = reserve_workshop(&mut store, &ada.id, &pass.ticket.id, "WS-1").unwrap();

    // WHEN the account file cannot be written during cancel
    let blocker = dir.path().join("accounts.json.tmp");
    fs::create_dir(&blocker).unwrap();
    let err = cancel_reservation(&mut store, &reservation.id).unwrap_err();

    // THEN the seat is back but the reservation is still confirmed
    assert_eq!(err.kind(), ExErrorKind::Io);
    assert_eq!(store.workshop("WS-1").unwrap().available_seats(), 2);
    assert_eq!(
        store.reservation(&reservation.id).unwrap().status,
        ReservationStatus::Confirmed
    );

    // AND the retry finishes without freeing a second seat
    fs::remove_dir(&blocker).unwrap();
    cancel_reservation(&mut store, &reservation.id).unwrap();
    assert_eq!(store.workshop("WS-1").unwrap().available_seats(), 2);
    assert_eq!(store.workshop("WS-1").unwrap().held_seats(), 0);
    assert!(store.account(&ada.id).unwrap().reservation_ids.is_empty());
}

#[test]
fn test_cancel_unknown_reservation() {
    let (_dir, mut store) = empty_store();
    let err = cancel_reservation(&mut store, "R-missing").unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::NotFound);
}

#[test]
fn test_reservation_survives_reopen() {
    let (dir, mut store) = empty_store();
    add_workshop(&mut store, "WS-1", "EX1", 10);
    let ada = attendee(&mut store, "Ada");
    let pass = all_access_pass(&mut store, &ada);
    let reservation = reserve_workshop(&mut store, &ada.id, &pass.ticket.id, "WS-1").unwrap();
    store.close().unwrap();

    let reopened =
        Store::open(&greenwave_store::StoreConfig::new(dir.path()).without_seed()).unwrap();
    assert!(reopened
        .workshop("WS-1")
        .unwrap()
        .has_reservation(&reservation.id));
    assert_eq!(
        reopened.account(&ada.id).unwrap().reservation_ids,
        vec![reservation.id]
    );
}

#[test]
fn test_concurrent_reservations_never_overbook() {
    // GIVEN a shared store with a three-seat workshop and eight ticket holders
    let (_dir, mut store) = empty_store();
    add_workshop(&mut store, "WS-HOT", "EX1", 3);
    let holders: Vec<(String, String)> = (0..8)
        .map(|i| {
            let account = attendee(&mut store, &format!("Racer{}", i));
            let pass = all_access_pass(&mut store, &account);
            (account.id, pass.ticket.id)
        })
        .collect();
    let shared = Arc::new(Mutex::new(store));

    // WHEN every holder races for a seat, each holding the lock for the whole command
    let handles: Vec<_> = holders
        .into_iter()
        .map(|(account_id, ticket_id)| {
            let shared = Arc::clone(&shared);
            thread::spawn(move || {
                let mut store = shared.lock().unwrap();
                reserve_workshop(&mut store, &account_id, &ticket_id, "WS-HOT")
            })
        })
        .collect();
    let outcomes: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();

    // THEN exactly capacity reservations succeed and the rest see CapacityExceeded
    let succeeded = outcomes.iter().filter(|r| r.is_ok()).count();
    let rejected = outcomes
        .iter()
        .filter(|r| matches!(r, Err(e) if e.kind() == ExErrorKind::CapacityExceeded))
        .count();
    assert_eq!(succeeded, 3);
    assert_eq!(rejected, 5);

    let store = shared.lock().unwrap();
    let workshop = store.workshop("WS-HOT").unwrap();
    assert_eq!(workshop.held_seats(), 3);
    assert_eq!(workshop.available_seats(), 0);
}
