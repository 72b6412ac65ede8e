// Integration tests for administrator commands

mod common;

use common::{attendee, exhibition_pass, seeded_store, VERIFIER};
use greenwave_core::ExErrorKind;
use greenwave_engine::{
    admin_upgrade_ticket, ensure_admin, occupancy_report, reserve_workshop, sales_report,
    AdminConfig,
};

#[test]
fn test_admin_upgrades_first_ticket_by_email() {
    // GIVEN an admin and an attendee with two exhibition passes
    let (_dir, mut store) = seeded_store();
    let admin = ensure_admin(&mut store, &VERIFIER, &AdminConfig::default()).unwrap();
    let ada = attendee(&mut store, "Ada");
    let first = exhibition_pass(&mut store, &ada, &["EX1"]);
    let second = exhibition_pass(&mut store, &ada, &["EX1"]);

    // WHEN the admin adds EX2 to the attendee's ticket twice
    let granted = admin_upgrade_ticket(&mut store, &admin.id, "ADA@example.com", "EX2").unwrap();
    let repeated = admin_upgrade_ticket(&mut store, &admin.id, "ada@example.com", "EX2").unwrap();

    // THEN only the first ticket changes, and only once
    assert!(granted);
    assert!(!repeated);
    assert_eq!(store.ticket(&first.ticket.id).unwrap().price, 90.0);
    assert_eq!(store.ticket(&second.ticket.id).unwrap().price, 50.0);
}

#[test]
fn test_attendee_cannot_use_admin_commands() {
    let (_dir, mut store) = seeded_store();
    let ada = attendee(&mut store, "Ada");
    exhibition_pass(&mut store, &ada, &["EX1"]);

    let upgrade = admin_upgrade_ticket(&mut store, &ada.id, "ada@example.com", "EX2").unwrap_err();
    let sales = sales_report(&store, &ada.id).unwrap_err();
    let occupancy = occupancy_report(&store, &ada.id).unwrap_err();

    assert_eq!(upgrade.kind(), ExErrorKind::Forbidden);
    assert_eq!(sales.kind(), ExErrorKind::Forbidden);
    assert_eq!(occupancy.kind(), ExErrorKind::Forbidden);
}

#[test]
fn test_admin_upgrade_target_errors() {
    let (_dir, mut store) = seeded_store();
    let admin = ensure_admin(&mut store, &VERIFIER, &AdminConfig::default()).unwrap();
    attendee(&mut store, "Ticketless");

    let unknown = admin_upgrade_ticket(&mut store, &admin.id, "nobody@example.com", "EX2")
        .unwrap_err();
    let no_tickets = admin_upgrade_ticket(&mut store, &admin.id, "ticketless@example.com", "EX2")
        .unwrap_err();

    assert_eq!(unknown.kind(), ExErrorKind::NotFound);
    assert_eq!(no_tickets.kind(), ExErrorKind::InvalidRequest);
}

#[test]
fn test_sales_report_sums_todays_payments() {
    let (_dir, mut store) = seeded_store();
    let admin = ensure_admin(&mut store, &VERIFIER, &AdminConfig::default()).unwrap();
    let ada = attendee(&mut store, "Ada");
    let a = exhibition_pass(&mut store, &ada, &["EX1", "EX2"]);
    let b = exhibition_pass(&mut store, &ada, &["EX3"]);

    let sales = sales_report(&store, &admin.id).unwrap();

    let total: f64 = sales.values().sum();
    assert_eq!(total, a.payment.amount + b.payment.amount);
    assert!(sales.contains_key(&a.payment.date_key()));
}

#[test]
fn test_occupancy_report_tracks_reservations() {
    let (_dir, mut store) = seeded_store();
    let admin = ensure_admin(&mut store, &VERIFIER, &AdminConfig::default()).unwrap();
    let ada = attendee(&mut store, "Ada");
    let pass = exhibition_pass(&mut store, &ada, &["EX1"]);
    reserve_workshop(&mut store, &ada.id, &pass.ticket.id, "WS11").unwrap();

    let rows = occupancy_report(&store, &admin.id).unwrap();

    assert_eq!(rows.len(), 9);
    let ws11 = rows.iter().find(|r| r.workshop_id == "WS11").unwrap();
    assert_eq!(ws11.held, 1);
    assert_eq!(ws11.capacity, 15);
    assert!(rows
        .iter()
        .filter(|r| r.workshop_id != "WS11")
        .all(|r| r.held == 0));
}
