//! Read-only aggregates for the admin dashboard

use std::collections::BTreeMap;

use chrono::{Local, TimeZone};

use crate::store::Store;

/// Seat usage of one workshop
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkshopOccupancy {
    pub workshop_id: String,
    pub title: String,
    pub exhibition_id: String,
    pub held: usize,
    pub capacity: u32,
}

impl Store {
    /// Payment totals per local calendar date (`YYYY-MM-DD`), ascending
    pub fn daily_sales(&self) -> BTreeMap<String, f64> {
        self.daily_sales_in(&Local)
    }

    /// Payment totals per calendar date as seen in `tz`
    pub fn daily_sales_in<Tz: TimeZone>(&self, tz: &Tz) -> BTreeMap<String, f64> {
        let mut totals = BTreeMap::new();
        for payment in self.payments() {
            *totals.entry(payment.date_key_in(tz)).or_insert(0.0) += payment.amount;
        }
        totals
    }

    /// One row per workshop in id order
    pub fn workshop_occupancy(&self) -> Vec<WorkshopOccupancy> {
        self.workshops()
            .map(|w| WorkshopOccupancy {
                workshop_id: w.id.clone(),
                title: w.title.clone(),
                exhibition_id: w.exhibition_id.clone(),
                held: w.held_seats(),
                capacity: w.capacity,
            })
            .collect()
    }
}
