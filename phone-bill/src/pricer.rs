use std::collections::BTreeMap;

use serde::Serialize;
use tracing::debug;

use crate::{
    call_log::CallRecord,
    tariff::{CallPrice, Tariff, TariffSplit},
    types::money::Money,
    Error, Result,
};

/// Pricer that encapsulates the calls of a single log and the tariff to price them with.
/// To run the pricer call `build_report`. The resulting report contains the total, the free
/// number and a breakdown per call.
///
/// ```ignore
/// let calls = phone_bill::call_log::parse(&log)?;
/// let report = Pricer::new(&calls).build_report()?;
/// ```
pub struct Pricer<'a> {
    calls: &'a [CallRecord],
    tariff: Tariff,
}

impl<'a> Pricer<'a> {
    /// Instantiate the pricer with the parsed calls of a log and the standard tariff.
    #[must_use]
    pub fn new(calls: &'a [CallRecord]) -> Self {
        Self {
            calls,
            tariff: Tariff::standard(),
        }
    }

    /// Price every call, select the free number and build a report containing the results.
    pub fn build_report(&self) -> Result<Report> {
        let calls: Vec<PricedCall> = self
            .calls
            .iter()
            .map(|call| PricedCall::new(call, &self.tariff))
            .collect();

        let mut number_totals: BTreeMap<String, Money> = BTreeMap::new();

        for call in &calls {
            *number_totals
                .entry(call.record.number.clone())
                .or_insert_with(Money::zero) += call.total_cost();
        }

        let (free_number, free_cost) = select_free_number(&number_totals).ok_or(Error::EmptyLog)?;

        debug!(number = free_number, cost = %free_cost, "selected free number");

        let total_cost = calls
            .iter()
            .filter(|call| call.record.number != free_number)
            .map(PricedCall::total_cost)
            .sum();

        let report = Report {
            tariff: self.tariff.clone(),
            free_number: free_number.to_owned(),
            free_cost,
            total_cost,
            calls,
            number_totals,
        };

        Ok(report)
    }
}

/// The number with the highest total cost. Ties resolve to the lexicographically smallest number.
fn select_free_number(number_totals: &BTreeMap<String, Money>) -> Option<(&str, Money)> {
    let mut free: Option<(&str, Money)> = None;

    for (number, &cost) in number_totals {
        match free {
            Some((_, max)) if cost <= max => {}
            _ => free = Some((number, cost)),
        }
    }

    free
}

/// Structure containing the calls of a log priced according to the standard tariff.
#[derive(Debug, Serialize)]
pub struct Report {
    /// The tariff the calls were priced with.
    pub tariff: Tariff,
    /// Every call of the log with its price, in log order.
    pub calls: Vec<PricedCall>,
    /// Total cost of all calls per number, including the free number.
    pub number_totals: BTreeMap<String, Money>,
    /// The number with the highest total cost. All calls to it are free.
    pub free_number: String,
    /// The total cost of the calls to the free number, which is not billed.
    pub free_cost: Money,
    /// The bill: total cost of all calls except those to the free number.
    pub total_cost: Money,
}

impl Report {
    /// Whether the given call is free because it was made to the free number.
    #[must_use]
    pub fn is_free(&self, call: &PricedCall) -> bool {
        call.record.number == self.free_number
    }
}

/// A call together with its tariff split and price.
#[derive(Debug, Clone, Serialize)]
pub struct PricedCall {
    /// The call as read from the log.
    pub record: CallRecord,
    /// The duration of the call inside and outside the main window.
    pub split: TariffSplit,
    /// The price of the call.
    pub price: CallPrice,
}

impl PricedCall {
    fn new(record: &CallRecord, tariff: &Tariff) -> Self {
        let split = tariff.split(record);
        let price = tariff.price(&split);

        debug!(
            line = record.line,
            number = %record.number,
            in_tariff_minutes = price.in_tariff_minutes.count(),
            off_tariff_minutes = price.off_tariff_minutes.count(),
            cost = %price.total_cost,
            "priced call"
        );

        Self {
            record: record.clone(),
            split,
            price,
        }
    }

    /// The cost of this call after discount.
    #[must_use]
    pub fn total_cost(&self) -> Money {
        self.price.total_cost
    }
}
