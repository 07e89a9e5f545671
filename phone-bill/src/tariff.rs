use chrono::{Duration, NaiveTime};
use rust_decimal_macros::dec;
use serde::Serialize;

use crate::{
    call_log::CallRecord,
    types::{
        money::Money,
        time::{BillableMinutes, CallDuration},
    },
};

/// The fixed time-of-day tariff of the bill.
///
/// Calls are priced per started minute. Minutes inside the main window cost the main rate and
/// minutes outside it the off rate. Every started minute above the discount threshold reduces
/// the cost of the call by the discount rate.
#[derive(Debug, Clone, Serialize)]
pub struct Tariff {
    /// Start of the main tariff window, inclusive.
    pub main_start: NaiveTime,
    /// End of the main tariff window, exclusive.
    pub main_end: NaiveTime,
    /// Price per started minute inside the main window.
    pub main_rate: Money,
    /// Price per started minute outside the main window.
    pub off_rate: Money,
    /// Calls longer than this many minutes get a discount.
    pub discount_threshold: BillableMinutes,
    /// Discount per started minute above the threshold.
    pub discount_rate: Money,
}

impl Tariff {
    /// The tariff every bill is calculated with.
    #[must_use]
    pub fn standard() -> Self {
        Self {
            main_start: time_of_day(8),
            main_end: time_of_day(16),
            main_rate: dec!(1.0).into(),
            off_rate: dec!(0.5).into(),
            discount_threshold: BillableMinutes::new(5),
            discount_rate: dec!(0.2).into(),
        }
    }

    /// Split the duration of a call in a part inside and a part outside the main window.
    ///
    /// Only the time of day of the start and end are compared to the window, so calls that span
    /// midnight are billed as if the window did not recur on the next day.
    #[must_use]
    pub fn split(&self, call: &CallRecord) -> TariffSplit {
        let total = call.duration();

        let start = call.start.time();
        let end = call.end.time();

        let mut off_tariff = CallDuration::zero();

        if start < self.main_start {
            off_tariff = off_tariff.saturating_add(overlap(start, end.min(self.main_start)));
        }

        if end > self.main_end {
            off_tariff = off_tariff.saturating_add(overlap(start.max(self.main_end), end));
        }

        TariffSplit {
            in_tariff: total.saturating_sub(off_tariff),
            off_tariff,
        }
    }

    /// Price a call that is split over the main window.
    #[must_use]
    pub fn price(&self, split: &TariffSplit) -> CallPrice {
        let in_tariff_minutes = BillableMinutes::from(split.in_tariff);
        let off_tariff_minutes = BillableMinutes::from(split.off_tariff);

        let base_cost = self.main_rate * in_tariff_minutes + self.off_rate * off_tariff_minutes;

        let total_minutes = in_tariff_minutes + off_tariff_minutes;

        let discount = if total_minutes > self.discount_threshold {
            self.discount_rate * (total_minutes - self.discount_threshold)
        } else {
            Money::zero()
        };

        CallPrice {
            in_tariff_minutes,
            off_tariff_minutes,
            base_cost,
            discount,
            total_cost: base_cost - discount,
        }
    }
}

fn time_of_day(hour: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, 0, 0).unwrap_or_else(|| unreachable!("hour is within a day"))
}

/// The length of `[from, to)`, or zero if the range is empty.
fn overlap(from: NaiveTime, to: NaiveTime) -> CallDuration {
    to.signed_duration_since(from).max(Duration::zero()).into()
}

/// The length of a call inside and outside the main tariff window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TariffSplit {
    /// Part of the call inside the main window.
    pub in_tariff: CallDuration,
    /// Part of the call outside the main window.
    pub off_tariff: CallDuration,
}

/// The price of a single call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CallPrice {
    /// Started minutes inside the main window.
    pub in_tariff_minutes: BillableMinutes,
    /// Started minutes outside the main window.
    pub off_tariff_minutes: BillableMinutes,
    /// Cost of all started minutes before the long call discount.
    pub base_cost: Money,
    /// The long call discount, zero for short calls.
    pub discount: Money,
    /// Cost of the call after discount. This is not floored at zero.
    pub total_cost: Money,
}
