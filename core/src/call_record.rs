//! Synthetic call-detail-record generation.
//!
//! NOTE: `call_type` is drawn independently of `is_missed`, so a record can be
//! `outgoing` with `is_missed = true` (and the reverse). Downstream consumers
//! should treat `is_missed` as authoritative for duration and cost.

use crate::{
    config::{CallConfig, MAX_DAYS_BACK},
    customer::CustomerRecord,
    error::{CarrierError, CarrierResult},
    identity::IdentityGenerator,
    phone::PhoneNumber,
    rng::StreamRng,
    types::{round2, CallId, CustomerId},
};
use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CallType {
    Outgoing,
    Incoming,
    Missed,
}

impl CallType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Outgoing => "outgoing",
            Self::Incoming => "incoming",
            Self::Missed => "missed",
        }
    }
}

impl fmt::Display for CallType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One row of the call-record file, in column order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CallRecord {
    pub call_id: CallId,
    pub customer_id: CustomerId,
    pub customer_phone: String,
    pub other_party_phone: String,
    pub call_type: CallType,
    #[serde(with = "timestamp")]
    pub start_time: NaiveDateTime,
    pub duration_seconds: i64,
    pub is_missed: bool,
    pub is_roaming: bool,
    pub cell_tower_city: String,
    pub cell_tower_country: String,
    pub cost_usd: f64,
}

impl CallRecord {
    /// Missed calls carry no duration and no charge.
    pub fn validate(&self) -> CarrierResult<()> {
        if self.is_missed && (self.duration_seconds != 0 || self.cost_usd != 0.0) {
            return Err(CarrierError::InvalidRecord(format!(
                "call {}: missed call with duration {}s and cost {}",
                self.call_id, self.duration_seconds, self.cost_usd
            )));
        }
        if self.duration_seconds < 0 || self.cost_usd < 0.0 {
            return Err(CarrierError::InvalidRecord(format!(
                "call {}: negative duration or cost",
                self.call_id
            )));
        }
        Ok(())
    }
}

/// `YYYY-MM-DD HH:MM:SS`, which also sorts chronologically as text.
pub mod timestamp {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub const FORMAT: &str = "%Y-%m-%d %H:%M:%S";

    pub fn format(t: &NaiveDateTime) -> String {
        t.format(FORMAT).to_string()
    }

    pub fn serialize<S: Serializer>(t: &NaiveDateTime, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&format(t))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<NaiveDateTime, D::Error> {
        let raw = String::deserialize(d)?;
        NaiveDateTime::parse_from_str(raw.trim(), FORMAT).map_err(serde::de::Error::custom)
    }
}

pub struct CallRecordGenerator<'a> {
    config: &'a CallConfig,
    window_end: NaiveDateTime,
}

impl<'a> CallRecordGenerator<'a> {
    /// `window_end` is "now": calls fall in `[window_end - days_back, window_end]`.
    pub fn new(config: &'a CallConfig, window_end: NaiveDateTime) -> Self {
        Self { config, window_end }
    }

    /// Generate calls for every customer. Call ids are global and start at 1.
    pub fn generate(
        &self,
        customers: &[CustomerRecord],
        rng: &mut StreamRng,
    ) -> Vec<CallRecord> {
        if customers.is_empty() {
            log::warn!("call_record: no customers, nothing generated");
            return Vec::new();
        }

        let c = self.config;
        let mut records = Vec::new();
        let mut call_id: CallId = 1;
        for customer in customers {
            let num_calls = rng.int_inclusive(c.min_calls_per_customer, c.max_calls_per_customer);
            for _ in 0..num_calls {
                records.push(self.generate_one(call_id, customer, rng));
                call_id += 1;
            }
        }

        let missed = records.iter().filter(|r| r.is_missed).count();
        let roaming = records.iter().filter(|r| r.is_roaming).count();
        log::info!(
            "call_record: generated {} calls for {} customers ({missed} missed, {roaming} roaming)",
            records.len(),
            customers.len()
        );
        records
    }

    fn generate_one(
        &self,
        call_id: CallId,
        customer: &CustomerRecord,
        rng: &mut StreamRng,
    ) -> CallRecord {
        let c = self.config;
        let start_time = self.random_start_time(rng);

        let is_missed = rng.chance(c.missed_probability);
        let duration_seconds = if is_missed {
            0
        } else {
            rng.int_inclusive(c.duration_seconds.0, c.duration_seconds.1)
        };

        let call_type = *rng.weighted(&[
            (CallType::Outgoing, c.outgoing_weight),
            (CallType::Incoming, c.incoming_weight),
            (CallType::Missed, c.missed_weight),
        ]);

        let is_roaming = rng.chance(c.roaming_probability);
        let cost_usd = if is_missed {
            0.0
        } else {
            let rate = if is_roaming {
                c.roaming_rate_per_second
            } else {
                c.domestic_rate_per_second
            };
            round2(duration_seconds as f64 * rate)
        };

        let other_party_phone = PhoneNumber::generate(rng).to_string();
        let tower = IdentityGenerator::tower_location(rng, is_roaming);

        CallRecord {
            call_id,
            customer_id: customer.customer_id,
            customer_phone: customer.phone_number.clone(),
            other_party_phone,
            call_type,
            start_time,
            duration_seconds,
            is_missed,
            is_roaming,
            cell_tower_city: tower.city,
            cell_tower_country: tower.country,
            cost_usd,
        }
    }

    fn random_start_time(&self, rng: &mut StreamRng) -> NaiveDateTime {
        // Clamped so an unvalidated config cannot overflow the window.
        let window_seconds = self
            .config
            .days_back
            .clamp(0, MAX_DAYS_BACK)
            .checked_mul(86_400)
            .unwrap_or(0);
        let offset = rng.int_inclusive(0, window_seconds);
        let back = Duration::try_seconds(window_seconds - offset).unwrap_or_else(Duration::zero);
        self.window_end
            .checked_sub_signed(back)
            .unwrap_or(NaiveDateTime::MIN)
    }
}
