//! Synthetic customer generation.

use crate::{
    config::GeneratorConfig,
    error::{CarrierError, CarrierResult},
    identity::IdentityGenerator,
    phone::PhoneNumber,
    plan::{Allowance, Plan},
    rng::StreamRng,
    types::{round2, CustomerId},
};
use serde::{Deserialize, Serialize};

/// One row of the customer file, in column order.
///
/// `is_over_data` is derived from the plan allowance in [`CustomerRecord::new`];
/// records read back from disk are re-checked with [`CustomerRecord::validate`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerRecord {
    pub customer_id: CustomerId,
    pub full_name: String,
    pub email: String,
    pub phone_number: String,
    pub address: String,
    pub plan_name: String,
    pub monthly_cost: f64,
    pub data_limit_gb: Allowance,
    pub data_used_gb: f64,
    pub minutes_used: i64,
    pub text_messages: i64,
    pub is_over_data: bool,
}

/// Contact details supplied by the caller of [`CustomerRecord::new`].
#[derive(Debug, Clone)]
pub struct Contact {
    pub full_name: String,
    pub email: String,
    pub phone_number: String,
    pub address: String,
}

/// Simulated usage for one billing month.
#[derive(Debug, Clone, Copy)]
pub struct Usage {
    pub data_used_gb: f64,
    pub minutes_used: i64,
    pub text_messages: i64,
}

impl CustomerRecord {
    pub fn new(customer_id: CustomerId, contact: Contact, plan: &Plan, usage: Usage) -> Self {
        Self {
            customer_id,
            full_name: contact.full_name,
            email: contact.email,
            phone_number: contact.phone_number,
            address: contact.address,
            plan_name: plan.plan_name.clone(),
            monthly_cost: plan.monthly_price_usd,
            data_limit_gb: plan.data_limit_gb,
            data_used_gb: usage.data_used_gb,
            minutes_used: usage.minutes_used,
            text_messages: usage.text_messages,
            is_over_data: plan.exceeds_data(usage.data_used_gb),
        }
    }

    /// Check the invariants a record read from an untrusted file must hold.
    pub fn validate(&self) -> CarrierResult<()> {
        let expected = self.data_limit_gb.exceeded_by(self.data_used_gb);
        if self.is_over_data != expected {
            return Err(CarrierError::InvalidRecord(format!(
                "customer {}: is_over_data={} but limit={:?} used={}",
                self.customer_id, self.is_over_data, self.data_limit_gb, self.data_used_gb
            )));
        }
        if self.data_used_gb < 0.0 || self.minutes_used < 0 || self.text_messages < 0 {
            return Err(CarrierError::InvalidRecord(format!(
                "customer {}: negative usage",
                self.customer_id
            )));
        }
        Ok(())
    }
}

pub struct CustomerGenerator<'a> {
    config: &'a GeneratorConfig,
}

impl<'a> CustomerGenerator<'a> {
    pub fn new(config: &'a GeneratorConfig) -> Self {
        Self { config }
    }

    /// Generate `config.customer_count` customers with ids 1..=N.
    pub fn generate(&self, rng: &mut StreamRng) -> Vec<CustomerRecord> {
        let n = self.config.customer_count;
        if self.config.plans.is_empty() {
            log::warn!("customer: plan catalog is empty, nothing generated");
            return Vec::new();
        }
        let customers: Vec<_> = (1..=n as CustomerId)
            .map(|id| self.generate_one(id, rng))
            .collect();

        let over = customers.iter().filter(|c| c.is_over_data).count();
        log::info!("customer: generated {} customers ({over} over data)", customers.len());
        customers
    }

    fn generate_one(&self, customer_id: CustomerId, rng: &mut StreamRng) -> CustomerRecord {
        let plan = &self.config.plans[rng.index(self.config.plans.len())];
        let usage = self.draw_usage(plan, rng);
        let identity = IdentityGenerator::generate(rng);
        let contact = Contact {
            full_name: identity.full_name,
            email: identity.email,
            phone_number: PhoneNumber::generate(rng).to_string(),
            address: identity.address,
        };
        CustomerRecord::new(customer_id, contact, plan, usage)
    }

    fn draw_usage(&self, plan: &Plan, rng: &mut StreamRng) -> Usage {
        let u = &self.config.usage;
        let data_used_gb = match plan.data_limit_gb {
            Allowance::Unlimited => rng.uniform(u.unlimited_data_gb.0, u.unlimited_data_gb.1),
            Allowance::Limited(limit) => rng.uniform(0.0, limit * u.overage_headroom),
        };
        Usage {
            data_used_gb: round2(data_used_gb),
            minutes_used: rng.int_inclusive(u.minutes.0, u.minutes.1),
            text_messages: rng.int_inclusive(u.texts.0, u.texts.1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::default_catalog;

    fn contact() -> Contact {
        Contact {
            full_name: "Ivy Chen".into(),
            email: "ivy.chen@example.com".into(),
            phone_number: "212-555-0100".into(),
            address: "1 Oak Street, Austin, TX 73301".into(),
        }
    }

    fn usage(gb: f64) -> Usage {
        Usage { data_used_gb: gb, minutes_used: 100, text_messages: 200 }
    }

    #[test]
    fn over_data_is_derived_from_plan() {
        let catalog = default_catalog();
        let basic = &catalog[0];
        let unlimited = &catalog[3];

        assert!(CustomerRecord::new(1, contact(), basic, usage(5.5)).is_over_data);
        assert!(!CustomerRecord::new(2, contact(), basic, usage(5.0)).is_over_data);
        assert!(!CustomerRecord::new(3, contact(), unlimited, usage(500.0)).is_over_data);
    }

    #[test]
    fn validate_catches_inconsistent_flag() {
        let catalog = default_catalog();
        let mut record = CustomerRecord::new(1, contact(), &catalog[0], usage(1.0));
        assert!(record.validate().is_ok());
        record.is_over_data = true;
        assert!(record.validate().is_err());
    }

    #[test]
    fn zero_count_generates_nothing() {
        let config = GeneratorConfig { customer_count: 0, ..GeneratorConfig::default() };
        let mut rng = StreamRng::new(1, 0);
        assert!(CustomerGenerator::new(&config).generate(&mut rng).is_empty());
    }
}
