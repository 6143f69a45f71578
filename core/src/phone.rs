//! Synthetic North American phone numbers.
//!
//! Area and exchange codes are drawn from [200, 999] and never land on a
//! toll-free prefix. Customers and call counterparties share this generator.

use crate::rng::StreamRng;
use std::fmt;

/// Codes reserved for toll-free service. Excluded from both segments.
pub const TOLL_FREE_PREFIXES: [u16; 7] = [800, 833, 844, 855, 866, 877, 888];

const CODE_MIN: i64 = 200;
const CODE_MAX: i64 = 999;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhoneNumber {
    pub area: u16,
    pub exchange: u16,
    pub subscriber: u16,
}

impl PhoneNumber {
    pub fn generate(rng: &mut StreamRng) -> Self {
        Self {
            area: draw_code(rng),
            exchange: draw_code(rng),
            subscriber: rng.int_inclusive(0, 9999) as u16,
        }
    }

    /// Parse `AAA-EEE-SSSS`.
    pub fn parse(s: &str) -> Option<Self> {
        let mut parts = s.trim().split('-');
        let area = parts.next()?;
        let exchange = parts.next()?;
        let subscriber = parts.next()?;
        if parts.next().is_some()
            || area.len() != 3
            || exchange.len() != 3
            || subscriber.len() != 4
        {
            return None;
        }
        Some(Self {
            area: area.parse().ok()?,
            exchange: exchange.parse().ok()?,
            subscriber: subscriber.parse().ok()?,
        })
    }

    pub fn is_reserved(code: u16) -> bool {
        TOLL_FREE_PREFIXES.contains(&code)
    }
}

impl fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:03}-{:03}-{:04}", self.area, self.exchange, self.subscriber)
    }
}

/// Rejection sampling: 7 of 800 codes are reserved, so this terminates fast.
fn draw_code(rng: &mut StreamRng) -> u16 {
    loop {
        let code = rng.int_inclusive(CODE_MIN, CODE_MAX) as u16;
        if !PhoneNumber::is_reserved(code) {
            return code;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_numbers_avoid_reserved_codes() {
        let mut rng = StreamRng::new(2024, 0);
        for _ in 0..5_000 {
            let n = PhoneNumber::generate(&mut rng);
            assert!((200..=999).contains(&n.area));
            assert!((200..=999).contains(&n.exchange));
            assert!(!PhoneNumber::is_reserved(n.area), "{n}");
            assert!(!PhoneNumber::is_reserved(n.exchange), "{n}");
        }
    }

    #[test]
    fn display_pads_subscriber() {
        let n = PhoneNumber { area: 212, exchange: 555, subscriber: 42 };
        assert_eq!(n.to_string(), "212-555-0042");
        assert_eq!(PhoneNumber::parse("212-555-0042"), Some(n));
    }

    #[test]
    fn parse_rejects_other_shapes() {
        assert_eq!(PhoneNumber::parse("(212) 555-0042"), None);
        assert_eq!(PhoneNumber::parse("212-555-042"), None);
        assert_eq!(PhoneNumber::parse("212-555-0042-1"), None);
    }
}
