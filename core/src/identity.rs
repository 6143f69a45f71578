//! Deterministic synthetic identities: names, emails, postal addresses and
//! cell-tower locations, all drawn from curated lists.
//!
//! Same RNG stream in, same identity out.

use crate::rng::StreamRng;

/// A generated person. The address is flattened to one line.
#[derive(Debug, Clone, PartialEq)]
pub struct Identity {
    pub full_name: String,
    pub email: String,
    pub address: String,
}

/// A generated cell-tower location.
#[derive(Debug, Clone, PartialEq)]
pub struct TowerLocation {
    pub city: String,
    pub country: String,
}

pub struct IdentityGenerator;

impl IdentityGenerator {
    pub fn generate(rng: &mut StreamRng) -> Identity {
        let first = pick(rng, FIRST_NAMES);
        let last = pick(rng, LAST_NAMES);
        let email = Self::email_for(rng, first, last);
        Identity {
            full_name: format!("{first} {last}"),
            email,
            address: Self::address(rng),
        }
    }

    /// `first.last42@domain` style mailbox, lower-cased.
    pub fn email_for(rng: &mut StreamRng, first: &str, last: &str) -> String {
        let domain = pick(rng, EMAIL_DOMAINS);
        let suffix = rng.int_inclusive(1, 99);
        let local = match rng.index(3) {
            0 => format!("{first}.{last}"),
            1 => format!("{}{last}{suffix}", &first[..1]),
            _ => format!("{first}{suffix}"),
        };
        format!("{}@{domain}", local.to_lowercase())
    }

    /// `123 Oak Street, Springfield, OH 45502`
    pub fn address(rng: &mut StreamRng) -> String {
        let number = rng.int_inclusive(1, 9999);
        let street = pick(rng, STREET_NAMES);
        let kind = pick(rng, STREET_KINDS);
        let (city, state) = *pick(rng, US_CITIES);
        let zip = rng.int_inclusive(1001, 99950);
        if rng.chance(0.15) {
            let unit = rng.int_inclusive(1, 999);
            format!("{number} {street} {kind} Apt. {unit}, {city}, {state} {zip:05}")
        } else {
            format!("{number} {street} {kind}, {city}, {state} {zip:05}")
        }
    }

    /// Home-network calls land on a domestic tower; anything else is abroad.
    pub fn tower_location(rng: &mut StreamRng, roaming: bool) -> TowerLocation {
        if roaming {
            let (city, country) = *pick(rng, FOREIGN_CITIES);
            TowerLocation { city: city.into(), country: country.into() }
        } else {
            let (city, _) = *pick(rng, US_CITIES);
            TowerLocation { city: city.into(), country: HOME_COUNTRY.into() }
        }
    }
}

pub const HOME_COUNTRY: &str = "United States";

fn pick<'a, T>(rng: &mut StreamRng, items: &'a [T]) -> &'a T {
    &items[rng.index(items.len())]
}

const FIRST_NAMES: &[&str] = &[
    "Aaliyah", "Aaron", "Adrian", "Alicia", "Amara", "Andre", "Angela", "Beatriz",
    "Bianca", "Brandon", "Caleb", "Camila", "Carmen", "Chloe", "Colin", "Darius",
    "Deepa", "Diego", "Elena", "Elliot", "Emeka", "Farah", "Felix", "Fiona",
    "Gavin", "Grace", "Hana", "Harper", "Hector", "Imani", "Isaac", "Ivy",
    "Jamal", "Jasmine", "Javier", "Jonah", "Keisha", "Kenji", "Laila", "Lucas",
    "Malik", "Marisol", "Mateo", "Maya", "Nadia", "Nathan", "Nina", "Omar",
    "Owen", "Priya", "Quinn", "Rafael", "Rosa", "Samuel", "Sofia", "Tariq",
    "Tessa", "Uma", "Victor", "Wendy", "Xavier", "Yara", "Yusuf", "Zoe",
];

const LAST_NAMES: &[&str] = &[
    "Abbott", "Acosta", "Bauer", "Bishop", "Chandra", "Chen", "Dalton", "Delgado",
    "Ellison", "Espinoza", "Fischer", "Fleming", "Gallagher", "Gupta", "Hale",
    "Hoffman", "Ibarra", "Ito", "Jensen", "Joshi", "Keller", "Kowalski", "Larsen",
    "Lindqvist", "Marsh", "Medina", "Nakamura", "Novak", "Okafor", "Olsen",
    "Pacheco", "Petrov", "Quintero", "Rahman", "Reyes", "Sato", "Schultz",
    "Soto", "Tanaka", "Thornton", "Underwood", "Valdez", "Vance", "Walsh",
    "Whitaker", "Xu", "Yamada", "Young", "Zamora", "Zimmerman",
];

const EMAIL_DOMAINS: &[&str] = &[
    "example.com", "example.net", "example.org", "mail.test", "inbox.test",
];

const STREET_NAMES: &[&str] = &[
    "Oak", "Maple", "Cedar", "Pine", "Elm", "Willow", "Birch", "Lake", "Hill",
    "Sunset", "Ridge", "Meadow", "River", "Park", "Forest", "Spring", "Church",
    "Washington", "Lincoln", "Franklin", "Highland", "Valley", "Mill", "Union",
];

const STREET_KINDS: &[&str] = &[
    "Street", "Avenue", "Road", "Lane", "Drive", "Court", "Boulevard", "Way", "Place",
];

const US_CITIES: &[(&str, &str)] = &[
    ("Springfield", "IL"), ("Columbus", "OH"), ("Austin", "TX"), ("Denver", "CO"),
    ("Portland", "OR"), ("Raleigh", "NC"), ("Madison", "WI"), ("Tucson", "AZ"),
    ("Omaha", "NE"), ("Boise", "ID"), ("Richmond", "VA"), ("Albany", "NY"),
    ("Savannah", "GA"), ("Spokane", "WA"), ("Fresno", "CA"), ("Lexington", "KY"),
    ("Des Moines", "IA"), ("Burlington", "VT"), ("Tulsa", "OK"), ("Reno", "NV"),
];

const FOREIGN_CITIES: &[(&str, &str)] = &[
    ("Toronto", "Canada"), ("Vancouver", "Canada"), ("Mexico City", "Mexico"),
    ("Cancun", "Mexico"), ("London", "United Kingdom"), ("Paris", "France"),
    ("Berlin", "Germany"), ("Madrid", "Spain"), ("Rome", "Italy"),
    ("Tokyo", "Japan"), ("Seoul", "South Korea"), ("Sydney", "Australia"),
    ("Sao Paulo", "Brazil"), ("Mumbai", "India"), ("Dubai", "United Arab Emirates"),
];
