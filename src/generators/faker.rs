//! Faker-backed default generators
//!
//! All defaults share one seedable RNG so a fixed seed reproduces the same
//! fixture data run after run.

use super::{range_args, text_arg, Generator};
use crate::domain::{CleanerError, Result, Value};
use fake::faker::address::en::{
    BuildingNumber, CityName, CountryName, SecondaryAddress, StateName, StreetName, ZipCode,
};
use fake::faker::company::en::{Buzzword, CompanyName, Industry};
use fake::faker::internet::en::{FreeEmailProvider, SafeEmail, Username};
use fake::faker::lorem::en::{Paragraph, Sentence, Word};
use fake::faker::name::en::{FirstName, LastName, Name};
use fake::faker::phone_number::en::PhoneNumber;
use fake::Fake;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::ops::Range;
use std::sync::{Arc, Mutex, PoisonError};

/// RNG shared by every default generator
pub type SharedRng = Arc<Mutex<StdRng>>;

/// Largest word or sentence count accepted by `sentence` and `paragraph`
pub const MAX_LOREM_COUNT: i64 = 1_000;

type Producer = fn(&str, &mut StdRng, &[Value]) -> Result<Value>;

/// Names of the generators registered by [`default_generators`]
pub const DEFAULT_GENERATOR_NAMES: &[&str] = &[
    "first_name",
    "last_name",
    "name",
    "user_name",
    "email",
    "phone_number",
    "company_name",
    "industry",
    "buzzword",
    "street_address",
    "secondary_address",
    "city",
    "state",
    "zip_code",
    "country",
    "word",
    "sentence",
    "paragraph",
    "number",
    "today",
];

/// Create the shared RNG, seeded when a seed is given
pub fn shared_rng(seed: Option<u64>) -> SharedRng {
    let rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    Arc::new(Mutex::new(rng))
}

/// A default generator bound to the shared RNG
struct FakerGenerator {
    name: &'static str,
    rng: SharedRng,
    produce: Producer,
}

impl Generator for FakerGenerator {
    fn generate(&self, args: &[Value]) -> Result<Value> {
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        (self.produce)(self.name, &mut *rng, args)
    }
}

/// Build the default generator set
pub fn default_generators(rng: &SharedRng) -> Vec<(&'static str, Arc<dyn Generator>)> {
    DEFAULT_GENERATOR_NAMES
        .iter()
        .filter_map(|name| producer(name).map(|produce| (*name, produce)))
        .map(|(name, produce)| {
            let generator: Arc<dyn Generator> = Arc::new(FakerGenerator {
                name,
                rng: Arc::clone(rng),
                produce,
            });
            (name, generator)
        })
        .collect()
}

fn producer(name: &str) -> Option<Producer> {
    let produce: Producer = match name {
        "first_name" => |_, rng, _| Ok(Value::Text(FirstName().fake_with_rng(rng))),
        "last_name" => |_, rng, _| Ok(Value::Text(LastName().fake_with_rng(rng))),
        "name" => |_, rng, _| Ok(Value::Text(Name().fake_with_rng(rng))),
        "user_name" => |_, rng, _| Ok(Value::Text(Username().fake_with_rng(rng))),
        "email" => email,
        "phone_number" => |_, rng, _| Ok(Value::Text(PhoneNumber().fake_with_rng(rng))),
        "company_name" => |_, rng, _| Ok(Value::Text(CompanyName().fake_with_rng(rng))),
        "industry" => |_, rng, _| Ok(Value::Text(Industry().fake_with_rng(rng))),
        "buzzword" => |_, rng, _| Ok(Value::Text(Buzzword().fake_with_rng(rng))),
        "street_address" => |_, rng, _| {
            let number: String = BuildingNumber().fake_with_rng(rng);
            let street: String = StreetName().fake_with_rng(rng);
            Ok(Value::Text(format!("{number} {street}")))
        },
        "secondary_address" => |_, rng, _| Ok(Value::Text(SecondaryAddress().fake_with_rng(rng))),
        "city" => |_, rng, _| Ok(Value::Text(CityName().fake_with_rng(rng))),
        "state" => |_, rng, _| Ok(Value::Text(StateName().fake_with_rng(rng))),
        "zip_code" => |_, rng, _| Ok(Value::Text(ZipCode().fake_with_rng(rng))),
        "country" => |_, rng, _| Ok(Value::Text(CountryName().fake_with_rng(rng))),
        "word" => |_, rng, _| Ok(Value::Text(Word().fake_with_rng(rng))),
        "sentence" => |name, rng, args| {
            let words = count_range(name, args, 4, 10)?;
            Ok(Value::Text(Sentence(words).fake_with_rng(rng)))
        },
        "paragraph" => |name, rng, args| {
            let sentences = count_range(name, args, 3, 6)?;
            Ok(Value::Text(Paragraph(sentences).fake_with_rng(rng)))
        },
        "number" => |name, rng, args| {
            let (min, max) = range_args(name, args, 0, 100)?;
            Ok(Value::Int(rng.gen_range(min..=max)))
        },
        "today" => |_, _, _| Ok(Value::Date(chrono::Local::now().date_naive())),
        _ => return None,
    };
    Some(produce)
}

/// `email([local_part])`: the local part is derived from the argument when given
fn email(_name: &str, rng: &mut StdRng, args: &[Value]) -> Result<Value> {
    match text_arg(args, 0).map(|raw| local_part(&raw)).filter(|local| !local.is_empty()) {
        Some(local) => {
            let provider: String = FreeEmailProvider().fake_with_rng(rng);
            Ok(Value::Text(format!("{local}@{provider}")))
        }
        None => Ok(Value::Text(SafeEmail().fake_with_rng(rng))),
    }
}

/// Lowercase, whitespace joined by dots, only `[a-z0-9._-]` kept
fn local_part(raw: &str) -> String {
    raw.split_whitespace()
        .collect::<Vec<_>>()
        .join(".")
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
        .collect()
}

/// Half-open count range for lorem generators from inclusive `[min, max]` args
fn count_range(generator: &str, args: &[Value], default_min: i64, default_max: i64) -> Result<Range<usize>> {
    let (min, max) = range_args(generator, args, default_min, default_max)?;
    if min < 1 {
        return Err(CleanerError::invalid_argument(
            generator,
            format!("count must be at least 1, got {min}"),
        ));
    }
    if max > MAX_LOREM_COUNT {
        return Err(CleanerError::invalid_argument(
            generator,
            format!("count must be at most {MAX_LOREM_COUNT}, got {max}"),
        ));
    }
    Ok(min as usize..max as usize + 1)
}
