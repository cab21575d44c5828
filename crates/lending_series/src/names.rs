//! Synthetic identities for applications and roster clients.

use std::collections::HashSet;

use rand::distributions::Alphanumeric;
use rand::seq::SliceRandom;
use rand::Rng;

const FIRST_NAMES: [&str; 24] = [
    "Olivia", "Liam", "Amelia", "Noah", "Sofia", "Lucas", "Hannah", "Mateo", "Chloe", "Elias",
    "Grace", "Felix", "Maya", "Oscar", "Leah", "Hugo", "Nora", "Jonas", "Clara", "Samuel",
    "Ines", "Theo", "Ruth", "Arjun",
];

const LAST_NAMES: [&str; 24] = [
    "Smith", "Müller", "Martin", "Brown", "Tremblay", "Schmidt", "Bernard", "Wilson", "Roy",
    "Fischer", "Dubois", "Taylor", "Gagnon", "Weber", "Laurent", "Evans", "Wagner", "Moreau",
    "Walker", "Becker", "Lefebvre", "Campbell", "Hoffmann", "Garcia",
];

/// Draws an upper-case alphanumeric identifier of `len` characters.
pub fn random_id<R: Rng + ?Sized>(rng: &mut R, len: usize) -> String {
    (0..len)
        .map(|_| char::from(rng.sample(Alphanumeric)).to_ascii_uppercase())
        .collect()
}

/// Draws an identifier not present in `taken`.
pub fn unique_id<R: Rng + ?Sized>(rng: &mut R, len: usize, taken: &HashSet<String>) -> String {
    loop {
        let id = random_id(rng, len);
        if !taken.contains(&id) {
            return id;
        }
    }
}

/// Draws a full name.
pub fn full_name<R: Rng + ?Sized>(rng: &mut R) -> String {
    let first = FIRST_NAMES.choose(rng).copied().unwrap_or("Alex");
    let last = LAST_NAMES.choose(rng).copied().unwrap_or("Doe");
    format!("{} {}", first, last)
}
