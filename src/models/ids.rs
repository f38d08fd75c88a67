//! Record identifier generation
//!
//! Identifiers are 8 characters long with exactly two characters from each of
//! four classes (uppercase, lowercase, digit, symbol) in random order, e.g.
//! `kH14Jt#&`. They are unique within their table at creation time and never
//! change afterwards.

use rand::Rng;

use super::table::Table;

/// Length of a generated identifier
pub const ID_LENGTH: usize = 8;

/// Characters of each class in an identifier
pub const PER_CLASS: usize = 2;

/// Symbols allowed in identifiers
///
/// `;` delimits stored cells and a leading `-` would read as a command-line
/// flag, so neither is used.
pub const SYMBOLS: &str = "!#$%&*+=?@^_~";

/// The four character classes an identifier is composed of
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharClass {
    Upper,
    Lower,
    Digit,
    Symbol,
}

impl CharClass {
    pub const ALL: [CharClass; 4] = [
        CharClass::Upper,
        CharClass::Lower,
        CharClass::Digit,
        CharClass::Symbol,
    ];

    /// Classify a character, `None` if it belongs to no identifier class
    pub fn of(c: char) -> Option<Self> {
        if c.is_ascii_uppercase() {
            Some(Self::Upper)
        } else if c.is_ascii_lowercase() {
            Some(Self::Lower)
        } else if c.is_ascii_digit() {
            Some(Self::Digit)
        } else if SYMBOLS.contains(c) {
            Some(Self::Symbol)
        } else {
            None
        }
    }

    fn alphabet(self) -> &'static [u8] {
        match self {
            Self::Upper => b"ABCDEFGHIJKLMNOPQRSTUVWXYZ",
            Self::Lower => b"abcdefghijklmnopqrstuvwxyz",
            Self::Digit => b"0123456789",
            Self::Symbol => SYMBOLS.as_bytes(),
        }
    }

    fn index(self) -> usize {
        match self {
            Self::Upper => 0,
            Self::Lower => 1,
            Self::Digit => 2,
            Self::Symbol => 3,
        }
    }

    fn random_char<R: Rng + ?Sized>(self, rng: &mut R) -> char {
        let alphabet = self.alphabet();
        char::from(alphabet[rng.gen_range(0..alphabet.len())])
    }
}

/// Generate an identifier not present in column 0 of `table`
pub fn generate_id(table: &Table) -> String {
    generate_id_with(table, &mut rand::thread_rng())
}

/// Generate a unique identifier using the given random source
///
/// A colliding candidate is discarded entirely and a new one drawn.
pub fn generate_id_with<R: Rng + ?Sized>(table: &Table, rng: &mut R) -> String {
    loop {
        let candidate = candidate_id(rng);
        if !table.id_exists(&candidate) {
            return candidate;
        }
    }
}

/// Draw one candidate from a shrinking pool of class tokens
fn candidate_id<R: Rng + ?Sized>(rng: &mut R) -> String {
    let mut pool: Vec<CharClass> = CharClass::ALL
        .iter()
        .flat_map(|class| std::iter::repeat(*class).take(PER_CLASS))
        .collect();

    let mut id = String::with_capacity(ID_LENGTH);
    while !pool.is_empty() {
        let slot = rng.gen_range(0..pool.len());
        let class = pool.swap_remove(slot);
        id.push(class.random_char(rng));
    }
    id
}

/// Check the identifier composition rule without a uniqueness lookup
///
/// Accepts exactly 8 characters with exactly two of each class and nothing
/// outside the classes. Uniqueness is not checked, so this can validate a
/// reference to a record in another table.
pub fn could_be_a_valid_id(candidate: &str) -> bool {
    if candidate.chars().count() != ID_LENGTH {
        return false;
    }

    let mut counts = [0usize; 4];
    for c in candidate.chars() {
        match CharClass::of(c) {
            Some(class) => counts[class.index()] += 1,
            None => return false,
        }
    }
    counts.iter().all(|count| *count == PER_CLASS)
}
