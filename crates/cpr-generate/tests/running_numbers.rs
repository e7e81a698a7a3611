use std::collections::BTreeSet;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use cpr_core::{Gender, leading_digit};
use cpr_generate::generators::{Stage, running_numbers};

fn drain(year: u16, gender: Gender, seed: u64) -> Vec<u16> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    running_numbers(year, gender)
        .expect("running number stage")
        .iter_with(&mut rng)
        .map(|candidate| {
            let candidate = candidate.expect("pull running number");
            assert_eq!(candidate.year, None);
            assert_eq!(candidate.month, None);
            assert_eq!(candidate.day, None);
            candidate.running_number.expect("running number set")
        })
        .collect()
}

#[test]
fn female_numbers_are_even() {
    let numbers = drain(2000, Gender::Female, 1);
    assert!(!numbers.is_empty());
    assert!(numbers.iter().all(|number| number % 2 == 0));
}

#[test]
fn male_numbers_are_odd() {
    let numbers = drain(1950, Gender::Male, 2);
    assert!(!numbers.is_empty());
    assert!(numbers.iter().all(|number| number % 2 == 1));
}

#[test]
fn earliest_year_yields_odd_numbers_from_5000_to_8999() {
    let numbers = drain(1858, Gender::Male, 3);
    let expected: BTreeSet<u16> = (5000..9000).filter(|number| number % 2 == 1).collect();
    let seen: BTreeSet<u16> = numbers.iter().copied().collect();

    assert_eq!(numbers.len(), 2000);
    assert_eq!(seen, expected);
}

#[test]
fn years_outside_every_window_are_empty() {
    assert!(drain(1857, Gender::Male, 4).is_empty());
    assert!(drain(2058, Gender::Male, 4).is_empty());
    assert!(drain(2058, Gender::Female, 4).is_empty());
}

#[test]
fn leading_digits_follow_historical_windows() {
    let cases: [(u16, &[u8]); 9] = [
        (1858, &[5, 6, 7, 8]),
        (1899, &[5, 6, 7, 8]),
        (1900, &[0, 1, 2, 3]),
        (1937, &[0, 1, 2, 3, 4, 9]),
        (1999, &[0, 1, 2, 3, 4, 9]),
        (2000, &[4, 5, 6, 7, 8, 9]),
        (2036, &[4, 5, 6, 7, 8, 9]),
        (2037, &[5, 6, 7, 8]),
        (2057, &[5, 6, 7, 8]),
    ];

    for (year, valid_digits) in cases {
        let digits: BTreeSet<u8> = drain(year, Gender::Female, u64::from(year))
            .into_iter()
            .map(leading_digit)
            .collect();
        let expected: BTreeSet<u8> = valid_digits.iter().copied().collect();
        assert_eq!(digits, expected, "year {year}");
    }
}

#[test]
fn every_call_starts_a_fresh_order() {
    let mut rng = ChaCha8Rng::seed_from_u64(9);
    let first: Vec<u16> = running_numbers(1980, Gender::Female)
        .expect("stage")
        .iter_with(&mut rng)
        .map(|candidate| candidate.expect("pull").running_number.expect("set"))
        .collect();
    let second: Vec<u16> = running_numbers(1980, Gender::Female)
        .expect("stage")
        .iter_with(&mut rng)
        .map(|candidate| candidate.expect("pull").running_number.expect("set"))
        .collect();

    assert_eq!(first.len(), second.len());
    assert_ne!(first, second);
    let first: BTreeSet<u16> = first.into_iter().collect();
    let second: BTreeSet<u16> = second.into_iter().collect();
    assert_eq!(first, second);
}
