//! Ranking scenarios over the public parser API.

use phonescore::{ExtractResult, Parser, PhoneNumberParser};

fn score(text: &str) -> f64 {
    PhoneNumberParser::new()
        .parse(&ExtractResult::new(text))
        .value
        .expect("phone number parser always sets a value")
}

#[test]
fn formatted_numbers_outrank_incidental_digits() {
    let well_formed = ["+1 (555) 123-4567", "(555) 123-4567", "555-123-4567", "+44 20 7946 0958"];
    let incidental = ["11111111111", "123-45-6789", "2021-03-15", "12345", "1234567890123456"];
    for good in well_formed {
        for bad in incidental {
            assert!(score(good) > score(bad), "{} should outrank {}", good, bad);
        }
    }
}

#[test]
fn scenario_ordering() {
    assert!(score("+1 (555) 123-4567") > score("5551234567"));
    assert!(score("11111111111") < score("5551234567"));
    assert!(score("(555) 123-4567") > score("555 123 4567"));
    assert_eq!(score(""), 0.3);
}

#[test]
fn non_digit_text_is_scored() {
    let s = score("call me maybe");
    assert!((0.0..=1.0).contains(&s));
    // Two spaces count as format indicators, no digits
    assert_eq!(s, 0.7);
}

#[test]
fn dates_are_penalized_against_same_digits_as_phone() {
    assert!(score("2021-03-15") < score("202-103-1500"));
}

#[test]
fn parser_is_shareable_across_threads() {
    let parser = std::sync::Arc::new(PhoneNumberParser::new());
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let parser = parser.clone();
            std::thread::spawn(move || parser.score("+1 555 123 4567"))
        })
        .collect();
    for h in handles {
        assert_eq!(h.join().unwrap(), 1.0);
    }
}
