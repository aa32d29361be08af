//! Unit tests for price bracket classification.

use hdb_dash::models::PriceBracket;
use hdb_dash::HdbDashError;

// ---------------------------------------------------------------------------
// Boundary classification
// ---------------------------------------------------------------------------

#[test]
fn classify_places_prices_in_half_open_intervals() {
    let cases = [
        (0.0, PriceBracket::UpTo300k),
        (150_000.0, PriceBracket::UpTo300k),
        (299_999.99, PriceBracket::UpTo300k),
        (300_000.0, PriceBracket::From300k),
        (499_999.0, PriceBracket::From300k),
        (500_000.0, PriceBracket::From500k),
        (799_999.99, PriceBracket::From500k),
        (800_000.0, PriceBracket::From800k),
        (999_999.99, PriceBracket::From800k),
        (1_000_000.0, PriceBracket::FromMillion),
        (1_418_000.0, PriceBracket::FromMillion),
    ];
    for (price, expected) in cases {
        assert_eq!(
            PriceBracket::classify(price).unwrap(),
            expected,
            "wrong bracket for {}",
            price
        );
    }
}

#[test]
fn top_bracket_is_unbounded() {
    assert_eq!(
        PriceBracket::classify(50_000_000.0).unwrap(),
        PriceBracket::FromMillion
    );
}

#[test]
fn classify_rejects_negative_prices() {
    let err = PriceBracket::classify(-1.0).unwrap_err();
    assert!(matches!(err, HdbDashError::PriceOutOfRange(_)));
}

#[test]
fn classify_rejects_non_finite_prices() {
    assert!(PriceBracket::classify(f64::NAN).is_err());
    assert!(PriceBracket::classify(f64::INFINITY).is_err());
    assert!(PriceBracket::classify(f64::NEG_INFINITY).is_err());
}

// ---------------------------------------------------------------------------
// Ordering and labels
// ---------------------------------------------------------------------------

#[test]
fn all_lists_brackets_ascending() {
    assert_eq!(PriceBracket::ALL.len(), 5);
    for pair in PriceBracket::ALL.windows(2) {
        assert!(pair[0] < pair[1]);
    }
}

#[test]
fn discriminant_indexes_into_all() {
    for (i, bracket) in PriceBracket::ALL.into_iter().enumerate() {
        assert_eq!(bracket as usize, i);
    }
}

#[test]
fn labels_match_chart_series_names() {
    let labels: Vec<&str> = PriceBracket::ALL.iter().map(|b| b.label()).collect();
    assert_eq!(labels, vec!["<=300k", "300-500k", "500-800k", "800k-1m", ">=1m"]);
}

#[test]
fn display_uses_label() {
    assert_eq!(PriceBracket::FromMillion.to_string(), ">=1m");
}

// ---------------------------------------------------------------------------
// Serde
// ---------------------------------------------------------------------------

#[test]
fn serializes_as_label() {
    assert_eq!(
        serde_json::to_string(&PriceBracket::UpTo300k).unwrap(),
        "\"<=300k\""
    );
    assert_eq!(
        serde_json::to_string(&PriceBracket::From800k).unwrap(),
        "\"800k-1m\""
    );
}

#[test]
fn deserializes_from_label() {
    let b: PriceBracket = serde_json::from_str("\">=1m\"").unwrap();
    assert_eq!(b, PriceBracket::FromMillion);
}
