use bridge_types::{Evaluator, Hand, HandMetrics, HcpScale, ShapePoints};
use serde::Deserialize;
use std::fs;

#[derive(Debug, Deserialize)]
struct MetricsVector {
    name: String,
    hand: String,
    shape: [u8; 4],
    hcp: f64,
    chimaera: f64,
    points: f64,
    freakiness_points: f64,
    tricks: f64,
}

fn assert_close(actual: f64, expected: f64, what: &str, name: &str) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "{name}: {what} was {actual}, expected {expected}"
    );
}

#[test]
fn test_hand_metrics_vectors() {
    let yaml_content = fs::read_to_string("../../tests/hands/metrics.yaml")
        .expect("Failed to read metrics vectors");
    let vectors: Vec<MetricsVector> =
        serde_yaml::from_str(&yaml_content).expect("Failed to parse metrics vectors");
    assert!(!vectors.is_empty());

    for vector in vectors {
        let hand = Hand::from_pbn(&vector.hand);
        assert_eq!(hand.cards.len(), 13, "{}: hand size", vector.name);
        assert_eq!(hand.shape(), vector.shape, "{}: shape", vector.name);
        assert_close(
            hand.evaluate(Evaluator::Hcp(HcpScale::Standard)),
            vector.hcp,
            "hcp",
            &vector.name,
        );
        assert_close(
            hand.evaluate(Evaluator::Hcp(HcpScale::Chimaera)),
            vector.chimaera,
            "chimaera hcp",
            &vector.name,
        );
        assert_close(
            hand.evaluate(Evaluator::Points(HcpScale::Standard, ShapePoints::Standard)),
            vector.points,
            "points",
            &vector.name,
        );
        assert_close(
            hand.evaluate(Evaluator::Points(HcpScale::Standard, ShapePoints::Freakiness)),
            vector.freakiness_points,
            "freakiness points",
            &vector.name,
        );
        assert_close(
            hand.evaluate(Evaluator::Tricks),
            vector.tricks,
            "tricks",
            &vector.name,
        );
    }
}

#[test]
fn test_pbn_display_round_trip() {
    let hand = Hand::from_pbn("KQJ3.AK32.T5.J32");
    assert_eq!(hand.to_string(), "KQJ3.AK32.T5.J32");
}
