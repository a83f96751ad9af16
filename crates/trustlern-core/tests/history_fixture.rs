use std::fs;

use trustlern_core::{disappointment, Decision, InformationContext, RoundOffer, RoundRecord};

#[test]
fn test_deserialize_history_from_fixture() {
    let content = fs::read_to_string("../../tests/fixtures/session/history.ok.json")
        .expect("Failed to read fixture file");

    let history: Vec<RoundRecord> =
        serde_json::from_str(&content).expect("Failed to deserialize history fixture");

    assert_eq!(history.len(), 4);
    assert_eq!(history[2].user_decision, Decision::Stop);
    assert!((history[2].mean_review(2).expect("has reviews") - 9.0).abs() < 1e-12);

    let map = disappointment(&history).expect("valid history");
    assert_eq!(map.count(), 2);

    let offer = RoundOffer::new(8.0);
    let ctx = InformationContext::new(&history, &offer);
    assert_eq!(ctx.rounds_played(), 4);
    assert!((ctx.last_round().expect("non-empty").bot_action - 5.0).abs() < f64::EPSILON);
}
