use std::rc::Rc;

use mathart_test_fixtures::{generators, snapshots};
use mathart_tween_core::{
    Config, Generator, LayerState, PortableSnapshot, PropertyBag, PropertySchema, RandomStream,
    Seed, SeedText, Snapshot, TweenError, TweenSession,
};

fn mk_generator() -> PropertyBag {
    let fixture = generators::load("tiles").unwrap();
    let schema = PropertySchema::from_json_str(&generators::schema_json("tiles").unwrap()).unwrap();
    PropertyBag::from_json(schema, fixture.values).unwrap()
}

fn mk_portable(name: &str) -> PortableSnapshot {
    PortableSnapshot::from_json_str(&snapshots::json(name).unwrap()).unwrap()
}

fn mk_still_session(generator: &PropertyBag, state: &LayerState) -> TweenSession {
    let snap = Rc::new(Snapshot::capture(generator, state));
    TweenSession::new(generator.schema().clone(), snap, 800.0, 600.0, Config::default())
}

#[test]
fn single_seed_replaces_only_the_live_stream() {
    let generator = mk_generator();
    let mut state = LayerState::default();
    let mut session = mk_still_session(&generator, &state);
    let before = session.start().random();

    let parsed = session
        .apply_seed_text("1\n2\n3\n4", &mut state, 0.0, false)
        .unwrap();
    assert_eq!(parsed, SeedText::Single(Seed([1, 2, 3, 4])));
    assert_eq!(session.seed_text(&state).to_string(), "1\n2\n3\n4");
    assert!(RandomStream::ptr_eq(&session.start().random(), &before));
    assert!(!session.has_range());
}

#[test]
fn identical_pair_shares_one_stream() {
    let generator = mk_generator();
    let mut state = LayerState::default();
    let mut session = mk_still_session(&generator, &state);

    session
        .apply_seed_text("5\n6\n7\n8\n\n5\n6\n7\n8", &mut state, 0.5, false)
        .unwrap();
    let start = session.start().random();
    assert!(RandomStream::ptr_eq(&start, &session.end().random()));
    assert!(RandomStream::ptr_eq(&start, &state.random));
    assert!(!session.has_range());
}

#[test]
fn distinct_pair_splits_a_still_frame() {
    let generator = mk_generator();
    let mut state = LayerState::default();
    let mut session = mk_still_session(&generator, &state);
    let rev = session.context_revision();

    session
        .apply_seed_text("1\n2\n3\n4\n\n5\n6\n7\n8", &mut state, 0.25, false)
        .unwrap();
    assert!(session.has_range());
    assert_eq!(session.context_revision(), rev + 1);
    assert_eq!(session.start().values(), session.end().values());
    assert_eq!(session.start().layer(), session.end().layer());

    assert_eq!(state.random.weight(), Some(0.25));
    let (a, b) = state.random.endpoints().unwrap();
    assert!(RandomStream::ptr_eq(&a, &session.start().random()));
    assert!(RandomStream::ptr_eq(&b, &session.end().random()));
    assert_eq!(
        session.seed_text(&state).to_string(),
        "1\n2\n3\n4\n\n5\n6\n7\n8"
    );

    // capturing narrows the blended live stream to the matching endpoint
    session.capture_start(&generator, &mut state);
    assert!(RandomStream::ptr_eq(&state.random, &a));
    assert!(RandomStream::ptr_eq(&session.start().random(), &a));
    assert!(session.start().equals_live(&generator, &state, generator.schema()));
}

#[test]
fn seed_text_keeps_both_ends_at_the_boundaries() {
    let start = mk_portable("tiles-start");
    let end = mk_portable("tiles-end");
    let schema = mk_generator().schema().clone();
    let (session, _) =
        TweenSession::from_portable(schema, &start, Some(&end), 800.0, 600.0, Config::default())
            .unwrap();
    let mut generator = mk_generator();
    let mut state = LayerState::default();

    for t in [0.0, 0.5, 1.0] {
        let frame = session.compute_frame(&mut generator, t, false);
        state.random = frame.random;
        assert_eq!(
            session.seed_text(&state).to_string(),
            "11\n22\n33\n44\n\n55\n66\n77\n88",
            "t = {t}"
        );
    }
}

#[test]
fn bad_seed_changes_nothing() {
    let generator = mk_generator();
    let mut state = LayerState::default();
    let mut session = mk_still_session(&generator, &state);
    let live = state.random.clone();
    let rev = session.context_revision();

    for text in ["1\n2\nx\n4", "1\n2\n3", "1\n2\n3\n4\n5\n6\n7\n8\n9", "-1\n2\n3\n4"] {
        let err = session
            .apply_seed_text(text, &mut state, 0.5, true)
            .unwrap_err();
        assert!(matches!(err, TweenError::InvalidSeed { .. }), "{text:?}");
    }
    assert!(RandomStream::ptr_eq(&state.random, &live));
    assert_eq!(session.context_revision(), rev);
    assert!(!session.has_range());
}

#[test]
fn portable_pair_survives_a_round_trip() {
    let start = mk_portable("tiles-start");
    let end = mk_portable("tiles-end");
    let schema = mk_generator().schema().clone();
    let (session, report) =
        TweenSession::from_portable(schema, &start, Some(&end), 800.0, 600.0, Config::default())
            .unwrap();
    assert!(report.is_clean());

    let (start_back, end_back) = session.to_portable();
    assert_eq!(start_back, start);
    assert_eq!(end_back.as_ref(), Some(&end));

    let text = end_back.unwrap().to_json_string().unwrap();
    let json: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(json["backgroundImageURL"], "https://example.com/backdrop.png");
    assert_eq!(json["scaleMode"], 2);
    assert_eq!(json["seed"], "55\n66\n77\n88");
    assert!(json.get("seedWeight").is_none());
    assert_eq!(json["properties"]["filled"], serde_json::json!([false, true, true, true]));
}

#[test]
fn still_frame_exports_only_a_start() {
    let generator = mk_generator();
    let state = LayerState::default();
    let session = mk_still_session(&generator, &state);
    let (start, end) = session.to_portable();
    assert!(end.is_none());
    assert_eq!(start.properties.len(), generator.schema().len());
}

#[test]
fn seed_weight_restores_a_blend() {
    let mut portable = mk_portable("tiles-start");
    portable.seed = Some("1\n2\n3\n4\n\n5\n6\n7\n8".into());
    portable.seed_weight = Some(0.3);
    let schema = mk_generator().schema().clone();

    let (snap, _) = Snapshot::from_portable(&portable, &schema).unwrap();
    let random = snap.random();
    assert_eq!(random.weight(), Some(0.3));
    assert_eq!(
        random.seed_text(),
        SeedText::Pair(Seed([1, 2, 3, 4]), Seed([5, 6, 7, 8]))
    );

    let back = snap.to_portable();
    assert_eq!(back.seed, portable.seed);
    assert_eq!(back.seed_weight, Some(0.3));

    // a pair without a weight blends half way
    portable.seed_weight = None;
    let (snap, _) = Snapshot::from_portable(&portable, &schema).unwrap();
    assert_eq!(snap.random().weight(), Some(0.5));
}

#[test]
fn malformed_portable_seed_is_an_error() {
    let mut portable = mk_portable("tiles-start");
    portable.seed = Some("not a seed".into());
    let schema = mk_generator().schema().clone();
    assert!(matches!(
        Snapshot::from_portable(&portable, &schema),
        Err(TweenError::InvalidSeed { .. })
    ));
}

#[test]
fn malformed_colour_in_portable_data_is_rejected() {
    let text = r#"{ "properties": { "strokeColor": "rgb(0, 0" } }"#;
    assert!(matches!(
        PortableSnapshot::from_json_str(text),
        Err(TweenError::Serialization { .. })
    ));

    let text = r#"{ "properties": { "shape": "hexagon", "strokeColor": "hsl(10, 20%, 30%)" } }"#;
    let portable = PortableSnapshot::from_json_str(text).unwrap();
    assert!(portable.properties["strokeColor"].as_color().is_some());
}
