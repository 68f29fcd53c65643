use std::collections::BTreeMap;

use cdm_map::{DomainMapper, MapError, Vocabulary, day_values};
use cdm_model::ConstraintMap;

fn map(entries: &[(&str, &[&str])]) -> ConstraintMap {
    entries
        .iter()
        .map(|(k, vs)| (k.to_string(), vs.iter().map(|v| v.to_string()).collect()))
        .collect()
}

fn mapper() -> DomainMapper {
    DomainMapper::new(Vocabulary::builtin().expect("builtin vocabulary"))
}

#[test]
fn daily_constraint_is_translated_and_given_days() {
    let out = mapper()
        .map_constraints(&[map(&[
            ("quality_flag", &["0"]),
            ("report_type", &["3"]),
            ("data_policy_licence", &["0"]),
            ("variable", &["44"]),
        ])])
        .expect("map");

    let mut expected = map(&[
        ("data_quality", &["all_data", "quality_controlled"]),
        ("frequency", &["daily"]),
        ("intended_use", &["open"]),
        ("variable", &["accumulated_precipitation"]),
    ]);
    expected.insert("day".to_string(), day_values(31));
    assert_eq!(out, vec![expected]);
}

#[test]
fn each_input_may_expand_to_several_outputs() {
    let out = mapper()
        .map_constraints(&[
            map(&[
                ("report_type", &["0"]),
                ("year", &["1900", "1904"]),
                ("month", &["02", "06"]),
            ]),
            map(&[("report_type", &["2"]), ("month", &["02"])]),
        ])
        .expect("map");

    let shapes: Vec<(Vec<String>, usize)> = out
        .iter()
        .map(|c| (c["month"].clone(), c["day"].len()))
        .collect();
    assert_eq!(
        shapes,
        vec![
            (vec!["02".to_string()], 28),
            (vec!["02".to_string()], 29),
            (vec!["06".to_string()], 30),
            (vec!["02".to_string()], 1),
        ]
    );
    assert_eq!(out[0]["year"], vec!["1900"]);
    assert_eq!(out[1]["year"], vec!["1904"]);
}

#[test]
fn serialised_output_has_sorted_keys() {
    let out = mapper()
        .map_constraint(&map(&[("variable", &["85"]), ("report_type", &["2"])]))
        .expect("map");
    let json = serde_json::to_string(&out).expect("json");
    assert_eq!(
        json,
        r#"[{"day":["01"],"frequency":["monthly"],"variable":["air_temperature"]}]"#
    );
}

#[test]
fn unknown_code_stops_mapping() {
    let err = mapper()
        .map_constraints(&[map(&[("report_type", &["7"])])])
        .unwrap_err();
    assert!(matches!(err, MapError::UnknownCode { ref field, .. } if field == "frequency"));
}

#[test]
fn unmapped_fields_pass_through() {
    let out = mapper()
        .map_constraint(&map(&[("station_type", &["land"])]))
        .expect("map");
    let expected: Vec<BTreeMap<String, Vec<String>>> = vec![map(&[("station_type", &["land"])])];
    assert_eq!(out, expected);
}
