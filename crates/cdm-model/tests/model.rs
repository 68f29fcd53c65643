use cdm_model::{
    Constraint, ConstraintList, MinimiseOptions, ModelError, RecordSet, SearchStrategyKind,
    field_names,
};

fn record(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| (*v).to_string()).collect()
}

#[test]
fn record_set_rejects_short_rows() {
    let fields = field_names(["year", "month"]).unwrap();
    let err = RecordSet::new(fields, vec![record(&["1900", "01"]), record(&["1900"])]).unwrap_err();
    assert_eq!(
        err,
        ModelError::RecordArity {
            index: 1,
            expected: 2,
            found: 1
        }
    );
}

#[test]
fn singletons_expand_back_to_the_records() {
    let fields = field_names(["a", "b"]).unwrap();
    let records = RecordSet::new(
        fields,
        vec![record(&["1", "x"]), record(&["1", "y"]), record(&["2", "x"])],
    )
    .unwrap();
    let singletons = records.to_singletons();
    assert_eq!(singletons.len(), 3);
    assert_eq!(singletons.expand(), records.to_set());
}

#[test]
fn reordered_record_set_keeps_record_contents() {
    let records = RecordSet::new(
        field_names(["a", "b"]).unwrap(),
        vec![record(&["1", "x"]), record(&["2", "y"])],
    )
    .unwrap();
    let swapped = records.reordered(&field_names(["b", "a"]).unwrap()).unwrap();
    assert_eq!(swapped.records(), &[record(&["x", "1"]), record(&["y", "2"])]);

    let err = records
        .reordered(&field_names(["a", "c"]).unwrap())
        .unwrap_err();
    assert!(matches!(err, ModelError::FieldSetMismatch { .. }));
}

#[test]
fn values_of_collects_across_constraints() {
    let list = ConstraintList::new(
        field_names(["variable", "year"]).unwrap(),
        vec![
            Constraint::from_values(vec![record(&["44"]), record(&["1900", "1901"])]),
            Constraint::from_values(vec![record(&["85", "44"]), record(&["1902"])]),
        ],
    )
    .unwrap();
    let values: Vec<String> = list.values_of("variable").unwrap().into_iter().collect();
    assert_eq!(values, record(&["44", "85"]));
    assert!(list.values_of("month").is_none());
    assert_eq!(list.cardinality(), 4);
}

#[test]
fn maps_serialize_with_sorted_keys() {
    let list = ConstraintList::new(
        field_names(["month", "frequency"]).unwrap(),
        vec![Constraint::from_values(vec![
            record(&["01", "02"]),
            record(&["daily"]),
        ])],
    )
    .unwrap();
    let json = serde_json::to_string(&list.to_maps()).unwrap();
    assert_eq!(json, r#"[{"frequency":["daily"],"month":["01","02"]}]"#);
}

#[test]
fn options_load_from_partial_toml() {
    let options: MinimiseOptions = toml::from_str(
        r#"
        max_rounds = 5
        strategy = "trailing_field"
        target_constraints = 42
        "#,
    )
    .unwrap();
    assert_eq!(options.max_rounds, 5);
    assert_eq!(options.strategy, SearchStrategyKind::TrailingField);
    assert_eq!(options.target_constraints, Some(42));
    assert_eq!(options.max_fields, cdm_model::DEFAULT_MAX_FIELDS);
    assert!(options.verify_lossless);
}

#[test]
fn options_reject_unknown_keys() {
    let result: Result<MinimiseOptions, _> = toml::from_str("verbose = true");
    assert!(result.is_err());
}
