use std::fs;
use std::path::PathBuf;

use cdm_model::{Constraint, ConstraintList, field_names};
use cdm_validate::{ReferenceCatalog, ValidationError, check_required_values};

fn v(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| (*s).to_string()).collect()
}

fn temp_file(name: &str, contents: &str) -> PathBuf {
    let mut dir = std::env::temp_dir();
    let stamp = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    dir.push(format!("cdm_validate_{stamp}"));
    fs::create_dir_all(&dir).expect("create temp dir");
    let path = dir.join(name);
    fs::write(&path, contents).expect("write file");
    path
}

fn catalog() -> ReferenceCatalog {
    ReferenceCatalog::from_toml_str(
        r#"
        field = "variable"

        [partitions.land]
        required = ["44", "85"]
        "#,
        std::path::Path::new("inline"),
    )
    .expect("catalog")
}

fn constraints(variables: &[&[&str]]) -> ConstraintList {
    ConstraintList::new(
        field_names(["variable", "year"]).unwrap(),
        variables
            .iter()
            .map(|values| Constraint::from_values(vec![v(values), v(&["1900"])]))
            .collect(),
    )
    .unwrap()
}

#[test]
fn all_required_values_present() {
    let report = check_required_values(&catalog(), "land", &constraints(&[&["44"], &["85", "36"]]))
        .expect("complete");
    assert_eq!(report.required, 2);
    assert_eq!(report.found, 3);
    assert_eq!(report.unexpected, v(&["36"]));
}

#[test]
fn missing_values_are_named() {
    let err = check_required_values(&catalog(), "land", &constraints(&[&["44"]])).unwrap_err();
    assert_eq!(
        err.to_string(),
        "required variable value(s) missing after minimisation for partition land: 85"
    );
    assert!(matches!(
        err,
        ValidationError::MissingRequiredValues { ref missing, .. } if missing == &v(&["85"])
    ));
}

#[test]
fn unknown_partition_is_fatal() {
    let err = check_required_values(&catalog(), "marine", &constraints(&[&["44"]])).unwrap_err();
    assert!(matches!(err, ValidationError::UnknownPartition { .. }));
}

#[test]
fn nominated_field_must_exist() {
    let list = ConstraintList::new(
        field_names(["month"]).unwrap(),
        vec![Constraint::from_values(vec![v(&["01"])])],
    )
    .unwrap();
    let err = check_required_values(&catalog(), "land", &list).unwrap_err();
    assert!(matches!(err, ValidationError::MissingField { .. }));
}

#[test]
fn catalog_loads_from_disk() {
    let path = temp_file(
        "catalog.toml",
        "[partitions.MARINE]\nrequired = [\"58\"]\n",
    );
    let catalog = ReferenceCatalog::load(&path).expect("load catalog");
    assert_eq!(catalog.field(), "variable");
    assert_eq!(catalog.required("marine").unwrap().len(), 1);

    let _ = fs::remove_dir_all(path.parent().unwrap());
}

#[test]
fn missing_catalog_file_is_an_io_error() {
    let err = ReferenceCatalog::load(std::path::Path::new("/nonexistent/catalog.toml")).unwrap_err();
    assert!(matches!(err, ValidationError::Io { .. }));
}
