use super::*;
use serde_json::json;

fn schema() -> ConfigSchema {
    ConfigSchema::new()
        .field(FieldRule::required("text", FieldKind::string(Some(1), Some(8))))
        .field(FieldRule::optional("speed", FieldKind::int(Some(1), Some(10))))
        .field(FieldRule::optional("scale", FieldKind::float(Some(0.5), None)))
        .field(FieldRule::optional("scroll", FieldKind::Bool))
        .field(FieldRule::optional(
            "games",
            FieldKind::list(FieldKind::object(vec![
                FieldRule::required("home", FieldKind::string(None, None)),
                FieldRule::optional("period", FieldKind::int(Some(0), None)),
            ])),
        ))
}

fn messages(v: serde_json::Value) -> Vec<String> {
    schema()
        .validate(&v)
        .unwrap_err()
        .errors
        .iter()
        .map(ToString::to_string)
        .collect()
}

#[test]
fn accepts_a_valid_object() {
    let v = json!({"text": "hi", "speed": 3, "scale": 1, "scroll": true,
                   "games": [{"home": "BOS", "period": 2}]});
    schema().validate(&v).unwrap();
}

#[test]
fn null_counts_as_absent() {
    schema().validate(&json!({"text": "x", "speed": null})).unwrap();
}

#[test]
fn reports_every_violation_with_paths() {
    let got = messages(json!({"speed": 11, "scroll": "yes", "color": "red",
                              "games": [{"period": -1}]}));
    assert_eq!(
        got,
        vec![
            "$.text: required field is missing",
            "$.speed: 11 outside [1, 10]",
            "$.scroll: expected true or false",
            "$.games[0].home: required field is missing",
            "$.games[0].period: -1 outside [0, ..)",
            "$.color: unknown field",
        ]
    );
}

#[test]
fn string_length_counts_chars() {
    schema().validate(&json!({"text": "éééééééé"})).unwrap();
    let got = messages(json!({"text": ""}));
    assert_eq!(got, vec!["$.text: length 0 outside [1, 8]"]);
}

#[test]
fn non_object_root_is_rejected() {
    assert_eq!(messages(json!([1])), vec!["$: config must be a JSON object"]);
}

#[test]
fn errors_convert_to_config_errors() {
    let e: BoardError = schema().validate(&json!({})).unwrap_err().into();
    assert!(matches!(e, BoardError::Config(_)));
}

#[test]
fn pairs_coerce_by_field_kind() {
    let pairs = vec![
        ("text".to_owned(), "hello".to_owned()),
        ("speed".to_owned(), " 4 ".to_owned()),
        ("scale".to_owned(), "1.5".to_owned()),
        ("scroll".to_owned(), "TRUE".to_owned()),
        ("games".to_owned(), r#"[{"home":"NYY"}]"#.to_owned()),
    ];
    let v = schema().coerce_pairs(&pairs).unwrap();
    assert_eq!(
        v,
        json!({"text": "hello", "speed": 4, "scale": 1.5, "scroll": true,
               "games": [{"home": "NYY"}]})
    );
    schema().validate(&v).unwrap();
}

#[test]
fn pair_coercion_errors() {
    let bad_int = vec![("speed".to_owned(), "fast".to_owned())];
    assert!(matches!(
        schema().coerce_pairs(&bad_int),
        Err(BoardError::Config(_))
    ));
    let unknown = vec![("nope".to_owned(), "1".to_owned())];
    assert!(schema().coerce_pairs(&unknown).is_err());
}

#[test]
fn comma_lists_coerce_items() {
    let s = ConfigSchema::new().field(FieldRule::optional(
        "ids",
        FieldKind::list(FieldKind::int(None, None)),
    ));
    let v = s
        .coerce_pairs(&[("ids".to_owned(), "1, 2,3".to_owned())])
        .unwrap();
    assert_eq!(v, json!({"ids": [1, 2, 3]}));
}

#[test]
fn schema_serializes_for_listing() {
    let v = serde_json::to_value(
        ConfigSchema::new().field(
            FieldRule::required("speed", FieldKind::int(Some(1), None)).describe("px per frame"),
        ),
    )
    .unwrap();
    assert_eq!(
        v,
        json!({"fields": [{"name": "speed", "type": "int", "min": 1,
                            "required": true, "description": "px per frame"}]})
    );
}
