use serde_json::json;

use super::*;

#[test]
fn ordinal_suffixes() {
    let cases = [(1, "1st"), (2, "2nd"), (3, "3rd"), (4, "4th"), (11, "11th"), (12, "12th"),
        (13, "13th"), (21, "21st"), (102, "102nd"), (111, "111th")];
    for (n, want) in cases {
        assert_eq!(call("ordinal", &[json!(n)]).unwrap(), json!(want));
    }
    assert_eq!(call("ordinal", &[json!("3")]).unwrap(), json!("3rd"));
    assert!(call("ordinal", &[json!("x")]).is_err());
}

#[test]
fn comparisons_and_logic() {
    assert_eq!(call("eq", &[json!(2), json!(1), json!(2.0)]).unwrap(), json!(true));
    assert_eq!(call("ne", &[json!("a"), json!("a")]).unwrap(), json!(false));
    assert_eq!(call("lt", &[json!(1), json!(2)]).unwrap(), json!(true));
    assert_eq!(call("ge", &[json!("b"), json!("a")]).unwrap(), json!(true));
    assert!(call("lt", &[json!(1), json!([1])]).is_err());
    assert_eq!(call("and", &[json!(1), json!(""), json!(3)]).unwrap(), json!(""));
    assert_eq!(call("or", &[json!(0), json!("x")]).unwrap(), json!("x"));
    assert_eq!(call("not", &[json!([])]).unwrap(), json!(true));
}

#[test]
fn arithmetic_keeps_integers() {
    assert_eq!(call("add", &[json!(2), json!(3)]).unwrap(), json!(5));
    assert_eq!(call("sub", &[json!(2), json!(3)]).unwrap(), json!(-1));
    assert_eq!(call("mul", &[json!(2.5), json!(2)]).unwrap(), json!(5.0));
    assert_eq!(call("div", &[json!(7), json!(2)]).unwrap(), json!(3));
    assert_eq!(call("mod", &[json!(7), json!(3)]).unwrap(), json!(1));
    assert!(call("div", &[json!(1), json!(0)]).is_err());
    assert!(call("add", &[json!("a"), json!(1)]).is_err());
}

#[test]
fn strings_collections_and_default() {
    assert_eq!(call("upper", &[json!("abc")]).unwrap(), json!("ABC"));
    assert_eq!(call("lower", &[json!("ABC")]).unwrap(), json!("abc"));
    assert_eq!(
        call("xml", &[json!("<a & 'b'>")]).unwrap(),
        json!("&lt;a &amp; &apos;b&apos;&gt;")
    );
    assert_eq!(call("len", &[json!("héllo")]).unwrap(), json!(5));
    assert_eq!(call("len", &[json!({"a": 1})]).unwrap(), json!(1));
    let data = json!({"teams": [{"name": "A"}, {"name": "B"}]});
    assert_eq!(
        call("index", &[data.clone(), json!("teams"), json!(1), json!("name")]).unwrap(),
        json!("B")
    );
    assert!(call("index", &[data, json!("teams"), json!(5)]).is_err());
    assert_eq!(call("default", &[json!("n/a"), json!(null)]).unwrap(), json!("n/a"));
    assert_eq!(call("default", &[json!("n/a"), json!("x")]).unwrap(), json!("x"));
}

#[test]
fn date_formats_given_timestamps() {
    let out = call("date", &[json!("%Y"), json!("2024-05-06T07:08:09Z")]).unwrap();
    let year = out.as_str().unwrap();
    assert!(year == "2024" || year == "2023" || year == "2025");
    let now = call("date", &[json!("%Y-%m-%d")]).unwrap();
    assert_eq!(now.as_str().unwrap().len(), 10);
    assert!(call("date", &[json!(5)]).is_err());
    assert!(call("date", &[json!("%Y"), json!("yesterday")]).is_err());
}

#[test]
fn unknown_function() {
    let e = call("sprintf", &[]).unwrap_err();
    assert!(e.contains("not defined"));
}
