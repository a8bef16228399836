use serde_json::json;

use crate::expand::expand;

#[test]
fn interpolates_fields_and_root() {
    let data = json!({"Name": "Ada", "Team": {"City": "Oslo"}});
    assert_eq!(expand("{{.Name}} of {{.Team.City}}", &data).unwrap(), "Ada of Oslo");
    assert_eq!(
        expand("{{with .Team}}{{.City}}/{{$.Name}}{{end}}", &data).unwrap(),
        "Oslo/Ada"
    );
}

#[test]
fn missing_fields_print_empty() {
    assert_eq!(expand("[{{.Nope.Deeper}}]", &json!({})).unwrap(), "[]");
    assert_eq!(expand("[{{.Nope | default \"-\"}}]", &json!({})).unwrap(), "[-]");
}

#[test]
fn if_chain_picks_first_truthy() {
    let t = "{{if gt .N 10}}big{{else if gt .N 0}}small{{else}}none{{end}}";
    assert_eq!(expand(t, &json!({"N": 11})).unwrap(), "big");
    assert_eq!(expand(t, &json!({"N": 3})).unwrap(), "small");
    assert_eq!(expand(t, &json!({"N": 0})).unwrap(), "none");
}

#[test]
fn range_binds_index_and_element() {
    let data = json!({"Games": [{"Home": "A", "Inning": 1}, {"Home": "B", "Inning": 2}]});
    let t = "{{range $i, $g := .Games}}{{$i}}:{{$g.Home}} {{.Inning | ordinal}};{{end}}";
    assert_eq!(expand(t, &data).unwrap(), "0:A 1st;1:B 2nd;");
    assert_eq!(
        expand("{{range .Games}}x{{else}}no games{{end}}", &json!({"Games": []})).unwrap(),
        "no games"
    );
    assert_eq!(
        expand("{{range $k, $v := .M}}{{$k}}={{$v}},{{end}}", &json!({"M": {"b": 2, "a": 1}}))
            .unwrap(),
        "a=1,b=2,"
    );
}

#[test]
fn variables_are_scoped() {
    let t = "{{$x := .A}}{{if true}}{{$y := 2}}{{$x}}{{$y}}{{end}}{{$x}}";
    assert_eq!(expand(t, &json!({"A": 1})).unwrap(), "121");
    let e = expand("{{if true}}{{$y := 2}}{{end}}{{$y}}", &json!({})).unwrap_err();
    assert!(e.message.contains("undefined variable"));
}

#[test]
fn pipelines_feed_the_last_argument() {
    assert_eq!(
        expand("{{ .S | lower | upper }} {{ add 1 (mul .N 2) }}", &json!({"S": "Hi", "N": 4}))
            .unwrap(),
        "HI 9"
    );
    let e = expand("ab{{ .S | .T }}", &json!({})).unwrap_err();
    assert_eq!(e.offset, 10);
}

#[test]
fn trim_markers_shape_markup() {
    let t = "<template>\n  {{- range .L }}\n  <text>{{ . }}</text>\n  {{- end }}\n</template>";
    assert_eq!(
        expand(t, &json!({"L": [1, 2]})).unwrap(),
        "<template>\n  <text>1</text>\n  <text>2</text>\n</template>"
    );
}

#[test]
fn values_print_naturally() {
    let data = json!({"I": 3, "F": 2.5, "B": true, "N": null});
    assert_eq!(expand("{{.I}} {{.F}} {{.B}} [{{.N}}]", &data).unwrap(), "3 2.5 true []");
}

#[test]
fn execution_errors_carry_offsets() {
    let e = expand("abc {{ bogus 1 }}", &json!({})).unwrap_err();
    assert_eq!(e.offset, 7);
    assert!(e.to_string().contains("byte 7"));
}
