use super::*;
use crate::foundation::core::Size;
use crate::foundation::error::BoardError;

fn ctx() -> CompileCtx<'static> {
    CompileCtx::new(&Presentation::default())
}

#[test]
fn unknown_elements_are_skipped() {
    let t = compile_markup(
        "<template><text>hi</text><marquee>nope</marquee></template>",
        &ctx(),
    )
    .unwrap();
    assert_eq!(t.children().len(), 1);
    assert_eq!(t.children()[0].kind(), "text");
}

#[test]
fn root_must_be_template() {
    let err = compile_markup("<text>hi</text>", &ctx()).unwrap_err();
    assert!(matches!(err, BoardError::Compile(ref m) if m.contains("<text>")));
}

#[test]
fn malformed_xml_is_a_compile_error() {
    let err = compile_markup("<template><text>hi</template>", &ctx()).unwrap_err();
    assert!(matches!(err, BoardError::Compile(_)));
}

#[test]
fn nested_containers_compile_depth_first() {
    let src = r##"
        <template direction="column" justify="center">
            <container padding="1" border="1" border-color="#FF0000">
                <text>A</text>
                <spiral width="4" height="4"/>
            </container>
            <scroller scroll="up" speed="2"><text>B</text></scroller>
            <color-grid cell="bogus" seed="3"/>
        </template>"##;
    let mut t = compile_markup(src, &ctx()).unwrap();
    let kinds: Vec<_> = t.children().iter().map(|c| c.kind()).collect();
    assert_eq!(kinds, vec!["container", "scroller", "color-grid"]);

    t.init(Size::new(64, 32)).unwrap();
    let img = t.render().unwrap();
    assert_eq!(img.size(), Size::new(64, 32));
}

#[test]
fn presentation_defaults_reach_text_nodes() {
    let p = Presentation {
        font: "4x6".to_owned(),
        ..Presentation::default()
    };
    let mut t = compile_markup("<template><text>ab</text></template>", &CompileCtx::new(&p))
        .unwrap();
    t.init(Size::new(64, 32)).unwrap();
    assert_eq!(t.children()[0].size(), Size::new(8, 6));
}

#[test]
fn custom_registry_drives_decoding() {
    let mut r = Registry::empty();
    r.register("label", crate::component::text::Text::decode);
    let t = compile_markup(
        "<template><label>x</label><text>y</text></template>",
        &CompileCtx::with_registry(&r, &Presentation::default()),
    )
    .unwrap();
    assert_eq!(t.children().len(), 1);
}
