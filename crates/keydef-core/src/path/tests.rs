use super::*;

fn lex(path: &str) -> Vec<PathToken<'_>> {
    tokens(path)
        .collect::<Result<_, _>>()
        .expect("path should lex")
}

#[test]
fn dotted_and_bracketed_forms_lex() {
    assert_eq!(lex(".a.b"), vec![PathToken::Str("a"), PathToken::Str("b")]);
    assert_eq!(lex("a"), vec![PathToken::Str("a")]);
    assert_eq!(
        lex("[\"a b\"][2]"),
        vec![PathToken::Str("a b"), PathToken::Num(1)]
    );
    assert_eq!(lex("['k']"), vec![PathToken::Str("k")]);
    assert_eq!(lex(".x[*]"), vec![PathToken::Str("x"), PathToken::Any]);
}

#[test]
fn bad_syntax_reports_one_based_position() {
    let cases = [
        (".", 2),
        ("..a", 2),
        ("[0]", 2),
        ("[1", 3),
        ("[\"\"]", 3),
        ("[\"open", 7),
        (".a]", 3),
        ("1a", 1),
    ];

    for (path, position) in cases {
        let err = validate(path).expect_err("path should fail");
        assert_eq!(err.position, position, "path {path:?}");
        assert_eq!(err.path, path);
    }
}

#[test]
fn lexer_stops_after_first_error() {
    let results: Vec<_> = tokens(".a..b").collect();

    assert_eq!(results.len(), 2);
    assert!(results[1].is_err());
}

#[test]
fn multikey_detection() {
    assert!(contains_multikey(".a[*]"));
    assert!(!contains_multikey(".a[1]"));
}

#[test]
fn equal_paths_compare_structurally() {
    assert!(paths_equal(None, None));
    assert!(paths_equal(Some(".a"), Some("a")));
    assert!(paths_equal(Some(".a"), Some("[\"a\"]")));
    assert!(paths_equal(Some("[1].b"), Some("[1][\"b\"]")));
    assert!(!paths_equal(Some(".a"), Some(".b")));
    assert!(!paths_equal(Some(".a"), None));

    // unlexable paths still compare textually
    assert!(paths_equal(Some("[x"), Some("[x")));
    assert!(!paths_equal(Some("[x"), Some("[y")));
}

#[test]
fn tokens_display_in_bracket_form() {
    let rendered: String = lex(".a[3][*]").iter().map(ToString::to_string).collect();
    assert_eq!(rendered, "[\"a\"][3][*]");
}

#[test]
fn error_message_names_path_and_position() {
    let err = validate("[0]").expect_err("zero index");
    assert_eq!(err.to_string(), "invalid JSON path '[0]': error at position 2");
}
