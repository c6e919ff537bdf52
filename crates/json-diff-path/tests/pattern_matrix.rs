use json_diff_path::{child_index, child_key, matches, Pattern, PatternError};

#[test]
fn pattern_arity_matrix() {
    let bases = ["", "/a", "/a/0", "/a~1b/c"];

    for base in bases {
        let x = child_key(base, "x");
        let xy = child_key(&x, "y");
        let one = format!("{base}/*");
        let many = format!("{base}/**");

        assert!(matches(base, base).unwrap(), "{base} should match itself");
        assert!(matches(&x, &one).unwrap(), "{x} ~ {one}");
        assert!(!matches(&xy, &one).unwrap(), "{xy} !~ {one}");
        assert!(matches(&xy, &many).unwrap(), "{xy} ~ {many}");
        assert!(matches(&x, &many).unwrap(), "{x} ~ {many}");
        assert!(!matches(base, &one).unwrap(), "{base} !~ {one}");
        assert!(!matches(base, &many).unwrap(), "{base} !~ {many}");
    }
}

#[test]
fn array_index_patterns() {
    let element = child_index("/items", 3);
    assert!(matches(&element, "/items/*").unwrap());
    assert!(matches(&element, "/items/3").unwrap());
    assert!(!matches(&element, "/items/30").unwrap());
    assert!(matches(&child_key(&element, "id"), "/items/3/*").unwrap());
}

#[test]
fn malformed_patterns_are_reported() {
    assert!(matches!(
        matches("/a", "a"),
        Err(PatternError::NotAbsolute(_))
    ));
    assert!(matches!(
        Pattern::parse("/*/x"),
        Err(PatternError::MisplacedWildcard { segment: 0, .. })
    ));
    assert!(matches!(
        Pattern::parse("/a/**/**"),
        Err(PatternError::MisplacedWildcard { segment: 1, .. })
    ));
}

#[test]
fn display_roundtrips_source() {
    for source in ["", "/a", "/a/*", "/a/**", "/*"] {
        let pattern: Pattern = source.parse().unwrap();
        assert_eq!(pattern.to_string(), source);
        assert_eq!(pattern.as_str(), source);
    }
}
