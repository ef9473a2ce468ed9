use super::template::PatternTable;

fn captures(table: &PatternTable, template: &str, path: &str) -> Option<Vec<(String, String)>> {
    table
        .compile_path(template)
        .capture(path)
        .map(|params| {
            params
                .iter()
                .map(|(k, v)| (k.to_string(), v.clone()))
                .collect()
        })
}

#[test]
fn test_root_path() {
    let table = PatternTable::new();
    assert_eq!(captures(&table, "/", "/"), Some(vec![]));
    assert_eq!(captures(&table, "/", "/x"), None);
}

#[test]
fn test_parameterized_path() {
    let table = PatternTable::new();
    assert_eq!(
        captures(&table, "/items/{id}", "/items/123"),
        Some(vec![("id".to_string(), "123".to_string())])
    );
    // the default fragment spans exactly one segment
    assert_eq!(captures(&table, "/items/{id}", "/items/1/2"), None);
    assert_eq!(captures(&table, "/items/{id}", "/items"), None);
}

#[test]
fn test_nested_path() {
    let table = PatternTable::new();
    assert_eq!(
        captures(&table, "/a/{b}/c/{d}", "/a/1/c/2"),
        Some(vec![
            ("b".to_string(), "1".to_string()),
            ("d".to_string(), "2".to_string()),
        ])
    );
}

#[test]
fn test_literals_are_escaped() {
    let table = PatternTable::new();
    assert_eq!(captures(&table, "/file.txt", "/file.txt"), Some(vec![]));
    assert_eq!(captures(&table, "/file.txt", "/fileXtxt"), None);
}

#[test]
fn test_optional_segment_absorbs_its_slash() {
    let table = PatternTable::new();
    assert_eq!(captures(&table, "/pages/{id?}", "/pages"), Some(vec![]));
    assert_eq!(
        captures(&table, "/pages/{id?}", "/pages/5"),
        Some(vec![("id".to_string(), "5".to_string())])
    );
    assert_eq!(captures(&table, "/pages/{id?}", "/pages/"), None);
}

#[test]
fn test_optional_marker_form() {
    let table = PatternTable::new();
    assert_eq!(captures(&table, "/docs/?{page?}", "/docs"), Some(vec![]));
    assert_eq!(
        captures(&table, "/docs/?{page?}", "/docs/api"),
        Some(vec![("page".to_string(), "api".to_string())])
    );
}

#[test]
fn test_fully_optional_template_answers_root() {
    let table = PatternTable::new();
    assert_eq!(captures(&table, "/{page?}", "/"), Some(vec![]));
    assert_eq!(
        captures(&table, "/{page?}", "/home"),
        Some(vec![("page".to_string(), "home".to_string())])
    );
}

#[test]
fn test_custom_fragment_constrains_matches() {
    let table = PatternTable::new();
    table.set_fragment("id", r"\d+");
    assert!(captures(&table, "/users/{id}", "/users/42").is_some());
    assert_eq!(captures(&table, "/users/{id}", "/users/abc"), None);
}

#[test]
fn test_fragment_change_clears_the_cache() {
    let table = PatternTable::new();
    assert!(captures(&table, "/users/{id}", "/users/abc").is_some());
    table.set_fragment("id", r"\d+");
    assert_eq!(captures(&table, "/users/{id}", "/users/abc"), None);
}

#[test]
#[should_panic(expected = "not a valid regex")]
fn test_malformed_fragment_panics_at_registration() {
    PatternTable::new().set_fragment("id", "(");
}

#[test]
#[should_panic(expected = "reserved capture group")]
fn test_fragment_with_reserved_capture_group_panics_at_registration() {
    PatternTable::new().set_fragment("id", r"(?P<p0>\d+)");
}

#[test]
fn test_fragment_may_define_its_own_capture_groups() {
    let table = PatternTable::new();
    table.set_fragment("slug", r"(?P<word>[a-z]+)(-\d+)?");
    assert_eq!(
        captures(&table, "/posts/{slug}", "/posts/intro-2"),
        Some(vec![("slug".to_string(), "intro-2".to_string())])
    );
}

#[test]
fn test_duplicate_parameter_names_capture_in_order() {
    let table = PatternTable::new();
    assert_eq!(
        captures(&table, "/{id}/{id}", "/a/b"),
        Some(vec![
            ("id".to_string(), "a".to_string()),
            ("id".to_string(), "b".to_string()),
        ])
    );
}

#[test]
fn test_domain_patterns_are_raw_regexes() {
    let table = PatternTable::new();
    let rule = table.compile_domain(r"(.*)\.example\.com");
    assert!(rule.is_match("shop.example.com"));
    assert!(!rule.is_match("example.com"));
}

#[test]
fn test_domain_tokens_use_fragments() {
    let table = PatternTable::new();
    let rule = table.compile_domain("{account}.example.com");
    assert!(rule.is_match("acme.example.com"));
    assert!(!rule.is_match("acme.other.org"));
}
