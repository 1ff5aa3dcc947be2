use task_relay::asana::notes::sanitize;

#[test]
fn strips_asset_links() {
    let input = "see https://app.asana.com/app/asana/-/get_asset?asset_id=12345 for the mock";
    assert_eq!(sanitize(input), "see for the mock");
}

#[test]
fn strips_every_asset_link_occurrence() {
    let input = "a https://app.asana.com/app/asana/-/get_asset?asset_id=1 b \
                 https://app.asana.com/app/asana/-/get_asset?asset_id=2 c";
    let output = sanitize(input);
    assert_eq!(output, "a b c");
    assert!(!output.contains("get_asset"));
}

#[test]
fn normalizes_non_breaking_spaces() {
    assert_eq!(sanitize("a\u{a0}b"), "a b");
}

#[test]
fn collapses_whitespace_runs() {
    assert_eq!(sanitize("a \n\n b\t\tc"), "a b c");
}

#[test]
fn trims_leading_and_trailing_whitespace() {
    assert_eq!(sanitize("  hello world \n"), "hello world");
}

#[test]
fn output_never_contains_consecutive_whitespace() {
    let inputs = [
        "a\u{a0}\u{a0}b   c",
        "x https://app.asana.com/app/asana/-/get_asset?asset_id=9 y",
        "\n\n\n",
        "plain",
    ];
    for input in inputs {
        let output = sanitize(input);
        assert!(!output.contains("  "), "double space in {output:?}");
        assert!(!output.contains('\n'), "newline in {output:?}");
    }
}

#[test]
fn total_over_empty_input() {
    assert_eq!(sanitize(""), "");
}

#[test]
fn idempotent() {
    let inputs = [
        "",
        "plain text",
        "a\u{a0}b\n\nc",
        "link https://app.asana.com/app/asana/-/get_asset?asset_id=77#frag tail",
        "  padded  ",
    ];
    for input in inputs {
        let once = sanitize(input);
        assert_eq!(sanitize(&once), once, "not idempotent for {input:?}");
    }
}
