//! Unit tests for redirect URL normalisation.

use rstest::rstest;

use super::*;

#[rstest]
#[case::spaces("/page?a=1&b=two words", "/page?a=1&b=two%20words")]
#[case::plus_is_space("/page?q=a+b", "/page?q=a%20b")]
#[case::already_escaped("/page?q=a%2Fb", "/page?q=a%2Fb")]
#[case::reserved_characters("/find?q=rock&roll=yes", "/find?q=rock&roll=yes")]
#[case::unicode("/p?name=zoë", "/p?name=zo%C3%AB")]
#[case::empty_value("/p?flag=", "/p?flag=")]
#[case::unreserved_kept("/p?k=a-b_c.d~e", "/p?k=a-b_c.d~e")]
#[case::non_utf8_bytes("/p?q=%FF&n=caf%E9", "/p?q=%FF&n=caf%E9")]
#[case::lowercase_escape("/p?q=%2f", "/p?q=%2F")]
#[case::escaped_key("/p?a%20b=1", "/p?a%20b=1")]
fn query_pairs_are_reescaped(#[case] input: &str, #[case] expected: &str) {
    assert_eq!(reencode_query(input), expected);
}

#[rstest]
#[case::absolute(
    "https://example.com/a b/page.html?x=1 2#frag ment",
    "https://example.com/a b/page.html?x=1%202#frag ment"
)]
#[case::fragment_only("/page#top?x=1 2", "/page#top?x=1 2")]
#[case::no_query("/plain/path", "/plain/path")]
#[case::empty_query("/page?", "/page?")]
fn path_and_fragment_are_untouched(#[case] input: &str, #[case] expected: &str) {
    assert_eq!(reencode_query(input), expected);
}

#[rstest]
#[case::opaque_token("/page.html?query1234", "/page.html?query1234")]
#[case::opaque_with_space("/page?some token", "/page?some%20token")]
#[case::mixed_segments("/page?a=1&flag", "/page?a%3D1%26flag")]
#[case::missing_key("/page?=value", "/page?%3Dvalue")]
fn undecomposable_query_is_escaped_wholesale(#[case] input: &str, #[case] expected: &str) {
    assert_eq!(reencode_query(input), expected);
}

#[test]
fn empty_segments_are_dropped() {
    assert_eq!(reencode_query("/p?a=1&&b=2&"), "/p?a=1&b=2");
}

#[test]
fn immediate_navigation_assigns_location() {
    assert_eq!(
        navigation_script("/next", 0),
        "window.location = \"/next\";"
    );
}

#[rstest]
#[case::one_second(1, "1000")]
#[case::several_seconds(5, "5000")]
fn delayed_navigation_uses_timeout(#[case] delay: u32, #[case] millis: &str) {
    let script = navigation_script("/next", delay);
    assert!(script.starts_with("window.setTimeout("), "got: {script}");
    assert!(script.contains("window.location = '/next';"), "got: {script}");
    assert!(script.ends_with(&format!(",{millis});")), "got: {script}");
}
