//! Resource Locator Integration Tests
//!
//! Tests for URL construction and path-segment encoding.

use syllabus::core::{encode_segment, ResourceLocator};
use syllabus::ResourceKind;

const BASE: &str = "https://example-bucket.s3.amazonaws.com/discussions";

/// Split a located URL back into (unit segment, folder, file name)
fn path_after_base<'a>(url: &'a str, base: &str) -> Vec<&'a str> {
    url.strip_prefix(base)
        .and_then(|rest| rest.strip_prefix('/'))
        .expect("URL should start with the base")
        .split('/')
        .collect()
}

#[test]
fn test_scenario_tutorial_url() {
    let locator = ResourceLocator::new(BASE);
    let url = locator.locate("Intro to Databases", "ER Modeling", ResourceKind::Tutorial);

    assert_eq!(
        url,
        format!("{}/Intro%20to%20Databases/Tutes/ER%20Modeling.pdf", BASE)
    );
}

#[test]
fn test_locate_is_deterministic() {
    let locator = ResourceLocator::new(BASE);

    for kind in ResourceKind::ALL {
        let first = locator.locate("Unit / One", "Topic & More", kind);
        let second = locator.locate("Unit / One", "Topic & More", kind);
        assert_eq!(first, second);
    }
}

#[test]
fn test_awkward_titles_stay_single_segments() {
    let locator = ResourceLocator::new(BASE);
    let titles = [
        "Input/Output",
        "What? Why & How",
        "Données élémentaires",
        "SQL: SELECT * FROM t;",
        "100% #1",
        "データベース",
    ];

    for unit in titles {
        for topic in titles {
            for kind in ResourceKind::ALL {
                let url = locator.locate(unit, topic, kind);
                let segments = path_after_base(&url, BASE);

                assert_eq!(segments.len(), 3, "unexpected path shape: {}", url);
                assert_eq!(segments[0], encode_segment(unit));
                assert_eq!(segments[1], kind.folder());
                assert_eq!(
                    segments[2],
                    format!("{}{}", encode_segment(topic), kind.extension())
                );

                assert!(!url.contains(' '));
                assert!(!url.contains('?'));
                assert!(!url.contains('#'));
                assert!(url.is_ascii());
            }
        }
    }
}

#[test]
fn test_extension_matches_kind() {
    let locator = ResourceLocator::new(BASE);

    for kind in ResourceKind::ALL {
        let url = locator.locate("Unit", "Topic", kind);
        assert_eq!(url.ends_with(".mp4"), kind == ResourceKind::Video);
        assert_eq!(url.ends_with(".pdf"), kind != ResourceKind::Video);
    }
}

#[test]
fn test_base_is_injected() {
    let a = ResourceLocator::new("https://a.test");
    let b = ResourceLocator::new("https://b.test/");

    assert!(a
        .locate("U", "T", ResourceKind::Video)
        .starts_with("https://a.test/U/"));
    assert!(b
        .locate("U", "T", ResourceKind::Video)
        .starts_with("https://b.test/U/"));
}
