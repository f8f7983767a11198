use skillcat::description::{ExtractedFeature, extract_features, fold, split_by_tier};
use skillcat::test_utils::{TestCase, run_table_tests};

#[test]
fn split_by_tier_cases() {
    let cases = vec![
        TestCase::new(
            "three tiers",
            "1★ A; 2★ B; 3★ C",
            vec![(1, "A".to_string()), (2, "B".to_string()), (3, "C".to_string())],
        ),
        TestCase::new("no markers", "no markers here", vec![]),
        TestCase::new("empty", "", vec![]),
        TestCase::new(
            "emoji star with variation selector",
            "1⭐️ hồi 10%HP. 2⭐ hồi 15%HP.",
            vec![(1, "hồi 10%HP".to_string()), (2, "hồi 15%HP".to_string())],
        ),
        TestCase::new(
            "prefix before first marker is dropped",
            "Gầm lớn: 1★ giảm giáp",
            vec![(1, "giảm giáp".to_string())],
        ),
        TestCase::new(
            "segments may span lines",
            "1★ dòng một\ndòng hai; 2★ B",
            vec![(1, "dòng một\ndòng hai".to_string()), (2, "B".to_string())],
        ),
    ];

    run_table_tests(cases, |text| {
        split_by_tier(text)
            .iter()
            .map(|(tier, fragment)| (tier, fragment.to_string()))
            .collect::<Vec<_>>()
    });
}

#[test]
fn extract_features_cases() {
    let cases = vec![
        TestCase::new(
            "debuff",
            "giảm 15%ATK 3 lượt 1 mục tiêu",
            ExtractedFeature {
                percentages: vec![15],
                turns: vec![3],
                targets: vec![1],
                global: false,
            },
        ),
        TestCase::new(
            "team heal",
            "toàn đội hồi 20%HP",
            ExtractedFeature {
                percentages: vec![20],
                global: true,
                ..Default::default()
            },
        ),
        TestCase::new(
            "ally count",
            "tăng 10%DEF cho 2 đồng minh 2 lượt",
            ExtractedFeature {
                percentages: vec![10],
                turns: vec![2],
                targets: vec![2],
                global: false,
            },
        ),
        TestCase::new("nothing numeric", "tấn công", ExtractedFeature::default()),
    ];

    run_table_tests(cases, |text| extract_features(text));
}

#[test]
fn folding_strips_vietnamese_diacritics() {
    assert_eq!(fold("Toàn Đội"), "toan doi");
    assert_eq!(fold("lượt"), "luot");
    assert_eq!(fold("mục tiêu"), "muc tieu");
    assert_eq!(fold("KẺ ĐỊCH"), "ke dich");
}

#[test]
fn decomposed_input_folds_like_composed() {
    // "lượt" written with combining horn and dot below.
    let decomposed = "3 lu\u{031B}o\u{031B}\u{0323}t";
    assert_eq!(fold(decomposed), "3 luot");
    assert_eq!(extract_features(decomposed).turns, [3]);
}

#[test]
fn empty_feature_detection() {
    assert!(extract_features("").is_empty());
    assert!(!extract_features("toàn bộ").is_empty());
}
