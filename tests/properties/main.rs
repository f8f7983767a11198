//! Property tests for parsing, the dataset codec and the registry.

use proptest::prelude::*;

use skillcat::audit::ConsistencyAuditor;
use skillcat::dataset::skills::{from_csv, to_csv};
use skillcat::description::{extract_features, fold, split_by_tier};
use skillcat::registry::SkillRegistry;
use skillcat::schema::{COLUMN_COUNT, Column, SkillRecord, make_record};

const ACCENTED: &[(&str, &str)] = &[
    ("lượt", "luot"),
    ("mục tiêu", "muc tieu"),
    ("kẻ địch", "ke dich"),
    ("đồng minh", "dong minh"),
    ("toàn đội", "toan doi"),
];

fn arb_claim() -> impl Strategy<Value = (String, String)> {
    (1u32..100, prop::sample::select(ACCENTED)).prop_map(|(n, (accented, ascii))| {
        (format!("{n} {accented}"), format!("{n} {ascii}"))
    })
}

fn arb_record() -> impl Strategy<Value = SkillRecord> {
    (
        "[a-z][a-z0-9_]{0,12}",
        prop::collection::vec("[a-zA-Z0-9 ,\"\n★%ươđ]{0,16}", COLUMN_COUNT - 1),
    )
        .prop_map(|(id, values)| {
            let mut record = SkillRecord::default();
            record.set(Column::Id, id);
            for (column, value) in Column::ALL[1..].iter().zip(values) {
                record.set(*column, value);
            }
            record
        })
}

proptest! {
    #[test]
    fn accented_and_folded_spellings_extract_the_same(
        claims in prop::collection::vec(arb_claim(), 1..6),
        percent in 0u32..300
    ) {
        let accented = claims.iter().map(|(a, _)| a.as_str()).collect::<Vec<_>>().join(" ");
        let ascii = claims.iter().map(|(_, b)| b.as_str()).collect::<Vec<_>>().join(" ");
        let accented = format!("{percent}% {accented}");
        let ascii = format!("{percent}% {ascii}");
        prop_assert_eq!(extract_features(&accented), extract_features(&ascii));
    }

    #[test]
    fn folded_vietnamese_is_ascii_and_stable(
        text in "[a-zA-Z0-9 ,àáạảãâầấậăằắặèéẹêềếệìíịòóọôồốộơờớợùúụưừứựỳýỵđÀĐƯƠÊ]{0,40}"
    ) {
        let once = fold(&text);
        prop_assert!(once.is_ascii(), "{once}");
        prop_assert_eq!(fold(&once), once.clone());
    }

    #[test]
    fn turn_durations_never_exceed_two(durations in prop::collection::vec(1u32..20, 0..6)) {
        let text = durations
            .iter()
            .map(|d| format!("{d} lượt"))
            .collect::<Vec<_>>()
            .join(", ");
        let turns = extract_features(&text).turns;
        let expected: Vec<u32> = durations.iter().copied().take(2).collect();
        prop_assert_eq!(turns, expected);
    }

    #[test]
    fn text_without_markers_has_no_tiers(text in "[a-zA-Z0-9 ,;.%]{0,60}") {
        prop_assert!(split_by_tier(&text).is_empty());
    }

    #[test]
    fn dataset_text_round_trips(records in prop::collection::vec(arb_record(), 0..6)) {
        let mut seen = std::collections::HashSet::new();
        let records: Vec<SkillRecord> = records
            .into_iter()
            .filter(|r| seen.insert(r.id().to_string()))
            .collect();
        prop_assert_eq!(from_csv(&to_csv(&records)).unwrap(), records);
    }

    #[test]
    fn duplicate_ids_never_register(ids in prop::collection::vec("[a-c]", 1..8)) {
        let records: Vec<SkillRecord> = ids
            .iter()
            .map(|id| make_record([("id", id.as_str())]).unwrap())
            .collect();
        let unique: std::collections::HashSet<&String> = ids.iter().collect();
        let result = SkillRegistry::import(records);
        prop_assert_eq!(result.is_ok(), unique.len() == ids.len());
        if let Ok(registry) = result {
            prop_assert_eq!(registry.len(), ids.len());
        }
    }

    #[test]
    fn audit_counts_every_described_skill(count in 0usize..6, turns in 1u32..9) {
        let records: Vec<SkillRecord> = (0..count)
            .map(|i| {
                let id = format!("skill_{i}");
                let description = format!("1★ {turns} lượt; 2★ {turns} lượt; 3★ {turns} lượt");
                let turns = turns.to_string();
                make_record([
                    ("id", id.as_str()),
                    ("descriptionVi", description.as_str()),
                    ("turns", turns.as_str()),
                ])
                .unwrap()
            })
            .collect();
        let report = ConsistencyAuditor::default().audit(&SkillRegistry::import(records).unwrap());
        prop_assert_eq!(report.skills_audited, count);
        prop_assert!(report.is_clean());
        prop_assert!(report.tier_notes.is_empty());
        prop_assert!(report.parse_gaps.is_empty());
    }
}
