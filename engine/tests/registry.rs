use std::collections::BTreeSet;

use castle_defence_core::Tag;
use castle_defence_engine::Registry;
use proptest::prelude::*;

proptest! {
    #[test]
    fn lookups_return_the_matching_value(
        tags in prop::collection::btree_set("[A-Z_]{1,12}", 0..32),
    ) {
        let mut registry = Registry::new();
        for (index, tag) in tags.iter().enumerate() {
            prop_assert!(registry.insert(Tag::new(tag.as_str()), index).is_ok());
        }

        prop_assert_eq!(registry.len(), tags.len());
        for (index, tag) in tags.iter().enumerate() {
            prop_assert_eq!(registry.get(tag), Some(&index));
        }
        let order: Vec<&str> = registry.tags().map(Tag::as_str).collect();
        let expected: Vec<&str> = tags.iter().map(String::as_str).collect();
        prop_assert_eq!(order, expected);
    }

    #[test]
    fn duplicates_never_replace_the_first_value(tags in prop::collection::vec("[a-c]", 1..24)) {
        let mut registry = Registry::new();
        let mut first: Vec<(String, usize)> = Vec::new();
        for (index, tag) in tags.iter().enumerate() {
            let accepted = registry.insert(Tag::new(tag.as_str()), index).is_ok();
            let seen = first.iter().any(|(existing, _)| existing == tag);
            prop_assert_eq!(accepted, !seen);
            if accepted {
                first.push((tag.clone(), index));
            }
        }

        let unique: BTreeSet<&String> = tags.iter().collect();
        prop_assert_eq!(registry.len(), unique.len());
        for (tag, index) in &first {
            prop_assert_eq!(registry.get(tag), Some(index));
        }
    }

    #[test]
    fn removing_twice_matches_removing_once(
        tags in prop::collection::btree_set("[a-z]{1,4}", 1..16),
        pick in any::<prop::sample::Index>(),
    ) {
        let tags: Vec<String> = tags.into_iter().collect();
        let victim = pick.get(&tags).clone();
        let mut registry = Registry::new();
        for tag in &tags {
            prop_assert!(registry.insert(Tag::new(tag.as_str()), ()).is_ok());
        }

        prop_assert_eq!(registry.remove(&victim), Some(()));
        let after_once: Vec<Tag> = registry.tags().cloned().collect();
        prop_assert_eq!(registry.remove(&victim), None);
        let after_twice: Vec<Tag> = registry.tags().cloned().collect();
        prop_assert_eq!(after_once, after_twice);
        prop_assert!(!registry.contains(&victim));
    }
}
