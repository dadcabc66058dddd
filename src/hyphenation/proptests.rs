use super::*;
use proptest::prelude::*;

/// Tree that scores an odd value on both sides of every lower-case letter
fn break_everywhere() -> PatternTree {
    let mut tree = PatternTree::new();
    for c in 'a'..='z' {
        tree.insert_pattern(&format!("1{}1", c)).unwrap();
    }
    tree
}

fn sample_tree() -> PatternTree {
    PatternTree::from_patterns("hy3ph he2n hen5at 1na n2at 1tio 2io o2n a1b .an1ti").unwrap()
}

// Property: syllables concatenate back to the word
proptest! {
    #[test]
    fn prop_round_trip(word in "\\PC*") {
        let pieces = hyphenate(&sample_tree(), &word);
        prop_assert_eq!(pieces.concat(), word.clone());

        let pieces = hyphenate(&break_everywhere(), &word);
        prop_assert_eq!(pieces.concat(), word);
    }
}

// Property: no break within the first two or last two characters
proptest! {
    #[test]
    fn prop_boundary_rule(word in "[a-zA-Z]{5,24}") {
        let pieces = hyphenate(&break_everywhere(), &word);
        let first = pieces.first().unwrap();
        let last = pieces.last().unwrap();
        prop_assert!(first.chars().count() >= 2);
        prop_assert!(last.chars().count() >= 2);
        // Every other gap is a legal break for this tree
        prop_assert_eq!(pieces.len(), word.chars().count() - 2);
    }
}

// Property: an empty tree never hyphenates
proptest! {
    #[test]
    fn prop_empty_tree_identity(word in "\\PC*") {
        let pieces = hyphenate(&PatternTree::new(), &word);
        prop_assert_eq!(pieces, vec![word.as_str()]);
    }
}

// Property: listeners observe without changing the result
proptest! {
    #[test]
    fn prop_listener_is_transparent(word in "[a-z]{0,16}") {
        let tree = sample_tree();
        let mut listener = RecordingListener::new();
        let traced = hyphenate_with(&tree, &word, &mut listener);
        prop_assert_eq!(traced, hyphenate(&tree, &word));
        prop_assert!(listener.events().len() >= 2);
    }
}
