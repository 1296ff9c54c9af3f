//! the compiled-in 24-item reference bank.
//!
//! six HEXACO traits, four items each, loosely in the style of the
//! Mini-IPIP6 instrument. Item 1 is regular-keyed Extraversion; items 7 and
//! 19 are its reverse-keyed siblings.

use super::item::Item;
use super::trait_tag::Trait;

macro_rules! item {
    ($n:expr, $t:expr, $rev:expr, $a:expr, $b:expr) => {
        Item {
            number: $n,
            trait_tag: $t,
            reverse: $rev,
            alpha: $a,
            beta: $b,
        }
    };
}

pub const ITEMS: [Item; 24] = [
    item!(1, Trait::Extraversion, false, 1.4, [-2.6, -1.7, -0.8, 0.1, 1.0, 1.9]),
    item!(7, Trait::Extraversion, true, 1.1, [-2.4, -1.5, -0.6, 0.3, 1.2, 2.1]),
    item!(19, Trait::Extraversion, true, 1.3, [-2.5, -1.6, -0.7, 0.2, 1.1, 2.0]),
    item!(23, Trait::Extraversion, false, 1.2, [-2.3, -1.4, -0.5, 0.4, 1.3, 2.2]),
    item!(2, Trait::Agreeableness, false, 1.0, [-2.7, -1.8, -0.9, 0.0, 0.9, 1.8]),
    item!(8, Trait::Agreeableness, true, 1.3, [-2.5, -1.6, -0.7, 0.2, 1.1, 2.0]),
    item!(14, Trait::Agreeableness, false, 0.9, [-2.8, -1.9, -1.0, -0.1, 0.8, 1.7]),
    item!(20, Trait::Agreeableness, true, 1.5, [-2.2, -1.3, -0.4, 0.5, 1.4, 2.3]),
    item!(3, Trait::Conscientiousness, false, 1.2, [-2.6, -1.7, -0.8, 0.1, 1.0, 1.9]),
    item!(9, Trait::Conscientiousness, true, 1.1, [-2.4, -1.5, -0.6, 0.3, 1.2, 2.1]),
    item!(15, Trait::Conscientiousness, false, 1.6, [-2.1, -1.2, -0.3, 0.6, 1.5, 2.4]),
    item!(21, Trait::Conscientiousness, true, 1.0, [-2.7, -1.8, -0.9, 0.0, 0.9, 1.8]),
    item!(4, Trait::Neuroticism, false, 1.3, [-2.5, -1.6, -0.7, 0.2, 1.1, 2.0]),
    item!(10, Trait::Neuroticism, false, 1.1, [-2.4, -1.5, -0.6, 0.3, 1.2, 2.1]),
    item!(16, Trait::Neuroticism, false, 1.4, [-2.6, -1.7, -0.8, 0.1, 1.0, 1.9]),
    item!(22, Trait::Neuroticism, true, 1.2, [-2.3, -1.4, -0.5, 0.4, 1.3, 2.2]),
    item!(5, Trait::Openness, false, 0.95, [-2.8, -1.9, -1.0, -0.1, 0.8, 1.7]),
    item!(11, Trait::Openness, true, 1.25, [-2.5, -1.6, -0.7, 0.2, 1.1, 2.0]),
    item!(17, Trait::Openness, false, 1.45, [-2.2, -1.3, -0.4, 0.5, 1.4, 2.3]),
    item!(24, Trait::Openness, true, 1.05, [-2.6, -1.7, -0.8, 0.1, 1.0, 1.9]),
    item!(6, Trait::HonestyHumility, false, 1.35, [-2.4, -1.5, -0.6, 0.3, 1.2, 2.1]),
    item!(12, Trait::HonestyHumility, false, 1.15, [-2.6, -1.7, -0.8, 0.1, 1.0, 1.9]),
    item!(13, Trait::HonestyHumility, true, 1.55, [-2.1, -1.2, -0.3, 0.6, 1.5, 2.4]),
    item!(18, Trait::HonestyHumility, true, 1.0, [-2.7, -1.8, -0.9, 0.0, 0.9, 1.8]),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partitions_into_six_four_item_traits() {
        for trait_tag in Trait::ALL {
            let count = ITEMS.iter().filter(|i| i.trait_tag == trait_tag).count();
            assert_eq!(count, 4, "trait {trait_tag:?} should have exactly 4 items");
        }
    }

    #[test]
    fn numbers_are_unique_and_span_1_to_24() {
        let mut numbers: Vec<u8> = ITEMS.iter().map(|i| i.number).collect();
        numbers.sort_unstable();
        assert_eq!(numbers, (1..=24).collect::<Vec<u8>>());
    }

    #[test]
    fn all_rows_validate() {
        for item in ITEMS.iter() {
            item.validate().expect("reference bank row must be well-formed");
        }
    }

    #[test]
    fn thresholds_are_monotone_nondecreasing() {
        for item in ITEMS.iter() {
            for w in item.beta.windows(2) {
                assert!(w[0] <= w[1], "item {} has non-monotone betas", item.number);
            }
        }
    }

    #[test]
    fn extraversion_scenario_layout_matches_spec() {
        let e1 = ITEMS.iter().find(|i| i.number == 1).unwrap();
        let e7 = ITEMS.iter().find(|i| i.number == 7).unwrap();
        let e19 = ITEMS.iter().find(|i| i.number == 19).unwrap();
        let e23 = ITEMS.iter().find(|i| i.number == 23).unwrap();
        assert_eq!(e1.trait_tag, Trait::Extraversion);
        assert_eq!(e7.trait_tag, Trait::Extraversion);
        assert_eq!(e19.trait_tag, Trait::Extraversion);
        assert_eq!(e23.trait_tag, Trait::Extraversion);
        assert!(!e1.reverse && e7.reverse && e19.reverse && !e23.reverse);
    }
}
