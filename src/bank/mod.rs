pub mod data;
pub mod item;
pub mod trait_tag;

pub use item::Item;
pub use trait_tag::Trait;

use crate::error::{DoseError, DoseResult};
use std::collections::BTreeMap;
use std::sync::OnceLock;

/// the process-wide read-only item table, materialized once.
///
/// keyed by item number, plus a precomputed per-trait index so the selector
/// never has to scan the whole bank.
#[derive(Debug, Clone)]
pub struct Bank {
    by_number: BTreeMap<u8, Item>,
    by_trait: BTreeMap<Trait, Vec<u8>>,
}

impl Bank {
    pub fn new(items: Vec<Item>) -> DoseResult<Self> {
        for item in &items {
            item.validate()?;
        }
        let mut by_trait: BTreeMap<Trait, Vec<u8>> = BTreeMap::new();
        let mut by_number = BTreeMap::new();
        for item in items {
            by_trait.entry(item.trait_tag).or_default().push(item.number);
            by_number.insert(item.number, item);
        }
        for numbers in by_trait.values_mut() {
            numbers.sort_unstable();
        }
        let bank = Self { by_number, by_trait };
        bank.validate_partition()?;
        Ok(bank)
    }

    /// every trait must own the same number of items, and every item must
    /// belong to exactly one trait (guaranteed by construction; this checks
    /// the resulting shape actually partitions evenly across traits).
    fn validate_partition(&self) -> DoseResult<()> {
        let sizes: Vec<usize> = self.by_trait.values().map(Vec::len).collect();
        if self.by_trait.len() != 6 {
            return Err(DoseError::InvalidItem {
                item: 0,
                reason: format!("bank covers {} traits, expected 6", self.by_trait.len()),
            });
        }
        if let Some(&first) = sizes.first() {
            if sizes.iter().any(|&s| s != first) {
                return Err(DoseError::InvalidItem {
                    item: 0,
                    reason: "bank does not partition items evenly across traits".to_string(),
                });
            }
        }
        Ok(())
    }

    pub fn item(&self, number: u8) -> Option<&Item> {
        self.by_number.get(&number)
    }

    pub fn items_for(&self, trait_tag: Trait) -> &[u8] {
        self.by_trait
            .get(&trait_tag)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn items_per_trait(&self) -> usize {
        self.by_trait.values().map(Vec::len).max().unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.by_number.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_number.is_empty()
    }
}

static DEFAULT_BANK: OnceLock<Bank> = OnceLock::new();

/// the compiled-in 24-item reference bank, built once per process.
pub fn default_bank() -> &'static Bank {
    DEFAULT_BANK.get_or_init(|| {
        Bank::new(data::ITEMS.to_vec()).expect("compiled-in reference bank must be well-formed")
    })
}

/// parses the `number, trait, reverse, alpha, beta1..beta6` table format.
/// Rejects malformed rows per the same rules as `Item::validate`, plus an
/// unrecognized trait tag.
pub fn load_table(csv: &str) -> DoseResult<Bank> {
    let mut items = Vec::new();
    for (line_no, line) in csv.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if line_no == 0 && line.to_lowercase().starts_with("number") {
            continue; // header row
        }
        let fields: Vec<&str> = line.split(',').map(str::trim).collect();
        if fields.len() != 10 {
            return Err(DoseError::InvalidItem {
                item: 0,
                reason: format!("row {} has {} fields, expected 10", line_no + 1, fields.len()),
            });
        }
        let parse_u8 = |s: &str, reason: &str| -> DoseResult<u8> {
            s.parse::<u8>().map_err(|_| DoseError::InvalidItem {
                item: 0,
                reason: format!("{reason}: '{s}'"),
            })
        };
        let number = parse_u8(fields[0], "bad item number")?;
        let trait_tag: Trait = fields[1].parse().map_err(|reason| DoseError::InvalidItem {
            item: number,
            reason,
        })?;
        let reverse = matches!(fields[2], "1" | "true" | "TRUE" | "yes");
        let alpha: f64 = fields[3].parse().map_err(|_| DoseError::InvalidItem {
            item: number,
            reason: format!("bad alpha '{}'", fields[3]),
        })?;
        let mut beta = [0.0f64; 6];
        for (k, slot) in beta.iter_mut().enumerate() {
            *slot = fields[4 + k].parse().map_err(|_| DoseError::InvalidItem {
                item: number,
                reason: format!("bad beta[{k}] '{}'", fields[4 + k]),
            })?;
        }
        items.push(Item {
            number,
            trait_tag,
            reverse,
            alpha,
            beta,
        });
    }
    Bank::new(items)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_bank_has_24_items_six_traits() {
        let bank = default_bank();
        assert_eq!(bank.len(), 24);
        for trait_tag in Trait::ALL {
            assert_eq!(bank.items_for(trait_tag).len(), 4);
        }
    }

    #[test]
    fn load_table_roundtrips_default_bank() {
        let bank = default_bank();
        let mut csv = String::from("number,trait,reverse,alpha,beta1,beta2,beta3,beta4,beta5,beta6\n");
        for number in 1..=24u8 {
            let item = bank.item(number).unwrap();
            csv.push_str(&format!(
                "{},{},{},{},{},{},{},{},{},{}\n",
                item.number,
                item.trait_tag,
                item.reverse as u8,
                item.alpha,
                item.beta[0],
                item.beta[1],
                item.beta[2],
                item.beta[3],
                item.beta[4],
                item.beta[5],
            ));
        }
        let parsed = load_table(&csv).unwrap();
        assert_eq!(parsed.len(), 24);
        for number in 1..=24u8 {
            assert_eq!(parsed.item(number).unwrap().alpha, bank.item(number).unwrap().alpha);
        }
    }

    #[test]
    fn rejects_unpartitioned_bank() {
        let mut items = data::ITEMS.to_vec();
        items.pop();
        assert!(Bank::new(items).is_err());
    }

    #[test]
    fn rejects_unknown_trait_tag_in_table() {
        let csv = "99,Z,0,1.0,-2,-1,0,1,2,3\n";
        assert!(load_table(csv).is_err());
    }
}
