use std::collections::HashMap;

use rand::Rng;
use rand::seq::IndexedRandom;
use shopsynth_core::TableName;

use crate::errors::GenerationError;
use crate::records::Record;

/// Pick a parent row uniformly at random for a child of `table`.
///
/// An empty parent slice is a precondition failure naming both tables.
pub fn pick_parent<'a, T, R>(
    parents: &'a [T],
    table: TableName,
    rng: &mut R,
) -> Result<&'a T, GenerationError>
where
    T: Record,
    R: Rng + ?Sized,
{
    parents.choose(rng).ok_or(GenerationError::Precondition {
        table,
        missing: T::TABLE,
    })
}

/// Pick one value uniformly from a fixed list. An empty list yields "".
pub fn pick_value<R: Rng + ?Sized>(values: &[&str], rng: &mut R) -> String {
    values
        .choose(rng)
        .map(|value| value.to_string())
        .unwrap_or_default()
}

/// Index parent rows by primary key for lookups.
pub fn index_by_id<T: Record>(records: &[T]) -> HashMap<i64, &T> {
    records.iter().map(|record| (record.id(), record)).collect()
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::*;
    use crate::records::Customer;

    #[test]
    fn empty_parent_table_is_a_precondition_failure() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let parents: Vec<Customer> = Vec::new();
        let err = pick_parent(&parents, TableName::Orders, &mut rng).expect_err("empty parents");
        assert!(matches!(
            err,
            GenerationError::Precondition {
                table: TableName::Orders,
                missing: TableName::Customers,
            }
        ));
    }

    #[test]
    fn pick_value_stays_in_list() {
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let values = ["a", "b", "c"];
        for _ in 0..50 {
            let picked = pick_value(&values, &mut rng);
            assert!(values.contains(&picked.as_str()));
        }
        assert_eq!(pick_value(&[], &mut rng), "");
    }
}
