use std::collections::HashMap;

use super::table::{parse_number, Record, Table};
use crate::error::{PlotError, Result};

// ---------------------------------------------------------------------------
// Group – rows sharing one categorical value
// ---------------------------------------------------------------------------

/// Rows sharing one value of the grouping column.
#[derive(Debug, Clone, PartialEq)]
pub struct Group<T> {
    /// The categorical value, verbatim.
    pub key: String,
    /// Member rows, in source order until sorted.
    pub items: Vec<T>,
}

impl<T> Group<T> {
    /// Reorder items by precomputed keys; ties keep their relative order.
    fn reorder(&mut self, keys: Vec<f64>) {
        let mut keyed: Vec<(f64, T)> = keys.into_iter().zip(self.items.drain(..)).collect();
        // `sort_by` is a stable merge sort.
        keyed.sort_by(|a, b| a.0.total_cmp(&b.0));
        self.items = keyed.into_iter().map(|(_, item)| item).collect();
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Partition `items` by `key`, keeping groups in order of first appearance.
pub fn group_by<T, I, F>(items: I, mut key: F) -> Vec<Group<T>>
where
    I: IntoIterator<Item = T>,
    F: FnMut(&T) -> String,
{
    let mut groups: Vec<Group<T>> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for item in items {
        let k = key(&item);
        match index.get(&k) {
            Some(&pos) => groups[pos].items.push(item),
            None => {
                index.insert(k.clone(), groups.len());
                groups.push(Group {
                    key: k,
                    items: vec![item],
                });
            }
        }
    }
    groups
}

// ---------------------------------------------------------------------------
// Table rows
// ---------------------------------------------------------------------------

/// A borrowed table row together with its index in the source table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RowRef<'a> {
    pub index: usize,
    pub record: &'a Record,
}

/// Group a table's rows by the raw text of `column`.
///
/// A row lacking the column is a [`PlotError::Schema`] error.
pub fn group_records<'a>(table: &'a Table, column: &str) -> Result<Vec<Group<RowRef<'a>>>> {
    let rows = table
        .records
        .iter()
        .enumerate()
        .map(|(index, record)| {
            record
                .get(column)
                .map(|_| RowRef { index, record })
                .ok_or_else(|| PlotError::Schema {
                    column: column.to_string(),
                    row: index,
                })
        })
        .collect::<Result<Vec<_>>>()?;

    let groups = group_by(rows, |row| {
        row.record.get(column).unwrap_or_default().to_string()
    });
    log::debug!("{} rows grouped by '{column}' into {} groups", table.len(), groups.len());
    Ok(groups)
}

impl Group<RowRef<'_>> {
    /// Stable ascending sort by a numeric column; rows with equal keys keep
    /// their relative order.
    ///
    /// Every key is parsed before anything moves, so a bad cell leaves the
    /// group untouched.
    pub fn sort_by_column(&mut self, column: &str) -> Result<()> {
        let keys = self
            .items
            .iter()
            .map(|row| {
                let raw = row.record.get(column).ok_or_else(|| PlotError::Schema {
                    column: column.to_string(),
                    row: row.index,
                })?;
                parse_number(column, row.index, raw)
            })
            .collect::<Result<Vec<f64>>>()?;
        self.reorder(keys);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use proptest::prelude::*;

    use super::*;
    use crate::data::table::read_table_from;

    fn table(text: &str) -> Table {
        read_table_from(text.as_bytes(), Path::new("summary.csv")).unwrap()
    }

    #[test]
    fn groups_follow_first_appearance() {
        let t = table("hasher,b\nzeta,4\nalpha,4\nzeta,8\nalpha,8\nmid,4\n");
        let groups = group_records(&t, "hasher").unwrap();
        let keys: Vec<&str> = groups.iter().map(|g| g.key.as_str()).collect();
        assert_eq!(keys, vec!["zeta", "alpha", "mid"]);
        let rows: Vec<usize> = groups[0].items.iter().map(|r| r.index).collect();
        assert_eq!(rows, vec![0, 2]);
    }

    #[test]
    fn empty_value_is_its_own_group() {
        let t = table("hasher,b\n,4\nh,4\n,8\n");
        let groups = group_records(&t, "hasher").unwrap();
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].key, "");
        assert_eq!(groups[0].len(), 2);
    }

    #[test]
    fn missing_group_column_is_schema_error() {
        let t = table("b\n4\n");
        assert!(matches!(
            group_records(&t, "hasher"),
            Err(PlotError::Schema { row: 0, .. })
        ));
    }

    #[test]
    fn sort_by_column_is_numeric_not_lexicographic() {
        let t = table("hasher,b\nh,16\nh,4\nh,8\n");
        let mut groups = group_records(&t, "hasher").unwrap();
        groups[0].sort_by_column("b").unwrap();
        let b: Vec<&str> = groups[0]
            .items
            .iter()
            .map(|r| r.record.get("b").unwrap())
            .collect();
        assert_eq!(b, vec!["4", "8", "16"]);
    }

    #[test]
    fn bad_sort_key_leaves_group_untouched() {
        let t = table("hasher,b\nh,16\nh,oops\nh,8\n");
        let mut groups = group_records(&t, "hasher").unwrap();
        let before = groups[0].clone();
        match groups[0].sort_by_column("b").unwrap_err() {
            PlotError::Conversion { row, value, .. } => {
                assert_eq!(row, 1);
                assert_eq!(value, "oops");
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(groups[0], before);
    }

    proptest! {
        #[test]
        fn groups_partition_the_input(items in prop::collection::vec((0u8..5, any::<u16>()), 0..64)) {
            let groups = group_by(items.clone().into_iter().enumerate(), |(_, (k, _))| k.to_string());

            let mut seen: Vec<usize> = groups
                .iter()
                .flat_map(|g| g.items.iter().map(|(i, _)| *i))
                .collect();
            seen.sort_unstable();
            prop_assert_eq!(seen, (0..items.len()).collect::<Vec<_>>());

            for g in &groups {
                prop_assert!(g.items.iter().all(|(_, (k, _))| k.to_string() == g.key));
                prop_assert!(g.items.windows(2).all(|w| w[0].0 < w[1].0));
            }
        }

        #[test]
        fn sort_by_column_is_stable(keys in prop::collection::vec(0u8..4, 0..64)) {
            // Equal keys are written in different forms so ties are not
            // textually identical.
            let mut text = String::from("hasher,b\n");
            for (i, k) in keys.iter().enumerate() {
                let cell = match i % 3 {
                    0 => k.to_string(),
                    1 => format!("{k}.0"),
                    _ => format!(" {k} "),
                };
                text.push_str(&format!("g,{cell}\n"));
            }
            let t = table(&text);
            let mut groups = group_records(&t, "hasher").unwrap();
            let Some(group) = groups.first_mut() else {
                prop_assert!(keys.is_empty());
                return Ok(());
            };
            group.sort_by_column("b").unwrap();

            let sorted: Vec<(usize, u8)> = group.items.iter().map(|r| (r.index, keys[r.index])).collect();
            prop_assert_eq!(sorted.len(), keys.len());
            for w in sorted.windows(2) {
                prop_assert!(w[0].1 <= w[1].1);
                if w[0].1 == w[1].1 {
                    prop_assert!(w[0].0 < w[1].0);
                }
            }
        }
    }
}
