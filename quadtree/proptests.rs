use super::*;

use proptest::prelude::*;

const EXTENT: f64 = 16.0;

#[derive(Debug, Clone)]
enum Op {
    Insert(Record),
    Delete(Record),
}

/// 小网格上的记录：坐标和名称都容易重复，便于覆盖重复点和误删场景
fn grid_record() -> impl Strategy<Value = Record> {
    (0u8..4, 0u32..16, 0u32..16)
        .prop_map(|(name, x, y)| Record::new(format!("r{}", name), x as f64, y as f64))
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => grid_record().prop_map(Op::Insert),
        2 => grid_record().prop_map(Op::Delete),
    ]
}

fn distinct_records(max: usize) -> impl Strategy<Value = Vec<Record>> {
    prop::collection::hash_set((0u32..1000, 0u32..1000), 1..max).prop_map(|points| {
        points
            .into_iter()
            .enumerate()
            .map(|(i, (x, y))| Record::new(format!("p{}", i), x as f64 + 0.5, y as f64 / 3.0))
            .collect()
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn random_ops_match_model(bucket_size in 1usize..5, ops in prop::collection::vec(op(), 1..200)) {
        let mut tree = Quadtree::new(bucket_size, EXTENT, EXTENT);
        let mut model: Vec<Record> = Vec::new();

        for op in ops {
            match op {
                Op::Insert(record) => {
                    let at_point = model.iter().filter(|r| r.is_at(record.x(), record.y())).count();
                    let result = tree.insert(record.clone());
                    if at_point >= bucket_size {
                        let is_saturated = matches!(result, Err(QuadtreeError::CoordinateSaturated { .. }));
                        prop_assert!(is_saturated);
                    } else {
                        prop_assert!(result.is_ok());
                        model.push(record);
                    }
                }
                Op::Delete(record) => {
                    let expected = match model.iter().position(|r| *r == record) {
                        Some(index) => {
                            model.remove(index);
                            true
                        }
                        None => false,
                    };
                    prop_assert_eq!(tree.delete(&record), expected);
                }
            }

            prop_assert_eq!(tree.len(), model.len());
            prop_assert_eq!(tree.is_empty(), model.is_empty());
            if let Err(message) = tree.check_invariants() {
                return Err(TestCaseError::fail(message));
            }
        }

        for record in &model {
            let name = tree.search(record.x(), record.y());
            prop_assert!(name.is_some());
            let name = name.unwrap_or_default();
            prop_assert!(model.iter().any(|r| r.is_at(record.x(), record.y()) && r.name() == name));
        }
    }

    #[test]
    fn insert_then_delete_all_empties_tree(
        bucket_size in 1usize..6,
        (records, order) in distinct_records(120).prop_flat_map(|records| {
            let order = Just((0..records.len()).collect::<Vec<_>>()).prop_shuffle();
            (Just(records), order)
        }),
    ) {
        let mut tree = Quadtree::new(bucket_size, 1000.0, 1000.0);
        for record in &records {
            prop_assert!(tree.insert(record.clone()).is_ok());
        }
        prop_assert_eq!(tree.len(), records.len());

        for record in &records {
            prop_assert_eq!(tree.search(record.x(), record.y()), Some(record.name()));
        }

        for index in order {
            prop_assert!(tree.delete(&records[index]));
            if let Err(message) = tree.check_invariants() {
                return Err(TestCaseError::fail(message));
            }
        }
        prop_assert!(tree.is_empty());
        prop_assert_eq!(tree.leaf_count(), 0);
    }

    #[test]
    fn deleting_missing_record_changes_nothing(
        records in distinct_records(60),
        missing in (0u32..1000, 0u32..1000),
    ) {
        let mut tree = Quadtree::new(2, 1000.0, 1000.0);
        for record in &records {
            prop_assert!(tree.insert(record.clone()).is_ok());
        }
        let before = tree.export_to_json().unwrap();

        // 名称 "missing" 从未插入过
        let record = Record::new("missing", missing.0 as f64 + 0.5, missing.1 as f64 / 3.0);
        prop_assert!(!tree.delete(&record));
        prop_assert_eq!(tree.export_to_json().unwrap(), before);
    }

    #[test]
    fn out_of_bounds_insert_is_rejected(x in -100.0f64..200.0, y in -100.0f64..200.0) {
        let mut tree = Quadtree::new(2, 100.0, 100.0);
        let inside = (0.0..100.0).contains(&x) && (0.0..100.0).contains(&y);
        let result = tree.insert_point("p", x, y);
        prop_assert_eq!(result.is_ok(), inside);
        prop_assert_eq!(tree.is_empty(), !inside);
    }
}

#[test]
fn consolidation_after_single_split() {
    for bucket_size in 1..6usize {
        let mut tree = Quadtree::new(bucket_size, 100.0, 100.0);
        // 每个点落在不同的象限或子象限，插入 bucket_size + 1 条强制分裂
        let records: Vec<Record> = (0..=bucket_size)
            .map(|i| Record::new(format!("p{}", i), i as f64 * 15.0 + 1.0, 99.0 - i as f64 * 15.0))
            .collect();
        for record in &records {
            tree.insert(record.clone()).unwrap();
        }
        assert!(!tree.root().unwrap().is_leaf());

        assert!(tree.delete(&records[0]));
        assert_eq!(tree.leaf_count(), 1);
        assert!(tree.root().unwrap().is_leaf());
        assert_eq!(tree.len(), bucket_size);
    }
}
