use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{info, warn};

use crate::quadtree::{Quadtree, Record};

/// 固定位置的演示记录
const FIXED_RECORDS: [(&str, f64, f64); 3] = [("A", 69.0, 420.0), ("B", 333.0, 69.0), ("C", 1.0, 2.0)];

/// 按电子表格列名规则生成记录名：A..Z, AA, AB, ...
pub fn record_name(mut index: usize) -> String {
    let mut name = Vec::new();
    loop {
        name.push(b'A' + (index % 26) as u8);
        if index < 26 {
            break;
        }
        index = index / 26 - 1;
    }
    name.reverse();
    String::from_utf8_lossy(&name).into_owned()
}

/// 生成演示数据
///
/// 前三条记录位于固定坐标，其余随机分布在整个索引区域内
pub fn demo_records(count: usize, width: f64, height: f64, seed: u64) -> Vec<Record> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count)
        .map(|i| match FIXED_RECORDS.get(i) {
            Some(&(name, x, y)) => Record::new(name, x, y),
            None => Record::new(record_name(i), rng.gen_range(0.0..width), rng.gen_range(0.0..height)),
        })
        .collect()
}

/// 向树中插入演示数据，返回成功插入的条数
///
/// 插入失败的记录（例如固定坐标超出了较小的索引区域）只记录警告
pub fn run_demo(tree: &mut Quadtree, count: usize, seed: u64) -> usize {
    let records = demo_records(count, tree.width(), tree.height(), seed);
    let mut inserted = 0;
    for record in records {
        let label = record.to_string();
        match tree.insert(record) {
            Ok(()) => inserted += 1,
            Err(e) => warn!("Skipping {}: {}", label, e),
        }
    }
    info!(inserted, depth = tree.depth(), leaves = tree.leaf_count(), "demo data loaded");
    inserted
}
