use bigdecimal::{BigDecimal, Zero};
use indexmap::{IndexMap, IndexSet};

use crate::models::{BillingUnit, LineItem};

/// 按分组键聚合明细行
/// 同一个键的所有明细必须落在同一张清单; 先聚合成单元再分组即可保证, 引擎本身不感知键。
/// 键按首次出现顺序输出, 金额累加, 单号并集保序去重。
pub fn aggregate_line_items(lines: Vec<LineItem>) -> Vec<BillingUnit> {
    let mut by_key: IndexMap<String, BillingUnit> = IndexMap::new();

    for line in lines {
        let LineItem { key, amount, refs } = line;
        let unit = by_key.entry(key.clone()).or_insert_with(|| BillingUnit {
            key,
            cost: BigDecimal::zero(),
            refs: IndexSet::new(),
        });
        unit.cost += &amount;
        for r in refs {
            unit.refs.insert(r);
        }
    }

    tracing::info!("按分组键聚合完成, 共 {} 个开票单元", by_key.len());

    by_key.into_values().collect()
}
