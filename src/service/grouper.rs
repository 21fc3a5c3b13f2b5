use bigdecimal::{BigDecimal, Zero};
use indexmap::{IndexMap, IndexSet};
use rayon::prelude::*;
use std::collections::HashSet;

use crate::config::{DuplicatePolicy, GroupingConfig};
use crate::error::GroupError;
use crate::models::{BillingUnit, GroupingResult, InvoiceGroup};

/// 分组服务 - 贪心"剥取填充"
/// 金额从大到小取种子开组, 顺序扫描剩余单元, 装得下就并入, 装不下留给后续清单。
/// 不追求全局最优 (精确划分是指数级枚举), 追求可复现、可解释的近似最优。
pub struct GrouperService {
    config: GroupingConfig,
}

impl GrouperService {
    pub fn new(config: GroupingConfig) -> Self {
        Self { config }
    }

    /// 单批分组入口
    pub fn group(&self, units: Vec<BillingUnit>) -> Result<GroupingResult, GroupError> {
        // 1. 校验参数与输入, 不通过则不做任何分组
        self.validate(&units)?;

        // 2. 重复键处理 (严格模式报错 / 宽松模式合并)
        let units = self.resolve_duplicates(units)?;
        let total_units = units.len();

        // 3. 按金额从大到小排序; 稳定排序, 金额相同保持输入顺序, 保证结果可复现
        let mut working = units;
        working.sort_by(|a, b| b.cost.cmp(&a.cost));

        // 4. 剥取填充
        let mut groups: Vec<InvoiceGroup> = Vec::new();
        while !working.is_empty() {
            // 4.1 取金额最大的为种子
            let seed = working.remove(0);
            let mut group = InvoiceGroup::from_seed(seed, &self.config);
            if group.over_limit {
                tracing::warn!(
                    "分组键 {} 金额 {} 单号开销 {} 超过单张清单限制(金额上限 {}, 单号上限 {}), 但仍将单独开票",
                    group.members[0].key,
                    group.total_cost,
                    group.ref_score,
                    self.config.cost_cap,
                    self.config.ref_cap
                );
            }

            // 4.2 按当前顺序扫描剩余单元, 并入后不超限的收进当前组;
            //     被拒收的留在工作列表, 下一组继续参与
            let mut rest = Vec::with_capacity(working.len());
            for unit in working.drain(..) {
                if let Some(rejected) = group.try_admit(unit, &self.config) {
                    rest.push(rejected);
                }
            }
            working = rest;

            tracing::info!(
                "完成清单 {}: 包含 {} 个单元, 总金额 {}",
                groups.len() + 1,
                group.members.len(),
                group.total_cost
            );
            groups.push(group);
        }

        let result = GroupingResult { groups };
        let stats = result.stats();
        tracing::info!(
            "分组完成: {} 个单元 -> {} 张清单, 超限 {} 张",
            total_units,
            stats.group_count,
            stats.over_limit_count
        );

        Ok(result)
    }

    /// 多批独立分组 - 各批互不相关, 数据并行, 输出顺序与输入批次一致
    pub fn group_batches(
        &self,
        batches: Vec<Vec<BillingUnit>>,
    ) -> Vec<Result<GroupingResult, GroupError>> {
        batches
            .into_par_iter()
            .map(|units| self.group(units))
            .collect()
    }

    fn validate(&self, units: &[BillingUnit]) -> Result<(), GroupError> {
        if self.config.cost_cap <= BigDecimal::zero() || self.config.ref_cap <= 0 {
            return Err(GroupError::InvalidCap {
                cost_cap: self.config.cost_cap.clone(),
                ref_cap: self.config.ref_cap,
            });
        }
        for unit in units {
            if unit.cost < BigDecimal::zero() {
                return Err(GroupError::NegativeCost {
                    key: unit.key.clone(),
                    cost: unit.cost.clone(),
                });
            }
        }
        Ok(())
    }

    /// 重复键处理
    fn resolve_duplicates(
        &self,
        units: Vec<BillingUnit>,
    ) -> Result<Vec<BillingUnit>, GroupError> {
        match self.config.duplicate_policy {
            DuplicatePolicy::Reject => {
                let mut seen: HashSet<&str> = HashSet::with_capacity(units.len());
                for unit in &units {
                    if !seen.insert(unit.key.as_str()) {
                        return Err(GroupError::DuplicateKey(unit.key.clone()));
                    }
                }
                Ok(units)
            }
            DuplicatePolicy::Merge => {
                // 宽松模式: 金额累加, 单号并集, 保留首次出现位置
                let mut by_key: IndexMap<String, BillingUnit> = IndexMap::new();
                for unit in units {
                    let BillingUnit { key, cost, refs } = unit;
                    let merged = by_key.entry(key.clone()).or_insert_with(|| BillingUnit {
                        key,
                        cost: BigDecimal::zero(),
                        refs: IndexSet::new(),
                    });
                    merged.cost += &cost;
                    for r in refs {
                        merged.refs.insert(r);
                    }
                }
                Ok(by_key.into_values().collect())
            }
        }
    }
}
