use bigdecimal::{BigDecimal, Zero};
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

use super::BillingUnit;
use crate::config::GroupingConfig;

/// 清单分组 - 一张开票清单, 成员按加入顺序保存
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceGroup {
    pub members: Vec<BillingUnit>,
    /// 成员金额合计
    pub total_cost: BigDecimal,
    /// 成员单号并集 (保序去重)
    pub refs: IndexSet<String>,
    /// 当前预算模式下单号并集的开销
    pub ref_score: i64,
    /// 单个超限单元强制成组: 金额或单号预算超上限, 且无法再拆分
    pub over_limit: bool,
}

impl InvoiceGroup {
    /// 以种子单元开组
    pub(crate) fn from_seed(seed: BillingUnit, config: &GroupingConfig) -> Self {
        let refs: IndexSet<String> = seed.refs.iter().cloned().collect();
        let ref_score: i64 = refs.iter().map(|r| config.ref_mode.cost_of(r)).sum();
        let total_cost = seed.cost.clone();
        let over_limit = total_cost > config.cost_cap || ref_score > config.ref_cap;
        Self {
            members: vec![seed],
            total_cost,
            refs,
            ref_score,
            over_limit,
        }
    }

    /// 尝试并入候选单元
    /// 并入后金额与单号预算都不超限才接收; 拒收时原样退回, 候选留在工作列表等待下一组
    pub(crate) fn try_admit(
        &mut self,
        unit: BillingUnit,
        config: &GroupingConfig,
    ) -> Option<BillingUnit> {
        // 只有新增单号产生预算增量, 已有单号去重后不再计费
        let delta: i64 = unit
            .refs
            .iter()
            .filter(|r| !self.refs.contains(r.as_str()))
            .map(|r| config.ref_mode.cost_of(r))
            .sum();
        let new_cost = &self.total_cost + &unit.cost;

        if new_cost > config.cost_cap || self.ref_score + delta > config.ref_cap {
            return Some(unit);
        }

        self.total_cost = new_cost;
        self.ref_score += delta;
        for r in &unit.refs {
            self.refs.insert(r.clone());
        }
        self.members.push(unit);
        None
    }
}

/// 分组结果 - 清单按封组顺序排列 (即种子金额从大到小的顺序)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupingResult {
    pub groups: Vec<InvoiceGroup>,
}

impl GroupingResult {
    /// 汇总统计
    pub fn stats(&self) -> GroupingStats {
        let mut total_amount = BigDecimal::zero();
        let mut over_limit_count = 0;
        let mut unit_count = 0;
        for g in &self.groups {
            total_amount += &g.total_cost;
            if g.over_limit {
                over_limit_count += 1;
            }
            unit_count += g.members.len();
        }
        GroupingStats {
            unit_count,
            group_count: self.groups.len(),
            over_limit_count,
            total_amount,
        }
    }
}

/// 分组统计信息
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupingStats {
    pub unit_count: usize,
    pub group_count: usize,
    pub over_limit_count: usize,
    pub total_amount: BigDecimal,
}
