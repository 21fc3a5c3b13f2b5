use bigdecimal::BigDecimal;
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

/// 原始开票明细行 (上游已完成单号提取)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineItem {
    pub key: String,        // 分组键 (合同编号或送货单号)
    pub amount: BigDecimal, // 金额
    pub refs: Vec<String>,  // 单号列表 (合同编号/单据号/OA单号/SAP订单号), 允许重复
}

/// 开票单元 - 不可拆分的分配单位
/// 一个分组键聚合后的全部明细, 整体进入同一张清单
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BillingUnit {
    pub key: String,
    pub cost: BigDecimal,
    /// 单号集合 (保序去重)
    pub refs: IndexSet<String>,
}

impl BillingUnit {
    pub fn new(key: &str, cost: BigDecimal, refs: Vec<String>) -> Self {
        Self {
            key: key.to_string(),
            cost,
            refs: refs.into_iter().collect(),
        }
    }
}
