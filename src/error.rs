use bigdecimal::BigDecimal;
use thiserror::Error;

/// 分组引擎错误
#[derive(Debug, Error)]
pub enum GroupError {
    /// 金额上限或单号预算上限非正数
    #[error("invalid cap: cost_cap={cost_cap}, ref_cap={ref_cap} (both must be > 0)")]
    InvalidCap { cost_cap: BigDecimal, ref_cap: i64 },

    /// 输入单元金额为负, 上游数据需要先清洗
    #[error("unit {key} has negative cost {cost}")]
    NegativeCost { key: String, cost: BigDecimal },

    /// 严格模式下出现重复分组键
    #[error("duplicate grouping key {0}")]
    DuplicateKey(String),
}
