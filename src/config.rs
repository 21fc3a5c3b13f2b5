use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// 单号预算模式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RefMode {
    /// 条数模式: 去重后的单号条数
    Count,
    /// 字符长度模式: 去重后每个单号按 字符数+1 计 (备注栏每个单号占一行)
    Length,
}

impl RefMode {
    /// 单个单号的预算开销
    pub fn cost_of(&self, r: &str) -> i64 {
        match self {
            RefMode::Count => 1,
            RefMode::Length => r.chars().count() as i64 + 1,
        }
    }
}

/// 重复分组键处理策略
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DuplicatePolicy {
    /// 严格模式: 出现重复键直接报错
    Reject,
    /// 宽松模式: 自动合并 (金额累加, 单号并集, 保留首次出现位置)
    Merge,
}

/// 分组参数
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupingConfig {
    /// 单张清单总金额上限
    pub cost_cap: BigDecimal,
    /// 单张清单单号预算上限
    pub ref_cap: i64,
    pub ref_mode: RefMode,
    pub duplicate_policy: DuplicatePolicy,
}

impl Default for GroupingConfig {
    fn default() -> Self {
        Self {
            // 当前业务参数: 总金额<=90000元, 备注字符长度<=176
            cost_cap: BigDecimal::from(90_000),
            ref_cap: 176,
            ref_mode: RefMode::Length,
            duplicate_policy: DuplicatePolicy::Reject,
        }
    }
}

/// 应用配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub grouping: GroupingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            grouping: GroupingConfig::default(),
        }
    }
}

impl AppConfig {
    /// 从环境变量加载配置
    pub fn from_env() -> Self {
        let defaults = GroupingConfig::default();
        Self {
            grouping: GroupingConfig {
                cost_cap: std::env::var("GROUP_COST_CAP")
                    .ok()
                    .and_then(|v| BigDecimal::from_str(&v).ok())
                    .unwrap_or(defaults.cost_cap),
                ref_cap: std::env::var("GROUP_REF_CAP")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(defaults.ref_cap),
                ref_mode: match std::env::var("GROUP_REF_MODE").as_deref() {
                    Ok("count") => RefMode::Count,
                    Ok("length") => RefMode::Length,
                    _ => defaults.ref_mode,
                },
                duplicate_policy: match std::env::var("GROUP_DUP_POLICY").as_deref() {
                    Ok("merge") => DuplicatePolicy::Merge,
                    Ok("reject") => DuplicatePolicy::Reject,
                    _ => defaults.duplicate_policy,
                },
            },
        }
    }
}
