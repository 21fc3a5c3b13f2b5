use bigdecimal::BigDecimal;
use invoice_grouping_rust::models::BillingUnit;
use invoice_grouping_rust::{AppConfig, DuplicatePolicy, GrouperService, GroupingConfig, RefMode};

#[test]
fn default_config_matches_current_business_rules() {
    let cfg = GroupingConfig::default();

    assert_eq!(cfg.cost_cap, BigDecimal::from(90_000));
    assert_eq!(cfg.ref_cap, 176);
    assert_eq!(cfg.ref_mode, RefMode::Length);
    assert_eq!(cfg.duplicate_policy, DuplicatePolicy::Reject);
}

#[test]
fn config_loads_from_env_with_fallbacks() {
    std::env::set_var("GROUP_COST_CAP", "100000");
    std::env::set_var("GROUP_REF_CAP", "16");
    std::env::set_var("GROUP_REF_MODE", "count");
    std::env::set_var("GROUP_DUP_POLICY", "merge");

    let cfg = AppConfig::from_env().grouping;
    assert_eq!(cfg.cost_cap, BigDecimal::from(100_000));
    assert_eq!(cfg.ref_cap, 16);
    assert_eq!(cfg.ref_mode, RefMode::Count);
    assert_eq!(cfg.duplicate_policy, DuplicatePolicy::Merge);

    // 非法值回退到默认
    std::env::set_var("GROUP_COST_CAP", "not-a-number");
    std::env::set_var("GROUP_REF_MODE", "bogus");
    let cfg = AppConfig::from_env().grouping;
    assert_eq!(cfg.cost_cap, BigDecimal::from(90_000));
    assert_eq!(cfg.ref_mode, RefMode::Length);

    std::env::remove_var("GROUP_COST_CAP");
    std::env::remove_var("GROUP_REF_CAP");
    std::env::remove_var("GROUP_REF_MODE");
    std::env::remove_var("GROUP_DUP_POLICY");
}

#[test]
fn ref_mode_budget_costs() {
    assert_eq!(RefMode::Count.cost_of("2240002224"), 1);
    // 字符数+1, 按字符计而不是字节
    assert_eq!(RefMode::Length.cost_of("2240002224"), 11);
    assert_eq!(RefMode::Length.cost_of(""), 1);
    assert_eq!(RefMode::Length.cost_of("合同123"), 6);
}

#[test]
fn grouping_result_serializes_expected_wire_fields() {
    let service = GrouperService::new(GroupingConfig {
        cost_cap: BigDecimal::from(10),
        ref_cap: 16,
        ref_mode: RefMode::Count,
        duplicate_policy: DuplicatePolicy::Reject,
    });
    let units = vec![BillingUnit::new(
        "CT01",
        BigDecimal::from(5),
        vec!["A".to_string(), "B".to_string()],
    )];
    let result = service.group(units).unwrap();

    let json = serde_json::to_value(&result).unwrap();
    let group = &json["groups"][0];
    assert_eq!(group["members"][0]["key"], "CT01");
    assert_eq!(group["ref_score"], 2);
    assert_eq!(group["over_limit"], false);
    assert_eq!(group["refs"][0], "A");
    assert_eq!(group["refs"][1], "B");
}

#[test]
fn logging_init_is_idempotent() {
    invoice_grouping_rust::logging::init();
    invoice_grouping_rust::logging::init();
}

#[test]
fn ref_mode_serializes_lowercase() {
    let json = serde_json::to_string(&RefMode::Length).unwrap();
    assert_eq!(json, "\"length\"");
    let back: RefMode = serde_json::from_str("\"count\"").unwrap();
    assert_eq!(back, RefMode::Count);
}
