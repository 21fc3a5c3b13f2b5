use tracing_subscriber::fmt::time::ChronoLocal;

/// 初始化日志 - 使用本地时间格式
/// 重复调用只生效一次, 方便测试环境使用
pub fn init() {
    tracing_subscriber::fmt()
        .with_timer(ChronoLocal::new("%Y-%m-%d %H:%M:%S".to_string()))
        .with_target(true)
        .with_level(true)
        .try_init()
        .ok();
}
