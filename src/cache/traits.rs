use async_trait::async_trait;

/// 键值缓存后端
///
/// 值为序列化后的字节。后端内部错误只记录日志，不向调用方传播：
/// - `get` 出错按未命中处理
/// - `set` / `delete` 出错忽略
#[async_trait]
pub trait KeyValueCache: Send + Sync {
    async fn get(&self, key: &str) -> Option<Vec<u8>>;

    /// 写入并设置过期时间（秒），0 表示不过期
    async fn set(&self, key: &str, value: Vec<u8>, ttl_secs: u64);

    async fn delete(&self, key: &str);

    /// 获取后端名称（用于日志）
    fn name(&self) -> &'static str;
}
