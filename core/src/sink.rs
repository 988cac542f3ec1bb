use async_trait::async_trait;

#[async_trait]
pub trait NotificationSink: Send + Sync {
    fn name(&self) -> &str;
    async fn deliver(&self, text: &str) -> anyhow::Result<()>;
}
