use crate::domain::model::{CrimeDataset, RenderedChart};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn output_path(&self) -> &str;
    fn report_title(&self) -> &str;
    fn figure_width_inches(&self) -> f64;
    fn emit_data(&self) -> bool;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn prepare(&self) -> Result<CrimeDataset>;
    async fn render(&self, dataset: &CrimeDataset) -> Result<Vec<RenderedChart>>;
    async fn publish(&self, dataset: &CrimeDataset, charts: Vec<RenderedChart>) -> Result<String>;
}
