use crate::core::charts;
use crate::core::document;
use crate::core::{ConfigProvider, CrimeDataset, Pipeline, RenderedChart, Storage};
use crate::utils::error::Result;

pub struct ReportPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
}

impl<S: Storage, C: ConfigProvider> ReportPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self { storage, config }
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for ReportPipeline<S, C> {
    async fn prepare(&self) -> Result<CrimeDataset> {
        let dataset = CrimeDataset::builtin();
        dataset.validate()?;

        tracing::debug!(
            "Prepared dataset: {} years, {} districts",
            dataset.years.len(),
            dataset.districts.len()
        );
        Ok(dataset)
    }

    async fn render(&self, dataset: &CrimeDataset) -> Result<Vec<RenderedChart>> {
        let charts = charts::render_all(dataset)?;

        for chart in &charts {
            tracing::debug!(
                "Rendered {} ({}x{}, {} bytes)",
                chart.file_name,
                chart.width_px,
                chart.height_px,
                chart.png.len()
            );
        }
        Ok(charts)
    }

    async fn publish(&self, dataset: &CrimeDataset, charts: Vec<RenderedChart>) -> Result<String> {
        for chart in &charts {
            self.storage.write_file(&chart.file_name, &chart.png).await?;
        }

        let docx = document::compose(
            self.config.report_title(),
            self.config.figure_width_inches(),
            &charts,
        )?;
        tracing::debug!(
            "Writing {} ({} bytes) to storage",
            document::REPORT_FILE_NAME,
            docx.len()
        );
        self.storage
            .write_file(document::REPORT_FILE_NAME, &docx)
            .await?;

        if self.config.emit_data() {
            tracing::debug!("Writing data exports");
            self.storage
                .write_file("crime_data.csv", &dataset.yearly_csv()?)
                .await?;
            self.storage
                .write_file("district_rates.csv", &dataset.district_csv()?)
                .await?;
            let json = serde_json::to_string_pretty(dataset)?;
            self.storage
                .write_file("crime_data.json", json.as_bytes())
                .await?;
        }

        Ok(format!(
            "{}/{}",
            self.config.output_path(),
            document::REPORT_FILE_NAME
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::ReportError;
    use std::collections::HashMap;
    use std::sync::Arc;
    use tokio::sync::Mutex;

    #[derive(Clone)]
    struct MockStorage {
        files: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    }

    impl MockStorage {
        fn new() -> Self {
            Self {
                files: Arc::new(Mutex::new(HashMap::new())),
            }
        }

        async fn get_file(&self, path: &str) -> Option<Vec<u8>> {
            let files = self.files.lock().await;
            files.get(path).cloned()
        }

        async fn file_names(&self) -> Vec<String> {
            let files = self.files.lock().await;
            let mut names: Vec<String> = files.keys().cloned().collect();
            names.sort();
            names
        }
    }

    impl Storage for MockStorage {
        async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
            let files = self.files.lock().await;
            files.get(path).cloned().ok_or_else(|| {
                ReportError::IoError(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    format!("File not found: {}", path),
                ))
            })
        }

        async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
            let mut files = self.files.lock().await;
            files.insert(path.to_string(), data.to_vec());
            Ok(())
        }
    }

    struct MockConfig {
        output_path: String,
        title: String,
        figure_width_inches: f64,
        emit_data: bool,
    }

    impl MockConfig {
        fn new(emit_data: bool) -> Self {
            Self {
                output_path: "test_output".to_string(),
                title: "Crime Data Analysis in Tamil Nadu (2014–Present)".to_string(),
                figure_width_inches: 6.0,
                emit_data,
            }
        }
    }

    impl ConfigProvider for MockConfig {
        fn output_path(&self) -> &str {
            &self.output_path
        }

        fn report_title(&self) -> &str {
            &self.title
        }

        fn figure_width_inches(&self) -> f64 {
            self.figure_width_inches
        }

        fn emit_data(&self) -> bool {
            self.emit_data
        }
    }

    #[tokio::test]
    async fn test_prepare_returns_aligned_dataset() {
        let pipeline = ReportPipeline::new(MockStorage::new(), MockConfig::new(false));

        let dataset = pipeline.prepare().await.unwrap();

        assert_eq!(dataset.years.len(), 11);
        assert_eq!(dataset.murders.len(), 11);
        assert_eq!(dataset.districts.len(), 5);
    }

    #[tokio::test]
    async fn test_render_produces_five_charts() {
        let pipeline = ReportPipeline::new(MockStorage::new(), MockConfig::new(false));

        let dataset = pipeline.prepare().await.unwrap();
        let charts = pipeline.render(&dataset).await.unwrap();

        assert_eq!(charts.len(), 5);
        assert!(charts.iter().all(|c| !c.png.is_empty()));
    }

    #[tokio::test]
    async fn test_publish_writes_charts_and_report() {
        let storage = MockStorage::new();
        let pipeline = ReportPipeline::new(storage.clone(), MockConfig::new(false));

        let dataset = pipeline.prepare().await.unwrap();
        let charts = pipeline.render(&dataset).await.unwrap();
        let output_path = pipeline.publish(&dataset, charts).await.unwrap();

        assert_eq!(
            output_path,
            "test_output/Crime_Data_Analysis_TN_Final.docx"
        );
        assert_eq!(
            storage.file_names().await,
            vec![
                "Crime_Data_Analysis_TN_Final.docx",
                "caste_crime_trend.png",
                "correlation_matrix.png",
                "juvenile_trend.png",
                "murder_trend.png",
                "women_crime_rate.png",
            ]
        );
    }

    #[tokio::test]
    async fn test_publish_docx_is_zip_container() {
        let storage = MockStorage::new();
        let pipeline = ReportPipeline::new(storage.clone(), MockConfig::new(false));

        let dataset = pipeline.prepare().await.unwrap();
        let charts = pipeline.render(&dataset).await.unwrap();
        pipeline.publish(&dataset, charts).await.unwrap();

        let docx = storage
            .get_file("Crime_Data_Analysis_TN_Final.docx")
            .await
            .unwrap();
        let cursor = std::io::Cursor::new(docx);
        let mut archive = zip::ZipArchive::new(cursor).unwrap();
        assert!(archive.by_name("word/document.xml").is_ok());
    }

    #[tokio::test]
    async fn test_publish_with_emit_data_writes_exports() {
        let storage = MockStorage::new();
        let pipeline = ReportPipeline::new(storage.clone(), MockConfig::new(true));

        let dataset = pipeline.prepare().await.unwrap();
        let charts = pipeline.render(&dataset).await.unwrap();
        pipeline.publish(&dataset, charts).await.unwrap();

        let csv = storage.get_file("crime_data.csv").await.unwrap();
        assert!(String::from_utf8(csv).unwrap().starts_with("year,"));

        let districts = storage.get_file("district_rates.csv").await.unwrap();
        assert!(String::from_utf8(districts)
            .unwrap()
            .starts_with("district,"));

        let json = storage.get_file("crime_data.json").await.unwrap();
        let parsed: serde_json::Value = serde_json::from_slice(&json).unwrap();
        assert_eq!(parsed["years"][0], 2014);
        assert_eq!(parsed["murders"][4], 1745);
    }
}
