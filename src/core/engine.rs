use crate::core::Pipeline;
use crate::utils::error::Result;
use crate::utils::monitor::SystemMonitor;

pub struct ReportEngine<P: Pipeline> {
    pipeline: P,
    monitor: SystemMonitor,
}

impl<P: Pipeline> ReportEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self::new_with_monitoring(pipeline, false)
    }

    pub fn new_with_monitoring(pipeline: P, monitor_enabled: bool) -> Self {
        Self {
            pipeline,
            monitor: SystemMonitor::new(monitor_enabled),
        }
    }

    pub async fn run(&self) -> Result<String> {
        println!("Starting report generation...");

        println!("Preparing dataset...");
        let dataset = self.pipeline.prepare().await?;
        println!(
            "Prepared {} years of statistics across {} districts",
            dataset.years.len(),
            dataset.districts.len()
        );

        println!("Rendering charts...");
        let charts = self.pipeline.render(&dataset).await?;
        println!("Rendered {} charts", charts.len());

        println!("Publishing report...");
        let output_path = self.pipeline.publish(&dataset, charts).await?;
        println!("Report saved to: {}", output_path);

        self.monitor.log_summary();

        Ok(output_path)
    }
}
