use crate::core::{LoadReport, Pipeline};
use crate::utils::error::Result;

pub struct RaffleEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> RaffleEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub fn run(&mut self) -> Result<LoadReport> {
        tracing::info!("Starting raffle...");

        // Extract
        tracing::info!("📥 Reading residents and slots...");
        let input = self.pipeline.extract()?;
        tracing::info!(
            "Validated {} residents and {} slots",
            input.residents.len(),
            input.slots.len()
        );

        // Transform
        tracing::info!("🎲 Drawing slots...");
        let assignment = self.pipeline.transform(input)?;
        tracing::info!(
            "Assigned {} slots to {} residents",
            assignment.total_slots(),
            assignment.len()
        );

        // Load
        tracing::info!("💾 Writing assignment...");
        let report = self.pipeline.load(assignment)?;
        if report.written {
            tracing::info!("Output saved to: {}", report.output_path);
        } else {
            tracing::info!("Output not written: {}", report.output_path);
        }

        Ok(report)
    }
}
