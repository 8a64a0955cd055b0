use crate::core::allocator::{do_raffle, shuffle_residents, RandomSource, RngSource};
use crate::core::reporter::render_assignment;
use crate::core::validator::{check_input_file, ensure_capacity, parse_residents, parse_slots};
use crate::core::{Assignment, ConfigProvider, LoadReport, Pipeline, RaffleInput, Storage};
use crate::utils::error::Result;
use rand::rngs::StdRng;

pub struct RafflePipeline<S: Storage, C: ConfigProvider, R: RandomSource> {
    storage: S,
    config: C,
    rng: R,
}

impl<S: Storage, C: ConfigProvider> RafflePipeline<S, C, RngSource<StdRng>> {
    /// 有 seed 時可重現抽籤結果
    pub fn new(storage: S, config: C) -> Self {
        let rng = match config.seed() {
            Some(seed) => {
                tracing::info!("🌱 Using seed {}", seed);
                RngSource::seeded(seed)
            }
            None => RngSource::from_entropy(),
        };
        Self::with_random_source(storage, config, rng)
    }
}

impl<S: Storage, C: ConfigProvider, R: RandomSource> RafflePipeline<S, C, R> {
    pub fn with_random_source(storage: S, config: C, rng: R) -> Self {
        Self {
            storage,
            config,
            rng,
        }
    }

    fn read_input_file(&self, file_name: &str) -> Result<Vec<u8>> {
        let location = self.storage.location(file_name);
        tracing::debug!("Reading {}", location);
        check_input_file(&location, self.storage.read_file(file_name)?)
    }
}

impl<S: Storage, C: ConfigProvider, R: RandomSource> Pipeline for RafflePipeline<S, C, R> {
    fn extract(&mut self) -> Result<RaffleInput> {
        let delimiter = self.config.delimiter();
        let residents_file = delimiter.residents_file();
        let slots_file = delimiter.slots_file();

        // 兩個檔案都先確認存在且非空
        let residents_data = self.read_input_file(&residents_file)?;
        let slots_data = self.read_input_file(&slots_file)?;

        let mut residents = parse_residents(
            residents_data.as_slice(),
            delimiter,
            &self.storage.location(&residents_file),
        )?;
        let slots = parse_slots(
            slots_data.as_slice(),
            delimiter,
            &self.storage.location(&slots_file),
        )?;

        ensure_capacity(residents.len(), slots.len())?;

        shuffle_residents(&mut residents, &mut self.rng);

        Ok(RaffleInput { residents, slots })
    }

    fn transform(&mut self, input: RaffleInput) -> Result<Assignment> {
        do_raffle(&input.residents, &input.slots, &mut self.rng)
    }

    fn load(&mut self, assignment: Assignment) -> Result<LoadReport> {
        let delimiter = self.config.delimiter();
        let output_file = delimiter.output_file();
        let output_path = self.storage.location(&output_file);
        let data = render_assignment(&assignment, delimiter)?;

        if self.config.dry_run() {
            tracing::info!("🔍 DRY RUN - {} not written", output_path);
            for allocation in assignment.iter() {
                tracing::info!(
                    "  {} -> {}",
                    allocation.resident_id,
                    allocation.slot_ids.join(", ")
                );
            }
            return Ok(LoadReport {
                output_path,
                written: false,
            });
        }

        tracing::debug!("Writing {} bytes to {}", data.len(), output_path);
        self.storage.write_file(&output_file, &data)?;
        Ok(LoadReport {
            output_path,
            written: true,
        })
    }
}
