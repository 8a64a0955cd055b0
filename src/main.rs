use clap::Parser;
use slot_raffle::core::ConfigProvider;
use slot_raffle::utils::{logger, validation::Validate};
use slot_raffle::{CliConfig, LocalStorage, RaffleEngine, RafflePipeline};

fn main() {
    let config = CliConfig::parse();

    // 初始化日誌
    logger::init_cli_logger(config.verbose);

    tracing::info!("Starting slot-raffle");
    tracing::debug!("CLI config: {:?}", config);

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        println!("{}", e);
        std::process::exit(1);
    }

    let storage = LocalStorage::new(config.directory());
    let pipeline = RafflePipeline::new(storage, config);
    let mut engine = RaffleEngine::new(pipeline);

    match engine.run() {
        Ok(report) => {
            tracing::info!("✅ Raffle completed successfully!");
            println!("✅ Raffle completed successfully!");
            if report.written {
                println!("📁 Output saved to: {}", report.output_path);
            } else {
                println!("🔍 DRY RUN - output not written: {}", report.output_path);
            }
        }
        Err(e) => {
            tracing::error!("❌ Raffle failed: {} (Kind: {:?})", e, e.kind());
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            // 第一個錯誤即結束，不輸出任何結果
            println!("{}", e);
            std::process::exit(1);
        }
    }
}
