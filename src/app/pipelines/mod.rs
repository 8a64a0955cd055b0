pub mod raffle_pipeline;
