mod run;

pub use run::{WatermarkOutcome, WatermarkRequest, prepare, run};
