pub mod ai_text;
pub mod analysis_text;
pub mod api_payload;
pub mod batch;
pub mod config;
pub mod form;
pub mod insight;
pub mod insight_export;
pub mod logging;
pub mod model;
pub mod outcome;
pub mod scenario_prob;
pub mod standings;
