pub mod model_report;
