pub mod engine;
pub mod outcome;

pub use engine::{assess_parameters, recommend, recommend_with, spoken_summary};
pub use outcome::{
    AnalysisResult, BatchResult, ParameterReading, ParameterStatus, Recommendation, SoilHealth,
};
