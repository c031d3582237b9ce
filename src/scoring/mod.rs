pub mod engine;
pub mod factors;
pub mod model;
pub mod types;

pub use engine::{predict, predict_batch};
pub use factors::{catalog, derive_risk_factors, FeatureId, RiskFactor, MAX_RISK_FACTORS};
pub use model::{sigmoid, Coefficients, MODEL};
pub use types::{ContractType, CustomerAttributes, PaymentMethod, PredictionResult, RiskLevel};
