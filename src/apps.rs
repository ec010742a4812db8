//! The five run units and the catalog that maps application names onto them.

pub mod catalog;
pub mod convert_state;
pub mod error_covariance;
pub mod hofx4d;
pub mod local_ensemble_da;
pub mod name;
pub mod sections;
pub mod variational;

pub use catalog::ApplicationCatalog;
pub use convert_state::ConvertState;
pub use error_covariance::ErrorCovarianceToolbox;
pub use hofx4d::HofX4D;
pub use local_ensemble_da::LocalEnsembleDa;
pub use name::ApplicationName;
pub use variational::Variational;
