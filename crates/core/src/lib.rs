pub mod config;
pub mod error;
pub mod fs;
pub mod gav;
pub mod logging;

pub use config::{ConfigError, RecipeConfig};
pub use error::{AnalysisError, CoordinateError, DiscoveryError, TagResolutionError};
pub use fs::{FileSystem, MockFileSystem, RealFileSystem, WalkOptions};
pub use gav::Gav;
pub use logging::{init_default, init_from_env, init_logging, LoggingConfig};
