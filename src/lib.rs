// Library exports for testing
pub mod config;
pub mod error;
pub mod memory;
pub mod metacognition;
pub mod models;
pub mod reasoning;
pub mod service;
pub mod session;
pub mod stage;
pub mod validation;

pub use self::config::*;
pub use self::error::*;
pub use self::memory::*;
pub use self::metacognition::*;
pub use self::models::*;
pub use self::reasoning::*;
pub use self::service::*;
pub use self::session::*;
pub use self::stage::*;
pub use self::validation::*;
