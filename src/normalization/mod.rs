pub mod engagement;
pub mod name;

pub use engagement::EngagementNormalizer;
pub use name::NameNormalizer;
