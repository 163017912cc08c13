pub mod claims;
pub mod errors;
pub mod service;

pub use claims::Claims;
pub use claims::TokenPayload;
pub use errors::JwtError;
pub use service::parse_algorithm;
pub use service::TokenService;
pub use service::TokenVerification;
