//! Middleware stack for the API Gateway.
//!
//! Layer order: Request → Trace → CatchPanic → ErrorShape → BodyLimit → CORS → Timeout → Identity → Handler

pub mod cors;
pub mod error_shape;
pub mod identity;

pub use cors::create_cors_layer;
pub use error_shape::json_error_response;
pub use identity::{
    resolve_caller, HmacSessionResolver, IdentityLayer, ResolverChain, SessionResolver,
    StaticSessionResolver,
};
