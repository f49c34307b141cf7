//! The call interceptor: gating, timing, recording and fan-out.

mod builder;
mod core;

pub(crate) use builder::detect_host;
pub use builder::InterceptorBuilder;
pub use self::core::Interceptor;
