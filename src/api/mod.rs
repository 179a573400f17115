mod error;
pub mod handlers;
mod router;

pub use router::build_router;
