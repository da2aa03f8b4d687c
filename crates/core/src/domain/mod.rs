pub mod contract;
pub mod fallback;
pub mod recommendation;
