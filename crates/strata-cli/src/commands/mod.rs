pub mod check;
pub mod dispatch;
pub mod repositories;
pub mod schema;
pub mod shared;
