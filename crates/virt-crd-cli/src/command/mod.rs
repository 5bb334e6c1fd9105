pub mod check;
pub mod list;
pub mod manifest;
pub mod schema;
