mod relation;

pub use relation::parse_relation;
pub use relation::read_relation;
pub use relation::ReadRelationError;
