pub mod io;
pub mod oracle;

pub use oracle::RelationOracle;
