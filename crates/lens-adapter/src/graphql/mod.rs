/*
[INPUT]:  Operation names, documents and variables
[OUTPUT]: Catalog of operations and the wire envelope types
[POS]:    GraphQL layer - what the dispatcher sends and receives
[UPDATE]: When adding operations or changing envelope handling
*/

pub mod catalog;
pub mod envelope;

pub use catalog::{Operation, OperationKind};
pub use envelope::{GraphQlError, RequestEnvelope, ResponseEnvelope};
