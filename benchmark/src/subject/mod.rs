//! @ai:module:intent Subject contract implemented by benchmark suites
//! @ai:module:layer domain
//! @ai:module:public_api BenchmarkSubject, Operation, OperationTable, MethodMarker, BenchmarkMarker, MethodKind

pub mod marker;
pub mod table;

pub use marker::{BenchmarkMarker, MethodKind, MethodMarker};
pub use table::{BenchmarkSubject, Operation, OperationTable};
