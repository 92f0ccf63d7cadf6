//! Ingestion boundary
//!
//! Transport collaborators deliver loosely-typed rows; these modules
//! validate required fields, canonicalize identifiers, filter to the
//! active patient, and hand typed records to the algorithms. Rows failing
//! required-field checks are dropped and counted, never propagated.

pub mod adr;
pub mod demographics;
pub mod diagnosis;
pub mod medication;
pub mod row;

pub use medication::PrescriptionRow;
pub use row::SourceRow;
