pub mod conjunction;
pub mod object;

pub use conjunction::ConjunctionRecord;
pub use object::{ObjectSummary, ObjectType, RadarCrossSection, UnrecognizedToken};
