//! Form calculators. Each one pairs an input type with a `parse` constructor
//! that validates raw field strings and a pure function producing a result.

pub mod dates;
pub mod finance;
pub mod grades;
pub mod health;
pub mod units;
