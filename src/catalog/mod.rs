//! Worked operator definitions built with the schema DSL

pub mod gradient_boosting;
