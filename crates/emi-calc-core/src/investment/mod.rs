pub mod goal;
pub mod inflation;
pub mod maturity;
pub mod plan;
pub mod scenarios;
pub mod scheme;
