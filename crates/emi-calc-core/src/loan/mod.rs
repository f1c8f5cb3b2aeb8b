pub mod amortization;
pub mod analysis;
pub mod comparison;
pub mod emi;
