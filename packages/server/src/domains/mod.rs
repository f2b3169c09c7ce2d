// Business domains
pub mod auth;
pub mod eligibility;
pub mod identifier;
pub mod loans;
pub mod member;
pub mod organization;
pub mod savings;
