//! Typed edits to the working application.

pub mod commands;
pub mod input;

pub use commands::{
    validate_all, ApplicantChange, Command, DebtChange, EmploymentChange, EntityChange,
    ExpenseChange, LoanChange, MortgageChange, OtherIncomeChange, RentalChange,
};
pub use input::{command_for, parse_amount, parse_enum, parse_flag, parse_rate, parse_whole};
