pub mod args;
pub mod config;
pub mod coverage;
pub mod error;
pub mod extract;
pub mod git;
pub mod jacoco;
pub mod project;
pub mod report;
pub mod run;

#[cfg(test)]
mod args_test;
#[cfg(test)]
mod report_test;
#[cfg(test)]
mod run_test;
#[cfg(test)]
pub(crate) mod test_support;
