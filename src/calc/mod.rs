//! The external serviceability calculation.
//!
//! The workshop never computes surplus itself. A [`Calculator`] takes the
//! full application and returns the service's [`CalculationResult`].

pub mod client;
pub mod credentials;

use std::future::Future;

use crate::error::CalculationError;
use crate::model::{ApplicationState, CalculationResult};

pub use client::ServiceabilityClient;
pub use credentials::{delete_api_key, get_api_key, set_api_key};

pub trait Calculator {
    fn calculate(
        &self,
        application: &ApplicationState,
    ) -> impl Future<Output = Result<CalculationResult, CalculationError>> + Send;
}
