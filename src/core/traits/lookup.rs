use crate::core::errors::Result;
use crate::core::models::observation::Observation;

/// Port for fetching the current value of an account's tracked attribute.
///
/// Fails with `FetchFailed` or `EntityNotFound`; either skips the account
/// for the current cycle only.
#[allow(async_fn_in_trait)]
pub trait Lookup {
    async fn fetch(&self, entity_id: &str) -> Result<Observation>;
}
