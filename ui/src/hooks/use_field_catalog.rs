use dashboard::{FieldCatalog, FieldCatalogLoader};
use yew::prelude::*;
use yewdux::prelude::*;

use crate::context::StoreContext;
use crate::{State, get_api_client};

/// Load the full field catalog once when the dashboard mounts.
///
/// The catalog lives in global state so it outlives the fetch. A failed load
/// is logged by the loader and leaves the previous catalog in place.
#[hook]
pub fn use_field_catalog() -> FieldCatalog {
    let (state, dispatch) = use_store::<State>();
    let loader = use_memo((), |_| FieldCatalogLoader::new(get_api_client()));

    use_effect_with((), move |_| {
        let context = StoreContext::new(dispatch);
        yew::platform::spawn_local(async move {
            loader.activate(&context).await;
        });
    });

    state.catalog.clone()
}
