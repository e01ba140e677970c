use dashboard::{FieldContext, RefreshError, log_error};
use yew::prelude::*;
use yewdux::prelude::*;

use crate::State;
use crate::context::StoreContext;

/// Load the shared field list into global state if nothing has loaded it
/// yet. Later reloads go through the dashboard's refresh button.
#[hook]
pub fn use_shared_fields() {
    let (state, dispatch) = use_store::<State>();
    let has_fields = state.has_fields_loaded();

    use_effect_with(has_fields, move |has_fields| {
        if !*has_fields {
            let context = StoreContext::new(dispatch);
            yew::platform::spawn_local(async move {
                if let Err(e) = context.refresh_fields().await {
                    log_error(&RefreshError::from(e));
                }
            });
        }
    });
}
