use dashboard::{
    SelectedFieldResolver, Timer, ViewSink, ViewState, manual_refresh,
};
use payloads::{Field, FieldId, WeatherForecast};
use std::rc::Rc;
use std::time::Duration;
use yew::prelude::*;
use yewdux::prelude::*;

use crate::context::StoreContext;
use crate::{State, get_api_client, get_dashboard_config};

/// The dashboard's view state as a Yew reducer.
#[derive(Default, PartialEq)]
pub struct DashboardView(pub ViewState);

pub enum ViewAction {
    SetLoading(bool),
    Publish(Option<Field>, Option<WeatherForecast>),
}

impl Reducible for DashboardView {
    type Action = ViewAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut view = self.0.clone();
        match action {
            ViewAction::SetLoading(is_loading) => view.is_loading = is_loading,
            ViewAction::Publish(field, forecast) => view.publish(field, forecast),
        }
        Rc::new(Self(view))
    }
}

#[derive(Clone)]
struct ReducerSink(UseReducerHandle<DashboardView>);

impl ViewSink for ReducerSink {
    fn set_loading(&self, is_loading: bool) {
        self.0.dispatch(ViewAction::SetLoading(is_loading));
    }

    fn publish_view(
        &self,
        resolved_field: Option<Field>,
        forecast: Option<WeatherForecast>,
    ) {
        self.0.dispatch(ViewAction::Publish(resolved_field, forecast));
    }
}

struct GlooTimer;

impl Timer for GlooTimer {
    async fn sleep(&self, duration: Duration) {
        gloo_timers::future::sleep(duration).await;
    }
}

/// Hook return type for the dashboard view
pub struct DashboardHookReturn {
    pub view: ViewState,
    /// The explicit selection, if any. The displayed field may differ when
    /// nothing is selected.
    pub selected_field: Option<FieldId>,
    pub refresh: Callback<()>,
    pub select_field: Callback<FieldId>,
}

/// Keep the dashboard view in step with the shared selection and field list.
///
/// Every change to either starts a resolution cycle. Cycles are not
/// cancelled when a newer one starts.
#[hook]
pub fn use_dashboard() -> DashboardHookReturn {
    let (state, dispatch) = use_store::<State>();
    let view = use_reducer(DashboardView::default);
    let resolver = use_memo((), |_| {
        SelectedFieldResolver::new(get_api_client(), get_dashboard_config())
    });

    // Run a resolution cycle whenever the selection or field list changes
    {
        let resolver = resolver.clone();
        let sink = ReducerSink(view.clone());

        use_effect_with(state.context_snapshot(), move |snapshot| {
            let snapshot = snapshot.clone();
            yew::platform::spawn_local(async move {
                resolver.run_cycle(&snapshot, &sink).await;
            });
        });
    }

    let refresh = {
        let sink = ReducerSink(view.clone());
        let context = StoreContext::new(dispatch.clone());
        let min_spinner = resolver.config().min_refresh_spinner;

        use_callback((), move |_: (), _| {
            let sink = sink.clone();
            let context = context.clone();

            yew::platform::spawn_local(async move {
                // Failures are logged inside; the spinner is cleared either way
                let _ = manual_refresh(&context, &GlooTimer, &sink, min_spinner)
                    .await;
            });
        })
    };

    let select_field = {
        let context = StoreContext::new(dispatch);

        use_callback((), move |field_id: FieldId, _| {
            dashboard::select_field(&context, field_id);
        })
    };

    DashboardHookReturn {
        view: view.0.clone(),
        selected_field: state.selected_field.clone(),
        refresh,
        select_field,
    }
}
