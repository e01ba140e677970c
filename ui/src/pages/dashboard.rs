use dashboard::FieldCatalog;
use dashboard::display::{
    catalog_preview, created_label, crop_label, field_name_label,
    location_label, size_label,
};
use payloads::{Field, FieldId, WeatherForecast};
use yew::prelude::*;

use crate::hooks::{
    DashboardHookReturn, use_dashboard, use_field_catalog, use_shared_fields,
};

#[function_component]
pub fn DashboardPage() -> Html {
    use_shared_fields();
    let catalog = use_field_catalog();
    let DashboardHookReturn {
        view,
        selected_field,
        refresh,
        select_field,
    } = use_dashboard();

    let on_refresh = Callback::from(move |_: MouseEvent| refresh.emit(()));

    html! {
        <div class="space-y-8">
            <div class="flex justify-between items-center">
                <div>
                    <h1 class="text-3xl font-bold text-neutral-900 dark:text-neutral-100">
                        {"Farm Dashboard"}
                    </h1>
                    <p class="text-lg text-neutral-600 dark:text-neutral-400 mt-2">
                        {"Overview of your agricultural operations"}
                    </p>
                </div>
                <div class="flex items-center space-x-3">
                    if let Some(updated_at) = view.updated_at {
                        <span class="text-sm text-neutral-600 dark:text-neutral-400">
                            {format!("Last updated: {}", updated_at.strftime("%Y-%m-%d %H:%M"))}
                        </span>
                    }
                    <button
                        onclick={on_refresh}
                        class="px-4 py-2 bg-green-50 text-green-700 hover:bg-green-100 rounded-md text-sm font-medium transition-colors"
                    >
                        {"Refresh"}
                    </button>
                </div>
            </div>

            if view.is_loading {
                <div class="text-center py-12">
                    <p class="text-neutral-600 dark:text-neutral-400">{"Loading farm data..."}</p>
                </div>
            } else {
                {field_overview(view.resolved_field.as_ref(), view.forecast.as_ref(), catalog.count())}
                {field_list(&catalog, selected_field.as_ref(), &select_field)}
            }
        </div>
    }
}

fn field_overview(
    field: Option<&Field>,
    forecast: Option<&WeatherForecast>,
    field_count: usize,
) -> Html {
    let forecast_line = forecast.map(|forecast| {
        let summary = forecast
            .data
            .get("summary")
            .and_then(|summary| summary.as_str())
            .unwrap_or("Forecast available");
        format!("{}: {}", forecast.location, summary)
    });

    html! {
        <div class="bg-white dark:bg-neutral-800 p-6 rounded-lg shadow-md border border-neutral-200 dark:border-neutral-700">
            <div class="flex justify-between items-center mb-6">
                <h2 class="text-xl font-semibold text-neutral-900 dark:text-neutral-100">
                    {"Farm Overview"}
                </h2>
                <span class="text-sm bg-blue-50 text-blue-700 py-1 px-3 rounded-full font-medium">
                    {format!("All Fields ({field_count})")}
                </span>
            </div>
            if let Some(field) = field {
                <div class="grid grid-cols-1 md:grid-cols-3 gap-6">
                    <div>
                        <div class="text-sm text-neutral-500">{"Field Name"}</div>
                        <div class="text-lg font-semibold">{field_name_label(field)}</div>
                        <div class="mt-2 text-sm text-neutral-500">{location_label(field)}</div>
                    </div>
                    <div>
                        <div class="text-sm text-neutral-500">{"Field Size"}</div>
                        <div class="text-lg font-semibold">{size_label(field)}</div>
                        <div class="mt-2 text-sm text-neutral-500">
                            {format!("Created: {}", created_label(field))}
                        </div>
                    </div>
                    <div>
                        <div class="text-sm text-neutral-500">{"Crop"}</div>
                        <div class="text-lg font-semibold">{crop_label(field)}</div>
                    </div>
                </div>
            } else {
                <div class="text-center py-8 text-neutral-500">
                    {"No field selected or no fields available"}
                </div>
            }
            if let Some(line) = forecast_line {
                <p class="mt-6 text-sm text-neutral-600 dark:text-neutral-400">{line}</p>
            }
        </div>
    }
}

fn field_list(
    catalog: &FieldCatalog,
    selected_field: Option<&FieldId>,
    on_select: &Callback<FieldId>,
) -> Html {
    let Some(preview) = catalog_preview(catalog, selected_field) else {
        return html! {};
    };

    html! {
        <div class="bg-white dark:bg-neutral-800 p-6 rounded-lg shadow-md border border-neutral-200 dark:border-neutral-700">
            <h2 class="text-xl font-semibold text-neutral-900 dark:text-neutral-100 mb-6">
                {"My Fields"}
            </h2>
            <div class="grid grid-cols-1 md:grid-cols-2 lg:grid-cols-3 gap-4">
                {preview.cards.iter().map(|card| {
                    let onclick = {
                        let on_select = on_select.clone();
                        let field_id = card.field.id.clone();
                        Callback::from(move |_: MouseEvent| on_select.emit(field_id.clone()))
                    };
                    let border = if card.is_selected {
                        "border-green-300 bg-green-50"
                    } else {
                        "border-neutral-200"
                    };
                    html! {
                        <div
                            key={card.field.id.to_string()}
                            {onclick}
                            class={classes!("p-4", "rounded-lg", "border", "cursor-pointer", border)}
                        >
                            <div class="flex items-center justify-between mb-2">
                                <h3 class="font-medium">{field_name_label(card.field)}</h3>
                                if card.is_selected {
                                    <span class="bg-green-100 text-green-700 text-xs px-2 py-1 rounded">{"Selected"}</span>
                                }
                            </div>
                            <div class="text-sm text-neutral-500">{location_label(card.field)}</div>
                            <div class="text-xs text-neutral-500">
                                {format!("Created: {}", created_label(card.field))}
                            </div>
                        </div>
                    }
                }).collect::<Html>()}
                if let Some(total) = preview.view_all_count() {
                    <div class="p-4 rounded-lg border border-dashed border-neutral-200 text-sm text-green-600">
                        {format!("View all {total} fields")}
                    </div>
                }
            </div>
        </div>
    }
}
