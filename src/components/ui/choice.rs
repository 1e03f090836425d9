use leptos::prelude::*;
use tw_merge::tw_merge;

/// Native `<select>` whose current value is tracked per option.
///
/// `options` are `(value, label)` pairs. Selection is marked on each
/// `<option>` rather than through the select's `value` property, which the
/// browser drops when it is set before the options exist.
#[component]
pub fn ChoiceSelect(
    #[prop(into, optional)] class: String,
    options: Vec<(String, String)>,
    #[prop(into)] selected: Signal<String>,
    on_change: Callback<String>,
) -> impl IntoView {
    let merged_class = tw_merge!("rounded-md border bg-transparent px-2 py-1.5 text-sm", class);

    view! {
        <select class=merged_class on:change=move |ev| on_change.run(event_target_value(&ev))>
            {options
                .into_iter()
                .map(|(value, label)| {
                    let for_check = value.clone();
                    view! {
                        <option value=value selected=move || selected.get() == for_check>
                            {label}
                        </option>
                    }
                })
                .collect_view()}
        </select>
    }
}
