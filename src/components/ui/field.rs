use leptos::prelude::*;
use tw_merge::tw_merge;

/// Single-line text input bound to a signal.
#[component]
pub fn TextField(
    #[prop(into, optional)] class: String,
    #[prop(into, optional)] placeholder: String,
    #[prop(into, optional)] id: String,
    #[prop(into)] value: RwSignal<String>,
) -> impl IntoView {
    let merged_class = tw_merge!(
        "placeholder:text-muted-foreground border-input flex h-9 w-full min-w-0 rounded-md border bg-transparent px-3 py-1 text-sm shadow-xs outline-none",
        "focus-visible:border-ring focus-visible:ring-2 focus-visible:ring-ring/50",
        class
    );

    // Manual wiring instead of `bind:value`; the binding macros moved between Leptos releases.
    view! {
        <input
            type="text"
            class=merged_class
            placeholder=placeholder
            id=id
            prop:value=move || value.get()
            on:input=move |ev| value.set(event_target_value(&ev))
        />
    }
}
