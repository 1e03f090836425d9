use icons::{Check, ChevronDown, ChevronRight, Loader};
use leptos::prelude::*;
use tw_merge::tw_merge;

/// One cell of the topic flow grid.
#[component]
pub fn TopicChip(
    #[prop(into)] label: String,
    depth: usize,
    #[prop(into)] selected: Signal<bool>,
    #[prop(into)] expanded: Signal<bool>,
    #[prop(into)] loading: Signal<bool>,
    #[prop(into)] error: Signal<Option<String>>,
    on_tap: Callback<()>,
) -> impl IntoView {
    let class = move || {
        let state = if selected.get() {
            "bg-primary text-primary-foreground border-primary"
        } else {
            "bg-transparent text-foreground border-input hover:bg-accent"
        };
        let size = if depth == 0 { "text-sm" } else { "text-xs" };
        tw_merge!(
            "inline-flex items-center gap-1.5 rounded-full border px-3 py-1.5 transition-colors select-none",
            size,
            state
        )
    };

    view! {
        <div class="inline-flex flex-col" data-depth=depth>
            <button type="button" class=class on:click=move |_| on_tap.run(())>
                <Show when=move || selected.get() fallback=|| ().into_view()>
                    <Check class="size-3.5" />
                </Show>
                <span>{label}</span>
                {move || {
                    if loading.get() {
                        view! { <Loader class="size-3.5 animate-spin" attr:role="status" attr:aria-label="Loading" /> }.into_any()
                    } else if expanded.get() {
                        view! { <ChevronDown class="size-3.5" /> }.into_any()
                    } else {
                        view! { <ChevronRight class="size-3.5 opacity-60" /> }.into_any()
                    }
                }}
            </button>
            {move || error.get().map(|e| view! {
                <span class="px-3 pt-0.5 text-[11px] text-destructive">{e}</span>
            })}
        </div>
    }
}
