use leptos::prelude::*;
use leptos_ui::clx;

mod components {
    use super::*;
    clx! {Panel, section, "bg-card text-card-foreground flex flex-col gap-4 rounded-xl border py-5 shadow-sm"}
    clx! {PanelHeader, div, "flex flex-col gap-1 px-5"}
    clx! {PanelTitle, h2, "text-base leading-none font-semibold"}
    clx! {PanelDescription, p, "text-muted-foreground text-xs"}
    clx! {PanelBody, div, "px-5"}
    clx! {PanelFooter, footer, "flex items-center justify-between gap-2 px-5"}

    clx! {Notice, div, "w-full rounded-lg border border-destructive/30 px-4 py-2 text-xs text-destructive"}
    clx! {StepLink, a, "inline-flex h-9 items-center rounded-md bg-primary px-4 text-sm font-medium text-primary-foreground hover:bg-primary/90"}
}

#[allow(unused_imports)]
pub use components::*;
