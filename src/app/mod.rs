use crate::pages::{ResearchPage, ReviewPage, SchedulePage, TopicsPage, TrackersPage};
use crate::state::{AppContext, AppState};
use leptos::prelude::*;
use leptos_router::components::{Route, Router, Routes};
use leptos_router::path;

#[component]
pub fn App() -> impl IntoView {
    provide_context(AppContext(AppState::new()));

    // IMPORTANT:
    // - Leptos CSR requires the `csr` feature on `leptos`.
    // - Each visit to "/" mounts a new TopicsPage, which builds a fresh topic tree.
    view! {
        <Router>
            <Routes fallback=|| view! { <div class="px-4 py-8 text-xs text-muted-foreground">"Not found"</div> }>
                <Route path=path!("research") view=ResearchPage />
                <Route path=path!("trackers") view=TrackersPage />
                <Route path=path!("schedule") view=SchedulePage />
                <Route path=path!("review") view=ReviewPage />
                <Route path=path!("") view=TopicsPage />
            </Routes>
        </Router>
    }
}
