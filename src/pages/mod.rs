use crate::components::ui::{
    ChoiceSelect, Notice, Panel, PanelBody, PanelDescription, PanelFooter, PanelHeader,
    PanelTitle, StepLink, TextField, TopicChip,
};
use crate::models::{DetailLevel, TopicNode};
use crate::payload::PreferencesPayload;
use crate::schedule::{Frequency, Weekday};
use crate::state::{AppContext, TopicGridController};
use crate::storage::{clear_profile, save_profile};
use crate::trackers::{Tracker, TrackerKind};
use leptos::prelude::*;
use std::str::FromStr;
use strum::IntoEnumIterator;

const STEPS: &[(&str, &str)] = &[
    ("/", "Topics"),
    ("/research", "Research"),
    ("/trackers", "Trackers"),
    ("/schedule", "Schedule"),
    ("/review", "Review"),
];

#[component]
pub fn Shell(#[prop(into)] step: usize, children: Children) -> impl IntoView {
    view! {
        <div class="min-h-screen bg-background">
            <div class="mx-auto w-full max-w-xl px-4 py-6">
                <nav class="mb-4 flex gap-3 text-xs">
                    {STEPS
                        .iter()
                        .enumerate()
                        .map(|(i, (href, label))| {
                            let class = if i == step {
                                "font-semibold text-foreground"
                            } else {
                                "text-muted-foreground"
                            };
                            view! { <a href=*href class=class>{*label}</a> }
                        })
                        .collect_view()}
                </nav>
                {children()}
            </div>
        </div>
    }
}

fn next_step(step: usize) -> impl IntoView {
    STEPS.get(step + 1).map(|(href, label)| {
        view! { <StepLink attr:href=*href>{format!("Next: {label}")}</StepLink> }
    })
}

fn notice_view(message: Option<String>) -> impl IntoView {
    message.map(|m| view! { <Notice>{m}</Notice> })
}

#[component]
pub fn TopicsPage() -> impl IntoView {
    let app_state = expect_context::<AppContext>();
    let grid = TopicGridController::new(app_state);
    let tree = grid.tree();
    let manual: RwSignal<String> = RwSignal::new(String::new());

    let rows = move || tree.with(|t| t.display_list().to_vec());
    let selected = move || {
        tree.with(|t| {
            t.selection()
                .iter()
                .map(|(name, level)| (name.to_string(), level))
                .collect::<Vec<_>>()
        })
    };

    let on_add = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if grid.on_add_manual_topic(&manual.get_untracked()) {
            manual.set(String::new());
        }
    };

    view! {
        <Shell step=0usize>
            <Panel>
                <PanelHeader>
                    <PanelTitle>"What do you want to follow?"</PanelTitle>
                    <PanelDescription>
                        {move || {
                            format!(
                                "{} of {} selected. Tap a topic to select it and see more.",
                                tree.with(|t| t.selection().len()),
                                tree.with(|t| t.selection().max()),
                            )
                        }}
                    </PanelDescription>
                </PanelHeader>

                <PanelBody>
                    <div class="flex flex-col gap-3">
                        {move || {
                            tree.with(|t| t.notice().map(|m| m.to_string()))
                                .map(|m| view! {
                                    <div class="flex items-center gap-2">
                                        <Notice>{m}</Notice>
                                        <button
                                            type="button"
                                            class="text-xs text-muted-foreground"
                                            on:click=move |_| grid.dismiss_notice()
                                        >
                                            "Dismiss"
                                        </button>
                                    </div>
                                })
                        }}

                        <div class="flex flex-wrap items-start gap-2">
                            <For
                                each=rows
                                key=|n: &TopicNode| n.id
                                children=move |node: TopicNode| {
                                    let id = node.id;
                                    let depth = node.depth;
                                    let label = node.name.clone();
                                    let name = node.name.clone();
                                    view! {
                                        <TopicChip
                                            label=label
                                            depth=depth
                                            selected=Signal::derive(move || tree.with(|t| t.is_selected(&name)))
                                            expanded=Signal::derive(move || tree.with(|t| t.is_expanded(id)))
                                            loading=Signal::derive(move || tree.with(|t| t.is_loading(id)))
                                            error=Signal::derive(move || {
                                                tree.with(|t| t.error_for(id).map(|e| e.to_string()))
                                            })
                                            on_tap=Callback::new(move |_: ()| grid.on_tap(node.clone()))
                                        />
                                    }
                                }
                            />
                        </div>

                        <form class="flex gap-2" on:submit=on_add>
                            <TextField value=manual placeholder="Add your own topic" />
                            <button type="submit" class="rounded-md border px-3 text-sm">"Add"</button>
                        </form>

                        <ul class="flex flex-col gap-1.5">
                            <For
                                each=selected
                                key=|(name, level): &(String, DetailLevel)| (name.clone(), *level)
                                children=move |(name, level): (String, DetailLevel)| {
                                    let name_for_toggle = name.clone();
                                    let name_for_level = name.clone();
                                    view! {
                                        <li class="flex items-center justify-between gap-2 text-sm">
                                            <span>{name}</span>
                                            <div class="flex items-center gap-2">
                                                <ChoiceSelect
                                                    class="py-1 text-xs"
                                                    options=DetailLevel::iter()
                                                        .map(|l| (l.to_string(), l.label().to_string()))
                                                        .collect()
                                                    selected=Signal::derive(move || level.to_string())
                                                    on_change=Callback::new(move |v: String| {
                                                        if let Ok(l) = DetailLevel::from_str(&v) {
                                                            grid.on_detail_level(&name_for_level, l);
                                                        }
                                                    })
                                                />
                                                <button
                                                    type="button"
                                                    class="text-xs text-muted-foreground"
                                                    on:click=move |_| grid.on_toggle_selection(&name_for_toggle)
                                                >
                                                    "Remove"
                                                </button>
                                            </div>
                                        </li>
                                    }
                                }
                            />
                        </ul>
                    </div>
                </PanelBody>

                <PanelFooter>
                    <span></span>
                    {next_step(0)}
                </PanelFooter>
            </Panel>
        </Shell>
    }
}

#[component]
pub fn ResearchPage() -> impl IntoView {
    let app_state = expect_context::<AppContext>();
    let research = app_state.0.research;
    let input: RwSignal<String> = RwSignal::new(String::new());
    let error: RwSignal<Option<String>> = RwSignal::new(None);

    let on_add = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let text = input.get_untracked();
        let res = research.try_update(|r| r.add(&text));
        match res {
            Some(Err(e)) => error.set(Some(e.to_string())),
            _ => {
                error.set(None);
                input.set(String::new());
            }
        }
    };

    view! {
        <Shell step=1usize>
            <Panel>
                <PanelHeader>
                    <PanelTitle>"Anything you're researching?"</PanelTitle>
                    <PanelDescription>"Free-form questions we'll keep an eye on for you."</PanelDescription>
                </PanelHeader>
                <PanelBody>
                    <div class="flex flex-col gap-3">
                        {move || notice_view(error.get())}
                        <form class="flex gap-2" on:submit=on_add>
                            <TextField value=input placeholder="e.g. progress on fusion energy" />
                            <button type="submit" class="rounded-md border px-3 text-sm">"Add"</button>
                        </form>
                        <ul class="flex flex-col gap-1.5">
                            <For
                                each=move || research.get().items().to_vec()
                                key=|t: &String| t.clone()
                                children=move |topic: String| {
                                    let t2 = topic.clone();
                                    view! {
                                        <li class="flex items-center justify-between text-sm">
                                            <span>{topic}</span>
                                            <button
                                                type="button"
                                                class="text-xs text-muted-foreground"
                                                on:click=move |_| {
                                                    research.update(|r| {
                                                        r.remove(&t2);
                                                    });
                                                }
                                            >
                                                "Remove"
                                            </button>
                                        </li>
                                    }
                                }
                            />
                        </ul>
                    </div>
                </PanelBody>
                <PanelFooter>
                    <span></span>
                    {next_step(1)}
                </PanelFooter>
            </Panel>
        </Shell>
    }
}

#[component]
pub fn TrackersPage() -> impl IntoView {
    let app_state = expect_context::<AppContext>();
    let trackers = app_state.0.trackers;
    let kind: RwSignal<TrackerKind> = RwSignal::new(TrackerKind::default());
    let key: RwSignal<String> = RwSignal::new(String::new());
    let name: RwSignal<String> = RwSignal::new(String::new());
    let error: RwSignal<Option<String>> = RwSignal::new(None);

    let on_add = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let res = Tracker::new(kind.get_untracked(), &key.get_untracked(), &name.get_untracked())
            .and_then(|t| trackers.try_update(|list| list.add(t)).unwrap_or(Ok(())));
        match res {
            Ok(()) => {
                error.set(None);
                key.set(String::new());
                name.set(String::new());
            }
            Err(e) => error.set(Some(e.to_string())),
        }
    };

    view! {
        <Shell step=2usize>
            <Panel>
                <PanelHeader>
                    <PanelTitle>"Track scores and prices"</PanelTitle>
                    <PanelDescription>"League schedules, standings, or an asset's price."</PanelDescription>
                </PanelHeader>
                <PanelBody>
                    <div class="flex flex-col gap-3">
                        {move || notice_view(error.get())}
                        <form class="flex flex-col gap-2" on:submit=on_add>
                            <ChoiceSelect
                                options=TrackerKind::iter()
                                    .map(|k| (k.to_string(), k.label().to_string()))
                                    .collect()
                                selected=Signal::derive(move || kind.get().to_string())
                                on_change=Callback::new(move |v: String| {
                                    if let Ok(k) = TrackerKind::from_str(&v) {
                                        kind.set(k);
                                    }
                                })
                            />
                            <TextField value=key placeholder="Competition id or ticker symbol" />
                            <TextField value=name placeholder="Display name" />
                            <button type="submit" class="rounded-md border px-3 py-1.5 text-sm">"Add tracker"</button>
                        </form>
                        <ul class="flex flex-col gap-1.5">
                            <For
                                each=move || trackers.get().items().to_vec()
                                key=|t: &Tracker| (t.kind().to_string(), t.key().to_string())
                                children=move |t: Tracker| {
                                    let k = t.kind();
                                    let tracker_key = t.key().to_string();
                                    view! {
                                        <li class="flex items-center justify-between text-sm">
                                            <span>{format!("{} · {} ({})", k.label(), t.name(), t.key())}</span>
                                            <button
                                                type="button"
                                                class="text-xs text-muted-foreground"
                                                on:click=move |_| {
                                                    trackers.update(|list| {
                                                        list.remove(k, &tracker_key);
                                                    });
                                                }
                                            >
                                                "Remove"
                                            </button>
                                        </li>
                                    }
                                }
                            />
                        </ul>
                    </div>
                </PanelBody>
                <PanelFooter>
                    <span></span>
                    {next_step(2)}
                </PanelFooter>
            </Panel>
        </Shell>
    }
}

const FREQUENCY_OPTIONS: &[(&str, &str)] = &[
    ("daily", "Every day"),
    ("weekdays", "Weekdays"),
    ("weekly", "Once a week"),
    ("custom", "Pick days"),
];

fn frequency_key(f: &Frequency) -> &'static str {
    match f {
        Frequency::Daily => "daily",
        Frequency::Weekdays => "weekdays",
        Frequency::Weekly { .. } => "weekly",
        Frequency::Custom { .. } => "custom",
    }
}

#[component]
pub fn SchedulePage() -> impl IntoView {
    let app_state = expect_context::<AppContext>();
    let schedule = app_state.0.schedule;

    let time: RwSignal<String> = RwSignal::new(schedule.get_untracked().time);
    let timezone: RwSignal<String> = RwSignal::new(schedule.get_untracked().timezone);

    Effect::new(move |_| {
        let t = time.get();
        let tz = timezone.get();
        schedule.update(|s| {
            s.time = t;
            s.timezone = tz;
        });
    });

    let on_frequency = Callback::new(move |value: String| {
        schedule.update(|s| {
            let days = s.delivery_days();
            s.frequency = match value.as_str() {
                "weekdays" => Frequency::Weekdays,
                "weekly" => Frequency::Weekly {
                    day: days.first().copied().unwrap_or(Weekday::Mon),
                },
                "custom" => Frequency::Custom { days },
                _ => Frequency::Daily,
            };
        });
    });

    let toggle_day = move |day: Weekday| {
        schedule.update(|s| {
            if let Frequency::Custom { days } = &mut s.frequency {
                if let Some(idx) = days.iter().position(|d| *d == day) {
                    days.remove(idx);
                } else {
                    days.push(day);
                }
            }
        });
    };

    view! {
        <Shell step=3usize>
            <Panel>
                <PanelHeader>
                    <PanelTitle>"When should updates arrive?"</PanelTitle>
                    <PanelDescription>{move || schedule.get().summary()}</PanelDescription>
                </PanelHeader>
                <PanelBody>
                    <div class="flex flex-col gap-3">
                        {move || notice_view(schedule.get().validate().err().map(|e| e.to_string()))}
                        <ChoiceSelect
                            options=FREQUENCY_OPTIONS
                                .iter()
                                .map(|(v, l)| (v.to_string(), l.to_string()))
                                .collect()
                            selected=Signal::derive(move || {
                                frequency_key(&schedule.get().frequency).to_string()
                            })
                            on_change=on_frequency
                        />

                        {move || match schedule.get().frequency {
                            Frequency::Weekly { day } => view! {
                                <ChoiceSelect
                                    options=Weekday::iter()
                                        .map(|d| (d.to_string(), d.to_string()))
                                        .collect()
                                    selected=Signal::derive(move || day.to_string())
                                    on_change=Callback::new(move |v: String| {
                                        if let Ok(d) = Weekday::from_str(&v) {
                                            schedule.update(|s| s.frequency = Frequency::Weekly { day: d });
                                        }
                                    })
                                />
                            }.into_any(),
                            Frequency::Custom { days } => view! {
                                <div class="flex flex-wrap gap-3 text-sm">
                                    {Weekday::iter()
                                        .map(|d| {
                                            let checked = days.contains(&d);
                                            view! {
                                                <label class="inline-flex items-center gap-1">
                                                    <input
                                                        type="checkbox"
                                                        prop:checked=checked
                                                        on:change=move |_| toggle_day(d)
                                                    />
                                                    {d.to_string()}
                                                </label>
                                            }
                                        })
                                        .collect_view()}
                                </div>
                            }.into_any(),
                            _ => ().into_any(),
                        }}

                        <div class="flex gap-2">
                            <TextField value=time placeholder="HH:MM" />
                            <TextField value=timezone placeholder="Timezone, e.g. Europe/Paris" />
                        </div>
                    </div>
                </PanelBody>
                <PanelFooter>
                    <span></span>
                    {next_step(3)}
                </PanelFooter>
            </Panel>
        </Shell>
    }
}

#[component]
pub fn ReviewPage() -> impl IntoView {
    let app_state = expect_context::<AppContext>();
    let saved: RwSignal<bool> = RwSignal::new(false);

    let payload = Memo::new(move |_| {
        let selection = app_state.0.selection.get();
        let research = app_state.0.research.get();
        let trackers = app_state.0.trackers.get();
        let schedule = app_state.0.schedule.get();
        PreferencesPayload::assemble(&selection, &research, &trackers, &schedule)
            .map_err(|e| e.to_string())
    });

    let on_save = move |_| {
        if let Ok(p) = payload.get_untracked() {
            save_profile(&p.to_profile());
            log::info!(
                "saved profile: {} topics, {} trackers",
                p.topics.len(),
                p.trackers.len()
            );
            saved.set(true);
        }
    };

    view! {
        <Shell step=4usize>
            <Panel>
                <PanelHeader>
                    <PanelTitle>"Review"</PanelTitle>
                    <PanelDescription>"Your preferences are saved on this device."</PanelDescription>
                </PanelHeader>
                <PanelBody>
                    {move || match payload.get() {
                        Ok(p) => {
                            let json = serde_json::to_string_pretty(&p).unwrap_or_default();
                            view! {
                                <div class="flex flex-col gap-2 text-sm">
                                    <div>{format!("{} topics, {} research topics, {} trackers", p.topics.len(), p.research_topics.len(), p.trackers.len())}</div>
                                    <div class="text-muted-foreground">{p.schedule.summary()}</div>
                                    <pre class="overflow-x-auto rounded-md bg-muted p-3 text-[11px]">{json}</pre>
                                </div>
                            }.into_any()
                        }
                        Err(e) => view! { <Notice>{e}</Notice> }.into_any(),
                    }}
                </PanelBody>
                <PanelFooter>
                    <span class="text-xs text-muted-foreground">
                        {move || if saved.get() { "Saved on this device." } else { "" }}
                    </span>
                    <button
                        type="button"
                        class="text-xs text-muted-foreground"
                        on:click=move |_| {
                            clear_profile();
                            saved.set(false);
                        }
                    >
                        "Forget saved preferences"
                    </button>
                    <button
                        type="button"
                        class="rounded-md bg-primary px-4 py-2 text-sm text-primary-foreground disabled:opacity-50"
                        disabled=move || payload.with(|p| p.is_err())
                        on:click=on_save
                    >
                        "Save preferences"
                    </button>
                </PanelFooter>
            </Panel>
        </Shell>
    }
}
