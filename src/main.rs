//! Mileage tracker page using Yew.
//! Wires UI components, state hooks, and side-effect logic.

use log::{error, info};
use mile_tracker::{
    config::{COUNTDOWN_TARGET_MS, MILES_SOURCE, SCHEDULE_LABEL},
    fetch::fetch_official_miles,
    logging, storage,
    utils::validate_miles,
    Goal, LiveStatus, MilesSource, ProgressState,
};
use std::rc::Rc;
use web_sys::HtmlInputElement;
use yew::prelude::*;

mod components;
mod hooks;

use components::{CountdownDisplay, LiveBadge, MilesEditor, MilestoneList, ProgressSummary, StreamPanel};
use hooks::{use_countdown, use_validated_input};

/// Load miles from the configured source of truth and publish them.
///
/// The official file is fetched once; any failure falls back to zero so the
/// page still renders.
fn load_current_miles(progress: UseStateHandle<ProgressState>, on_stored: Callback<u32>) {
    match MILES_SOURCE {
        MilesSource::OfficialFile => {
            wasm_bindgen_futures::spawn_local(async move {
                let miles = match fetch_official_miles().await {
                    Ok(miles) => {
                        info!("Official miles loaded: {}", miles);
                        miles
                    }
                    Err(e) => {
                        error!("{}", e);
                        0.0
                    }
                };
                progress.set(ProgressState::new(Goal::default(), miles));
            });
        }
        MilesSource::LocalStorage => {
            let miles = storage::load_stored_miles();
            info!("Stored miles loaded: {}", miles);
            progress.set(ProgressState::new(Goal::default(), miles as f64));
            on_stored.emit(miles);
        }
    }
}

/// Primary application component wiring state, effects, and UI elements.
#[function_component(App)]
fn app() -> Html {
    let progress = use_state(ProgressState::default);
    let stream_url = use_state(storage::load_stream_url);
    let stream_draft = use_state(|| (*stream_url).clone());
    let countdown = use_countdown(COUNTDOWN_TARGET_MS);
    let year = use_memo((), |_| js_sys::Date::new_0().get_full_year());

    let miles_input = {
        let progress = progress.clone();
        let on_valid = Callback::from(move |miles: u32| {
            storage::save_stored_miles(miles);
            info!("Saved miles: {}", miles);
            progress.set(ProgressState::new(Goal::default(), miles as f64));
        });
        use_validated_input(String::new(), Rc::new(validate_miles), on_valid)
    };

    // Load miles on mount
    {
        let progress = progress.clone();
        let set_miles_text = miles_input.set_value.clone();
        use_effect_with((), move |_| {
            load_current_miles(progress, set_miles_text);
        });
    }

    let on_stream_input = {
        let stream_draft = stream_draft.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            stream_draft.set(input.value());
        })
    };

    let on_stream_save = {
        let stream_url = stream_url.clone();
        let stream_draft = stream_draft.clone();
        Callback::from(move |_: MouseEvent| {
            let saved = storage::save_stream_url(&stream_draft);
            info!("Stream URL saved ({:?})", LiveStatus::from_stream_url(&saved));
            stream_draft.set(saved.clone());
            stream_url.set(saved);
        })
    };

    let on_miles_save = {
        let commit = miles_input.on_commit.clone();
        Callback::from(move |_: MouseEvent| commit.emit(()))
    };

    let live_status = LiveStatus::from_stream_url(&stream_url);

    html! {
        <div class="container">
            <header class="header">
                <h1>{ "Mile Tracker" }</h1>
                <LiveBadge status={live_status} />
            </header>

            <StreamPanel
                url={AttrValue::from((*stream_url).clone())}
                draft={AttrValue::from((*stream_draft).clone())}
                oninput={on_stream_input}
                onsave={on_stream_save}
            />

            <section class="card progress">
                <ProgressSummary progress={*progress} />
                <MilesEditor
                    locked={!MILES_SOURCE.is_editable()}
                    text={AttrValue::from(miles_input.text.clone())}
                    error={miles_input.error.clone().map(AttrValue::from)}
                    oninput={miles_input.on_text_input.clone()}
                    onsave={on_miles_save}
                />
            </section>

            <section class="card">
                <h2>{ "Milestones" }</h2>
                <MilestoneList milestones={progress.milestones()} />
            </section>

            <section class="card">
                <h2>{ "Next stream" }</h2>
                <CountdownDisplay countdown={countdown} schedule={SCHEDULE_LABEL} />
            </section>

            <footer class="footer small">
                { "© " }<span id="year">{ *year }</span>
            </footer>
        </div>
    }
}

/// Entry point: installs the panic hook and logger, then renders the App.
fn main() {
    console_error_panic_hook::set_once();
    logging::init(log::Level::Info);
    yew::Renderer::<App>::new().render();
}
