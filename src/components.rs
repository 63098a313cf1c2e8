//! Pure Yew view components for the mileage tracker page.
//!
//! Each component renders only from its props; the list and text outputs are
//! rebuilt from scratch on every render.

use mile_tracker::config::{LOCKED_MILES_PLACEHOLDER, LOCKED_SAVE_TITLE, MILESTONE_CAPTION};
use mile_tracker::{Countdown, LiveStatus, Milestone, ProgressState};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct LiveBadgeProps {
    pub status: LiveStatus,
}

#[function_component(LiveBadge)]
pub fn live_badge(props: &LiveBadgeProps) -> Html {
    let display = if props.status.is_live() {
        "display: inline-flex"
    } else {
        "display: none"
    };
    html! {
        <span id="liveBadge" class="pill live" style={display}>{ "LIVE" }</span>
    }
}

#[derive(Properties, PartialEq)]
pub struct StreamPanelProps {
    /// Saved URL, used as the iframe source.
    pub url: AttrValue,
    /// Text currently in the URL input.
    pub draft: AttrValue,
    pub oninput: Callback<InputEvent>,
    pub onsave: Callback<MouseEvent>,
}

#[function_component(StreamPanel)]
pub fn stream_panel(props: &StreamPanelProps) -> Html {
    html! {
        <section class="card stream">
            <div class="stream-embed">
                <iframe id="streamFrame"
                    src={props.url.clone()}
                    title="Live stream"
                    allow="autoplay; fullscreen"
                />
            </div>
            <div class="form-group">
                <input id="streamUrl"
                    type="url"
                    placeholder="Paste stream embed URL"
                    value={props.draft.clone()}
                    oninput={props.oninput.clone()}
                />
                <button id="saveStream" onclick={props.onsave.clone()}>{ "Save" }</button>
            </div>
        </section>
    }
}

#[derive(Properties, PartialEq)]
pub struct ProgressSummaryProps {
    pub progress: ProgressState,
}

/// Miles total, percent text and the fill bar.
#[function_component(ProgressSummary)]
pub fn progress_summary(props: &ProgressSummaryProps) -> Html {
    let progress = &props.progress;
    html! {
        <div class="progress-summary">
            <div class="miles">
                <span id="currentMilesText">{ progress.miles_label() }</span>
                { format!(" / {} miles", mile_tracker::utils::group_thousands(progress.goal().goal_miles)) }
            </div>
            <div id="percentText" class="percent">{ progress.percent_label() }</div>
            <div class="bar">
                <div id="barFill" class="bar-fill" style={format!("width: {}", progress.bar_width())} />
            </div>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct MilestoneListProps {
    pub milestones: Vec<Milestone>,
}

#[function_component(MilestoneList)]
pub fn milestone_list(props: &MilestoneListProps) -> Html {
    html! {
        <ol id="milestoneList" class="milestones">
            { props.milestones.iter().map(render_milestone).collect::<Html>() }
        </ol>
    }
}

/// Renders a single milestone row
fn render_milestone(milestone: &Milestone) -> Html {
    let opacity = if milestone.unlocked { "opacity: 1" } else { "opacity: .65" };
    html! {
        <li key={milestone.index} class="milestone">
            <div>
                <div class="milestone-heading">{ milestone.heading() }</div>
                <div class="small">{ MILESTONE_CAPTION }</div>
            </div>
            <div class="pill" style={opacity}>{ milestone.status_label() }</div>
        </li>
    }
}

#[derive(Properties, PartialEq)]
pub struct MilesEditorProps {
    /// Editing is disabled when the miles come from the official file.
    pub locked: bool,
    pub text: AttrValue,
    pub error: Option<AttrValue>,
    pub oninput: Callback<InputEvent>,
    pub onsave: Callback<MouseEvent>,
}

#[function_component(MilesEditor)]
pub fn miles_editor(props: &MilesEditorProps) -> Html {
    if props.locked {
        return html! {
            <div class="form-group locked">
                <input id="currentMiles"
                    type="text"
                    disabled=true
                    placeholder={LOCKED_MILES_PLACEHOLDER}
                    style="opacity: 0.6; cursor: not-allowed"
                />
                <button id="saveMiles"
                    disabled=true
                    title={LOCKED_SAVE_TITLE}
                    style="opacity: 0.6; cursor: not-allowed"
                >{ "Save" }</button>
            </div>
        };
    }

    html! {
        <div class="form-group">
            <input id="currentMiles"
                type="text"
                inputmode="numeric"
                value={props.text.clone()}
                oninput={props.oninput.clone()}
            />
            <button id="saveMiles" onclick={props.onsave.clone()}>{ "Save" }</button>
            if let Some(err) = &props.error {
                <div class="input-error">{ err.clone() }</div>
            }
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct CountdownDisplayProps {
    pub countdown: Countdown,
    pub schedule: AttrValue,
}

#[function_component(CountdownDisplay)]
pub fn countdown_display(props: &CountdownDisplayProps) -> Html {
    let class = if props.countdown.is_live() {
        "countdown live"
    } else {
        "countdown"
    };
    html! {
        <div class="countdown-box">
            <div id="countdown" class={class}>{ props.countdown.to_string() }</div>
            <div class="small schedule">{ props.schedule.clone() }</div>
        </div>
    }
}
