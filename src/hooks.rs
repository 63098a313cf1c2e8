use gloo_timers::callback::Interval;
use mile_tracker::config::COUNTDOWN_TICK_MS;
use mile_tracker::Countdown;
use std::rc::Rc;
use web_sys::HtmlInputElement;
use yew::prelude::*;

fn now_ms() -> i64 {
    js_sys::Date::now() as i64
}

/// Live countdown toward `target_ms`, recomputed once per tick.
///
/// The interval is owned by the effect and dropped (cancelling it) when the
/// component unmounts or the target changes.
#[hook]
pub fn use_countdown(target_ms: i64) -> Countdown {
    let countdown = use_state_eq(|| Countdown::between(now_ms(), target_ms));

    {
        let countdown = countdown.clone();
        use_effect_with(target_ms, move |&target| {
            countdown.set(Countdown::between(now_ms(), target));
            let ticker = Interval::new(COUNTDOWN_TICK_MS, move || {
                countdown.set(Countdown::between(now_ms(), target));
            });
            move || drop(ticker)
        });
    }

    *countdown
}

/// Holds the state and callbacks for a validated input field.
#[derive(Clone)]
pub struct ValidatedInput<T: Clone + PartialEq + 'static> {
    /// The current text content of the input field.
    pub text: String,
    /// An optional error message if validation failed.
    pub error: Option<String>,
    /// Callback for the text input's `oninput` event. Updates the internal text state.
    pub on_text_input: Callback<InputEvent>,
    /// Parse and validate the current text; on success the value is passed
    /// to `on_valid` and the text is rewritten in canonical form.
    pub on_commit: Callback<()>,
    /// Replace the text with a value loaded from elsewhere, clearing errors.
    pub set_value: Callback<T>,
}

/// Custom hook to manage state for a validated input field.
#[hook]
pub fn use_validated_input<T: Clone + PartialEq + std::fmt::Display + 'static>(
    initial_text: String,
    parse_and_validate: Rc<dyn Fn(&str) -> Result<T, String>>,
    on_valid: Callback<T>,
) -> ValidatedInput<T> {
    let text_state_handle: UseStateHandle<String> = use_state(|| initial_text);
    let error_state_handle: UseStateHandle<Option<String>> = use_state(|| None::<String>);

    let on_text_input = {
        let text_setter = text_state_handle.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            text_setter.set(input.value());
        })
    };

    let on_commit = {
        let text_handle = text_state_handle.clone();
        let error_setter = error_state_handle.clone();
        Callback::from(move |_| match parse_and_validate(&text_handle) {
            Ok(parsed_val) => {
                text_handle.set(parsed_val.to_string());
                error_setter.set(None);
                on_valid.emit(parsed_val);
            }
            Err(err_msg) => {
                error_setter.set(Some(err_msg));
            }
        })
    };

    let set_value = {
        let text_setter = text_state_handle.clone();
        let error_setter = error_state_handle.clone();
        Callback::from(move |new_val: T| {
            text_setter.set(new_val.to_string());
            error_setter.set(None);
        })
    };

    ValidatedInput {
        text: (*text_state_handle).clone(),
        error: (*error_state_handle).clone(),
        on_text_input,
        on_commit,
        set_value,
    }
}
