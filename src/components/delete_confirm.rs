//! Delete Confirm Component
//!
//! Two-step delete for a registry record: the first click arms the
//! prompt, the second one fires the request.

use leptos::prelude::*;

/// Prompt shown once armed, e.g. "Delete client?"
fn confirm_prompt(subject: &str) -> String {
    format!("Delete {}?", subject.to_lowercase())
}

/// Inline delete confirmation for one record
///
/// # Arguments
/// * `subject` - Record label ("Client", "Item", "Order") used in the prompt
/// * `on_confirm` - Runs the delete once the user confirms
#[component]
pub fn DeleteConfirm(
    subject: &'static str,
    #[prop(into)] on_confirm: Callback<()>,
) -> impl IntoView {
    let armed = RwSignal::new(false);
    let prompt = confirm_prompt(subject);

    move || {
        if !armed.get() {
            return view! {
                <button
                    type="button"
                    class="delete-btn"
                    title=prompt.clone()
                    on:click=move |ev| {
                        ev.stop_propagation();
                        armed.set(true);
                    }
                >
                    "Delete"
                </button>
            }
            .into_any();
        }

        view! {
            <span class="delete-confirm">
                <span class="delete-confirm-text">{prompt.clone()}</span>
                <button
                    type="button"
                    class="confirm-btn"
                    on:click=move |ev| {
                        ev.stop_propagation();
                        armed.set(false);
                        on_confirm.run(());
                    }
                >
                    "Yes"
                </button>
                <button
                    type="button"
                    class="cancel-btn"
                    on:click=move |ev| {
                        ev.stop_propagation();
                        armed.set(false);
                    }
                >
                    "No"
                </button>
            </span>
        }
        .into_any()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Client, Entity, Item, Order};

    #[test]
    fn test_prompt_names_the_record() {
        assert_eq!(confirm_prompt(Client::LABEL), "Delete client?");
        assert_eq!(confirm_prompt(Item::LABEL), "Delete item?");
        assert_eq!(confirm_prompt(Order::LABEL), "Delete order?");
    }
}
