//! Per-row mutations on the admin tables: busy tracking and the
//! confirm / run / alert / refetch sequence.

use contracts::domain::common::RecordId;
use contracts::shared::database_error::DatabaseError;
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::collections::HashMap;
use std::future::Future;

use crate::shared::icons::icon;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordAction {
    MarkFixed,
    MarkSpam,
    MarkRead,
    MarkPending,
    Delete,
}

impl RecordAction {
    pub fn label(&self) -> &'static str {
        match self {
            RecordAction::MarkFixed => "Fixed",
            RecordAction::MarkSpam => "Spam",
            RecordAction::MarkRead => "Read",
            RecordAction::MarkPending => "Pending",
            RecordAction::Delete => "Delete",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            RecordAction::MarkFixed => "Mark as Fixed",
            RecordAction::MarkSpam => "Mark as Spam",
            RecordAction::MarkRead => "Mark as Read",
            RecordAction::MarkPending => "Mark as Pending",
            RecordAction::Delete => "Delete",
        }
    }

    fn icon_name(&self) -> &'static str {
        match self {
            RecordAction::MarkFixed => "check",
            RecordAction::MarkSpam => "alert",
            RecordAction::MarkRead => "eye",
            RecordAction::MarkPending => "clock",
            RecordAction::Delete => "delete",
        }
    }

    fn css_modifier(&self) -> &'static str {
        match self {
            RecordAction::MarkFixed => "row-action--success",
            RecordAction::MarkSpam => "row-action--warning",
            RecordAction::MarkRead => "row-action--info",
            RecordAction::MarkPending => "row-action--pending",
            RecordAction::Delete => "row-action--danger",
        }
    }

    pub fn needs_confirmation(&self) -> bool {
        matches!(self, RecordAction::Delete)
    }
}

/// Actions currently running, at most one per row
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RowActionState {
    pending: HashMap<RecordId, RecordAction>,
}

impl RowActionState {
    /// Mark `action` as running on `row`; refused while that row is busy.
    pub fn try_begin(&mut self, row: &RecordId, action: RecordAction) -> bool {
        if self.pending.contains_key(row) {
            return false;
        }
        self.pending.insert(row.clone(), action);
        true
    }

    pub fn finish(&mut self, row: &RecordId) {
        self.pending.remove(row);
    }

    pub fn is_row_busy(&self, row: &RecordId) -> bool {
        self.pending.contains_key(row)
    }

    pub fn is_running(&self, row: &RecordId, action: RecordAction) -> bool {
        self.pending.get(row) == Some(&action)
    }
}

/// Run one row action: confirm if needed, call the gateway, alert on
/// failure, then resynchronise the list.
///
/// `on_done` must not depend on the table's own scope: the table can be
/// unmounted before the mutation settles.
pub fn run_row_action<Fut>(
    state: RwSignal<RowActionState>,
    row: RecordId,
    action: RecordAction,
    confirm_message: &str,
    confirm: impl FnOnce(&str) -> bool,
    mutation: Fut,
    on_done: impl FnOnce() + 'static,
) where
    Fut: Future<Output = Result<(), DatabaseError>> + 'static,
{
    if action.needs_confirmation() && !confirm(confirm_message) {
        return;
    }

    let started = state.try_update(|s| s.try_begin(&row, action)).unwrap_or(false);
    if !started {
        return;
    }

    spawn_local(async move {
        let result = mutation.await;
        complete_row_action(state, &row, action, result, on_done);
    });
}

fn complete_row_action(
    state: RwSignal<RowActionState>,
    row: &RecordId,
    action: RecordAction,
    result: Result<(), DatabaseError>,
    on_done: impl FnOnce(),
) {
    if let Err(e) = &result {
        log::warn!("{:?} on {} failed: {}", action, row, e);
        alert(&e.message);
    }
    state.try_update(|s| s.finish(row));
    // Resync from the backend whatever the outcome
    on_done();
}

/// Blocking browser confirmation dialog
pub fn window_confirm(message: &str) -> bool {
    web_sys::window()
        .and_then(|w| w.confirm_with_message(message).ok())
        .unwrap_or(false)
}

fn alert(message: &str) {
    if let Some(w) = web_sys::window() {
        let _ = w.alert_with_message(message);
    }
}

/// Action buttons of one row
#[component]
pub fn RowActionButtons(
    row: RecordId,
    actions: Vec<RecordAction>,
    state: RwSignal<RowActionState>,
    on_action: Callback<(RecordId, RecordAction)>,
    on_details: Callback<()>,
) -> impl IntoView {
    let row_busy = {
        let row = row.clone();
        move || state.with(|s| s.is_row_busy(&row))
    };

    let buttons = actions
        .into_iter()
        .map(|action| {
            let row_for_click = row.clone();
            let row_for_spinner = row.clone();
            let row_busy = row_busy.clone();
            view! {
                <button
                    type="button"
                    class=format!("row-action {}", action.css_modifier())
                    title=action.title()
                    disabled=row_busy
                    on:click=move |_| on_action.run((row_for_click.clone(), action))
                >
                    {move || {
                        if state.with(|s| s.is_running(&row_for_spinner, action)) {
                            view! { <span class="row-action__spinner"></span> }.into_any()
                        } else {
                            icon(action.icon_name())
                        }
                    }}
                    <span class="row-action__label">{action.label()}</span>
                </button>
            }
        })
        .collect_view();

    view! {
        <div class="row-actions">
            <button
                type="button"
                class="row-action row-action--neutral"
                title="View details"
                on:click=move |_| on_details.run(())
            >
                {icon("eye")}
                <span class="row-action__label">"Details"</span>
            </button>
            {buttons}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use leptos::reactive::owner::Owner;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn one_action_per_row_at_a_time() {
        let mut state = RowActionState::default();
        let a = RecordId::new("a");
        let b = RecordId::new("b");

        assert!(state.try_begin(&a, RecordAction::MarkFixed));
        assert!(!state.try_begin(&a, RecordAction::Delete));
        assert!(state.is_row_busy(&a));
        assert!(state.is_running(&a, RecordAction::MarkFixed));
        assert!(!state.is_running(&a, RecordAction::Delete));

        // Other rows are unaffected
        assert!(state.try_begin(&b, RecordAction::Delete));

        state.finish(&a);
        assert!(!state.is_row_busy(&a));
        assert!(state.try_begin(&a, RecordAction::MarkSpam));
    }

    #[test]
    fn only_delete_asks_for_confirmation() {
        assert!(RecordAction::Delete.needs_confirmation());
        assert!(!RecordAction::MarkFixed.needs_confirmation());
        assert!(!RecordAction::MarkPending.needs_confirmation());
    }

    #[test]
    fn declined_delete_leaves_records_untouched() {
        let owner = Owner::new();
        owner.with(|| {
            let state = RwSignal::new(RowActionState::default());
            let polled = Rc::new(Cell::new(false));
            let refetched = Rc::new(Cell::new(false));
            let mut asked = None;

            let polled_in = polled.clone();
            let refetched_in = refetched.clone();
            run_row_action(
                state,
                RecordId::new("a"),
                RecordAction::Delete,
                "Delete this record?",
                |message| {
                    asked = Some(message.to_string());
                    false
                },
                async move {
                    polled_in.set(true);
                    Ok(())
                },
                move || refetched_in.set(true),
            );

            assert_eq!(asked.as_deref(), Some("Delete this record?"));
            assert!(!polled.get());
            assert!(!refetched.get());
            assert!(!state.with_untracked(|s| s.is_row_busy(&RecordId::new("a"))));
        });
    }

    #[test]
    fn busy_row_refuses_a_second_action() {
        let owner = Owner::new();
        owner.with(|| {
            let row = RecordId::new("a");
            let state = RwSignal::new(RowActionState::default());
            state.update(|s| {
                s.try_begin(&row, RecordAction::MarkFixed);
            });
            let polled = Rc::new(Cell::new(false));
            let polled_in = polled.clone();

            run_row_action(
                state,
                row.clone(),
                RecordAction::MarkRead,
                "",
                |_| panic!("status changes are not confirmed"),
                async move {
                    polled_in.set(true);
                    Ok(())
                },
                || {},
            );

            assert!(!polled.get());
            assert!(state.with_untracked(|s| s.is_running(&row, RecordAction::MarkFixed)));
        });
    }

    #[test]
    fn completion_refetches_after_the_table_is_unmounted() {
        let dashboard = Owner::new();
        dashboard.with(|| {
            let row = RecordId::new("a");
            let state = RwSignal::new(RowActionState::default());
            let refetches = RwSignal::new(0u32);
            state.update(|s| {
                s.try_begin(&row, RecordAction::MarkFixed);
            });

            // The table starts the action, then a tab switch disposes it
            let table = dashboard.child();
            let on_done = table.with(|| move || refetches.update(|n| *n += 1));
            table.cleanup();

            complete_row_action(state, &row, RecordAction::MarkFixed, Ok(()), on_done);

            assert_eq!(refetches.get_untracked(), 1);
            assert!(!state.with_untracked(|s| s.is_row_busy(&row)));
        });
    }
}
