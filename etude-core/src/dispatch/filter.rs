use etude_types::{DispatchResult, FilterAction, SessionState};

pub(super) fn dispatch_filter(action: &FilterAction, state: &mut SessionState) -> DispatchResult {
    let mut result = DispatchResult::none();

    let applied = match action {
        FilterAction::ToggleChordSet(set) => state.filters.toggle_chord_set(*set),
        FilterAction::ToggleKey(key) => state.filters.toggle_key(*key),
        FilterAction::ToggleClef(clef) => state.filters.toggle_clef(*clef),
    };

    if !applied {
        result.push_status("At least one entry per category must stay enabled");
    }

    result
}
