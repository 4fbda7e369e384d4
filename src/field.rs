//! The field engine: wires the per-keystroke pipeline to a host-owned
//! state container.
//!
//! The engine itself is stateless between calls; everything it knows is
//! recomputed from the raw text, the configuration and the state handle
//! passed into each call. Hosts own the state container and the event
//! wiring (focus, clicks, key events) and call the `handle_*` methods
//! from their listeners.

use crate::consts::{DEFAULT_DISPLAY_FORMAT, DEFAULT_RANGE_SEPARATOR};
use crate::edit::{reduce_backspace, strip_invalid};
use crate::format::format_while_typing;
use crate::parse::evaluate;
use crate::value::SelectedRange;
use crate::CalendarDate;

/// Host-supplied configuration, constant for the engine's lifetime
/// (replace the engine to change it).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldOptions {
    /// Locale display pattern, e.g. `"MM/DD/YYYY"`
    pub display_format: String,
    /// Single-date mode instead of range mode
    pub as_single: bool,
    /// Text between the two halves of a range
    pub separator: String,
    /// Placeholder override; derived from the pattern when `None`
    pub placeholder: Option<String>,
    /// A read-only field ignores edits
    pub read_only: bool,
    /// A disabled field ignores edits
    pub disabled: bool,
}

impl Default for FieldOptions {
    fn default() -> Self {
        Self {
            display_format: DEFAULT_DISPLAY_FORMAT.to_owned(),
            as_single: false,
            separator: DEFAULT_RANGE_SEPARATOR.to_owned(),
            placeholder: None,
            read_only: false,
            disabled: false,
        }
    }
}

/// The shared state container the engine writes to. Implemented by the
/// host; [`MemoryField`] is the reference implementation.
///
/// Calling the `change_*` mutators is the engine's only externally
/// observable effect besides its return values.
pub trait FieldState {
    /// Text currently shown in the field
    fn input_text(&self) -> &str;
    /// Current hover-preview date, if any
    fn day_hover(&self) -> Option<CalendarDate>;
    /// Last committed selection, if any
    fn selection(&self) -> Option<SelectedRange>;

    fn change_input_text(&mut self, text: String);
    fn change_day_hover(&mut self, hover: Option<CalendarDate>);
    fn change_selection(&mut self, selection: Option<SelectedRange>);

    /// Request that the host close the picker popover. No-op by default;
    /// hosts without a popover need not care.
    fn hide_picker(&mut self) {}
}

/// In-memory [`FieldState`] for hosts without their own container, and
/// for tests.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryField {
    input_text: String,
    day_hover: Option<CalendarDate>,
    selection: Option<SelectedRange>,
    picker_hidden: bool,
}

impl MemoryField {
    pub fn new() -> Self {
        Self::default()
    }

    /// True after `hide_picker` was requested
    pub const fn picker_hidden(&self) -> bool {
        self.picker_hidden
    }
}

impl FieldState for MemoryField {
    fn input_text(&self) -> &str {
        &self.input_text
    }

    fn day_hover(&self) -> Option<CalendarDate> {
        self.day_hover
    }

    fn selection(&self) -> Option<SelectedRange> {
        self.selection
    }

    fn change_input_text(&mut self, text: String) {
        self.input_text = text;
    }

    fn change_day_hover(&mut self, hover: Option<CalendarDate>) {
        self.day_hover = hover;
    }

    fn change_selection(&mut self, selection: Option<SelectedRange>) {
        self.selection = selection;
    }

    fn hide_picker(&mut self) {
        self.picker_hidden = true;
    }
}

/// The live formatting/parsing engine for one text field.
#[derive(Debug, Clone, Default)]
pub struct DateField {
    options: FieldOptions,
}

impl DateField {
    pub const fn new(options: FieldOptions) -> Self {
        Self { options }
    }

    pub const fn options(&self) -> &FieldOptions {
        &self.options
    }

    /// Placeholder text for an empty field: the display pattern itself,
    /// doubled around the separator in range mode.
    pub fn placeholder(&self) -> String {
        if let Some(placeholder) = &self.options.placeholder {
            return placeholder.clone();
        }
        if self.options.as_single {
            self.options.display_format.clone()
        } else {
            format!(
                "{} {} {}",
                self.options.display_format, self.options.separator, self.options.display_format
            )
        }
    }

    /// One full pass over a change event: sanitize the typed text, decide
    /// whether it commits, then store the reformatted display text.
    ///
    /// Invalid text never reaches the selection; it only flows back into
    /// the field so the user can keep typing. Mutation order on a commit
    /// matches the host contract: selection, then hover, then text.
    pub fn handle_change<S: FieldState>(&self, typed_text: &str, state: &mut S) {
        if self.options.disabled || self.options.read_only {
            return;
        }

        let cleaned = strip_invalid(typed_text, &self.options.display_format, &self.options.separator);

        if let Some(commit) = evaluate(
            &cleaned,
            &self.options.display_format,
            self.options.as_single,
            &self.options.separator,
        ) {
            state.change_selection(Some(commit.value));
            state.change_day_hover(Some(commit.hover));
        }

        state.change_input_text(format_while_typing(
            &cleaned,
            &self.options.display_format,
            self.options.as_single,
            &self.options.separator,
        ));
    }

    /// Delete-key handler: replaces the field text with the smart
    /// backspace reduction of the current text. The host must suppress
    /// the native deletion.
    pub fn handle_backspace<S: FieldState>(&self, state: &mut S) {
        if self.options.disabled || self.options.read_only {
            return;
        }
        let reduced = reduce_backspace(state.input_text());
        state.change_input_text(reduced);
    }

    /// Enter-key handler: asks the host to close the picker.
    pub fn handle_enter<S: FieldState>(&self, state: &mut S) {
        state.hide_picker();
    }

    /// Toggle-button activation: a filled field is cleared (text, then
    /// hover, then selection); an empty field is left for the host to
    /// focus.
    pub fn handle_toggle<S: FieldState>(&self, state: &mut S) {
        if state.input_text().is_empty() {
            return;
        }
        state.change_input_text(String::new());
        if state.day_hover().is_some() {
            state.change_day_hover(None);
        }
        if state.selection().is_some() {
            state.change_selection(None);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> CalendarDate {
        s.parse().unwrap()
    }

    fn type_into(field: &DateField, state: &mut MemoryField, keys: &str) {
        for key in keys.chars() {
            let typed = format!("{}{}", state.input_text(), key);
            field.handle_change(&typed, state);
        }
    }

    fn single_field() -> DateField {
        DateField::new(FieldOptions {
            display_format: "MM/DD/YYYY".to_owned(),
            as_single: true,
            ..FieldOptions::default()
        })
    }

    fn range_field() -> DateField {
        DateField::new(FieldOptions {
            display_format: "MM/DD/YYYY".to_owned(),
            ..FieldOptions::default()
        })
    }

    #[test]
    fn typing_a_single_date_formats_and_commits() {
        let field = single_field();
        let mut state = MemoryField::new();

        type_into(&field, &mut state, "01012023");

        assert_eq!(state.input_text(), "01/01/2023");
        let selection = state.selection().unwrap();
        assert_eq!(selection.start_date(), date("2023-01-01"));
        assert_eq!(selection.end_date(), date("2023-01-01"));
        assert_eq!(state.day_hover(), Some(date("2023-01-01")));
    }

    #[test]
    fn typing_a_range_commits_with_hover_before_end() {
        let field = range_field();
        let mut state = MemoryField::new();

        type_into(&field, &mut state, "0101202301052023");

        assert_eq!(state.input_text(), "01/01/2023 ~ 01/05/2023");
        let selection = state.selection().unwrap();
        assert_eq!(selection.start_date(), date("2023-01-01"));
        assert_eq!(selection.end_date(), date("2023-01-05"));
        assert_eq!(state.day_hover(), Some(date("2023-01-04")));
    }

    #[test]
    fn reversed_range_formats_but_never_commits() {
        let field = range_field();
        let mut state = MemoryField::new();

        type_into(&field, &mut state, "0105202301012023");

        assert_eq!(state.input_text(), "01/05/2023 ~ 01/01/2023");
        assert_eq!(state.selection(), None);
        assert_eq!(state.day_hover(), None);
    }

    #[test]
    fn invalid_text_is_preserved_without_commit() {
        let field = single_field();
        let mut state = MemoryField::new();

        type_into(&field, &mut state, "1345");

        assert_eq!(state.input_text(), "13/45");
        assert_eq!(state.selection(), None);
    }

    #[test]
    fn commit_survives_later_edits() {
        let field = single_field();
        let mut state = MemoryField::new();

        type_into(&field, &mut state, "01012023");
        let committed = state.selection();
        assert!(committed.is_some());

        // Backspace invalidates the text; the last commit stays
        field.handle_backspace(&mut state);
        field.handle_change(&state.input_text().to_owned(), &mut state);
        assert_eq!(state.selection(), committed);
    }

    #[test]
    fn backspace_deletes_one_component() {
        let field = range_field();
        let mut state = MemoryField::new();
        state.change_input_text("01/01/2023 ~ 01/0".to_owned());

        field.handle_backspace(&mut state);
        assert_eq!(state.input_text(), "01/01/2023 ~ 01");

        field.handle_backspace(&mut state);
        assert_eq!(state.input_text(), "01/01/2023 ~ 0");
    }

    #[test]
    fn typed_garbage_is_stripped_before_formatting() {
        let field = single_field();
        let mut state = MemoryField::new();

        field.handle_change("01a/01/2x023", &mut state);
        assert_eq!(state.input_text(), "01/01/2023");
        assert!(state.selection().is_some());
    }

    #[test]
    fn disabled_and_read_only_ignore_edits() {
        for options in [
            FieldOptions {
                disabled: true,
                ..FieldOptions::default()
            },
            FieldOptions {
                read_only: true,
                ..FieldOptions::default()
            },
        ] {
            let field = DateField::new(options);
            let mut state = MemoryField::new();
            field.handle_change("01012023", &mut state);
            field.handle_backspace(&mut state);
            assert_eq!(state, MemoryField::new());
        }
    }

    #[test]
    fn toggle_clears_a_filled_field() {
        let field = single_field();
        let mut state = MemoryField::new();
        type_into(&field, &mut state, "01012023");

        field.handle_toggle(&mut state);
        assert_eq!(state.input_text(), "");
        assert_eq!(state.day_hover(), None);
        assert_eq!(state.selection(), None);
    }

    #[test]
    fn toggle_on_empty_field_changes_nothing() {
        let field = single_field();
        let mut state = MemoryField::new();
        field.handle_toggle(&mut state);
        assert_eq!(state, MemoryField::new());
    }

    #[test]
    fn enter_requests_picker_close() {
        let field = single_field();
        let mut state = MemoryField::new();
        assert!(!state.picker_hidden());
        field.handle_enter(&mut state);
        assert!(state.picker_hidden());
    }

    #[test]
    fn placeholder_derivation() {
        assert_eq!(single_field().placeholder(), "MM/DD/YYYY");
        assert_eq!(range_field().placeholder(), "MM/DD/YYYY ~ MM/DD/YYYY");

        let field = DateField::new(FieldOptions {
            placeholder: Some("pick a date".to_owned()),
            ..FieldOptions::default()
        });
        assert_eq!(field.placeholder(), "pick a date");
    }

    #[test]
    fn iso_pattern_end_to_end() {
        let field = DateField::new(FieldOptions {
            display_format: "YYYY-MM-DD".to_owned(),
            separator: "/".to_owned(),
            ..FieldOptions::default()
        });
        let mut state = MemoryField::new();

        type_into(&field, &mut state, "2023010120230105");

        assert_eq!(state.input_text(), "2023-01-01 / 2023-01-05");
        let selection = state.selection().unwrap();
        assert_eq!(selection.start_date(), date("2023-01-01"));
        assert_eq!(selection.end_date(), date("2023-01-05"));
    }
}
