//! Cascading country → state → city selection
//!
//! The three dropdowns are modelled as [`SelectControl`] values. Changing an
//! ancestor selection always repopulates its dependents from the
//! [`LocationTable`], so the option set of the state control is exactly the
//! states of the selected country (and likewise for cities).

use serde::Serialize;

use crate::core::location::LocationTable;

/// A dropdown: its options, current selection and enabled flag
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SelectControl {
    pub options: Vec<String>,
    pub selected: Option<String>,
    pub enabled: bool,
}

impl SelectControl {
    fn populated(options: Vec<&str>) -> Self {
        Self {
            options: options.into_iter().map(String::from).collect(),
            selected: None,
            enabled: true,
        }
    }

    /// Clear options and selection, and disable the control
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Selected value, or the empty string
    pub fn value(&self) -> &str {
        self.selected.as_deref().unwrap_or("")
    }

    fn choose(&mut self, value: Option<&str>) {
        self.selected = value
            .filter(|v| self.enabled && self.options.iter().any(|o| o == v))
            .map(String::from);
    }
}

/// The three cascading location dropdowns
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LocationSelector {
    pub country: SelectControl,
    pub state: SelectControl,
    pub city: SelectControl,
}

impl LocationSelector {
    /// Fresh selector: countries listed, state and city disabled
    pub fn new(table: &LocationTable) -> Self {
        Self {
            country: SelectControl::populated(table.countries()),
            state: SelectControl::default(),
            city: SelectControl::default(),
        }
    }

    /// Select a country (or none) and repopulate the state control
    pub fn select_country(&mut self, table: &LocationTable, country: Option<&str>) {
        self.country.choose(country.filter(|c| !c.is_empty()));
        self.city.reset();

        match self.country.selected.as_deref() {
            Some(c) => {
                self.state = SelectControl::populated(table.states(c));
                log::trace!("country '{}' selected, {} states", c, self.state.options.len());
            }
            None => self.state.reset(),
        }
    }

    /// Select a state (or none) under the current country and repopulate cities
    pub fn select_state(&mut self, table: &LocationTable, state: Option<&str>) {
        self.state.choose(state.filter(|s| !s.is_empty()));

        match (self.country.selected.as_deref(), self.state.selected.as_deref()) {
            (Some(c), Some(s)) => {
                self.city = SelectControl::populated(table.cities(c, s));
                log::trace!("state '{}' selected, {} cities", s, self.city.options.len());
            }
            _ => self.city.reset(),
        }
    }

    /// Select a city among the current options; anything else clears it
    pub fn select_city(&mut self, city: Option<&str>) {
        self.city.choose(city.filter(|c| !c.is_empty()));
    }

    /// Restore the initial state
    pub fn reset(&mut self, table: &LocationTable) {
        *self = Self::new(table);
    }
}
