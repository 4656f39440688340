use std::collections::HashSet;

pub struct TuiState {
    pub tab_index: usize,
    pub show_help: bool,
    pub show_legend: bool,
    /// Layer indices hidden in the current chart, toggled with the digit keys.
    pub hidden_layers: HashSet<usize>,
}

impl TuiState {
    pub fn next_tab(&mut self, tabs: usize) {
        if tabs > 0 {
            self.tab_index = (self.tab_index + 1) % tabs;
            self.hidden_layers.clear();
        }
    }

    pub fn previous_tab(&mut self, tabs: usize) {
        if tabs > 0 {
            self.tab_index = if self.tab_index == 0 { tabs - 1 } else { self.tab_index - 1 };
            self.hidden_layers.clear();
        }
    }

    pub fn toggle_layer(&mut self, layer: usize) {
        if !self.hidden_layers.remove(&layer) {
            self.hidden_layers.insert(layer);
        }
    }
}

impl Default for TuiState {
    fn default() -> Self {
        Self {
            tab_index: 0,
            show_help: false,
            show_legend: true,
            hidden_layers: HashSet::new(),
        }
    }
}
