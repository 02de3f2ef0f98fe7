#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActiveView {
    Today,
    Calendar,
    Summary,
    Profile,
}

impl ActiveView {
    pub fn next(self) -> Self {
        match self {
            ActiveView::Today => ActiveView::Calendar,
            ActiveView::Calendar => ActiveView::Summary,
            ActiveView::Summary => ActiveView::Profile,
            ActiveView::Profile => ActiveView::Today,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            ActiveView::Today => ActiveView::Profile,
            ActiveView::Calendar => ActiveView::Today,
            ActiveView::Summary => ActiveView::Calendar,
            ActiveView::Profile => ActiveView::Summary,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            ActiveView::Today => "Today",
            ActiveView::Calendar => "Calendar",
            ActiveView::Summary => "Summary",
            ActiveView::Profile => "Profile",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SummaryPeriod {
    Weekly,
    Monthly,
}

/// Lifecycle of an external renderer (calendar widget, chart widget).
/// Transitions are idempotent; the return value reports whether the call
/// actually changed state, which is what tells the owner to construct or
/// tear down the collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WidgetState {
    #[default]
    Absent,
    Active,
}

impl WidgetState {
    pub fn activate(&mut self) -> bool {
        if *self == WidgetState::Active {
            return false;
        }
        *self = WidgetState::Active;
        true
    }

    pub fn deactivate(&mut self) -> bool {
        if *self == WidgetState::Absent {
            return false;
        }
        *self = WidgetState::Absent;
        true
    }

    pub fn is_active(self) -> bool {
        self == WidgetState::Active
    }
}

/// Which lifecycle transitions a selection change caused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WidgetTransitions {
    pub calendar_constructed: bool,
    pub calendar_destroyed: bool,
    pub chart_constructed: bool,
    pub chart_destroyed: bool,
}

/// Holds the two selection fields and derives the widget lifecycles from
/// them: the calendar renderer lives exactly while the calendar view is
/// active, the chart renderer exactly while the weekly summary is shown.
#[derive(Debug)]
pub struct ViewCoordinator {
    active_view: ActiveView,
    summary_period: SummaryPeriod,
    calendar_widget: WidgetState,
    chart_widget: WidgetState,
}

impl Default for ViewCoordinator {
    fn default() -> Self {
        Self {
            active_view: ActiveView::Today,
            summary_period: SummaryPeriod::Weekly,
            calendar_widget: WidgetState::Absent,
            chart_widget: WidgetState::Absent,
        }
    }
}

impl ViewCoordinator {
    pub fn active_view(&self) -> ActiveView {
        self.active_view
    }

    pub fn summary_period(&self) -> SummaryPeriod {
        self.summary_period
    }

    pub fn calendar_widget(&self) -> WidgetState {
        self.calendar_widget
    }

    pub fn chart_widget(&self) -> WidgetState {
        self.chart_widget
    }

    pub fn select_view(&mut self, view: ActiveView) -> WidgetTransitions {
        self.active_view = view;
        self.sync_widgets()
    }

    pub fn select_period(&mut self, period: SummaryPeriod) -> WidgetTransitions {
        self.summary_period = period;
        self.sync_widgets()
    }

    /// True when a display-area resize must be forwarded to the chart
    /// collaborator.
    pub fn resize_reaches_chart(&self) -> bool {
        self.chart_widget.is_active()
    }

    fn sync_widgets(&mut self) -> WidgetTransitions {
        let mut transitions = WidgetTransitions::default();

        if self.active_view == ActiveView::Calendar {
            transitions.calendar_constructed = self.calendar_widget.activate();
        } else {
            transitions.calendar_destroyed = self.calendar_widget.deactivate();
        }

        let chart_wanted = self.active_view == ActiveView::Summary
            && self.summary_period == SummaryPeriod::Weekly;
        if chart_wanted {
            transitions.chart_constructed = self.chart_widget.activate();
        } else {
            transitions.chart_destroyed = self.chart_widget.deactivate();
        }

        transitions
    }
}

#[cfg(test)]
mod tests {
    use super::{ActiveView, SummaryPeriod, ViewCoordinator, WidgetState};

    #[test]
    fn calendar_widget_tracks_calendar_view() {
        let mut coordinator = ViewCoordinator::default();
        assert_eq!(coordinator.calendar_widget(), WidgetState::Absent);

        let transitions = coordinator.select_view(ActiveView::Calendar);
        assert!(transitions.calendar_constructed);
        assert_eq!(coordinator.calendar_widget(), WidgetState::Active);

        let transitions = coordinator.select_view(ActiveView::Today);
        assert!(transitions.calendar_destroyed);
        assert_eq!(coordinator.calendar_widget(), WidgetState::Absent);
    }

    #[test]
    fn reentering_a_view_does_not_construct_twice() {
        let mut coordinator = ViewCoordinator::default();
        coordinator.select_view(ActiveView::Calendar);
        let transitions = coordinator.select_view(ActiveView::Calendar);
        assert!(!transitions.calendar_constructed);
        assert!(!transitions.calendar_destroyed);
    }

    #[test]
    fn chart_needs_weekly_summary() {
        let mut coordinator = ViewCoordinator::default();
        let transitions = coordinator.select_view(ActiveView::Summary);
        assert!(transitions.chart_constructed);
        assert!(coordinator.resize_reaches_chart());

        let transitions = coordinator.select_period(SummaryPeriod::Monthly);
        assert!(transitions.chart_destroyed);
        assert!(!coordinator.resize_reaches_chart());

        let transitions = coordinator.select_period(SummaryPeriod::Weekly);
        assert!(transitions.chart_constructed);

        let transitions = coordinator.select_view(ActiveView::Profile);
        assert!(transitions.chart_destroyed);
        assert_eq!(coordinator.chart_widget(), WidgetState::Absent);
    }

    #[test]
    fn period_change_outside_summary_keeps_chart_absent() {
        let mut coordinator = ViewCoordinator::default();
        let transitions = coordinator.select_period(SummaryPeriod::Monthly);
        assert!(!transitions.chart_constructed);
        assert!(!transitions.chart_destroyed);
        assert_eq!(coordinator.chart_widget(), WidgetState::Absent);
    }

    #[test]
    fn idempotent_widget_state_transitions() {
        let mut state = WidgetState::default();
        assert!(state.activate());
        assert!(!state.activate());
        assert!(state.deactivate());
        assert!(!state.deactivate());
    }

    #[test]
    fn view_cycling_wraps_around() {
        let mut view = ActiveView::Today;
        for _ in 0..4 {
            view = view.next();
        }
        assert_eq!(view, ActiveView::Today);
        assert_eq!(ActiveView::Today.prev(), ActiveView::Profile);
    }
}
