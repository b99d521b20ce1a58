//! Widget display text.
//!
//! Rendering is pure and idempotent: it reads the state, computes the live
//! count and the derived record, and produces the three lines of the widget.
//! It is safe to call on every refresh without coordination.

use chrono::NaiveDate;

use crate::state::CounterState;

/// The three rendered lines of the widget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetText {
    /// "Estou há 10 dias" / "Estamos há 1 mês"
    pub count_line: String,
    /// The user's label.
    pub label: String,
    /// "Meu record é 12 dias" / "Nosso record é 12 dias"
    pub record_line: String,
}

impl WidgetText {
    /// Joins the lines for plain-text surfaces.
    #[must_use]
    pub fn to_block(&self) -> String {
        format!("{}\n{}\n{}", self.count_line, self.label, self.record_line)
    }
}

/// Renders the widget text for the given state.
#[must_use]
pub fn render(state: &CounterState, today: NaiveDate) -> WidgetText {
    let count = state.live_count(today);
    let record = state.displayed_record(today);
    let unit = state.session.unit;

    let count_prefix = if state.session.is_plural {
        "Estamos há"
    } else {
        "Estou há"
    };
    let record_prefix = if state.session.is_plural {
        "Nosso record é"
    } else {
        "Meu record é"
    };

    WidgetText {
        count_line: format!("{count_prefix} {count} {}", unit.label(count)),
        label: state.session.label.clone(),
        record_line: format!("{record_prefix} {record} {}", unit.label(record)),
    }
}

/// Formats a date the way the editors show it.
#[must_use]
pub fn format_date(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::unit::CountUnit;

    use insta::assert_snapshot;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn base_state() -> CounterState {
        let mut state = CounterState::new(date(2024, 1, 1));
        state.record = 12;
        state
    }

    #[test]
    fn renders_singular_day_count() {
        let text = render(&base_state(), date(2024, 1, 11));
        assert_snapshot!(text.count_line, @"Estou há 10 dias");
        assert_snapshot!(text.label, @"Sem acidentes graves");
        assert_snapshot!(text.record_line, @"Meu record é 12 dias");
    }

    #[test]
    fn renders_plural_phrasing() {
        let mut state = base_state();
        state.session.is_plural = true;
        let text = render(&state, date(2024, 1, 11));
        assert_snapshot!(text.count_line, @"Estamos há 10 dias");
        assert_snapshot!(text.record_line, @"Nosso record é 12 dias");
    }

    #[test]
    fn pluralizes_on_exactly_one() {
        let text = render(&base_state(), date(2024, 1, 2));
        assert_snapshot!(text.count_line, @"Estou há 1 dia");
    }

    #[test]
    fn renders_month_unit() {
        let mut state = base_state();
        state.session.unit = CountUnit::Months;
        state.session.start_date = date(2024, 1, 15);
        state.record = 0;
        let text = render(&state, date(2024, 3, 10));
        assert_snapshot!(text.count_line, @"Estou há 1 mês");
        assert_snapshot!(text.record_line, @"Meu record é 1 mês");
    }

    #[test]
    fn record_line_shows_live_count_while_running() {
        let mut state = base_state();
        state.record = 3;
        let text = render(&state, date(2024, 1, 11));
        assert_snapshot!(text.record_line, @"Meu record é 10 dias");
    }

    #[test]
    fn block_joins_the_three_lines() {
        let text = render(&base_state(), date(2024, 1, 11));
        assert_eq!(
            text.to_block(),
            "Estou há 10 dias\nSem acidentes graves\nMeu record é 12 dias"
        );
    }

    #[test]
    fn format_date_is_day_month_year() {
        assert_eq!(format_date(date(2024, 1, 5)), "05/01/2024");
    }
}
