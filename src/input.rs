use crossterm::event::KeyCode;

use crate::ui::{OnChainMetric, Tab};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiCommand {
    Quit,
    SelectTab(Tab),
    NextTab,
    PrevTab,
    CursorUp,
    CursorDown,
    ToggleModel,
    ToggleMetric(OnChainMetric),
    Regenerate,
}

pub fn parse_command(key_code: &KeyCode) -> Option<UiCommand> {
    match key_code {
        KeyCode::Esc => Some(UiCommand::Quit),
        KeyCode::Tab | KeyCode::Right => Some(UiCommand::NextTab),
        KeyCode::BackTab | KeyCode::Left => Some(UiCommand::PrevTab),
        KeyCode::Up => Some(UiCommand::CursorUp),
        KeyCode::Down => Some(UiCommand::CursorDown),
        KeyCode::Enter => Some(UiCommand::ToggleModel),
        KeyCode::Char(' ') => Some(UiCommand::ToggleModel),
        KeyCode::Char(c) if c.is_ascii_digit() => c
            .to_digit(10)
            .and_then(|d| (d as usize).checked_sub(1))
            .and_then(Tab::from_index)
            .map(UiCommand::SelectTab),
        KeyCode::Char(c) => match c.to_ascii_lowercase() {
            'q' => Some(UiCommand::Quit),
            'k' => Some(UiCommand::CursorUp),
            'j' => Some(UiCommand::CursorDown),
            'r' => Some(UiCommand::Regenerate),
            'g' => Some(UiCommand::ToggleMetric(OnChainMetric::GasUsed)),
            'a' => Some(UiCommand::ToggleMetric(OnChainMetric::ActiveAddresses)),
            't' => Some(UiCommand::ToggleMetric(OnChainMetric::TransactionCount)),
            'n' => Some(UiCommand::ToggleMetric(OnChainMetric::NetworkValue)),
            'h' => Some(UiCommand::ToggleMetric(OnChainMetric::HashRate)),
            'v' => Some(UiCommand::ToggleMetric(OnChainMetric::Volatility)),
            _ => None,
        },
        _ => None,
    }
}
