use crossterm::event::KeyCode;
use sandbox_ethvol::input::{parse_command, UiCommand};
use sandbox_ethvol::ui::{OnChainMetric, Tab};

#[test]
fn parse_command_maps_digits_to_tabs() {
    assert_eq!(
        parse_command(&KeyCode::Char('1')),
        Some(UiCommand::SelectTab(Tab::Overview))
    );
    assert_eq!(
        parse_command(&KeyCode::Char('3')),
        Some(UiCommand::SelectTab(Tab::Models))
    );
    assert_eq!(
        parse_command(&KeyCode::Char('6')),
        Some(UiCommand::SelectTab(Tab::Performance))
    );
    assert_eq!(parse_command(&KeyCode::Char('0')), None);
    assert_eq!(parse_command(&KeyCode::Char('7')), None);
}

#[test]
fn parse_command_maps_case_insensitive_char_keys() {
    assert_eq!(parse_command(&KeyCode::Char('q')), Some(UiCommand::Quit));
    assert_eq!(parse_command(&KeyCode::Char('Q')), Some(UiCommand::Quit));
    assert_eq!(parse_command(&KeyCode::Char('R')), Some(UiCommand::Regenerate));
    assert_eq!(parse_command(&KeyCode::Char('k')), Some(UiCommand::CursorUp));
    assert_eq!(parse_command(&KeyCode::Char('J')), Some(UiCommand::CursorDown));
}

#[test]
fn parse_command_maps_metric_toggles() {
    assert_eq!(
        parse_command(&KeyCode::Char('g')),
        Some(UiCommand::ToggleMetric(OnChainMetric::GasUsed))
    );
    assert_eq!(
        parse_command(&KeyCode::Char('A')),
        Some(UiCommand::ToggleMetric(OnChainMetric::ActiveAddresses))
    );
    assert_eq!(
        parse_command(&KeyCode::Char('t')),
        Some(UiCommand::ToggleMetric(OnChainMetric::TransactionCount))
    );
    assert_eq!(
        parse_command(&KeyCode::Char('n')),
        Some(UiCommand::ToggleMetric(OnChainMetric::NetworkValue))
    );
    assert_eq!(
        parse_command(&KeyCode::Char('h')),
        Some(UiCommand::ToggleMetric(OnChainMetric::HashRate))
    );
    assert_eq!(
        parse_command(&KeyCode::Char('v')),
        Some(UiCommand::ToggleMetric(OnChainMetric::Volatility))
    );
}

#[test]
fn parse_command_maps_navigation_keys() {
    assert_eq!(parse_command(&KeyCode::Esc), Some(UiCommand::Quit));
    assert_eq!(parse_command(&KeyCode::Tab), Some(UiCommand::NextTab));
    assert_eq!(parse_command(&KeyCode::Right), Some(UiCommand::NextTab));
    assert_eq!(parse_command(&KeyCode::BackTab), Some(UiCommand::PrevTab));
    assert_eq!(parse_command(&KeyCode::Left), Some(UiCommand::PrevTab));
    assert_eq!(parse_command(&KeyCode::Up), Some(UiCommand::CursorUp));
    assert_eq!(parse_command(&KeyCode::Down), Some(UiCommand::CursorDown));
    assert_eq!(parse_command(&KeyCode::Enter), Some(UiCommand::ToggleModel));
    assert_eq!(parse_command(&KeyCode::Char(' ')), Some(UiCommand::ToggleModel));
}

#[test]
fn parse_command_ignores_unmapped_keys() {
    assert_eq!(parse_command(&KeyCode::Char('x')), None);
    assert_eq!(parse_command(&KeyCode::F(1)), None);
}
