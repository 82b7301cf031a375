//! Rendering tests against ratatui's in-memory backend.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{Terminal, backend::TestBackend};
use strictly_capitals::{Dataset, RoundController, RuleSet, Selection};
use strictly_quiz::{App, draw};

fn app() -> App {
    let controller = RoundController::seeded(Dataset::builtin(), RuleSet::default(), 4)
        .expect("Controller");
    App::new(controller)
}

fn render(app: &App) -> String {
    render_sized(app, 110, 45)
}

fn render_sized(app: &App, width: u16, height: u16) -> String {
    let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
    terminal.draw(|f| draw(f, app)).unwrap();
    terminal
        .backend()
        .buffer()
        .content()
        .iter()
        .map(|cell| cell.symbol())
        .collect()
}

fn press(app: &mut App, code: KeyCode) {
    app.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
}

/// Picks the correct capital with the single selector and checks it.
fn answer_round(app: &mut App) {
    let answer = app.controller().round().asked().capital().clone();
    let idx = app
        .controller()
        .round()
        .choice_group()
        .capitals()
        .iter()
        .position(|c| *c == answer)
        .expect("answer offered");

    press(app, KeyCode::Tab);
    for _ in 0..=idx {
        press(app, KeyCode::Down);
    }
    press(app, KeyCode::Enter);
    press(app, KeyCode::Char('c'));
}

#[test]
fn test_initial_screen() {
    let app = app();
    let screen = render(&app);
    assert!(screen.contains("Guess Capital"));
    assert!(screen.contains(app.controller().round().asked().country().as_str()));
    assert!(screen.contains("Round: 1/5"));
    assert!(screen.contains("Score: 0"));
    assert!(screen.contains("Select an option"));
    assert!(screen.contains("Choose more than one"));
    assert!(screen.contains("(70 points)"));
    assert!(!screen.contains("Next Round"));
}

#[test]
fn test_alert_shown_for_empty_check() {
    let mut app = app();
    press(&mut app, KeyCode::Char('c'));
    assert!(render(&app).contains("Please select a method of selection."));
}

#[test]
fn test_open_selector_lists_candidates() {
    let mut app = app();
    press(&mut app, KeyCode::Enter);
    let screen = render(&app);
    for capital in app.controller().round().choice_group().capitals() {
        assert!(screen.contains(capital.as_str()), "missing {capital}");
    }
}

#[test]
fn test_reveal_after_check() {
    let mut app = app();
    let answer = app.controller().round().asked().capital().clone();
    answer_round(&mut app);

    let screen = render(&app);
    assert!(screen.contains(&format!("Answer: {}", answer)));
    assert!(screen.contains("Next Round"));
    assert!(screen.contains("Score: 100"));
    assert!(screen.contains("Round: 2/5"));
}

#[test]
fn test_game_over_screen_lists_results() {
    let mut app = app();
    for _ in 0..5 {
        answer_round(&mut app);
        press(&mut app, KeyCode::Char('n'));
        // Focus returns to the first control for the next pick.
        while *app.focus() != strictly_quiz::Focus::Multiple {
            press(&mut app, KeyCode::Tab);
        }
    }

    assert!(app.controller().is_game_over());
    let screen = render(&app);
    assert!(screen.contains("Game Over!"));
    assert!(screen.contains("Final Score: 500"));
    assert!(screen.contains("Round 5: 100 points"));
    assert_eq!(app.controller().displayed_round(), 5);
}

#[test]
fn test_long_game_results_fit_small_terminal() {
    let rules = RuleSet {
        max_rounds: 40,
        ..RuleSet::default()
    };
    let mut controller = RoundController::seeded(Dataset::builtin(), rules, 8).unwrap();
    while !controller.is_game_over() {
        let asked = controller.round().asked().clone();
        assert!(controller.select(Selection::Single(asked)));
        controller.submit_answer();
        controller.next_round();
    }

    let app = App::new(controller);
    let screen = render_sized(&app, 30, 20);
    assert!(screen.contains("Game Over!"));
}
