//! Keyboard input handling for the TUI.

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};

use crate::app::{App, Focus};
use crate::routes::Screen;

/// Handle keyboard input. Returns true if the app should quit.
pub async fn handle_input(app: &mut App, key: KeyEvent) -> Result<bool> {
    match app.screen() {
        Screen::Login => handle_login_input(app, key).await,
        Screen::Dashboard => handle_dashboard_input(app, key).await,
    }
}

async fn handle_login_input(app: &mut App, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Esc => {
            app.should_quit = true;
            return Ok(true);
        }
        KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => {
            app.login.toggle_focus();
        }
        KeyCode::Enter => {
            app.submit_login().await;
        }
        KeyCode::Backspace => {
            app.login.pop_char();
        }
        KeyCode::Char(c) => {
            app.login.push_char(c);
        }
        _ => {}
    }
    Ok(false)
}

async fn handle_dashboard_input(app: &mut App, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => {
            app.should_quit = true;
            return Ok(true);
        }
        KeyCode::Char('l') => {
            app.logout();
        }
        KeyCode::Char('r') => {
            app.refresh_data().await;
        }
        KeyCode::Tab => {
            app.focus = match app.focus {
                Focus::Containers => Focus::Items,
                Focus::Items => Focus::Containers,
            };
        }
        KeyCode::Down | KeyCode::Char('j') => match app.focus {
            Focus::Containers => app.select_next_container().await,
            Focus::Items => app.select_next_item(),
        },
        KeyCode::Up | KeyCode::Char('k') => match app.focus {
            Focus::Containers => app.select_prev_container().await,
            Focus::Items => app.select_prev_item(),
        },
        KeyCode::Enter | KeyCode::Char(' ') => {
            if app.focus == Focus::Items {
                app.toggle_selected_item_done().await;
            }
        }
        _ => {}
    }
    Ok(false)
}
