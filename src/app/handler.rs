//! Input handling — maps key/mouse events to state mutations.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

use crate::config::Action;
use crate::core::route::Route;
use crate::ui::layout::point_in_rect;
use crate::ui::nav::nav_targets;

use super::state::AppState;

/// Process a key event.
pub fn handle_key(state: &mut AppState, key: KeyEvent) {
    // Ctrl+c always quits, regardless of bindings.
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        state.should_quit = true;
        return;
    }

    let Some(action) = state.config.match_key(key) else {
        return;
    };
    apply_action(state, action);
}

pub fn apply_action(state: &mut AppState, action: Action) {
    let step = f64::from(state.config.scroll_step);
    let page = f64::from(state.viewport_rows().saturating_sub(2).max(1));
    match action {
        Action::ScrollUp => state.scroll.scroll_by(-step),
        Action::ScrollDown => state.scroll.scroll_by(step),
        Action::PageUp => state.scroll.scroll_by(-page),
        Action::PageDown => state.scroll.scroll_by(page),
        Action::Top => state.scroll.scroll_to(0.0),
        Action::Bottom => state.scroll.scroll_to(f64::MAX),
        Action::GoHome => state.navigate(Route::Home),
        Action::GoAbout => state.navigate(Route::About),
        Action::Quit => state.should_quit = true,
    }
}

/// Process a mouse event: wheel scrolls, motion updates hover, clicks on
/// the nav bar navigate.  Every event records the pointer position so hover
/// can follow the page while it scrolls.
pub fn handle_mouse(state: &mut AppState, mouse: MouseEvent) {
    let layout = state.layout();
    let step = f64::from(state.config.scroll_step);
    state.pointer = Some((mouse.column, mouse.row));

    match mouse.kind {
        MouseEventKind::ScrollDown => state.scroll.scroll_by(step),
        MouseEventKind::ScrollUp => state.scroll.scroll_by(-step),
        MouseEventKind::Moved | MouseEventKind::Drag(_) => state.refresh_hover(),
        MouseEventKind::Down(MouseButton::Left) => {
            if !point_in_rect(layout.nav_area, mouse.column, mouse.row) {
                return;
            }
            let hit = nav_targets(layout.nav_area, &state.page.nav)
                .into_iter()
                .find(|t| point_in_rect(t.area, mouse.column, mouse.row));
            if let Some(route) = hit.and_then(|t| t.route) {
                state.navigate(route);
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::app::state::tests::state_at;
    use crate::ui::page_widget::block_at;

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn keys_move_the_scroll_target() {
        let mut state = state_at(Route::About, 80, 20);
        handle_key(&mut state, KeyEvent::new(KeyCode::Char('j'), KeyModifiers::NONE));
        assert_eq!(state.scroll.target(), 3.0);
        handle_key(&mut state, KeyEvent::new(KeyCode::End, KeyModifiers::NONE));
        let bottom = state.scroll.target();
        assert!(bottom > 3.0);
        handle_key(&mut state, KeyEvent::new(KeyCode::Home, KeyModifiers::NONE));
        assert_eq!(state.scroll.target(), 0.0);
    }

    #[test]
    fn ctrl_c_and_q_quit() {
        let mut state = state_at(Route::Home, 80, 20);
        handle_key(&mut state, KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(state.should_quit);

        let mut state = state_at(Route::Home, 80, 20);
        handle_key(&mut state, KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE));
        assert!(state.should_quit);
    }

    #[test]
    fn keys_navigate_between_pages() {
        let mut state = state_at(Route::Home, 80, 20);
        handle_key(&mut state, KeyEvent::new(KeyCode::Char('a'), KeyModifiers::NONE));
        assert_eq!(state.route, Route::About);
        handle_key(&mut state, KeyEvent::new(KeyCode::Char('h'), KeyModifiers::NONE));
        assert_eq!(state.route, Route::Home);
    }

    #[test]
    fn wheel_scrolls() {
        let mut state = state_at(Route::About, 80, 20);
        handle_mouse(&mut state, mouse(MouseEventKind::ScrollDown, 10, 10));
        handle_mouse(&mut state, mouse(MouseEventKind::ScrollDown, 10, 10));
        handle_mouse(&mut state, mouse(MouseEventKind::ScrollUp, 10, 10));
        assert_eq!(state.scroll.target(), 3.0);
    }

    #[test]
    fn clicking_nav_links_navigates() {
        let mut state = state_at(Route::Home, 80, 20);
        // "About Me" is right-aligned with two columns of padding.
        handle_mouse(&mut state, mouse(MouseEventKind::Down(MouseButton::Left), 75, 0));
        assert_eq!(state.route, Route::About);
        // The brand on /about goes home.
        handle_mouse(&mut state, mouse(MouseEventKind::Down(MouseButton::Left), 3, 0));
        assert_eq!(state.route, Route::Home);
        // Clicking the page body does nothing.
        handle_mouse(&mut state, mouse(MouseEventKind::Down(MouseButton::Left), 3, 10));
        assert_eq!(state.route, Route::Home);
    }

    #[test]
    fn hover_tracks_block_under_cursor() {
        let mut state = state_at(Route::Home, 80, 40);
        let target = state.placements()[0];
        let row = target.y as u16 + 1;
        handle_mouse(&mut state, mouse(MouseEventKind::Moved, target.x + 2, row));
        assert_eq!(state.hovered_block, Some(0));

        handle_mouse(&mut state, mouse(MouseEventKind::Moved, 0, 0));
        assert_eq!(state.hovered_block, None);
        assert_eq!(state.hovered_nav, None);
    }

    #[test]
    fn hover_follows_the_page_while_the_wheel_scrolls() {
        let mut state = state_at(Route::About, 80, 20);
        let first = state.placements()[0];
        let (col, row) = (first.x + 2, first.y as u16 + 1);
        handle_mouse(&mut state, mouse(MouseEventKind::Moved, col, row));
        assert_eq!(state.hovered_block, Some(0));

        for _ in 0..8 {
            handle_mouse(&mut state, mouse(MouseEventKind::ScrollDown, col, row));
        }
        for _ in 0..60 {
            state.tick(Duration::from_millis(33));
        }
        assert_eq!(state.hovered_block, block_at(&state.placements(), col, row));
        assert_ne!(state.hovered_block, Some(0));
    }

    #[test]
    fn link_urls_clear_once_the_links_scroll_away() {
        let mut state = state_at(Route::Home, 80, 20);
        state.scroll.jump_to(f64::MAX);
        state.publish_scroll();
        let links = *state.placements().last().unwrap();
        let (col, row) = (links.x + 2, links.y as u16 + 1);
        handle_mouse(&mut state, mouse(MouseEventKind::Moved, col, row));
        assert!(state.status_message.as_deref().unwrap().contains("github.com"));

        handle_mouse(&mut state, mouse(MouseEventKind::ScrollUp, col, row));
        state.scroll.jump_to(0.0);
        state.tick(Duration::from_millis(33));
        assert_ne!(state.hovered_block, Some(links.id));
        assert_eq!(state.status_message, None);
    }
}
