use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use liveclass_core::View;
use crate::app::{App, InputMode, LoginField, StudentInput, TeacherInput};
use crate::tui::{AppEvent, Topic};

pub async fn handle_event(app: &mut App, event: AppEvent) -> Result<()> {
    match event {
        AppEvent::Key(key) => handle_key(app, key),
        AppEvent::Resize(width, height) => {
            tracing::trace!(width, height, "resize");
        }
        AppEvent::Tick => {
            app.tick_animation();
            app.poll_login_task().await;
        }
        AppEvent::StateChanged(Topic::Session) => {
            app.poll_login_task().await;
            app.sync_view();
        }
        AppEvent::StateChanged(Topic::Doubts) => app.clamp_doubt_selection(),
        // Announcement and theme are read straight from the state on the next draw
        AppEvent::StateChanged(Topic::Announcement | Topic::Theme) => {}
    }
    Ok(())
}

fn handle_key(app: &mut App, key: KeyEvent) {
    // Global keys that work in any mode
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.should_quit = true;
        return;
    }

    // The alert blocks everything else until dismissed
    if app.alert.is_some() {
        if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
            app.dismiss_alert();
        }
        return;
    }

    match app.view {
        View::Loading => handle_loading(app, key),
        View::Login => handle_login(app, key),
        View::Teacher => match app.input_mode {
            InputMode::Normal => handle_teacher_normal(app, key),
            InputMode::Editing => handle_teacher_editing(app, key),
        },
        View::Student => match app.input_mode {
            InputMode::Normal => handle_student_normal(app, key),
            InputMode::Editing => handle_student_editing(app, key),
        },
    }
}

fn handle_loading(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') => app.should_quit = true,
        // Cancel the in-flight login
        KeyCode::Esc => app.logout(),
        _ => {}
    }
}

fn handle_login(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Enter => app.submit_login(),
        KeyCode::Tab | KeyCode::Down => app.login.focus_next(app.config.brand),
        KeyCode::BackTab | KeyCode::Up => app.login.focus_prev(app.config.brand),
        KeyCode::F(2) => app.toggle_sign_up(),
        KeyCode::Esc => app.should_quit = true,
        KeyCode::Left | KeyCode::Right | KeyCode::Char(' ') if app.login.focus == LoginField::Role => {
            app.login.role = app.login.role.toggled();
        }
        KeyCode::Backspace => {
            if let Some(input) = app.login.focused_input() {
                input.pop();
            }
        }
        KeyCode::Char(c) => {
            if let Some(input) = app.login.focused_input() {
                input.push(c);
            }
        }
        _ => {}
    }
}

fn handle_teacher_normal(app: &mut App, key: KeyEvent) {
    let features = app.config.features;
    match key.code {
        // Quit
        KeyCode::Char('q') => app.should_quit = true,
        KeyCode::Char('o') => app.logout(),
        KeyCode::Char('t') => app.toggle_theme(),

        // Doubt list
        KeyCode::Char('j') | KeyCode::Down if features.doubts => app.doubt_nav_down(),
        KeyCode::Char('k') | KeyCode::Up if features.doubts => app.doubt_nav_up(),
        KeyCode::Enter if features.doubts => app.stage_selected_doubt(),
        KeyCode::Char('s') if features.doubts => app.solve_active_doubt(),

        // Composer
        KeyCode::Char('a') | KeyCode::Char('/') if features.announcements => {
            app.teacher.input = TeacherInput::Announcement;
            app.input_mode = InputMode::Editing;
        }

        KeyCode::Char('m') => app.toggle_mic(),
        KeyCode::Char('n') => app.toggle_quiz_form(),

        _ => {}
    }
}

fn handle_teacher_editing(app: &mut App, key: KeyEvent) {
    match app.teacher.input {
        TeacherInput::Announcement => match key.code {
            KeyCode::Esc => app.input_mode = InputMode::Normal,
            KeyCode::Enter => {
                app.send_announcement();
                app.input_mode = InputMode::Normal;
            }
            KeyCode::Backspace => {
                app.teacher.announce_draft.pop();
            }
            KeyCode::Char(c) => app.teacher.announce_draft.push(c),
            _ => {}
        },
        TeacherInput::QuizTitle => match key.code {
            KeyCode::Esc => app.toggle_quiz_form(),
            KeyCode::Enter => app.create_quiz(),
            KeyCode::Backspace => {
                app.teacher.quiz_title.pop();
            }
            KeyCode::Char(c) => app.teacher.quiz_title.push(c),
            _ => {}
        },
    }
}

fn handle_student_normal(app: &mut App, key: KeyEvent) {
    // any key clears the new-announcement cue
    app.acknowledge_announcement();
    match key.code {
        KeyCode::Char('q') => app.should_quit = true,
        KeyCode::Char('o') => app.logout(),
        KeyCode::Char('t') => app.toggle_theme(),
        KeyCode::Char('i') | KeyCode::Char('c') | KeyCode::Enter => {
            app.student.input = StudentInput::ClassCode;
            app.input_mode = InputMode::Editing;
        }
        KeyCode::Char('d') if app.config.features.doubts => {
            app.student.input = StudentInput::Doubt;
            app.input_mode = InputMode::Editing;
        }
        _ => {}
    }
}

fn handle_student_editing(app: &mut App, key: KeyEvent) {
    let draft = match app.student.input {
        StudentInput::ClassCode => &mut app.student.class_code,
        StudentInput::Doubt => &mut app.student.doubt_draft,
    };
    match key.code {
        KeyCode::Esc => app.input_mode = InputMode::Normal,
        KeyCode::Backspace => {
            draft.pop();
        }
        KeyCode::Char(c) => draft.push(c),
        KeyCode::Enter => match app.student.input {
            StudentInput::ClassCode => app.join_class(),
            StudentInput::Doubt => app.raise_doubt(),
        },
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use liveclass_core::{AppState, Brand, Config, Role};
    use std::time::Duration;

    fn app() -> App {
        let config = Config::new();
        App::new(AppState::new(&config), config)
    }

    fn press(code: KeyCode) -> AppEvent {
        AppEvent::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    async fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            handle_event(app, press(KeyCode::Char(c))).await.unwrap();
        }
    }

    async fn sign_in(app: &mut App, name: &str, role: Role) {
        type_text(app, name).await;
        handle_event(app, press(KeyCode::Tab)).await.unwrap();
        type_text(app, "1234").await;
        if role == Role::Teacher {
            handle_event(app, press(KeyCode::Tab)).await.unwrap();
            handle_event(app, press(KeyCode::Right)).await.unwrap();
        }
        handle_event(app, press(KeyCode::Enter)).await.unwrap();
        tokio::time::sleep(app.state.login_delay() + Duration::from_millis(1)).await;
        tokio::task::yield_now().await;
        handle_event(app, AppEvent::StateChanged(Topic::Session)).await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_typing_fills_login_fields() {
        let mut app = app();
        type_text(&mut app, "Aman").await;
        handle_event(&mut app, press(KeyCode::Tab)).await.unwrap();
        type_text(&mut app, "12345").await;
        handle_event(&mut app, press(KeyCode::Backspace)).await.unwrap();
        assert_eq!(app.login.name, "Aman");
        assert_eq!(app.login.code, "1234");

        handle_event(&mut app, press(KeyCode::Tab)).await.unwrap();
        handle_event(&mut app, press(KeyCode::Char(' '))).await.unwrap();
        assert_eq!(app.login.role, Role::Teacher);
        // typing on the role selector goes nowhere
        type_text(&mut app, "x").await;
        assert_eq!(app.login.name, "Aman");
    }

    #[tokio::test(start_paused = true)]
    async fn test_alert_blocks_input_until_dismissed() {
        let mut app = app();
        handle_event(&mut app, press(KeyCode::Enter)).await.unwrap();
        assert!(app.alert.is_some());

        type_text(&mut app, "Aman").await;
        assert!(app.login.name.is_empty());

        handle_event(&mut app, press(KeyCode::Esc)).await.unwrap();
        assert!(app.alert.is_none());
        assert!(!app.should_quit);
    }

    #[tokio::test(start_paused = true)]
    async fn test_student_session_end_to_end() {
        let mut app = app();
        sign_in(&mut app, "Aman", Role::Student).await;
        assert_eq!(app.view, View::Student);

        handle_event(&mut app, press(KeyCode::Char('c'))).await.unwrap();
        type_text(&mut app, "NEET").await;
        handle_event(&mut app, press(KeyCode::Enter)).await.unwrap();
        assert_eq!(app.student.joined.as_deref(), Some("NEET"));

        handle_event(&mut app, press(KeyCode::Char('d'))).await.unwrap();
        type_text(&mut app, "What is GFR?").await;
        handle_event(&mut app, press(KeyCode::Enter)).await.unwrap();
        assert_eq!(app.state.doubts().len(), 2);

        handle_event(&mut app, press(KeyCode::Char('o'))).await.unwrap();
        assert_eq!(app.view, View::Login);
    }

    #[tokio::test(start_paused = true)]
    async fn test_teacher_announces_with_keys() {
        let mut app = app();
        sign_in(&mut app, "Priya", Role::Teacher).await;
        assert_eq!(app.view, View::Teacher);

        handle_event(&mut app, press(KeyCode::Char('a'))).await.unwrap();
        type_text(&mut app, "Class starts now").await;
        handle_event(&mut app, press(KeyCode::Enter)).await.unwrap();
        assert_eq!(app.state.announcement().text, "Class starts now");
        assert_eq!(app.input_mode, InputMode::Normal);

        handle_event(&mut app, press(KeyCode::Enter)).await.unwrap();
        assert!(app.teacher.active_doubt.is_some());
        handle_event(&mut app, press(KeyCode::Char('s'))).await.unwrap();
        assert!(app.teacher.active_doubt.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_esc_on_loading_cancels_login() {
        let mut app = app();
        type_text(&mut app, "Aman").await;
        handle_event(&mut app, press(KeyCode::Tab)).await.unwrap();
        type_text(&mut app, "1").await;
        handle_event(&mut app, press(KeyCode::Enter)).await.unwrap();
        assert_eq!(app.view, View::Loading);

        handle_event(&mut app, press(KeyCode::Esc)).await.unwrap();
        assert_eq!(app.view, View::Login);
        assert!(!app.should_quit);
    }

    #[tokio::test(start_paused = true)]
    async fn test_f2_switches_medquiz_form_to_sign_up() {
        let mut config = Config::new();
        config.brand = Brand::MedQuiz;
        let mut app = App::new(AppState::new(&config), config);

        // sign-in: Tab wraps from the code field back to the name
        handle_event(&mut app, press(KeyCode::Tab)).await.unwrap();
        handle_event(&mut app, press(KeyCode::Tab)).await.unwrap();
        assert_eq!(app.login.focus, LoginField::Name);

        handle_event(&mut app, press(KeyCode::F(2))).await.unwrap();
        assert!(app.login.sign_up);
        type_text(&mut app, "Priya").await;
        handle_event(&mut app, press(KeyCode::Tab)).await.unwrap();
        type_text(&mut app, "1234").await;
        handle_event(&mut app, press(KeyCode::Tab)).await.unwrap();
        assert_eq!(app.login.focus, LoginField::Role);
        handle_event(&mut app, press(KeyCode::Right)).await.unwrap();
        handle_event(&mut app, press(KeyCode::Enter)).await.unwrap();
        tokio::time::sleep(app.state.login_delay() + Duration::from_millis(1)).await;
        tokio::task::yield_now().await;
        handle_event(&mut app, AppEvent::StateChanged(Topic::Session)).await.unwrap();
        assert_eq!(app.view, View::Teacher);
    }

    #[tokio::test(start_paused = true)]
    async fn test_f2_does_nothing_on_eaglewise() {
        let mut app = app();
        handle_event(&mut app, press(KeyCode::F(2))).await.unwrap();
        assert!(!app.login.sign_up);
        // the role picker stays in the tab order
        handle_event(&mut app, press(KeyCode::BackTab)).await.unwrap();
        assert_eq!(app.login.focus, LoginField::Role);
    }

    #[tokio::test(start_paused = true)]
    async fn test_student_key_acknowledges_announcement() {
        let mut app = app();
        sign_in(&mut app, "Priya", Role::Teacher).await;
        handle_event(&mut app, press(KeyCode::Char('a'))).await.unwrap();
        type_text(&mut app, "Quiz at 5").await;
        handle_event(&mut app, press(KeyCode::Enter)).await.unwrap();
        handle_event(&mut app, press(KeyCode::Char('o'))).await.unwrap();

        sign_in(&mut app, "Aman", Role::Student).await;
        assert!(app.announcement_is_new());
        handle_event(&mut app, press(KeyCode::Char('x'))).await.unwrap();
        assert!(!app.announcement_is_new());
    }

    #[tokio::test]
    async fn test_ctrl_c_quits_from_anywhere() {
        let mut app = app();
        app.show_alert("blocking");
        let ctrl_c = AppEvent::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        handle_event(&mut app, ctrl_c).await.unwrap();
        assert!(app.should_quit);
    }
}
