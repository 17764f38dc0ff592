use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Wrap},
};
use liveclass_core::{Role, View};
use crate::app::{App, InputMode, LoginField, StudentInput, TeacherInput};

/// Colors for the current theme.
#[derive(Debug, Clone, Copy)]
struct Palette {
    bg: Color,
    fg: Color,
    muted: Color,
    accent: Color,
    sidebar: Color,
    banner: Color,
}

impl Palette {
    fn for_theme(dark: bool) -> Self {
        if dark {
            Self {
                bg: Color::Black,
                fg: Color::White,
                muted: Color::DarkGray,
                accent: Color::LightBlue,
                sidebar: Color::Rgb(30, 41, 59),
                banner: Color::Yellow,
            }
        } else {
            Self {
                bg: Color::Reset,
                fg: Color::Reset,
                muted: Color::Gray,
                accent: Color::Blue,
                sidebar: Color::Blue,
                banner: Color::Yellow,
            }
        }
    }
}

/// Fixed-size rectangle centered in `area`, shrunk to fit.
fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width.saturating_sub(2));
    let height = height.min(area.height.saturating_sub(2));
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width, height)
}

pub fn render(app: &mut App, frame: &mut Frame) {
    let area = frame.area();
    let palette = Palette::for_theme(app.state.dark_mode());

    frame.render_widget(Block::default().style(Style::default().bg(palette.bg).fg(palette.fg)), area);

    // Main layout: header, body, footer
    let [header_area, body_area, footer_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .areas(area);

    render_header(app, frame, header_area, palette);

    match app.view {
        View::Loading => render_loading(app, frame, body_area, palette),
        View::Login => render_login(app, frame, body_area, palette),
        View::Teacher => render_teacher(app, frame, body_area, palette),
        View::Student => render_student(app, frame, body_area, palette),
    }

    render_footer(app, frame, footer_area);

    if app.alert.is_some() {
        render_alert(app, frame, area);
    }
}

fn render_header(app: &App, frame: &mut Frame, area: Rect, palette: Palette) {
    let user = match app.signed_in_name() {
        Some(name) => format!(" {} ", name),
        None => String::new(),
    };

    let title = Line::from(vec![
        Span::styled(
            format!(" {} ", app.config.brand.display_name()),
            Style::default().fg(Color::Cyan).bold(),
        ),
        Span::styled(format!("{} ", app.view.title()), Style::default().fg(Color::White)),
        Span::styled(user, Style::default().fg(palette.banner)),
        Span::styled(
            format!("v{}", env!("CARGO_PKG_VERSION")),
            Style::default().fg(Color::Gray),
        ),
    ]);

    let header = Paragraph::new(title).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(header, area);
}

fn render_footer(app: &App, frame: &mut Frame, area: Rect) {
    let mode_style = match app.input_mode {
        InputMode::Normal => Style::default().bg(Color::Blue).fg(Color::White),
        InputMode::Editing => Style::default().bg(Color::Yellow).fg(Color::Black),
    };

    let mode_text = match app.view {
        View::Loading => " WAIT ",
        View::Login => " LOGIN ",
        View::Teacher => " TEACHER ",
        View::Student => " STUDENT ",
    };

    // Key style: dark background with bright text for visibility on both light/dark terminals
    let key_style = Style::default().bg(Color::DarkGray).fg(Color::White);
    let label_style = Style::default().bg(Color::Black).fg(Color::White);
    let features = app.config.features;

    let hints: Vec<(&str, &str)> = if app.alert.is_some() {
        vec![("Enter", "dismiss")]
    } else {
        match (app.view, app.input_mode) {
            (View::Loading, _) => vec![("Esc", "cancel"), ("q", "quit")],
            (View::Login, _) => {
                let brand = app.config.brand;
                let mut hints = vec![("Tab", "next field")];
                if app.login.shows_role(brand) {
                    hints.push(("←/→", "role"));
                }
                if brand.has_sign_up() {
                    hints.push(("F2", if app.login.sign_up { "sign in" } else { "sign up" }));
                }
                hints.extend([("Enter", "login"), ("Esc", "quit")]);
                hints
            }
            (View::Teacher, InputMode::Normal) => {
                let mut hints = Vec::new();
                if features.doubts {
                    hints.extend([("j/k", "doubts"), ("Enter", "stage"), ("s", "solved")]);
                }
                if features.announcements {
                    hints.push(("a", "announce"));
                }
                if features.quiz_panel {
                    hints.push(("n", "new quiz"));
                }
                if features.microphone {
                    hints.push(("m", "mic"));
                }
                if features.theme_toggle {
                    hints.push(("t", "theme"));
                }
                hints.extend([("o", "logout"), ("q", "quit")]);
                hints
            }
            (View::Student, InputMode::Normal) => {
                let mut hints = vec![("c", "class code")];
                if features.doubts {
                    hints.push(("d", "ask doubt"));
                }
                if features.theme_toggle {
                    hints.push(("t", "theme"));
                }
                hints.extend([("o", "logout"), ("q", "quit")]);
                hints
            }
            (_, InputMode::Editing) => vec![("Enter", "send"), ("Esc", "cancel")],
        }
    };

    let mut spans = vec![Span::styled(mode_text, mode_style), Span::raw(" ")];
    for (key, label) in hints {
        spans.push(Span::styled(format!(" {} ", key), key_style));
        spans.push(Span::styled(format!(" {} ", label), label_style));
        spans.push(Span::raw(" "));
    }
    if let Some(status) = &app.status {
        spans.push(Span::styled(status.clone(), Style::default().fg(Color::Green)));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_loading(app: &App, frame: &mut Frame, area: Rect, palette: Palette) {
    let dots = ".".repeat(app.animation_frame as usize + 1);
    let popup = centered_rect(30, 5, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(palette.accent));
    let text = vec![
        Line::from(""),
        Line::from(Span::styled(
            format!("Syncing Data{:<3}", dots),
            Style::default().fg(palette.accent).add_modifier(Modifier::BOLD),
        )),
    ];
    frame.render_widget(
        Paragraph::new(text).alignment(Alignment::Center).block(block),
        popup,
    );
}

fn render_login(app: &App, frame: &mut Frame, area: Rect, palette: Palette) {
    let brand = app.config.brand;
    let form = &app.login;
    let popup = centered_rect(50, if brand.has_sign_up() { 14 } else { 13 }, area);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(palette.accent))
        .title(format!(" {} ", brand.display_name()))
        .title_alignment(Alignment::Center);
    let inner = block.inner(popup);
    frame.render_widget(block, popup);

    let [tagline_area, _, name_area, code_area, role_area, _, submit_area, switch_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(3),
        Constraint::Length(3),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(if brand.has_sign_up() { 1 } else { 0 }),
    ])
    .areas(inner);

    let (tagline, button) = match (brand.has_sign_up(), form.sign_up) {
        (true, true) => ("Create a new account", " GET STARTED "),
        (true, false) => (brand.tagline(), " SIGN IN "),
        (false, _) => (brand.tagline(), " LOGIN "),
    };
    frame.render_widget(
        Paragraph::new(tagline)
            .alignment(Alignment::Center)
            .style(Style::default().fg(palette.muted)),
        tagline_area,
    );

    let field = |label: &str, value: String, focused: bool| {
        let border = if focused {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default().fg(palette.muted)
        };
        Paragraph::new(value).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border)
                .title(format!(" {} ", label)),
        )
    };

    frame.render_widget(
        field("Full Name", form.name.clone(), form.focus == LoginField::Name),
        name_area,
    );
    // Mask the code
    frame.render_widget(
        field("Code", "*".repeat(form.code.chars().count()), form.focus == LoginField::Code),
        code_area,
    );

    let role_span = |role: Role| {
        let label = format!(" {} ", role.as_str().to_uppercase());
        if form.role == role {
            Span::styled(label, Style::default().bg(palette.accent).fg(Color::White).bold())
        } else {
            Span::styled(label, Style::default().fg(palette.muted))
        }
    };
    if form.shows_role(brand) {
        let mut role_line = vec![Span::raw(if form.focus == LoginField::Role { "> " } else { "  " })];
        for role in Role::all() {
            role_line.push(role_span(role));
            role_line.push(Span::raw(" "));
        }
        frame.render_widget(Paragraph::new(Line::from(role_line)).alignment(Alignment::Center), role_area);
    }

    frame.render_widget(
        Paragraph::new(Span::styled(button, Style::default().bg(palette.accent).fg(Color::White).bold()))
            .alignment(Alignment::Center),
        submit_area,
    );

    if brand.has_sign_up() {
        let switch = if form.sign_up {
            "Already have an account? F2 Sign In"
        } else {
            "Don't have an account? F2 Sign Up"
        };
        frame.render_widget(
            Paragraph::new(switch)
                .alignment(Alignment::Center)
                .style(Style::default().fg(palette.muted)),
            switch_area,
        );
    }

    // Show cursor in the focused text field
    let cursor = match form.focus {
        LoginField::Name => Some((name_area, form.name.chars().count())),
        LoginField::Code => Some((code_area, form.code.chars().count())),
        LoginField::Role => None,
    };
    if let Some((field_area, len)) = cursor {
        let x = (len as u16).min(field_area.width.saturating_sub(3));
        frame.set_cursor_position((field_area.x + 1 + x, field_area.y + 1));
    }
}

fn render_teacher(app: &mut App, frame: &mut Frame, area: Rect, palette: Palette) {
    let [sidebar_area, main_area] = Layout::horizontal([
        Constraint::Length(30),
        Constraint::Min(0),
    ])
    .areas(area);

    render_teacher_sidebar(app, frame, sidebar_area, palette);

    let features = app.config.features;
    let mut constraints = Vec::new();
    if features.announcements {
        constraints.push(Constraint::Length(3));
    }
    if features.quiz_panel {
        constraints.push(Constraint::Length(4));
        if app.teacher.show_quiz_form {
            constraints.push(Constraint::Length(3));
        }
    }
    constraints.push(Constraint::Min(0));
    let areas = Layout::vertical(constraints).split(main_area);
    let mut slots = areas.iter().copied();

    if features.announcements {
        if let Some(slot) = slots.next() {
            render_composer(app, frame, slot, palette);
        }
    }
    if features.quiz_panel {
        if let Some(slot) = slots.next() {
            render_stats(app, frame, slot);
        }
        if app.teacher.show_quiz_form {
            if let Some(slot) = slots.next() {
                render_quiz_form(app, frame, slot);
            }
        }
    }
    let Some(stage_area) = slots.next() else {
        return;
    };

    if features.doubts {
        let [stage, doubts] = Layout::horizontal([
            Constraint::Ratio(3, 5),
            Constraint::Ratio(2, 5),
        ])
        .areas(stage_area);
        render_stage(app, frame, stage, palette);
        render_doubt_list(app, frame, doubts, palette);
    } else {
        render_stage(app, frame, stage_area, palette);
    }
}

fn render_teacher_sidebar(app: &App, frame: &mut Frame, area: Rect, palette: Palette) {
    let features = app.config.features;
    let label = Style::default().fg(Color::Gray).add_modifier(Modifier::BOLD);
    let value = Style::default().fg(Color::White).add_modifier(Modifier::BOLD);

    let mut lines = vec![
        Line::from(Span::styled(app.config.brand.display_name(), value.add_modifier(Modifier::ITALIC))),
        Line::from(""),
        Line::from(Span::styled("SUPPORT CONTACTS", label)),
        Line::from(Span::styled("Academic Mentor", Style::default().fg(Color::Gray))),
        Line::from(Span::styled(app.config.support.academic_mentor.clone(), value)),
        Line::from(Span::styled("Tech Support", Style::default().fg(Color::Gray))),
        Line::from(Span::styled(app.config.support.tech_support.clone(), Style::default().fg(Color::LightGreen).bold())),
        Line::from(""),
        Line::from(Span::styled("● Live Stream", value)),
    ];

    if features.microphone {
        let (text, style) = if app.teacher.mic_on {
            ("Mic: ON", Style::default().fg(Color::LightGreen).bold())
        } else {
            ("Mic: muted", Style::default().fg(Color::LightRed))
        };
        lines.push(Line::from(Span::styled(text, style)));
    }
    if features.theme_toggle {
        let theme = if app.state.dark_mode() { "Theme: dark" } else { "Theme: light" };
        lines.push(Line::from(Span::styled(theme, Style::default().fg(Color::Gray))));
    }

    let sidebar = Paragraph::new(lines)
        .block(Block::default().borders(Borders::RIGHT))
        .style(Style::default().bg(palette.sidebar).fg(Color::White))
        .wrap(Wrap { trim: true });
    frame.render_widget(sidebar, area);
}

fn render_composer(app: &mut App, frame: &mut Frame, area: Rect, palette: Palette) {
    let editing = app.input_mode == InputMode::Editing && app.teacher.input == TeacherInput::Announcement;
    let border = if editing {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(palette.muted)
    };

    let text = if app.teacher.announce_draft.is_empty() && !editing {
        Span::styled("Announce to students... (a)", Style::default().fg(palette.muted))
    } else {
        Span::raw(app.teacher.announce_draft.clone())
    };

    let composer = Paragraph::new(text).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border)
            .title(" Announcement "),
    );
    frame.render_widget(composer, area);

    if editing {
        let x = (app.teacher.announce_draft.chars().count() as u16).min(area.width.saturating_sub(3));
        frame.set_cursor_position((area.x + 1 + x, area.y + 1));
    }
}

fn render_stats(app: &App, frame: &mut Frame, area: Rect) {
    let stats = &app.config.stats;
    let cards = [
        ("Total Quizzes", app.total_quizzes().to_string(), Color::Blue),
        ("Active Students", stats.active_students.to_string(), Color::Green),
        ("Avg. Score", format!("{}%", stats.average_score), Color::Magenta),
    ];
    let areas = Layout::horizontal([Constraint::Ratio(1, 3); 3]).split(area);

    for ((label, value, color), card_area) in cards.into_iter().zip(areas.iter()) {
        let card = Paragraph::new(Line::from(Span::styled(value, Style::default().fg(color).bold())))
            .block(Block::default().borders(Borders::ALL).title(format!(" {} ", label)));
        frame.render_widget(card, *card_area);
    }
}

fn render_quiz_form(app: &App, frame: &mut Frame, area: Rect) {
    let form = Paragraph::new(app.teacher.quiz_title.clone()).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow))
            .title(" Create New Quiz - title "),
    );
    frame.render_widget(form, area);

    if app.input_mode == InputMode::Editing && app.teacher.input == TeacherInput::QuizTitle {
        let x = (app.teacher.quiz_title.chars().count() as u16).min(area.width.saturating_sub(3));
        frame.set_cursor_position((area.x + 1 + x, area.y + 1));
    }
}

fn render_stage(app: &App, frame: &mut Frame, area: Rect, palette: Palette) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(palette.accent))
        .title(" Stage ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let lines = match &app.teacher.active_doubt {
        Some(doubt) => {
            let mut lines = vec![
                Line::from(Span::styled(doubt.text.clone(), Style::default().add_modifier(Modifier::BOLD))),
            ];
            if let Some(by) = &doubt.raised_by {
                lines.push(Line::from(Span::styled(format!("asked by {}", by), Style::default().fg(palette.muted))));
            }
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(" SOLVED (s) ", Style::default().bg(Color::Green).fg(Color::White).bold())));
            lines
        }
        None => vec![Line::from(Span::styled(
            "Waiting...",
            Style::default().fg(palette.muted).add_modifier(Modifier::ITALIC),
        ))],
    };

    let [_, middle, _] = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(lines.len() as u16),
        Constraint::Fill(1),
    ])
    .areas(inner);
    frame.render_widget(
        Paragraph::new(lines).alignment(Alignment::Center).wrap(Wrap { trim: true }),
        middle,
    );
}

fn render_doubt_list(app: &mut App, frame: &mut Frame, area: Rect, palette: Palette) {
    let board = app.state.doubts();
    let active = app.teacher.active_doubt.as_ref().map(|d| d.id);

    let items: Vec<ListItem> = board
        .list()
        .iter()
        .map(|doubt| {
            let style = if Some(doubt.id) == active {
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            ListItem::new(format!(" {} ", doubt.text)).style(style)
        })
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(palette.accent))
                .title(format!(" Live Doubts ({}) ", board.len())),
        )
        .highlight_style(
            Style::default()
                .bg(Color::Blue)
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");

    frame.render_stateful_widget(list, area, &mut app.teacher.doubt_state);
}

fn render_student(app: &App, frame: &mut Frame, area: Rect, palette: Palette) {
    let features = app.config.features;
    let [banner_area, card_area] = Layout::vertical([
        Constraint::Length(if features.announcements { 3 } else { 0 }),
        Constraint::Min(0),
    ])
    .areas(area);

    if features.announcements {
        let announcement = app.state.announcement();
        let mut spans = Vec::new();
        if app.announcement_is_new() {
            spans.push(Span::styled(" NEW ", Style::default().bg(Color::Red).fg(Color::White).bold()));
            spans.push(Span::raw(" "));
        }
        spans.push(Span::styled(
            announcement.text.to_uppercase(),
            Style::default().fg(Color::Black).add_modifier(Modifier::BOLD),
        ));
        let banner = Paragraph::new(Line::from(spans))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(Color::White)))
        .style(Style::default().bg(palette.banner));
        frame.render_widget(banner, banner_area);
    }

    let card = centered_rect(56, if features.doubts { 15 } else { 11 }, card_area);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(palette.accent));
    let inner = block.inner(card);
    frame.render_widget(block, card);

    let [name_area, greeting_area, _, code_area, joined_area, doubt_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(3),
        Constraint::Length(2),
        Constraint::Length(if features.doubts { 3 } else { 0 }),
    ])
    .areas(inner);

    let name = app.signed_in_name().unwrap_or_default().to_uppercase();
    frame.render_widget(
        Paragraph::new(Span::styled(name, Style::default().fg(palette.accent).bold().italic()))
            .alignment(Alignment::Center),
        name_area,
    );
    frame.render_widget(
        Paragraph::new(app.config.brand.student_greeting()).alignment(Alignment::Center),
        greeting_area,
    );

    let editing = |input: StudentInput| app.input_mode == InputMode::Editing && app.student.input == input;
    let input_block = |title: &str, active: bool| {
        Block::default()
            .borders(Borders::ALL)
            .border_style(if active { Style::default().fg(Color::Yellow) } else { Style::default().fg(palette.muted) })
            .title(format!(" {} ", title))
    };

    let code_editing = editing(StudentInput::ClassCode);
    frame.render_widget(
        Paragraph::new(app.student.class_code.clone()).block(input_block("Enter Code, then JOIN CLASS", code_editing)),
        code_area,
    );

    let joined = match &app.student.joined {
        Some(code) => Span::styled(format!("Joined class {}", code), Style::default().fg(Color::Green).bold()),
        None => Span::styled("Not in a class yet", Style::default().fg(palette.muted)),
    };
    frame.render_widget(Paragraph::new(joined).alignment(Alignment::Center), joined_area);

    let doubt_editing = features.doubts && editing(StudentInput::Doubt);
    if features.doubts {
        frame.render_widget(
            Paragraph::new(app.student.doubt_draft.clone()).block(input_block("Ask a doubt", doubt_editing)),
            doubt_area,
        );
    }

    let cursor = if code_editing {
        Some((code_area, app.student.class_code.chars().count()))
    } else if doubt_editing {
        Some((doubt_area, app.student.doubt_draft.chars().count()))
    } else {
        None
    };
    if let Some((field_area, len)) = cursor {
        let x = (len as u16).min(field_area.width.saturating_sub(3));
        frame.set_cursor_position((field_area.x + 1 + x, field_area.y + 1));
    }
}

fn render_alert(app: &App, frame: &mut Frame, area: Rect) {
    let message = app.alert.as_deref().unwrap_or_default();
    let popup_area = centered_rect(50, 6, area);

    // Clear the area behind the popup
    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Red))
        .title(" Alert ");

    let text = vec![
        Line::from(""),
        Line::from(Span::styled(message.to_string(), Style::default().fg(Color::White).bold())),
        Line::from(""),
        Line::from(Span::styled("Press Enter to continue", Style::default().fg(Color::DarkGray))),
    ];
    frame.render_widget(
        Paragraph::new(text).alignment(Alignment::Center).wrap(Wrap { trim: true }).block(block),
        popup_area,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use liveclass_core::{AppState, Brand, Config};
    use ratatui::{backend::TestBackend, Terminal};

    fn app() -> App {
        let config = Config::new();
        App::new(AppState::new(&config), config)
    }

    fn draw(app: &mut App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|frame| render(app, frame)).unwrap();
        let buffer = terminal.backend().buffer();
        buffer
            .content
            .chunks(buffer.area.width as usize)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_login_screen_renders_form() {
        let mut app = app();
        app.login.name = "Aman".to_string();
        app.login.code = "1234".to_string();
        let screen = draw(&mut app);
        assert!(screen.contains("EAGLEWISE"));
        assert!(screen.contains("Full Name"));
        assert!(screen.contains("Aman"));
        assert!(screen.contains("****"));
        assert!(!screen.contains("1234"));
        assert!(screen.contains("STUDENT"));
    }

    #[test]
    fn test_medquiz_login_switches_between_sign_in_and_sign_up() {
        let mut config = Config::new();
        config.brand = Brand::MedQuiz;
        let mut app = App::new(AppState::new(&config), config);

        let screen = draw(&mut app);
        assert!(screen.contains("Sign in to your account"));
        assert!(screen.contains(" SIGN IN "));
        assert!(screen.contains("Don't have an account? F2 Sign Up"));
        assert!(!screen.contains("TEACHER"));

        app.toggle_sign_up();
        let screen = draw(&mut app);
        assert!(screen.contains("Create a new account"));
        assert!(screen.contains(" GET STARTED "));
        assert!(screen.contains("Already have an account? F2 Sign In"));
        assert!(screen.contains("TEACHER"));
        assert!(screen.contains("STUDENT"));
    }

    #[test]
    fn test_eaglewise_login_has_no_sign_up_link() {
        let mut app = app();
        let screen = draw(&mut app);
        assert!(screen.contains(" LOGIN "));
        assert!(!screen.contains("Sign Up"));
        assert!(screen.contains("TEACHER"));
    }

    #[test]
    fn test_alert_is_drawn_over_the_view() {
        let mut app = app();
        app.show_alert("please enter your name");
        let screen = draw(&mut app);
        assert!(screen.contains("Alert"));
        assert!(screen.contains("please enter your name"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_loading_view_renders_while_pending() {
        let mut app = app();
        app.login.name = "Aman".to_string();
        app.login.code = "1234".to_string();
        app.submit_login();
        let screen = draw(&mut app);
        assert!(screen.contains("Syncing Data"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_dashboards_render() {
        let mut app = app();
        app.state.login("Priya", "T1", Role::Teacher).await.unwrap();
        app.sync_view();
        app.state.announce("Class starts now").unwrap();
        let screen = draw(&mut app);
        assert!(screen.contains("Teacher Dashboard"));
        assert!(screen.contains("Live Doubts (1)"));
        assert!(screen.contains("Structure of Nephron?"));
        assert!(screen.contains("Total Quizzes"));
        assert!(screen.contains("+91 XXXXX XXXXX"));

        app.logout();
        app.state.login("Aman", "1234", Role::Student).await.unwrap();
        app.sync_view();
        let screen = draw(&mut app);
        assert!(screen.contains("CLASS STARTS NOW"));
        assert!(screen.contains(" NEW "));
        assert!(screen.contains("AMAN"));

        app.acknowledge_announcement();
        let screen = draw(&mut app);
        assert!(screen.contains("CLASS STARTS NOW"));
        assert!(!screen.contains(" NEW "));
    }
}
