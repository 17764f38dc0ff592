use ratatui::widgets::ListState;
use tokio::task::JoinHandle;
use liveclass_core::{
    AppState, Brand, Config, Doubt, Role, Session, SessionError, ValidationError, View,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Editing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoginField {
    #[default]
    Name,
    Code,
    Role,
}

impl LoginField {
    /// Cycle forward; the role field is skipped while it is hidden.
    pub fn next(self, with_role: bool) -> Self {
        match self {
            LoginField::Name => LoginField::Code,
            LoginField::Code if with_role => LoginField::Role,
            LoginField::Code | LoginField::Role => LoginField::Name,
        }
    }

    pub fn prev(self, with_role: bool) -> Self {
        match self {
            LoginField::Name if with_role => LoginField::Role,
            LoginField::Name | LoginField::Role => LoginField::Code,
            LoginField::Code => LoginField::Name,
        }
    }
}

#[derive(Debug, Clone)]
pub struct LoginForm {
    pub name: String,
    pub code: String,
    pub role: Role,
    pub focus: LoginField,
    /// Sign-up rather than sign-in, for brands that tell them apart.
    pub sign_up: bool,
}

impl LoginForm {
    pub fn new(role: Role) -> Self {
        Self {
            name: String::new(),
            code: String::new(),
            role,
            focus: LoginField::Name,
            sign_up: false,
        }
    }

    /// Brands with a sign-up mode only offer the role picker there.
    pub fn shows_role(&self, brand: Brand) -> bool {
        !brand.has_sign_up() || self.sign_up
    }

    pub fn focus_next(&mut self, brand: Brand) {
        self.focus = self.focus.next(self.shows_role(brand));
    }

    pub fn focus_prev(&mut self, brand: Brand) {
        self.focus = self.focus.prev(self.shows_role(brand));
    }

    /// The text field that currently receives typed characters.
    pub fn focused_input(&mut self) -> Option<&mut String> {
        match self.focus {
            LoginField::Name => Some(&mut self.name),
            LoginField::Code => Some(&mut self.code),
            LoginField::Role => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TeacherInput {
    #[default]
    Announcement,
    QuizTitle,
}

/// Local state of the teacher dashboard. Reset on logout.
#[derive(Debug, Default)]
pub struct TeacherPanel {
    pub input: TeacherInput,
    pub announce_draft: String,
    pub doubt_state: ListState,
    pub active_doubt: Option<Doubt>,
    pub mic_on: bool,
    pub show_quiz_form: bool,
    pub quiz_title: String,
    pub quizzes: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StudentInput {
    #[default]
    ClassCode,
    Doubt,
}

/// Local state of the student view. Reset on logout.
#[derive(Debug, Default)]
pub struct StudentPanel {
    pub input: StudentInput,
    pub class_code: String,
    pub joined: Option<String>,
    pub doubt_draft: String,
    /// Last announcement revision the student has acknowledged.
    pub seen_revision: u64,
}

pub struct App {
    // Core state
    pub should_quit: bool,
    pub input_mode: InputMode,
    pub state: AppState,
    pub config: Config,

    /// View derived from the last session snapshot handled.
    pub view: View,

    // Per-view state
    pub login: LoginForm,
    pub teacher: TeacherPanel,
    pub student: StudentPanel,

    /// Blocking alert; swallows input until dismissed.
    pub alert: Option<String>,
    /// Transient one-line feedback in the footer.
    pub status: Option<String>,

    pub login_task: Option<JoinHandle<Result<Session, SessionError>>>,

    // Animation state
    pub animation_frame: u8, // 0-2 for ellipsis animation
}

impl App {
    pub fn new(state: AppState, config: Config) -> Self {
        let view = state.view();
        let login = LoginForm::new(config.default_role);
        Self {
            should_quit: false,
            input_mode: InputMode::Editing,
            state,
            config,
            view,
            login,
            teacher: TeacherPanel::default(),
            student: StudentPanel::default(),
            alert: None,
            status: None,
            login_task: None,
            animation_frame: 0,
        }
    }

    pub fn show_alert(&mut self, message: impl Into<String>) {
        let message = message.into();
        tracing::debug!(%message, "alert");
        self.alert = Some(message);
    }

    pub fn dismiss_alert(&mut self) {
        self.alert = None;
    }

    fn report(&mut self, err: SessionError) {
        if err.is_user_facing() {
            self.show_alert(err.to_string());
        }
    }

    // Session

    /// Submit the login form. Validation failures raise an alert and leave the
    /// session untouched.
    pub fn submit_login(&mut self) {
        let LoginForm { name, code, role, .. } = &self.login;
        match self.state.request_login(name, code, *role) {
            Ok(pending) => {
                if pending.is_joined() && self.login_task.is_some() {
                    return;
                }
                if let Some(previous) = self.login_task.take() {
                    previous.abort();
                }
                self.login_task = Some(tokio::spawn(pending.finish()));
                self.sync_view();
            }
            Err(e) => self.report(e),
        }
    }

    pub fn logout(&mut self) {
        if let Some(task) = self.login_task.take() {
            task.abort();
        }
        self.state.logout();
        self.sync_view();
    }

    /// Reap a finished login task.
    pub async fn poll_login_task(&mut self) {
        let finished = self.login_task.as_ref().is_some_and(|t| t.is_finished());
        if !finished {
            return;
        }
        if let Some(task) = self.login_task.take() {
            match task.await {
                Ok(Ok(_)) => {}
                Ok(Err(e)) => self.report(e),
                Err(e) if e.is_cancelled() => {}
                Err(e) => {
                    tracing::error!(error = %e, "login task failed");
                    self.show_alert("Login failed unexpectedly, please try again");
                }
            }
        }
        self.sync_view();
    }

    /// Re-derive the view from the session; resets local state on transitions.
    pub fn sync_view(&mut self) {
        let next = self.state.view();
        if next == self.view {
            return;
        }
        tracing::debug!(from = ?self.view, to = ?next, "view change");

        match next {
            View::Login => {
                self.teacher = TeacherPanel::default();
                self.student = StudentPanel::default();
                self.login.code.clear();
                self.input_mode = InputMode::Editing;
            }
            View::Teacher => {
                self.login = LoginForm::new(self.config.default_role);
                self.input_mode = InputMode::Normal;
                self.clamp_doubt_selection();
            }
            View::Student => {
                self.login = LoginForm::new(self.config.default_role);
                self.input_mode = InputMode::Normal;
            }
            View::Loading => {
                self.input_mode = InputMode::Normal;
            }
        }
        self.status = None;
        self.view = next;
    }

    /// Flip between sign-in and sign-up on brands that offer both.
    pub fn toggle_sign_up(&mut self) {
        if !self.config.brand.has_sign_up() {
            return;
        }
        self.login.sign_up = !self.login.sign_up;
        if !self.login.shows_role(self.config.brand) && self.login.focus == LoginField::Role {
            self.login.focus = LoginField::Name;
        }
    }

    pub fn signed_in_name(&self) -> Option<String> {
        self.state.session().display_name().map(str::to_string)
    }

    // Shared toggles

    pub fn toggle_theme(&mut self) {
        if self.config.features.theme_toggle {
            self.state.toggle_dark_mode();
        }
    }

    // Teacher dashboard

    pub fn send_announcement(&mut self) {
        let text = self.teacher.announce_draft.trim().to_string();
        match self.state.announce(&text) {
            Ok(()) => {
                self.teacher.announce_draft.clear();
                self.status = Some("Announcement sent".to_string());
            }
            Err(e) => self.report(e),
        }
    }

    pub fn doubt_nav_down(&mut self) {
        let len = self.state.doubts().len();
        if len > 0 {
            let i = self.teacher.doubt_state.selected().unwrap_or(0);
            self.teacher.doubt_state.select(Some((i + 1).min(len - 1)));
        }
    }

    pub fn doubt_nav_up(&mut self) {
        let i = self.teacher.doubt_state.selected().unwrap_or(0);
        self.teacher.doubt_state.select(Some(i.saturating_sub(1)));
    }

    /// Keep the doubt list selection inside the board after it changes.
    pub fn clamp_doubt_selection(&mut self) {
        let board = self.state.doubts();
        if board.is_empty() {
            self.teacher.doubt_state.select(None);
        } else {
            let i = self.teacher.doubt_state.selected().unwrap_or(0);
            self.teacher.doubt_state.select(Some(i.min(board.len() - 1)));
        }
        // a doubt solved elsewhere leaves the stage
        if let Some(active) = &self.teacher.active_doubt {
            if board.get(active.id).is_none() {
                self.teacher.active_doubt = None;
            }
        }
    }

    /// Put the selected doubt on the stage.
    pub fn stage_selected_doubt(&mut self) {
        let board = self.state.doubts();
        if let Some(i) = self.teacher.doubt_state.selected() {
            self.teacher.active_doubt = board.list().get(i).cloned();
        }
    }

    /// Mark the staged doubt as solved.
    pub fn solve_active_doubt(&mut self) {
        let Some(active) = self.teacher.active_doubt.take() else {
            return;
        };
        match self.state.resolve_doubt(active.id) {
            Ok(_) => {
                self.status = Some(format!("Solved: {}", active.text));
                self.clamp_doubt_selection();
            }
            Err(e) => {
                self.teacher.active_doubt = Some(active);
                self.report(e);
            }
        }
    }

    pub fn toggle_mic(&mut self) {
        if self.config.features.microphone {
            self.teacher.mic_on = !self.teacher.mic_on;
        }
    }

    pub fn toggle_quiz_form(&mut self) {
        if !self.config.features.quiz_panel {
            return;
        }
        self.teacher.show_quiz_form = !self.teacher.show_quiz_form;
        if self.teacher.show_quiz_form {
            self.teacher.input = TeacherInput::QuizTitle;
            self.input_mode = InputMode::Editing;
        } else {
            self.teacher.quiz_title.clear();
            self.input_mode = InputMode::Normal;
        }
    }

    pub fn create_quiz(&mut self) {
        let title = self.teacher.quiz_title.trim().to_string();
        if title.is_empty() {
            self.show_alert("Please enter a quiz title");
            return;
        }
        tracing::info!(%title, "quiz created");
        self.teacher.quizzes.push(title);
        self.teacher.quiz_title.clear();
        self.teacher.show_quiz_form = false;
        self.input_mode = InputMode::Normal;
    }

    pub fn total_quizzes(&self) -> u32 {
        self.config.stats.total_quizzes + self.teacher.quizzes.len() as u32
    }

    // Student view

    /// True when the banner holds an announcement the student has not
    /// acknowledged yet.
    pub fn announcement_is_new(&self) -> bool {
        self.state.announcement().revision > self.student.seen_revision
    }

    pub fn acknowledge_announcement(&mut self) {
        self.student.seen_revision = self.state.announcement().revision;
    }

    pub fn join_class(&mut self) {
        let code = self.student.class_code.trim().to_string();
        if code.is_empty() {
            self.report(ValidationError::MissingClassCode.into());
            return;
        }
        tracing::info!(class_code = %code, "joined class");
        self.student.joined = Some(code);
        self.student.class_code.clear();
        self.input_mode = InputMode::Normal;
    }

    pub fn raise_doubt(&mut self) {
        match self.state.raise_doubt(&self.student.doubt_draft) {
            Ok(_) => {
                self.student.doubt_draft.clear();
                self.status = Some("Doubt sent to your teacher".to_string());
                self.input_mode = InputMode::Normal;
            }
            Err(e) => self.report(e),
        }
    }

    /// Tick animation frame (called by Tick event)
    pub fn tick_animation(&mut self) {
        if self.view == View::Loading {
            self.animation_frame = (self.animation_frame + 1) % 3;
        }
    }
}
